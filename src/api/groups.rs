use crate::transport::request::{ApiResponse, Request};
use crate::{Error, GroupId};

/// Subscriber group APIs.
#[derive(Clone)]
#[cfg(feature = "async")]
pub struct GroupsService {
    client: crate::Client,
}

#[cfg(feature = "async")]
impl GroupsService {
    pub(crate) fn new(client: crate::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "async")]
impl GroupsService {
    /// `GET /groups`
    pub async fn list(&self) -> Result<ApiResponse, Error> {
        self.client.send(Request::get(["groups"])).await
    }

    /// `GET /groups/<group_id>`
    pub async fn get(&self, group_id: impl Into<GroupId>) -> Result<ApiResponse, Error> {
        let group_id = group_id.into();
        self.client
            .send(Request::get(["groups", group_id.as_str()]))
            .await
    }
}

/// Subscriber group APIs (blocking).
#[cfg(feature = "blocking")]
#[derive(Clone)]
pub struct BlockingGroupsService {
    client: crate::BlockingClient,
}

#[cfg(feature = "blocking")]
impl BlockingGroupsService {
    pub(crate) fn new(client: crate::BlockingClient) -> Self {
        Self { client }
    }
}

#[cfg(feature = "blocking")]
impl BlockingGroupsService {
    /// `GET /groups`
    pub fn list(&self) -> Result<ApiResponse, Error> {
        self.client.send(Request::get(["groups"]))
    }

    /// `GET /groups/<group_id>`
    pub fn get(&self, group_id: impl Into<GroupId>) -> Result<ApiResponse, Error> {
        let group_id = group_id.into();
        self.client.send(Request::get(["groups", group_id.as_str()]))
    }
}
