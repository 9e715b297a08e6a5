use crate::transport::request::{ApiResponse, Request};
use crate::types::subscribers::Selector;
use crate::{
    Error, GroupId, Imsi, ImsiBatch, RegisterSubscriber, SpeedClass, SubscriberFilter, TagName,
    Tags,
};
use http::Method;
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// Default page size for subscriber listings.
pub const DEFAULT_LIST_LIMIT: u32 = 1024;

fn list_request(limit: u32, filter: &SubscriberFilter) -> Request {
    match filter.selector() {
        // A single-IMSI lookup already narrows to one record, so no limit.
        Some(Selector::Imsi(imsi)) => Request::get(["subscribers", imsi.as_str()]),
        Some(Selector::Status(status)) => Request::get(["subscribers"])
            .query_pair("limit", limit.to_string())
            .query_pair("status_filter", status.as_str()),
        Some(Selector::SpeedClass(speed_class)) => Request::get(["subscribers"])
            .query_pair("limit", limit.to_string())
            .query_pair("speed_class_filter", speed_class.as_str()),
        None => Request::get(["subscribers"]).query_pair("limit", limit.to_string()),
    }
}

fn register_body(params: &RegisterSubscriber) -> Value {
    let mut body = json!({
        "registrationSecret": params.registration_secret,
        "tags": params.tags,
    });
    if let Some(group) = &params.group_id {
        body["groupId"] = json!(group.as_str());
    }
    body
}

fn operation_request(method: Method, imsi: &Imsi, suffix: &[&str], body: Option<&Value>) -> Request {
    let mut segments = vec!["subscribers".to_owned(), imsi.as_str().to_owned()];
    segments.extend(suffix.iter().map(|s| (*s).to_owned()));
    let mut req = Request::new(method, segments);
    if let Some(body) = body {
        req = req.json_body(body.clone());
    }
    req
}

/// SIM subscriber APIs.
#[derive(Clone)]
#[cfg(feature = "async")]
pub struct SubscribersService {
    client: crate::Client,
}

#[cfg(feature = "async")]
impl SubscribersService {
    pub(crate) fn new(client: crate::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "async")]
impl SubscribersService {
    /// `GET /subscribers?limit=<n>`, or `GET /subscribers/<imsi>` when the
    /// filter selects one IMSI.
    ///
    /// At most one filter selector applies, priority
    /// imsi > status > speed class.
    pub async fn list(&self, limit: u32, filter: &SubscriberFilter) -> Result<ApiResponse, Error> {
        self.client.send(list_request(limit, filter)).await
    }

    /// `POST /subscribers/<imsi>/register`
    ///
    /// An empty IMSI is a no-op: an empty object comes back without any
    /// network round-trip.
    pub async fn register(
        &self,
        imsi: impl Into<Imsi>,
        params: &RegisterSubscriber,
    ) -> Result<ApiResponse, Error> {
        let imsi = imsi.into();
        if imsi.is_empty() {
            return Ok(ApiResponse::Json(json!({})));
        }
        let req = Request::post(["subscribers", imsi.as_str(), "register"])
            .json_body(register_body(params));
        self.client.send(req).await
    }

    /// `POST /subscribers/<imsi>/activate`, once per IMSI.
    pub async fn activate(
        &self,
        imsis: impl Into<ImsiBatch>,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        self.operate(imsis.into(), Method::POST, &["activate"], None)
            .await
    }

    /// `POST /subscribers/<imsi>/deactivate`, once per IMSI.
    pub async fn deactivate(
        &self,
        imsis: impl Into<ImsiBatch>,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        self.operate(imsis.into(), Method::POST, &["deactivate"], None)
            .await
    }

    /// `POST /subscribers/<imsi>/terminate`, once per IMSI.
    pub async fn terminate(
        &self,
        imsis: impl Into<ImsiBatch>,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        self.operate(imsis.into(), Method::POST, &["terminate"], None)
            .await
    }

    /// `POST /subscribers/<imsi>/enable_terminate`, once per IMSI.
    pub async fn enable_termination(
        &self,
        imsis: impl Into<ImsiBatch>,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        self.operate(imsis.into(), Method::POST, &["enable_terminate"], None)
            .await
    }

    /// `POST /subscribers/<imsi>/disable_terminate`, once per IMSI.
    pub async fn disable_termination(
        &self,
        imsis: impl Into<ImsiBatch>,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        self.operate(imsis.into(), Method::POST, &["disable_terminate"], None)
            .await
    }

    /// `PUT /subscribers/<imsi>/tags` with the tag mapping as body, once per
    /// IMSI.
    pub async fn update_tags(
        &self,
        imsis: impl Into<ImsiBatch>,
        tags: &Tags,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        let body = json!(tags);
        self.operate(imsis.into(), Method::PUT, &["tags"], Some(&body))
            .await
    }

    /// `DELETE /subscribers/<imsi>/tags/<tag>`, once per IMSI. The tag name
    /// is percent-encoded as a single path segment.
    pub async fn delete_tag(
        &self,
        imsis: impl Into<ImsiBatch>,
        tag: impl Into<TagName>,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        let tag = tag.into();
        self.operate(
            imsis.into(),
            Method::DELETE,
            &["tags", tag.as_str()],
            None,
        )
        .await
    }

    /// `POST /subscribers/<imsi>/update_speed_class`, once per IMSI.
    pub async fn update_speed_class(
        &self,
        imsis: impl Into<ImsiBatch>,
        speed_class: SpeedClass,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        let body = json!({ "speedClass": speed_class });
        self.operate(imsis.into(), Method::POST, &["update_speed_class"], Some(&body))
            .await
    }

    /// `POST /subscribers/<imsi>/set_expiry_time`, once per IMSI.
    /// `expiry_time` is epoch seconds.
    pub async fn set_expiry_time(
        &self,
        imsis: impl Into<ImsiBatch>,
        expiry_time: i64,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        let body = json!({ "expiryTime": expiry_time });
        self.operate(imsis.into(), Method::POST, &["set_expiry_time"], Some(&body))
            .await
    }

    /// `POST /subscribers/<imsi>/unset_expiry_time`, once per IMSI.
    pub async fn unset_expiry_time(
        &self,
        imsis: impl Into<ImsiBatch>,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        self.operate(imsis.into(), Method::POST, &["unset_expiry_time"], None)
            .await
    }

    /// `POST /subscribers/<imsi>/set_group`, once per IMSI.
    pub async fn set_group(
        &self,
        imsis: impl Into<ImsiBatch>,
        group_id: impl Into<GroupId>,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        let group_id = group_id.into();
        let body = json!({ "groupId": group_id.as_str() });
        self.operate(imsis.into(), Method::POST, &["set_group"], Some(&body))
            .await
    }

    /// `POST /subscribers/<imsi>/unset_group`, once per IMSI.
    pub async fn unset_group(
        &self,
        imsis: impl Into<ImsiBatch>,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        self.operate(imsis.into(), Method::POST, &["unset_group"], None)
            .await
    }

    /// Sequential per-IMSI fan-out. Fail-fast: the first failing call aborts
    /// the batch and the error propagates; on success the mapping holds one
    /// entry per requested IMSI.
    async fn operate(
        &self,
        imsis: ImsiBatch,
        method: Method,
        suffix: &[&str],
        body: Option<&Value>,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        let mut results = BTreeMap::new();
        for imsi in imsis.iter() {
            let req = operation_request(method.clone(), imsi, suffix, body);
            let resp = self.client.send(req).await?;
            results.insert(imsi.clone(), resp);
        }
        Ok(results)
    }
}

/// SIM subscriber APIs (blocking).
#[cfg(feature = "blocking")]
#[derive(Clone)]
pub struct BlockingSubscribersService {
    client: crate::BlockingClient,
}

#[cfg(feature = "blocking")]
impl BlockingSubscribersService {
    pub(crate) fn new(client: crate::BlockingClient) -> Self {
        Self { client }
    }
}

#[cfg(feature = "blocking")]
impl BlockingSubscribersService {
    /// `GET /subscribers?limit=<n>`, or `GET /subscribers/<imsi>` when the
    /// filter selects one IMSI.
    pub fn list(&self, limit: u32, filter: &SubscriberFilter) -> Result<ApiResponse, Error> {
        self.client.send(list_request(limit, filter))
    }

    /// `POST /subscribers/<imsi>/register`
    ///
    /// An empty IMSI is a no-op: an empty object comes back without any
    /// network round-trip.
    pub fn register(
        &self,
        imsi: impl Into<Imsi>,
        params: &RegisterSubscriber,
    ) -> Result<ApiResponse, Error> {
        let imsi = imsi.into();
        if imsi.is_empty() {
            return Ok(ApiResponse::Json(json!({})));
        }
        let req = Request::post(["subscribers", imsi.as_str(), "register"])
            .json_body(register_body(params));
        self.client.send(req)
    }

    /// `POST /subscribers/<imsi>/activate`, once per IMSI.
    pub fn activate(
        &self,
        imsis: impl Into<ImsiBatch>,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        self.operate(imsis.into(), Method::POST, &["activate"], None)
    }

    /// `POST /subscribers/<imsi>/deactivate`, once per IMSI.
    pub fn deactivate(
        &self,
        imsis: impl Into<ImsiBatch>,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        self.operate(imsis.into(), Method::POST, &["deactivate"], None)
    }

    /// `POST /subscribers/<imsi>/terminate`, once per IMSI.
    pub fn terminate(
        &self,
        imsis: impl Into<ImsiBatch>,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        self.operate(imsis.into(), Method::POST, &["terminate"], None)
    }

    /// `POST /subscribers/<imsi>/enable_terminate`, once per IMSI.
    pub fn enable_termination(
        &self,
        imsis: impl Into<ImsiBatch>,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        self.operate(imsis.into(), Method::POST, &["enable_terminate"], None)
    }

    /// `POST /subscribers/<imsi>/disable_terminate`, once per IMSI.
    pub fn disable_termination(
        &self,
        imsis: impl Into<ImsiBatch>,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        self.operate(imsis.into(), Method::POST, &["disable_terminate"], None)
    }

    /// `PUT /subscribers/<imsi>/tags` with the tag mapping as body, once per
    /// IMSI.
    pub fn update_tags(
        &self,
        imsis: impl Into<ImsiBatch>,
        tags: &Tags,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        let body = json!(tags);
        self.operate(imsis.into(), Method::PUT, &["tags"], Some(&body))
    }

    /// `DELETE /subscribers/<imsi>/tags/<tag>`, once per IMSI.
    pub fn delete_tag(
        &self,
        imsis: impl Into<ImsiBatch>,
        tag: impl Into<TagName>,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        let tag = tag.into();
        self.operate(imsis.into(), Method::DELETE, &["tags", tag.as_str()], None)
    }

    /// `POST /subscribers/<imsi>/update_speed_class`, once per IMSI.
    pub fn update_speed_class(
        &self,
        imsis: impl Into<ImsiBatch>,
        speed_class: SpeedClass,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        let body = json!({ "speedClass": speed_class });
        self.operate(imsis.into(), Method::POST, &["update_speed_class"], Some(&body))
    }

    /// `POST /subscribers/<imsi>/set_expiry_time`, once per IMSI.
    /// `expiry_time` is epoch seconds.
    pub fn set_expiry_time(
        &self,
        imsis: impl Into<ImsiBatch>,
        expiry_time: i64,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        let body = json!({ "expiryTime": expiry_time });
        self.operate(imsis.into(), Method::POST, &["set_expiry_time"], Some(&body))
    }

    /// `POST /subscribers/<imsi>/unset_expiry_time`, once per IMSI.
    pub fn unset_expiry_time(
        &self,
        imsis: impl Into<ImsiBatch>,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        self.operate(imsis.into(), Method::POST, &["unset_expiry_time"], None)
    }

    /// `POST /subscribers/<imsi>/set_group`, once per IMSI.
    pub fn set_group(
        &self,
        imsis: impl Into<ImsiBatch>,
        group_id: impl Into<GroupId>,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        let group_id = group_id.into();
        let body = json!({ "groupId": group_id.as_str() });
        self.operate(imsis.into(), Method::POST, &["set_group"], Some(&body))
    }

    /// `POST /subscribers/<imsi>/unset_group`, once per IMSI.
    pub fn unset_group(
        &self,
        imsis: impl Into<ImsiBatch>,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        self.operate(imsis.into(), Method::POST, &["unset_group"], None)
    }

    /// Sequential per-IMSI fan-out. Fail-fast: the first failing call aborts
    /// the batch and the error propagates; on success the mapping holds one
    /// entry per requested IMSI.
    fn operate(
        &self,
        imsis: ImsiBatch,
        method: Method,
        suffix: &[&str],
        body: Option<&Value>,
    ) -> Result<BTreeMap<Imsi, ApiResponse>, Error> {
        let mut results = BTreeMap::new();
        for imsi in imsis.iter() {
            let req = operation_request(method.clone(), imsi, suffix, body);
            let resp = self.client.send(req)?;
            results.insert(imsi.clone(), resp);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SubscriberStatus;

    #[test]
    fn list_request_with_imsi_filter_targets_one_record() {
        let filter = SubscriberFilter {
            imsi: Some("001010000000001".into()),
            status: Some(SubscriberStatus::Active),
            speed_class: Some(SpeedClass::S1Fast),
        };
        let req = list_request(10, &filter);
        assert_eq!(req.segments, vec!["subscribers", "001010000000001"]);
        assert!(req.query.is_empty());
    }

    #[test]
    fn list_request_with_status_filter_keeps_limit() {
        let filter = SubscriberFilter::by_status(SubscriberStatus::Active);
        let req = list_request(10, &filter);
        assert_eq!(req.segments, vec!["subscribers"]);
        assert_eq!(
            req.query,
            vec![
                ("limit".to_owned(), "10".to_owned()),
                ("status_filter".to_owned(), "active".to_owned()),
            ]
        );
    }

    #[test]
    fn list_request_without_filter_only_sets_limit() {
        let req = list_request(DEFAULT_LIST_LIMIT, &SubscriberFilter::default());
        assert_eq!(
            req.query,
            vec![("limit".to_owned(), "1024".to_owned())]
        );
    }

    #[test]
    fn register_body_includes_group_only_when_set() {
        let params = RegisterSubscriber::new("secret").tag("env", "prod");
        let body = register_body(&params);
        assert_eq!(body["registrationSecret"], "secret");
        assert_eq!(body["tags"]["env"], "prod");
        assert!(body.get("groupId").is_none());

        let body = register_body(&RegisterSubscriber::new("secret").group("g1"));
        assert_eq!(body["groupId"], "g1");
    }

    #[test]
    fn operation_request_builds_imsi_scoped_path() {
        let imsi = Imsi::new("001010000000001");
        let req = operation_request(Method::POST, &imsi, &["activate"], None);
        assert_eq!(req.segments, vec!["subscribers", "001010000000001", "activate"]);
        assert!(req.body.is_none());

        let body = json!({ "speedClass": "s1.fast" });
        let req = operation_request(Method::POST, &imsi, &["update_speed_class"], Some(&body));
        assert_eq!(req.body, Some(body));
    }
}
