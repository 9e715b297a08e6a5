//! Request parameters for the subscriber APIs.

use crate::types::common::{GroupId, Imsi, SpeedClass, SubscriberStatus, Tags};

/// Narrows a subscriber listing.
///
/// Selectors are mutually exclusive: when more than one is set, only the
/// highest-priority one applies: IMSI beats status beats speed class.
#[derive(Debug, Clone, Default)]
pub struct SubscriberFilter {
    pub imsi: Option<Imsi>,
    pub status: Option<SubscriberStatus>,
    pub speed_class: Option<SpeedClass>,
}

impl SubscriberFilter {
    #[must_use]
    pub fn by_imsi(imsi: impl Into<Imsi>) -> Self {
        Self {
            imsi: Some(imsi.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn by_status(status: SubscriberStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn by_speed_class(speed_class: SpeedClass) -> Self {
        Self {
            speed_class: Some(speed_class),
            ..Self::default()
        }
    }

    pub(crate) fn selector(&self) -> Option<Selector<'_>> {
        if let Some(imsi) = &self.imsi {
            Some(Selector::Imsi(imsi))
        } else if let Some(status) = self.status {
            Some(Selector::Status(status))
        } else {
            self.speed_class.map(Selector::SpeedClass)
        }
    }
}

pub(crate) enum Selector<'a> {
    Imsi(&'a Imsi),
    Status(SubscriberStatus),
    SpeedClass(SpeedClass),
}

/// Parameters for `POST /subscribers/<imsi>/register`.
#[derive(Debug, Clone, Default)]
pub struct RegisterSubscriber {
    pub registration_secret: String,
    /// Included in the request body only when set.
    pub group_id: Option<GroupId>,
    pub tags: Tags,
}

impl RegisterSubscriber {
    #[must_use]
    pub fn new(registration_secret: impl Into<String>) -> Self {
        Self {
            registration_secret: registration_secret.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn group(mut self, group_id: impl Into<GroupId>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    #[must_use]
    pub fn tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(name.into(), value.into());
        self
    }
}
