//! Identifiers and enumerations shared across the SORACOM APIs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Subscriber tags: a plain name → value mapping.
pub type Tags = BTreeMap<String, String>;

/// An IMSI: the SIM identifier every subscriber operation is keyed by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Imsi(String);

impl Imsi {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Imsi {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Imsi {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// One or many IMSIs, for the lifecycle operations that fan out per SIM.
///
/// Everything a caller is likely to hold converts into a batch: a single
/// [`Imsi`], a string, or any list of either.
#[derive(Debug, Clone, Default)]
pub struct ImsiBatch(Vec<Imsi>);

impl ImsiBatch {
    #[must_use]
    pub fn as_slice(&self) -> &[Imsi] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Imsi> {
        self.0.iter()
    }
}

impl From<Imsi> for ImsiBatch {
    fn from(value: Imsi) -> Self {
        Self(vec![value])
    }
}

impl From<&str> for ImsiBatch {
    fn from(value: &str) -> Self {
        Self(vec![Imsi::new(value)])
    }
}

impl From<String> for ImsiBatch {
    fn from(value: String) -> Self {
        Self(vec![Imsi::new(value)])
    }
}

impl From<Vec<Imsi>> for ImsiBatch {
    fn from(value: Vec<Imsi>) -> Self {
        Self(value)
    }
}

impl From<Vec<String>> for ImsiBatch {
    fn from(value: Vec<String>) -> Self {
        Self(value.into_iter().map(Imsi::new).collect())
    }
}

impl From<Vec<&str>> for ImsiBatch {
    fn from(value: Vec<&str>) -> Self {
        Self(value.into_iter().map(Imsi::new).collect())
    }
}

impl From<&[&str]> for ImsiBatch {
    fn from(value: &[&str]) -> Self {
        Self(value.iter().copied().map(Imsi::new).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ImsiBatch {
    fn from(value: [&str; N]) -> Self {
        Self(value.into_iter().map(Imsi::new).collect())
    }
}

/// A subscriber group id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GroupId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for GroupId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// A tag name (used as its own URL segment on delete).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagName(String);

impl TagName {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TagName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TagName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Subscriber lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriberStatus {
    Active,
    Inactive,
    Ready,
    Instock,
    Shipped,
    Suspended,
    Terminated,
}

impl SubscriberStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Ready => "ready",
            Self::Instock => "instock",
            Self::Shipped => "shipped",
            Self::Suspended => "suspended",
            Self::Terminated => "terminated",
        }
    }
}

/// Subscriber throughput tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedClass {
    #[serde(rename = "s1.minimum")]
    S1Minimum,
    #[serde(rename = "s1.slow")]
    S1Slow,
    #[serde(rename = "s1.standard")]
    S1Standard,
    #[serde(rename = "s1.fast")]
    S1Fast,
}

impl SpeedClass {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S1Minimum => "s1.minimum",
            Self::S1Slow => "s1.slow",
            Self::S1Standard => "s1.standard",
            Self::S1Fast => "s1.fast",
        }
    }
}
