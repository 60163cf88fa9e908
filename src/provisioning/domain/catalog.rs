//! Closed enumerations of deployable regions and instance sizes.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a region string is not in the supported catalogue.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown region: {0}")]
pub struct UnknownRegionError(pub String);

/// Error returned when an instance size string is not in the supported
/// catalogue.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown instance size: {0}")]
pub struct UnknownInstanceSizeError(pub String);

/// Cloud region a deployment may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// US East (N. Virginia).
    #[serde(rename = "us-east-1")]
    UsEast1,
    /// US East (Ohio).
    #[serde(rename = "us-east-2")]
    UsEast2,
    /// US West (N. California).
    #[serde(rename = "us-west-1")]
    UsWest1,
    /// US West (Oregon).
    #[serde(rename = "us-west-2")]
    UsWest2,
    /// Canada (Central).
    #[serde(rename = "ca-central-1")]
    CaCentral1,
    /// Europe (Ireland).
    #[serde(rename = "eu-west-1")]
    EuWest1,
    /// Europe (London).
    #[serde(rename = "eu-west-2")]
    EuWest2,
    /// Europe (Frankfurt).
    #[serde(rename = "eu-central-1")]
    EuCentral1,
    /// Asia Pacific (Mumbai).
    #[serde(rename = "ap-south-1")]
    ApSouth1,
    /// Asia Pacific (Singapore).
    #[serde(rename = "ap-southeast-1")]
    ApSoutheast1,
    /// Asia Pacific (Sydney).
    #[serde(rename = "ap-southeast-2")]
    ApSoutheast2,
    /// Asia Pacific (Tokyo).
    #[serde(rename = "ap-northeast-1")]
    ApNortheast1,
    /// South America (São Paulo).
    #[serde(rename = "sa-east-1")]
    SaEast1,
}

impl Region {
    /// Every supported region, in catalogue order.
    pub const ALL: [Self; 13] = [
        Self::UsEast1,
        Self::UsEast2,
        Self::UsWest1,
        Self::UsWest2,
        Self::CaCentral1,
        Self::EuWest1,
        Self::EuWest2,
        Self::EuCentral1,
        Self::ApSouth1,
        Self::ApSoutheast1,
        Self::ApSoutheast2,
        Self::ApNortheast1,
        Self::SaEast1,
    ];

    /// Returns the canonical provider code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UsEast1 => "us-east-1",
            Self::UsEast2 => "us-east-2",
            Self::UsWest1 => "us-west-1",
            Self::UsWest2 => "us-west-2",
            Self::CaCentral1 => "ca-central-1",
            Self::EuWest1 => "eu-west-1",
            Self::EuWest2 => "eu-west-2",
            Self::EuCentral1 => "eu-central-1",
            Self::ApSouth1 => "ap-south-1",
            Self::ApSoutheast1 => "ap-southeast-1",
            Self::ApSoutheast2 => "ap-southeast-2",
            Self::ApNortheast1 => "ap-northeast-1",
            Self::SaEast1 => "sa-east-1",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Region {
    type Error = UnknownRegionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|region| region.as_str() == normalized)
            .ok_or_else(|| UnknownRegionError(value.to_owned()))
    }
}

/// Compute instance size offered to operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstanceSize {
    /// `t2.micro`.
    #[serde(rename = "t2.micro")]
    T2Micro,
    /// `t2.small`.
    #[serde(rename = "t2.small")]
    T2Small,
    /// `t2.medium`.
    #[serde(rename = "t2.medium")]
    T2Medium,
    /// `t3.micro`.
    #[serde(rename = "t3.micro")]
    T3Micro,
    /// `t3.small`.
    #[serde(rename = "t3.small")]
    T3Small,
    /// `t3.medium`.
    #[serde(rename = "t3.medium")]
    T3Medium,
    /// `t3.large`.
    #[serde(rename = "t3.large")]
    T3Large,
}

impl InstanceSize {
    /// Every supported instance size, smallest first within each family.
    pub const ALL: [Self; 7] = [
        Self::T2Micro,
        Self::T2Small,
        Self::T2Medium,
        Self::T3Micro,
        Self::T3Small,
        Self::T3Medium,
        Self::T3Large,
    ];

    /// Returns the canonical provider code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::T2Micro => "t2.micro",
            Self::T2Small => "t2.small",
            Self::T2Medium => "t2.medium",
            Self::T3Micro => "t3.micro",
            Self::T3Small => "t3.small",
            Self::T3Medium => "t3.medium",
            Self::T3Large => "t3.large",
        }
    }
}

impl fmt::Display for InstanceSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for InstanceSize {
    type Error = UnknownInstanceSizeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|size| size.as_str() == normalized)
            .ok_or_else(|| UnknownInstanceSizeError(value.to_owned()))
    }
}
