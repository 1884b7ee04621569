//! API version tags.
//!
//! Every operation family pins a version tag such as `2.0` or
//! `2.0-preview.1`. The tag travels as a parameter of the `Accept` media
//! type and is negotiated against the version range the server advertises
//! for the resource location.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// An API version tag: the `api-version` pair plus an optional preview
/// marker and resource version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiVersion {
    major: u32,
    minor: u32,
    resource_version: u32,
    preview: bool,
}

impl ApiVersion {
    /// A released version tag, e.g. `ApiVersion::new(2, 0)` for "2.0".
    #[must_use]
    pub fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            resource_version: 0,
            preview: false,
        }
    }

    /// A preview version tag, e.g. `ApiVersion::preview(2, 0, 1)` for
    /// "2.0-preview.1".
    #[must_use]
    pub fn preview(major: u32, minor: u32, resource_version: u32) -> Self {
        Self {
            major,
            minor,
            resource_version,
            preview: true,
        }
    }

    /// The `major.minor` pair, used for range comparison.
    #[must_use]
    pub fn api_pair(&self) -> (u32, u32) {
        (self.major, self.minor)
    }

    /// The resource version (0 when unspecified).
    #[must_use]
    pub fn resource_version(&self) -> u32 {
        self.resource_version
    }

    /// Whether this tag is marked preview.
    #[must_use]
    pub fn is_preview(&self) -> bool {
        self.preview
    }

    /// Return the same api pair with the given preview flag and resource
    /// version, for negotiation results.
    #[must_use]
    pub(crate) fn with(&self, resource_version: u32, preview: bool) -> Self {
        Self {
            major: self.major,
            minor: self.minor,
            resource_version,
            preview,
        }
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if self.preview {
            write!(f, "-preview")?;
            if self.resource_version > 0 {
                write!(f, ".{}", self.resource_version)?;
            }
        }
        Ok(())
    }
}

impl FromStr for ApiVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (pair, suffix) = match s.split_once('-') {
            Some((pair, suffix)) => (pair, Some(suffix)),
            None => (s, None),
        };

        let (major, minor) = parse_api_pair(pair)
            .ok_or_else(|| Error::Configuration(format!("invalid API version: {s}")))?;

        match suffix {
            None => Ok(Self::new(major, minor)),
            Some(suffix) => {
                let resource_version = match suffix.split_once('.') {
                    Some(("preview", rv)) => rv
                        .parse::<u32>()
                        .map_err(|_| Error::Configuration(format!("invalid API version: {s}")))?,
                    None if suffix == "preview" => 0,
                    _ => return Err(Error::Configuration(format!("invalid API version: {s}"))),
                };
                Ok(Self::preview(major, minor, resource_version))
            }
        }
    }
}

/// Parse a `major.minor` version pair such as "2.0".
pub(crate) fn parse_api_pair(s: &str) -> Option<(u32, u32)> {
    let (major, minor) = s.split_once('.')?;
    Some((major.parse().ok()?, minor.parse().ok()?))
}
