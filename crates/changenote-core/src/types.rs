//! Core types for changenote

use serde::{Deserialize, Serialize};

use crate::error::VersionError;

/// A release version identifier.
///
/// The identifier is opaque: it is substituted verbatim for the placeholder
/// and handed unchanged to the release finalizer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    uid: String,
}

impl Version {
    /// Create a version from its identifier
    pub fn new(uid: impl Into<String>) -> Result<Self, VersionError> {
        let uid = uid.into();
        if uid.trim().is_empty() {
            return Err(VersionError::Empty);
        }
        Ok(Self { uid })
    }

    /// Returns the version identifier
    pub fn uid(&self) -> &str {
        &self.uid
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.uid)
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(uid: String) -> Result<Self, Self::Error> {
        Self::new(uid)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.uid
    }
}

impl std::str::FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A changelog section that change notes are grouped under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Unique identifier
    pub uid: String,
    /// Human readable title
    pub title: String,
    /// Display position, lowest first
    pub sort_order: u32,
}

impl Section {
    /// Create a new section
    pub fn new(uid: impl Into<String>, title: impl Into<String>, sort_order: u32) -> Self {
        Self {
            uid: uid.into(),
            title: title.into(),
            sort_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_uid() {
        let version = Version::new("21.3").unwrap();
        assert_eq!(version.uid(), "21.3");
        assert_eq!(version.to_string(), "21.3");
    }

    #[test]
    fn test_version_deserialize_checks_uid() {
        let version: Version = serde_yaml::from_str("'21.0'").unwrap();
        assert_eq!(version.uid(), "21.0");
        assert!(serde_yaml::from_str::<Version>("''").is_err());
        assert!(serde_yaml::from_str::<Version>("'   '").is_err());
    }

    #[test]
    fn test_version_rejects_empty() {
        assert!(Version::new("").is_err());
        assert!("   ".parse::<Version>().is_err());
    }
}
