use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::model::ConfigurationDocument;

/// Schema format version of a deserialized document, verbatim.
pub fn extract_version(document: &ConfigurationDocument) -> &str {
    &document.version
}

/// Numeric `major.minor.patch` view of a format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct FormatVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl FormatVersion {
    /// Parse `10.1.0`, `10.1` or `10`. Missing components are zero; any
    /// non-numeric component (for example `10.1.0-h3`) yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.trim().split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next().map_or(Some(0), |p| p.parse().ok())?;
        let patch = parts.next().map_or(Some(0), |p| p.parse().ok())?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self {
            major,
            minor,
            patch,
        })
    }

    pub fn of(document: &ConfigurationDocument) -> Option<Self> {
        Self::parse(extract_version(document))
    }
}

impl Display for FormatVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
