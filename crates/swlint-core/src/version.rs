//! Shopware platform version handling
//!
//! Shopware versions carry four numeric segments (`6.7.0.0`). Short forms
//! are zero-extended, so `6.7` and `6.7.0.0` compare equal. Ordering is
//! segment-wise, which is all the rule version gate needs.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum VersionError {
    #[error("empty version string")]
    Empty,

    #[error("version has more than four segments: {0}")]
    TooManySegments(String),

    #[error("invalid version segment `{0}`")]
    InvalidSegment(String),
}

/// A four-segment Shopware platform version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShopwareVersion {
    segments: [u16; 4],
}

impl ShopwareVersion {
    pub const fn new(major: u16, minor: u16, patch: u16, build: u16) -> Self {
        Self {
            segments: [major, minor, patch, build],
        }
    }

    pub fn segments(&self) -> [u16; 4] {
        self.segments
    }
}

impl FromStr for ShopwareVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(VersionError::Empty);
        }

        let mut segments = [0u16; 4];
        let mut count = 0;

        for part in s.split('.') {
            if count == 4 {
                return Err(VersionError::TooManySegments(s.to_string()));
            }
            segments[count] = part
                .parse::<u16>()
                .map_err(|_| VersionError::InvalidSegment(part.to_string()))?;
            count += 1;
        }

        Ok(Self { segments })
    }
}

impl fmt::Display for ShopwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.segments;
        write!(f, "{a}.{b}.{c}.{d}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> ShopwareVersion {
        s.parse().unwrap()
    }

    #[test]
    fn parses_full_version() {
        assert_eq!(v("6.7.0.0"), ShopwareVersion::new(6, 7, 0, 0));
    }

    #[test]
    fn short_forms_zero_extend() {
        assert_eq!(v("6.7"), v("6.7.0.0"));
        assert_eq!(v("6"), ShopwareVersion::new(6, 0, 0, 0));
    }

    #[test]
    fn segment_wise_ordering() {
        assert!(v("6.6.9.9") < v("6.7.0.0"));
        assert!(v("6.7.0.0") >= v("6.7"));
        assert!(v("6.7.0.1") > v("6.7.0.0"));
        assert!(v("6.10.0.0") > v("6.9.0.0"));
    }

    #[test]
    fn rejects_junk() {
        assert_eq!("".parse::<ShopwareVersion>(), Err(VersionError::Empty));
        assert!(matches!(
            "6.x.0.0".parse::<ShopwareVersion>(),
            Err(VersionError::InvalidSegment(_))
        ));
        assert!(matches!(
            "6.7.0.0.1".parse::<ShopwareVersion>(),
            Err(VersionError::TooManySegments(_))
        ));
    }

    #[test]
    fn display_is_four_segments() {
        assert_eq!(v("6.7").to_string(), "6.7.0.0");
    }
}
