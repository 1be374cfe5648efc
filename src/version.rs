//! Dotted `major.minor.patch` versions as written into project files.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid version '{0}': expected \"%d.%d.%d\"")]
pub struct VersionParseError(pub String);

/// A three-component version. Field order gives the lexicographic ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VersionTriple {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl VersionTriple {
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl FromStr for VersionTriple {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VersionParseError(s.to_string());

        let parts: Vec<&str> = s.split('.').collect();
        let [major, minor, patch] = parts.as_slice() else {
            return Err(invalid());
        };

        let component = |part: &str| -> Result<u32, VersionParseError> {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse().map_err(|_| invalid())
        };

        Ok(Self {
            major: component(*major)?,
            minor: component(*minor)?,
            patch: component(*patch)?,
        })
    }
}

impl fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_three_components() {
        let v: VersionTriple = "0.4.1".parse().unwrap();
        assert_eq!(v, VersionTriple::new(0, 4, 1));
    }

    #[test]
    fn rejects_wrong_component_count() {
        assert!("1.0".parse::<VersionTriple>().is_err());
        assert!("1.0.0.0".parse::<VersionTriple>().is_err());
        assert!("".parse::<VersionTriple>().is_err());
    }

    #[test]
    fn rejects_non_integer_components() {
        assert!("1.x.0".parse::<VersionTriple>().is_err());
        assert!("1.0.0-beta".parse::<VersionTriple>().is_err());
        assert!("1..0".parse::<VersionTriple>().is_err());
        assert!("-1.0.0".parse::<VersionTriple>().is_err());
        assert!("1.0.+1".parse::<VersionTriple>().is_err());
    }

    #[test]
    fn orders_lexicographically() {
        let chain = ["0.3.9", "0.4.0", "0.4.1", "0.5.0", "1.0.0"];
        let parsed: Vec<VersionTriple> = chain.iter().map(|s| s.parse().unwrap()).collect();
        for pair in parsed.windows(2) {
            assert!(pair[0] < pair[1], "{} < {}", pair[0], pair[1]);
        }
        assert!(VersionTriple::new(0, 10, 0) > VersionTriple::new(0, 9, 99));
    }

    proptest! {
        #[test]
        fn display_round_trips(major in any::<u32>(), minor in any::<u32>(), patch in any::<u32>()) {
            let text = format!("{major}.{minor}.{patch}");
            let parsed: VersionTriple = text.parse().unwrap();
            prop_assert_eq!(parsed.to_string(), text);
        }

        #[test]
        fn ordering_matches_tuples(a in any::<(u32, u32, u32)>(), b in any::<(u32, u32, u32)>()) {
            let va = VersionTriple::new(a.0, a.1, a.2);
            let vb = VersionTriple::new(b.0, b.1, b.2);
            prop_assert_eq!(va.cmp(&vb), a.cmp(&b));
        }

        #[test]
        fn rejects_two_component_strings(major in any::<u32>(), minor in any::<u32>()) {
            let text = format!("{major}.{minor}");
            prop_assert!(text.parse::<VersionTriple>().is_err());
        }
    }
}
