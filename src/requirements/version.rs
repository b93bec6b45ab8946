//! Ordered plugin version numbers.
//!
//! Versions are dotted numeric strings (`1`, `1.54`, `2.1.0`) with an optional
//! `-qualifier` suffix (`2.0-beta-1`, `1.3-SNAPSHOT`). Qualifiers compare
//! segment by segment, numeric segments as numbers (`beta-9 < beta-10`).

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::{FixtureError, Result};

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)*)(?:-([0-9A-Za-z][0-9A-Za-z.\-]*))?$")
        .expect("version regex is valid")
});

/// A parsed plugin version.
///
/// Missing trailing components compare as zero, so `1.0` equals `1.0.0`.
/// A qualified version sorts before its release (`2.0-beta-1 < 2.0`).
#[derive(Debug, Clone)]
pub struct Version {
    text: String,
    components: Vec<u64>,
    qualifier: Option<String>,
}

impl Version {
    /// Parse a version string.
    pub fn parse(s: &str) -> Result<Self> {
        let text = s.trim();
        let caps = VERSION_REGEX
            .captures(text)
            .ok_or_else(|| FixtureError::malformed(s, "not a dotted numeric version"))?;

        let components = caps[1]
            .split('.')
            .map(|part| {
                part.parse::<u64>()
                    .map_err(|_| FixtureError::malformed(s, "version component out of range"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            text: text.to_string(),
            components,
            qualifier: caps.get(2).map(|m| m.as_str().to_string()),
        })
    }
}

/// Compare two qualifiers split on `-` and `.`.
///
/// Numeric segments compare as numbers and sort after textual ones; a
/// qualifier that is a prefix of the other sorts first.
fn compare_qualifiers(a: &str, b: &str) -> Ordering {
    let mut left = a.split(['-', '.']);
    let mut right = b.split(['-', '.']);
    loop {
        let ord = match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match (x.parse::<u64>(), y.parse::<u64>()) {
                (Ok(m), Ok(n)) => m.cmp(&n),
                (Ok(_), Err(_)) => Ordering::Greater,
                (Err(_), Ok(_)) => Ordering::Less,
                (Err(_), Err(_)) => x.cmp(y),
            },
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let a = self.components.get(i).copied().unwrap_or(0);
            let b = other.components.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }

        match (&self.qualifier, &other.qualifier) {
            (None, None) => Ordering::Equal,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(a), Some(b)) => compare_qualifiers(a, b),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl FromStr for Version {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Version::parse(&s).map_err(serde::de::Error::custom)
    }
}
