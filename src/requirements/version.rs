//! Package version parsing and ordering.
//!
//! Installed Python packages report versions in the PEP 440 scheme, which is
//! richer than plain dotted numbers: `2.1.0+cu118`, `0.13.0rc1`,
//! `1!2.0.post3.dev1`. [`Version`] parses all of these and orders them the
//! way pip does, so the gate never falls back to string comparison (which
//! would rank `"10.0"` before `"2.0"`).
//!
//! # Example
//!
//! ```
//! use fsdd::requirements::Version;
//!
//! let v: Version = "2.1.0+cu118".parse().unwrap();
//! assert!(v >= "2.0".parse().unwrap());
//! assert!("2.0".parse::<Version>().unwrap() < "10.0".parse().unwrap());
//! assert_eq!("2.0".parse::<Version>().unwrap(), "2.0.0".parse().unwrap());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{FsddError, Result};

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        ^\s*
        v?
        (?:(?P<epoch>[0-9]+)!)?
        (?P<release>[0-9]+(?:\.[0-9]+)*)
        (?P<pre>
            [-_.]?
            (?P<pre_l>alpha|a|beta|b|preview|pre|c|rc)
            [-_.]?
            (?P<pre_n>[0-9]+)?
        )?
        (?P<post>
            (?:-(?P<post_n1>[0-9]+))
            |
            (?:
                [-_.]?
                (?P<post_l>post|rev|r)
                [-_.]?
                (?P<post_n2>[0-9]+)?
            )
        )?
        (?P<dev>
            [-_.]?
            dev
            [-_.]?
            (?P<dev_n>[0-9]+)?
        )?
        (?:\+(?P<local>[a-z0-9]+(?:[-_.][a-z0-9]+)*))?
        \s*$",
    )
    .expect("VERSION_REGEX must compile")
});

/// Pre-release phase, in release order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreRelease {
    Alpha,
    Beta,
    ReleaseCandidate,
}

impl PreRelease {
    fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "a" | "alpha" => PreRelease::Alpha,
            "b" | "beta" => PreRelease::Beta,
            // "c", "pre", "preview", "rc"
            _ => PreRelease::ReleaseCandidate,
        }
    }

    /// Canonical spelling used when formatting.
    pub fn as_str(&self) -> &'static str {
        match self {
            PreRelease::Alpha => "a",
            PreRelease::Beta => "b",
            PreRelease::ReleaseCandidate => "rc",
        }
    }
}

/// One dot-separated piece of a local version label (`cu118`, `1`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LocalSegment {
    /// Alphanumeric segments sort before numeric ones.
    Alpha(String),
    Numeric(u64),
}

impl fmt::Display for LocalSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalSegment::Alpha(s) => f.write_str(s),
            LocalSegment::Numeric(n) => write!(f, "{}", n),
        }
    }
}

/// A parsed package version.
///
/// Equality follows ordering, so trailing zeros are insignificant:
/// `2.0 == 2.0.0`.
#[derive(Debug, Clone)]
pub struct Version {
    epoch: u64,
    release: Vec<u64>,
    pre: Option<(PreRelease, u64)>,
    post: Option<u64>,
    dev: Option<u64>,
    local: Vec<LocalSegment>,
}

// Sort position of the pre-release component. A dev build of a final
// release sorts before all of its pre-releases.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum PreKey {
    DevOnly,
    Pre(PreRelease, u64),
    Final,
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum DevKey {
    Dev(u64),
    Final,
}

impl Version {
    /// Parse a version string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidVersion` if the string is not a valid package version.
    pub fn parse(input: &str) -> Result<Self> {
        let caps = VERSION_REGEX
            .captures(input)
            .ok_or_else(|| FsddError::InvalidVersion {
                version: input.to_string(),
                reason: "not a valid package version".to_string(),
            })?;

        let number = |name: &str| -> Result<Option<u64>> {
            caps.name(name)
                .map(|m| parse_number(input, m.as_str()))
                .transpose()
        };

        let epoch = number("epoch")?.unwrap_or(0);

        let release = caps["release"]
            .split('.')
            .map(|part| parse_number(input, part))
            .collect::<Result<Vec<_>>>()?;

        let pre = match caps.name("pre_l") {
            Some(label) => Some((
                PreRelease::from_label(label.as_str()),
                number("pre_n")?.unwrap_or(0),
            )),
            None => None,
        };

        let post = if caps.name("post").is_some() {
            Some(number("post_n1")?.or(number("post_n2")?).unwrap_or(0))
        } else {
            None
        };

        let dev = if caps.name("dev").is_some() {
            Some(number("dev_n")?.unwrap_or(0))
        } else {
            None
        };

        let local = parse_local(input, &caps)?;

        Ok(Self {
            epoch,
            release,
            pre,
            post,
            dev,
            local,
        })
    }

    fn trimmed_release(&self) -> &[u64] {
        let end = self
            .release
            .iter()
            .rposition(|&n| n != 0)
            .map_or(0, |i| i + 1);
        &self.release[..end]
    }

    fn pre_key(&self) -> PreKey {
        match (self.pre, self.post, self.dev) {
            (Some((kind, n)), _, _) => PreKey::Pre(kind, n),
            (None, None, Some(_)) => PreKey::DevOnly,
            _ => PreKey::Final,
        }
    }

    fn dev_key(&self) -> DevKey {
        self.dev.map_or(DevKey::Final, DevKey::Dev)
    }
}

fn parse_number(input: &str, digits: &str) -> Result<u64> {
    digits.parse().map_err(|_| FsddError::InvalidVersion {
        version: input.to_string(),
        reason: format!("component '{}' is out of range", digits),
    })
}

fn parse_local(input: &str, caps: &Captures<'_>) -> Result<Vec<LocalSegment>> {
    let Some(local) = caps.name("local") else {
        return Ok(Vec::new());
    };
    local
        .as_str()
        .split(['-', '_', '.'])
        .map(|segment| {
            if segment.bytes().all(|b| b.is_ascii_digit()) {
                parse_number(input, segment).map(LocalSegment::Numeric)
            } else {
                Ok(LocalSegment::Alpha(segment.to_ascii_lowercase()))
            }
        })
        .collect()
}

impl FromStr for Version {
    type Err = FsddError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| self.trimmed_release().cmp(other.trimmed_release()))
            .then_with(|| self.pre_key().cmp(&other.pre_key()))
            .then_with(|| self.post.cmp(&other.post))
            .then_with(|| self.dev_key().cmp(&other.dev_key()))
            .then_with(|| self.local.cmp(&other.local))
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

impl fmt::Display for Version {
    /// Formats the normalized spelling (`1.0a1.post2.dev3+ubuntu.1`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch != 0 {
            write!(f, "{}!", self.epoch)?;
        }
        let release: Vec<String> = self.release.iter().map(u64::to_string).collect();
        f.write_str(&release.join("."))?;
        if let Some((kind, n)) = self.pre {
            write!(f, "{}{}", kind.as_str(), n)?;
        }
        if let Some(n) = self.post {
            write!(f, ".post{}", n)?;
        }
        if let Some(n) = self.dev {
            write!(f, ".dev{}", n)?;
        }
        if !self.local.is_empty() {
            let local: Vec<String> = self.local.iter().map(LocalSegment::to_string).collect();
            write!(f, "+{}", local.join("."))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn assert_ascending(versions: &[&str]) {
        for pair in versions.windows(2) {
            assert!(
                v(pair[0]) < v(pair[1]),
                "expected {} < {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn dotted_numeric_ordering() {
        assert_ascending(&["2.0", "2.0.1", "2.1", "10.0"]);
    }

    #[test]
    fn not_lexicographic() {
        assert!("10.0" < "2.0");
        assert!(v("10.0") > v("2.0"));
    }

    #[test]
    fn ordering_is_transitive() {
        let (a, b, c) = (v("0.8"), v("0.13.1"), v("2.0"));
        assert!(a < b && b < c && a < c);
    }

    #[test]
    fn trailing_zeros_are_insignificant() {
        assert_eq!(v("2.0"), v("2.0.0"));
        assert_eq!(v("2"), v("2.0.0.0"));
        assert_eq!(v("2.0").cmp(&v("2.0.0")), Ordering::Equal);
    }

    #[test]
    fn prerelease_phases_order() {
        assert_ascending(&[
            "1.0.dev0", "1.0a1", "1.0a2", "1.0b1", "1.0rc1", "1.0", "1.0.post1",
        ]);
    }

    #[test]
    fn dev_of_prerelease_sorts_before_prerelease() {
        assert_ascending(&["1.0a1.dev1", "1.0a1", "1.0a1.post1.dev1", "1.0a1.post1"]);
    }

    #[test]
    fn post_dev_sorts_between_release_and_post() {
        assert_ascending(&["1.0", "1.0.post1.dev0", "1.0.post1"]);
    }

    #[test]
    fn local_label_sorts_after_public_version() {
        assert_ascending(&["2.1.0", "2.1.0+cpu", "2.1.0+cu118", "2.1.1"]);
    }

    #[test]
    fn local_numeric_segments_beat_alpha() {
        assert_ascending(&["1.0+abc", "1.0+1", "1.0+1.abc", "1.0+1.2"]);
    }

    #[test]
    fn epoch_dominates_release() {
        assert!(v("1!0.1") > v("99.0"));
        assert_eq!(v("1!2.0").to_string(), "1!2.0");
    }

    #[test]
    fn alternate_spellings_normalize() {
        assert_eq!(v("1.0alpha1"), v("1.0a1"));
        assert_eq!(v("1.0-beta.2"), v("1.0b2"));
        assert_eq!(v("1.0c1"), v("1.0rc1"));
        assert_eq!(v("1.0preview1"), v("1.0rc1"));
        assert_eq!(v("1.0-1"), v("1.0.post1"));
        assert_eq!(v("1.0rev2"), v("1.0.post2"));
        assert_eq!(v("v2.0"), v("2.0"));
        assert_eq!(v("1.0RC1"), v("1.0rc1"));
        assert_eq!(v("1.0a"), v("1.0a0"));
        assert_eq!(v("1.0.dev"), v("1.0.dev0"));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(v("  2.0\n"), v("2.0"));
    }

    #[test]
    fn display_is_normalized() {
        assert_eq!(v("1!1.0-alpha.1-post2.dev3+Ubuntu-1").to_string(), "1!1.0a1.post2.dev3+ubuntu.1");
        assert_eq!(v("v0.13.0").to_string(), "0.13.0");
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "banana", "2.0.x", "1..0", "2.0+", ".1", "2.0 beta"] {
            let err = Version::parse(bad).unwrap_err();
            assert!(
                matches!(err, FsddError::InvalidVersion { .. }),
                "expected InvalidVersion for {:?}",
                bad
            );
        }
    }

    #[test]
    fn rejects_overflowing_components() {
        let err = Version::parse("99999999999999999999999.0").unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn from_str_matches_parse() {
        let parsed: Version = "0.8".parse().unwrap();
        assert_eq!(parsed, v("0.8"));
    }
}
