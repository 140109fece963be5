//! Stage prefix resolution.
//!
//! Gateways may prepend a deployment stage (e.g. `/dev`) to every path. The
//! prefix is removed with a plain string-prefix test, so `/dev` also strips
//! from `/devops`.
//!
//! Paths are also escaped here before they go into a request URI: v1 paths
//! arrive percent-decoded, v2 raw paths arrive encoded but may still carry
//! bytes a URI cannot hold.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Bytes a URI path cannot carry literally. `/` is kept as the separator.
const RAW_PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^');

/// As [`RAW_PATH`], plus `%` since a decoded path has no escapes of its own.
const DECODED_PATH: &AsciiSet = &RAW_PATH.add(b'%');

/// Percent-encode a decoded path for use in a URI.
///
/// ```
/// use gateway_bridge_core::encode_path;
///
/// assert_eq!(encode_path("/hello world"), "/hello%20world");
/// assert_eq!(encode_path("/100%"), "/100%25");
/// assert_eq!(encode_path("/a/b"), "/a/b");
/// ```
pub fn encode_path(path: &str) -> Cow<'_, str> {
    utf8_percent_encode(path, DECODED_PATH).into()
}

/// Escape the bytes a URI cannot carry in an already-encoded path.
///
/// Existing `%XX` escapes are left untouched.
pub fn escape_raw_path(path: &str) -> Cow<'_, str> {
    utf8_percent_encode(path, RAW_PATH).into()
}

/// Remove `prefix` from the start of `path`, or return `path` unchanged.
pub fn strip_prefix<'a>(path: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return path;
    }
    path.strip_prefix(prefix).unwrap_or(path)
}

/// A configured stage/base path prefix.
///
/// Built from one or more path segments which are joined with `/`, cleaned,
/// and given a leading `/`. An empty result means "nothing to strip".
///
/// # Example
///
/// ```
/// use gateway_bridge_core::StagePrefix;
///
/// assert_eq!(StagePrefix::new("dev").as_str(), "/dev");
/// assert_eq!(StagePrefix::from_segments(["dev", "api/"]).as_str(), "/dev/api");
/// assert!(StagePrefix::new("").is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StagePrefix(String);

impl StagePrefix {
    /// Build a prefix from a single path.
    pub fn new(prefix: impl AsRef<str>) -> Self {
        Self::from_segments([prefix])
    }

    /// Build a prefix by joining path segments.
    ///
    /// Empty and `.` segments are dropped and `..` removes the previous one.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parts: Vec<String> = Vec::new();

        for segment in segments {
            for part in segment.as_ref().split('/') {
                match part {
                    "" | "." => {}
                    ".." => {
                        parts.pop();
                    }
                    part => parts.push(part.to_string()),
                }
            }
        }

        if parts.is_empty() {
            return Self::default();
        }
        Self(format!("/{}", parts.join("/")))
    }

    /// Get the prefix as a string (empty if unset).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether no prefix is configured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Remove this prefix from `path` if present.
    pub fn strip<'a>(&self, path: &'a str) -> &'a str {
        strip_prefix(path, &self.0)
    }
}

impl std::fmt::Display for StagePrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
