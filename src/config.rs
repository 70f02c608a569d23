//! Deployment settings: where the catalog lives and which image URLs may be shown.

use crate::error::{PosError, Result};
use reqwest::Url;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:9000";
pub const DEFAULT_IMAGE_PATTERN: &str = "https://storage.googleapis.com/tingoheladosbucket/**";

/// An allow-listed location for product images.
///
/// Written as `protocol://hostname/path`, where the path may use `*` for a
/// single segment and `**` for any number of trailing segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePattern {
    protocol: String,
    hostname: String,
    pathname: Vec<String>,
}

impl RemotePattern {
    pub fn permits(&self, url: &str) -> bool {
        let Ok(url) = Url::parse(url) else {
            return false;
        };
        if url.scheme() != self.protocol || url.host_str() != Some(self.hostname.as_str()) {
            return false;
        }
        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.collect())
            .unwrap_or_default();
        let pattern: Vec<&str> = self.pathname.iter().map(String::as_str).collect();
        glob_segments(&pattern, &segments)
    }
}

fn glob_segments(pattern: &[&str], path: &[&str]) -> bool {
    match (pattern.first(), path.first()) {
        (None, None) => true,
        (Some(&"**"), _) => {
            glob_segments(&pattern[1..], path)
                || (!path.is_empty() && glob_segments(pattern, &path[1..]))
        }
        (Some(&"*"), Some(_)) => glob_segments(&pattern[1..], &path[1..]),
        (Some(literal), Some(segment)) if literal == segment => {
            glob_segments(&pattern[1..], &path[1..])
        }
        _ => false,
    }
}

impl FromStr for RemotePattern {
    type Err = PosError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PosError::ValidationError(format!("Invalid image pattern: {}", s));

        let (protocol, rest) = s.split_once("://").ok_or_else(invalid)?;
        let (hostname, path) = match rest.split_once('/') {
            Some((hostname, path)) => (hostname, path),
            None => (rest, "**"),
        };
        if protocol.is_empty() || hostname.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            protocol: protocol.to_ascii_lowercase(),
            hostname: hostname.to_ascii_lowercase(),
            pathname: path.split('/').map(str::to_string).collect(),
        })
    }
}

impl fmt::Display for RemotePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://{}/{}",
            self.protocol,
            self.hostname,
            self.pathname.join("/")
        )
    }
}

impl Default for RemotePattern {
    fn default() -> Self {
        Self {
            protocol: "https".to_string(),
            hostname: "storage.googleapis.com".to_string(),
            pathname: vec!["tingoheladosbucket".to_string(), "**".to_string()],
        }
    }
}

/// How hard to look for a freshly created product before giving up on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogConsistency {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for CatalogConsistency {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_millis(200),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosConfig {
    pub api_url: String,
    pub images: RemotePattern,
    pub consistency: CatalogConsistency,
}

impl Default for PosConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            images: RemotePattern::default(),
            consistency: CatalogConsistency::default(),
        }
    }
}
