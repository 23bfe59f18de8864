//! Image references (`name:tag`)

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{LaunchError, Result};

/// Tag applied when a reference does not name one
pub const DEFAULT_TAG: &str = "latest";

const NAME_PATTERN: &str = r"^(?:[a-zA-Z0-9][a-zA-Z0-9.-]*(?::[0-9]+)?/)?[a-z0-9]+(?:(?:[._]|__|-+)[a-z0-9]+)*(?:/[a-z0-9]+(?:(?:[._]|__|-+)[a-z0-9]+)*)*$";
const TAG_PATTERN: &str = r"^[A-Za-z0-9_][A-Za-z0-9_.-]{0,127}$";

fn name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(NAME_PATTERN).expect("image name pattern is valid"))
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TAG_PATTERN).expect("image tag pattern is valid"))
}

/// A named, tagged image. The same value is handed to the build and the run
/// step, so the tag that gets run is always the tag that was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub name: String,
    pub tag: String,
}

impl ImageRef {
    /// Build a reference from parts, validating both.
    pub fn new(name: &str, tag: &str) -> Result<Self> {
        let reference = format!("{}:{}", name, tag);
        if !name_regex().is_match(name) {
            return Err(LaunchError::InvalidImageRef {
                reference,
                reason: "name must be lowercase path components, optionally prefixed by a registry host".to_string(),
            });
        }
        if !tag_regex().is_match(tag) {
            return Err(LaunchError::InvalidImageRef {
                reference,
                reason: "tag must be 1-128 characters of [A-Za-z0-9_.-] and not start with '.' or '-'".to_string(),
            });
        }
        Ok(Self {
            name: name.to_string(),
            tag: tag.to_string(),
        })
    }

    /// Parse `name[:tag]`. A colon only separates a tag when it follows the
    /// last `/`, so `registry:5000/app` is a name with the default tag.
    pub fn parse(reference: &str) -> Result<Self> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(LaunchError::InvalidImageRef {
                reference: String::new(),
                reason: "reference is empty".to_string(),
            });
        }

        let last_slash = reference.rfind('/').map_or(0, |i| i + 1);
        match reference[last_slash..].rfind(':') {
            Some(i) => {
                let split = last_slash + i;
                Self::new(&reference[..split], &reference[split + 1..])
            }
            None => Self::new(reference, DEFAULT_TAG),
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.tag)
    }
}
