use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

pub const DEFAULT_USER_AGENT: &str = concat!("emmet-io/", env!("CARGO_PKG_VERSION"));

/// Options controlling how resources are read.
///
/// Missing fields fall back to their defaults, so an empty JSON object is
/// a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoOptions {
    /// Keep line terminators when decoding text. When disabled every line
    /// terminator is dropped and the lines are glued together, which is what
    /// older hosts relying on a line reader expect.
    pub preserve_line_endings: bool,
    /// `User-Agent` header sent with remote reads.
    pub user_agent: String,
}

impl Default for IoOptions {
    fn default() -> Self {
        Self {
            preserve_line_endings: true,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl IoOptions {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load options from a JSON file. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!(
                "no options file at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn empty_object_gives_defaults() {
        let options = IoOptions::from_json("{}").unwrap();
        assert_eq!(options, IoOptions::default());
        assert!(options.preserve_line_endings);
    }

    #[test]
    fn partial_object_overrides_field() {
        let options =
            IoOptions::from_json(r#"{"preserve_line_endings": false}"#)
                .unwrap();
        assert!(!options.preserve_line_endings);
        assert_eq!(options.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn malformed_options_are_rejected() {
        assert!(IoOptions::from_json("preserve_line_endings").is_err());
    }

    #[test]
    fn load_from_disk() {
        let dir = TempDir::new("emmet_io_options").unwrap();
        let missing = dir.path().join("missing.json");
        assert_eq!(IoOptions::load(&missing).unwrap(), IoOptions::default());

        let path = dir.path().join("options.json");
        fs::write(&path, r#"{"user_agent": "host/1.0"}"#).unwrap();
        let options = IoOptions::load(&path).unwrap();
        assert_eq!(options.user_agent, "host/1.0");
        assert!(options.preserve_line_endings);
    }
}
