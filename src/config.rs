// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Host document configuration

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Rendering engine profile the host document emulates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Chromium family
    #[default]
    Blink,
    /// Safari family
    WebKit,
    /// Firefox family; elements expose only `textContent`
    Gecko,
}

impl Engine {
    /// Whether elements created under this engine expose `innerText`
    pub fn supports_inner_text(&self) -> bool {
        !matches!(self, Engine::Gecko)
    }

    /// Get the engine name
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Blink => "blink",
            Engine::WebKit => "webkit",
            Engine::Gecko => "gecko",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host document configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Engine profile
    pub engine: Engine,
}

impl HostConfig {
    /// Create a new host config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the engine profile
    pub fn engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    /// Config for a Gecko-like host (no `innerText`)
    pub fn gecko() -> Self {
        Self {
            engine: Engine::Gecko,
        }
    }

    /// Whether elements expose `innerText`
    pub fn supports_inner_text(&self) -> bool {
        self.engine.supports_inner_text()
    }

    /// Load config from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load config from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = HostConfig::default();
        assert_eq!(config.engine, Engine::Blink);
        assert!(config.supports_inner_text());
        assert!(!HostConfig::gecko().supports_inner_text());
    }

    #[test]
    fn test_from_json() {
        let config = HostConfig::from_json(r#"{"engine": "gecko"}"#).unwrap();
        assert_eq!(config, HostConfig::new().engine(Engine::Gecko));

        let config = HostConfig::from_json("{}").unwrap();
        assert_eq!(config.engine, Engine::Blink);

        let err = HostConfig::from_json(r#"{"engine": "trident"}"#).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"engine": "webkit"}}"#).unwrap();

        let config = HostConfig::from_file(file.path()).unwrap();
        assert_eq!(config.engine, Engine::WebKit);

        let err = HostConfig::from_file(file.path().with_extension("missing")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
