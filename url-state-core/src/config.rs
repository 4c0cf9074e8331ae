//! Sync settings loaded from YAML

use crate::codec::{OpaqueCodec, QueryCodec, QueryStringCodec, DEFAULT_STATE_PARAM};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse sync config: {0}")]
    Parse(String),
}

/// How state is laid out in the query string
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    /// One parameter per key (`animal=Ant&color=Blue`)
    #[default]
    Query,
    /// Base64url JSON under a single parameter (`state=eyJ...`)
    Opaque,
}

fn default_param() -> String {
    DEFAULT_STATE_PARAM.to_string()
}

/// URL sync settings, usually embedded in a host app's YAML config
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default)]
    pub codec: CodecKind,
    /// Parameter name for the opaque codec; ignored by `query`
    #[serde(default = "default_param")]
    pub param: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            codec: CodecKind::default(),
            param: default_param(),
        }
    }
}

impl SyncConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: SyncConfig =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        if config.codec == CodecKind::Opaque && config.param.is_empty() {
            return Err(ConfigError::Parse(
                "opaque codec needs a non-empty param".to_string(),
            ));
        }
        info!("URL sync config: codec={:?} param={}", config.codec, config.param);
        Ok(config)
    }

    pub fn codec(&self) -> Box<dyn QueryCodec> {
        match self.codec {
            CodecKind::Query => Box::new(QueryStringCodec),
            CodecKind::Opaque => Box::new(OpaqueCodec::new(self.param.clone())),
        }
    }
}
