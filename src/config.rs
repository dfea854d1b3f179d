//! Configuration types for the emotion analysis service.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the empathy engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Classifier model settings.
    pub model: ModelConfig,
    /// Per-request analysis settings.
    pub analysis: AnalysisConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
}

/// Emotion classifier model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// HuggingFace repo ID containing the ONNX export of the classifier.
    pub model_id: String,
    /// ONNX model variant (`fp32` or `q8`/`quantized`).
    pub variant: String,
    /// Maximum token length fed to the model. Longer inputs are truncated
    /// silently.
    pub max_tokens: usize,
    /// Number of intra-op threads for the ONNX session.
    pub intra_threads: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            // ONNX export of SamLowe/roberta-base-go_emotions (28 labels).
            model_id: "SamLowe/roberta-base-go_emotions-onnx".to_owned(),
            variant: "q8".to_owned(),
            max_tokens: 128,
            intra_threads: 4,
        }
    }
}

/// Analysis pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Minimum classifier confidence to accept the top label as-is.
    ///
    /// Below this the label is downgraded to `uncertain` (the numeric score
    /// is kept). 0.0 disables the floor.
    pub min_confidence: f32,
    /// Maximum number of messages accepted per request.
    pub max_messages: usize,
    /// Maximum message length in characters, measured after trimming.
    pub max_message_chars: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.0,
            max_messages: 50,
            max_message_chars: 500,
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// The `host:port` bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::error::EngineError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_to_file(&self, path: &std::path::Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::EngineError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
