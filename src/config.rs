//! Conversation configuration.
//!
//! ```rust
//! use runstream::ConversationConfig;
//!
//! let config = ConversationConfig::from_json_str(r#"{
//!     "thread_id": "thread_abc",
//!     "agent_id": "asst_123",
//!     "tools": [{"kind": "lookup_flight", "title": "✈️ looking up flight"}]
//! }"#).unwrap();
//!
//! let registry = config.build_registry();
//! assert_eq!(registry.title_for("lookup_flight"), "✈️ looking up flight");
//! assert_eq!(registry.title_for("bing_grounding"), "🔍 searching bing");
//! ```

use crate::error::ConfigError;
use crate::registry::ToolRegistry;
use serde::{Deserialize, Serialize};

/// Where a turn runs and how its tool bubbles are labelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// Remote conversation thread
    pub thread_id: String,
    /// Agent that runs on the thread
    pub agent_id: String,
    /// Seed the registry with the built-in tool labels
    #[serde(default = "default_true")]
    pub default_tools: bool,
    /// Extra labels; these override built-in ones
    #[serde(default)]
    pub tools: Vec<ToolLabelConfig>,
}

/// One configured tool label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolLabelConfig {
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

fn default_true() -> bool {
    true
}

impl ConversationConfig {
    /// Create a config with built-in tool labels only
    pub fn new(thread_id: impl Into<String>, agent_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            agent_id: agent_id.into(),
            default_tools: true,
            tools: Vec::new(),
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check required fields
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thread_id.trim().is_empty() {
            return Err(ConfigError::MissingField("thread_id"));
        }
        if self.agent_id.trim().is_empty() {
            return Err(ConfigError::MissingField("agent_id"));
        }
        Ok(())
    }

    /// Build the read-only registry shared by every turn
    pub fn build_registry(&self) -> ToolRegistry {
        let mut registry = if self.default_tools {
            ToolRegistry::with_defaults()
        } else {
            ToolRegistry::new()
        };
        for tool in &self.tools {
            registry.register(tool.kind.as_str(), tool.title.as_str(), tool.description.as_str());
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_minimal_config() {
        let config = ConversationConfig::from_json_str(r#"{"thread_id":"t1","agent_id":"a1"}"#).unwrap();
        assert_eq!(config, ConversationConfig::new("t1", "a1"));
        assert_eq!(config.build_registry().len(), 9);
    }

    #[test]
    fn test_configured_tools_override_defaults() {
        let config = ConversationConfig::from_json_str(
            r#"{
                "thread_id": "t1",
                "agent_id": "a1",
                "default_tools": false,
                "tools": [{"kind": "send_email", "title": "mailing", "description": "SMTP"}]
            }"#,
        )
        .unwrap();

        let registry = config.build_registry();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.title_for("send_email"), "mailing");
        assert_eq!(registry.description_for("send_email"), "SMTP");
        assert_eq!(registry.title_for("bing_grounding"), "calling bing_grounding");
    }

    #[test]
    fn test_blank_ids_are_rejected() {
        let err = ConversationConfig::from_json_str(r#"{"thread_id":" ","agent_id":"a1"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("thread_id")));

        let err = ConversationConfig::from_json_str(r#"{"thread_id":"t1","agent_id":""}"#).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("agent_id")));
    }

    #[test]
    fn test_invalid_json() {
        let err = ConversationConfig::from_json_str(r#"{"thread_id":"t1"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
