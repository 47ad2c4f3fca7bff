//! Shared types for generator operations

use docsplice_blocks::{BlockKind, GenerationRequest, STYLE_PROMPT};
use serde::{Deserialize, Serialize};

/// How to run the external generator program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Program name or path; `None` leaves generation unconfigured
    pub command: Option<String>,
    /// Extra arguments passed before any request data
    pub args: Vec<String>,
    /// Per-call limit in seconds
    pub timeout_secs: u64,
    /// Additional attempts after a transient failure
    pub retries: u32,
    /// Model name forwarded to the program, if it needs one
    pub model: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            command: None,
            args: Vec::new(),
            timeout_secs: 60,
            retries: 2,
            model: None,
        }
    }
}

/// One chat-style message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// `system` or `user`
    pub role: String,
    /// Message text
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// Structured description of the block being documented
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
    /// Block name
    pub name: String,
    /// Block kind
    pub kind: BlockKind,
    /// Source language
    pub language: String,
    /// Maximum characters per line, 0 when unconstrained
    pub max_line_length: usize,
}

/// JSON document written to the generator's stdin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationPayload {
    /// Model requested by configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// System prompt followed by the block prompt
    pub messages: Vec<Message>,
    /// The block the messages are about
    pub block: BlockInfo,
}

impl GenerationPayload {
    pub fn from_request(request: &GenerationRequest<'_>, model: Option<String>) -> Self {
        Self {
            model,
            messages: vec![Message::system(STYLE_PROMPT), Message::user(request.prompt())],
            block: BlockInfo {
                name: request.name.to_string(),
                kind: request.kind,
                language: request.language.to_string(),
                max_line_length: request.max_line_length,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_payload_serializes_messages_and_block() {
        let request = GenerationRequest {
            name: "load",
            kind: BlockKind::Function,
            code_sample: "def load():\n    pass\n",
            max_line_length: 71,
            language: "Python",
        };
        let payload = GenerationPayload::from_request(&request, None);
        let json: serde_json::Value = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["block"]["kind"], "function");
        assert_eq!(json["block"]["max_line_length"], 71);
        assert!(json.get("model").is_none());
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: GeneratorConfig = serde_json::from_str(r#"{"command": "gen"}"#).unwrap();
        assert_eq!(config.command.as_deref(), Some("gen"));
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.retries, 2);
    }
}
