use serde::{Deserialize, Serialize};

/// Model used when the caller does not name one.
pub const DEFAULT_MODEL: &str = "meta/llama-3.1-405b-instruct";

/// OpenAI-style chat completion request.
///
/// Re-serializing this struct yields the NIM payload: exactly these five
/// fields, with documented defaults filled in for anything the caller
/// omitted. Message content is carried opaquely and never reshaped.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatRequest {
    #[serde(default = "default_model")]
    pub model: String,

    /// Ordered role/content pairs, passed through untouched. An empty list
    /// is accepted.
    #[serde(default)]
    pub messages: Vec<serde_json::Value>,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default)]
    pub stream: bool,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_simple_request() {
        let json = r#"{
            "model": "meta/llama-3.1-8b-instruct",
            "messages": [
                {"role": "user", "content": "Hello"}
            ],
            "max_tokens": 100,
            "stream": true
        }"#;

        let req: ChatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.model, "meta/llama-3.1-8b-instruct");
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.max_tokens, 100);
        assert!(req.stream);
    }

    #[test]
    fn test_defaults_applied() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.model, DEFAULT_MODEL);
        assert!(req.messages.is_empty());
        assert_eq!(req.temperature, 0.7);
        assert_eq!(req.max_tokens, 1024);
        assert!(!req.stream);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let json = r#"{
            "messages": [{"role": "user", "content": "Hi"}],
            "top_p": 0.9,
            "frequency_penalty": 0.5
        }"#;

        let req: ChatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_message_content_passes_through() {
        let json = r#"{
            "messages": [
                {"role": "user", "content": [{"type": "text", "text": "nested"}], "name": "alice"}
            ]
        }"#;

        let req: ChatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.messages[0]["name"], "alice");
        assert_eq!(req.messages[0]["content"][0]["text"], "nested");
    }

    #[test]
    fn test_payload_field_set() {
        let req: ChatRequest = serde_json::from_str(r#"{"stream": true}"#).unwrap();
        let payload = serde_json::to_value(&req).unwrap();

        let obj = payload.as_object().unwrap();
        assert_eq!(obj.len(), 5);
        for key in ["model", "messages", "temperature", "max_tokens", "stream"] {
            assert!(obj.contains_key(key), "payload missing field {}", key);
        }

        assert_eq!(payload["stream"], json!(true));
        assert_eq!(payload["temperature"], json!(0.7));
    }

    #[test]
    fn test_malformed_json_fails() {
        let malformed = r#"{"messages": [}"#;
        let result: Result<ChatRequest, _> = serde_json::from_str(malformed);
        assert!(result.is_err());
    }
}
