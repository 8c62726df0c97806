//! Shared pieces of the OpenAI chat-completions wire format
//!
//! OpenAI, DeepSeek and xAI all speak this format; they differ only in
//! defaults and small extraction details.

use serde_json::{Value, json};

use super::merge_payload;
use crate::{ChatMessage, Options, Result, Usage};

/// `{base}/chat/completions`
pub(super) fn url(base_url: &str) -> String {
    format!("{base_url}/chat/completions")
}

/// Bearer auth header
pub(super) fn bearer_headers(api_key: &str) -> [(&'static str, String); 2] {
    [
        ("Authorization", format!("Bearer {api_key}")),
        ("Content-Type", "application/json".to_string()),
    ]
}

/// `{model, messages, ..options}`
pub(super) fn payload(model: &str, messages: &[ChatMessage], options: &Options) -> Result<Value> {
    Ok(merge_payload(
        options,
        vec![
            ("model", json!(model)),
            ("messages", serde_json::to_value(messages)?),
        ],
    ))
}

fn first_choice(raw: &Value) -> Option<&Value> {
    raw.get("choices")?.get(0)
}

/// `choices[0].message.content`
pub(super) fn content(raw: &Value) -> Option<&str> {
    first_choice(raw)?.get("message")?.get("content")?.as_str()
}

/// `usage`
pub(super) fn usage(raw: &Value) -> Option<Usage> {
    raw.get("usage")?.as_object().cloned()
}

/// `choices[0].finish_reason`
pub(super) fn finish_reason(raw: &Value) -> Option<String> {
    first_choice(raw)?
        .get("finish_reason")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extractors_on_wellformed_body() {
        let raw = json!({
            "choices": [{"message": {"role": "assistant", "content": " 4 "}, "finish_reason": "stop"}],
            "usage": {"total_tokens": 5}
        });

        assert_eq!(content(&raw), Some(" 4 "));
        assert_eq!(finish_reason(&raw), Some("stop".to_string()));
        assert_eq!(usage(&raw).and_then(|u| u.get("total_tokens").cloned()), Some(json!(5)));
    }

    #[test]
    fn test_extractors_are_total() {
        for raw in [
            json!(null),
            json!([]),
            json!({}),
            json!({"choices": []}),
            json!({"choices": "nope"}),
            json!({"choices": [{}]}),
            json!({"choices": [{"message": {"content": null}}]}),
            json!({"choices": [{"message": {"content": 42}, "finish_reason": 1}], "usage": 3}),
        ] {
            assert_eq!(content(&raw), None, "{raw}");
            assert_eq!(finish_reason(&raw), None, "{raw}");
            assert_eq!(usage(&raw), None, "{raw}");
        }
    }

    #[test]
    fn test_tool_call_only_message() {
        let raw = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{"id": "call_1", "type": "function",
                        "function": {"name": "get_stock_price", "arguments": "{\"ticker\":\"NVDA\"}"}}]
                },
                "finish_reason": "tool_calls"
            }]
        });

        assert_eq!(content(&raw), None);
        assert_eq!(finish_reason(&raw), Some("tool_calls".to_string()));
    }

    #[test]
    fn test_payload_shape() {
        let payload = payload("gpt-4o-mini", &[ChatMessage::user("2+2?")], &Options::new()).unwrap();
        assert_eq!(
            payload,
            json!({"model": "gpt-4o-mini", "messages": [{"role": "user", "content": "2+2?"}]})
        );
        assert_eq!(url("https://api.openai.com/v1"), "https://api.openai.com/v1/chat/completions");
    }
}
