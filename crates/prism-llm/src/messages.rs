//! Chat message types
//!
//! The role is a plain string so vendor-specific roles pass through
//! untouched. Unknown roles are accepted or rejected by the vendor.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Well-known message roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User message
    User,
    /// Assistant message
    Assistant,
    /// System message
    System,
}

impl Role {
    /// Wire name of the role
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role (e.g. "user", "assistant", "system")
    pub role: String,

    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Create a message with an arbitrary role
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Create a user message with text
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User.as_str(), content)
    }

    /// Create an assistant message with text
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant.as_str(), content)
    }

    /// Create a system message with text
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System.as_str(), content)
    }

    /// Whether this message has the given role
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_message() {
        let msg = ChatMessage::user("Hello");
        assert_eq!(msg.role, "user");
        assert_eq!(msg.content, "Hello");
        assert!(msg.has_role(Role::User));
        assert!(!msg.has_role(Role::System));
    }

    #[test]
    fn test_custom_role_passes_through() {
        let msg = ChatMessage::new("developer", "Be terse");
        assert_eq!(msg.role, "developer");
        assert!(!msg.has_role(Role::User));
    }

    #[test]
    fn test_message_wire_shape() {
        let value = serde_json::to_value(ChatMessage::assistant("Hi there")).unwrap();
        assert_eq!(value, json!({"role": "assistant", "content": "Hi there"}));
    }
}
