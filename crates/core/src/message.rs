//! Chat message rules: roles and content normalization before persistence.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
    Tool,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
            Self::Tool => "tool",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            "system" => Ok(Self::System),
            "tool" => Ok(Self::Tool),
            _ => Err(CoreError::Validation("invalid role".to_string())),
        }
    }
}

/// A validated message ready to be appended to a session.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub role: Role,
    pub content: String,
    pub tool_name: Option<String>,
    pub tool_data: Option<Value>,
}

/// Validate and normalize an incoming message.
///
/// Content is trimmed. For non-tool roles one pair of enclosing double
/// quotes is stripped as well, and the content must not end up empty.
/// Tool messages may have empty content but need a tool name.
pub fn prepare_message(
    role: &str,
    content: &str,
    tool_name: Option<&str>,
    tool_data: Option<Value>,
) -> Result<NewMessage, CoreError> {
    let role: Role = role.parse()?;

    let mut content = content.trim();
    if role != Role::Tool {
        content = strip_outer_quotes(content).trim();
    }

    let tool_name = tool_name.map(str::trim).filter(|n| !n.is_empty());

    let empty = match role {
        Role::Tool => tool_name.is_none(),
        _ => content.is_empty(),
    };
    if empty {
        return Err(CoreError::Validation("empty message".to_string()));
    }

    Ok(NewMessage {
        role,
        content: content.to_string(),
        tool_name: tool_name.map(str::to_string),
        tool_data,
    })
}

fn strip_outer_quotes(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(s)
}
