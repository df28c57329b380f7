//! Player display names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum nickname length in characters.
pub const MAX_NICKNAME_CHARS: usize = 30;

const ANONYMOUS: &str = "Anonymous";

/// A sanitized, non-empty, length-capped display name.
///
/// Only letters, digits, spaces, hyphens and underscores survive
/// sanitization. Deserializing goes through the same sanitizer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Nickname(String);

impl Nickname {
    /// Sanitize raw player input. Returns `None` if nothing usable remains.
    pub fn sanitize(raw: &str) -> Option<Self> {
        let kept: String = raw
            .chars()
            .filter_map(|c| {
                if c.is_whitespace() {
                    Some(' ')
                } else if c.is_alphanumeric() || c == '-' || c == '_' {
                    Some(c)
                } else {
                    None
                }
            })
            .collect();

        let collapsed = kept.split_whitespace().collect::<Vec<_>>().join(" ");
        let capped: String = collapsed.chars().take(MAX_NICKNAME_CHARS).collect();
        let name = capped.trim_end();

        if name.is_empty() {
            None
        } else {
            Some(Self(name.to_string()))
        }
    }

    /// The name used when the player cancels the prompt or enters nothing usable.
    pub fn anonymous() -> Self {
        Self(ANONYMOUS.to_string())
    }

    /// Sanitize, falling back to [`Nickname::anonymous`].
    pub fn sanitize_or_anonymous(raw: Option<&str>) -> Self {
        raw.and_then(Self::sanitize).unwrap_or_else(Self::anonymous)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Nickname {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Nickname {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::sanitize(&raw).ok_or_else(|| format!("invalid nickname: {raw:?}"))
    }
}

impl From<Nickname> for String {
    fn from(nickname: Nickname) -> Self {
        nickname.0
    }
}
