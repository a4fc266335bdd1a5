use std::fmt;

use serde::{Deserialize, Serialize};

/// Master or instance identifier as sent by callers.
///
/// Clients send these either as JSON numbers or as strings, so both are
/// accepted. The procedures always receive the textual form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Number(i64),
    Text(String),
}

impl Identifier {
    /// An identifier is unset when blank or numerically zero
    pub fn is_unset(&self) -> bool {
        match self {
            Identifier::Number(n) => *n == 0,
            Identifier::Text(s) => {
                let trimmed = s.trim();
                trimmed.is_empty() || trimmed.parse::<i64>().map(|n| n == 0).unwrap_or(false)
            }
        }
    }

    /// Value bound to the procedure parameter
    pub fn as_param(&self) -> String {
        match self {
            Identifier::Number(n) => n.to_string(),
            Identifier::Text(s) => s.trim().to_string(),
        }
    }

    /// `true` when the optional identifier is present and not unset
    pub fn is_present(id: Option<&Identifier>) -> bool {
        id.is_some_and(|id| !id.is_unset())
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Identifier::Text(value.to_string())
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Identifier::Number(value)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_param())
    }
}
