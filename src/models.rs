//! Core data models for the dispatcher

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

//
// ================= Messages =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// A single role-tagged message. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

//
// ================= Category =================
//

/// Business domain a user message is routed to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Executive,
    Finance,
    Hr,
    Operations,
    Marketing,
    Sales,
    Technology,
    Legal,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Executive,
        Category::Finance,
        Category::Hr,
        Category::Operations,
        Category::Marketing,
        Category::Sales,
        Category::Technology,
        Category::Legal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Executive => "executive",
            Category::Finance => "finance",
            Category::Hr => "hr",
            Category::Operations => "operations",
            Category::Marketing => "marketing",
            Category::Sales => "sales",
            Category::Technology => "technology",
            Category::Legal => "legal",
        }
    }

    /// Wire labels of every category, in declaration order
    pub fn labels() -> [&'static str; 8] {
        Self::ALL.map(|c| c.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_is_exact() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }

        assert!("HR".parse::<Category>().is_err());
        assert!(" hr".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
        assert_eq!(
            "astrology".parse::<Category>(),
            Err(UnknownCategory("astrology".to_string()))
        );
    }

    #[test]
    fn test_category_serde_matches_labels() {
        let json = serde_json::to_string(&Category::Technology).unwrap();
        assert_eq!(json, "\"technology\"");
        assert_eq!(Category::labels().len(), 8);
        assert_eq!(Category::labels()[2], "hr");
    }

    #[test]
    fn test_message_constructors() {
        let msg = Message::user("What's the Q3 budget?");
        assert_eq!(msg.role(), Role::User);
        assert_eq!(msg.content(), "What's the Q3 budget?");
        assert_eq!(Message::assistant("ok").role().to_string(), "assistant");
    }
}
