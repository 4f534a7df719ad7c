//! Category record and its ULID identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// A unique identifier for categories based on ULID.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CategoryId(Ulid);

impl CategoryId {
    /// Creates a new CategoryId with the current timestamp.
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoryId(\"{}\")", self.0)
    }
}

/// Error returned when parsing an invalid category id.
#[derive(Debug, Clone)]
pub struct ParseCategoryIdError {
    value: String,
    reason: String,
}

impl fmt::Display for ParseCategoryIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid category id '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for ParseCategoryIdError {}

impl FromStr for CategoryId {
    type Err = ParseCategoryIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s)
            .map(CategoryId)
            .map_err(|e| ParseCategoryIdError {
                value: s.to_string(),
                reason: e.to_string(),
            })
    }
}

impl Serialize for CategoryId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for CategoryId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A user-defined note category.
///
/// The full category list is persisted as one opaque array value under a
/// single fixed key, never record-by-record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    /// Creates a category with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_category_has_fresh_id() {
        let a = Category::new("work");
        let b = Category::new("work");
        assert_eq!(a.name, "work");
        assert!(a.id != b.id, "each category should get its own id");
    }

    #[test]
    fn serde_roundtrip() {
        let category = Category {
            id: "01HQ3K5M7NXJK4QZPW8V2R6T9Y".parse().unwrap(),
            name: "reading list".to_string(),
        };
        let json = serde_json::to_string(&category).unwrap();
        let parsed: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(category, parsed);
    }

    #[test]
    fn id_serializes_as_plain_string() {
        let category = Category {
            id: "01HQ3K5M7NXJK4QZPW8V2R6T9Y".parse().unwrap(),
            name: "work".to_string(),
        };
        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["id"], "01HQ3K5M7NXJK4QZPW8V2R6T9Y");
    }

    #[test]
    fn parse_invalid_category_id_fails() {
        let result: Result<CategoryId, _> = "nope".parse();
        assert!(result.is_err());
    }
}
