use std::fmt;
use std::fmt::{Display, Formatter};

use serde_yaml::{Mapping, Value};

pub const DEFAULT_AUTHOR: &str = "AI Digest";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    Category,
    Url,
    TextList,
}

impl FieldKind {
    pub fn expected(&self) -> &'static str {
        match self {
            FieldKind::Text => "string",
            FieldKind::Date => "date (YYYY-MM-DD, RFC 3339, RFC 2822 or millisecond timestamp)",
            FieldKind::Category => "one of news, paper, repo, analysis",
            FieldKind::Url => "absolute URL",
            FieldKind::TextList => "sequence of strings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    /// Substituted when the key is absent. Holds the default as written in front-matter.
    Defaulted(&'static str),
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub kind: FieldKind,
    pub presence: Presence,
}

impl Display for FieldDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let presence = match self.presence {
            Presence::Required => "required".to_string(),
            Presence::Defaulted(default) => format!("default {}", default),
            Presence::Optional => "optional".to_string(),
        };
        write!(f, "{:<12} {:<10} {}", self.key, presence, self.kind.expected())
    }
}

pub const TITLE: FieldDescriptor = FieldDescriptor { key: "title", kind: FieldKind::Text, presence: Presence::Required };
pub const DESCRIPTION: FieldDescriptor = FieldDescriptor { key: "description", kind: FieldKind::Text, presence: Presence::Required };
pub const PUB_DATE: FieldDescriptor = FieldDescriptor { key: "pubDate", kind: FieldKind::Date, presence: Presence::Required };
pub const CATEGORY: FieldDescriptor = FieldDescriptor { key: "category", kind: FieldKind::Category, presence: Presence::Required };
pub const ORIGINAL_URL: FieldDescriptor = FieldDescriptor { key: "originalUrl", kind: FieldKind::Url, presence: Presence::Optional };
pub const AUTHOR: FieldDescriptor = FieldDescriptor { key: "author", kind: FieldKind::Text, presence: Presence::Defaulted("\"AI Digest\"") };
pub const READING_TIME: FieldDescriptor = FieldDescriptor { key: "readingTime", kind: FieldKind::Text, presence: Presence::Optional };
pub const TAGS: FieldDescriptor = FieldDescriptor { key: "tags", kind: FieldKind::TextList, presence: Presence::Defaulted("[]") };
pub const IMAGE: FieldDescriptor = FieldDescriptor { key: "image", kind: FieldKind::Text, presence: Presence::Optional };

/// Every front-matter field of an article, in declaration order.
pub static FIELDS: [FieldDescriptor; 9] = [
    TITLE,
    DESCRIPTION,
    PUB_DATE,
    CATEGORY,
    ORIGINAL_URL,
    AUTHOR,
    READING_TIME,
    TAGS,
    IMAGE,
];

pub fn find_field(key: &str) -> Option<&'static FieldDescriptor> {
    FIELDS.iter().find(|field| field.key == key)
}

/// Keys of `raw` the schema does not declare. These are dropped by validation.
pub fn unknown_keys(raw: &Mapping) -> Vec<String> {
    raw.keys()
        .map(|key| match key {
            Value::String(s) => s.clone(),
            other => serde_yaml::to_string(other)
                .map(|s| s.trim_end().to_string())
                .unwrap_or_else(|_| "<unprintable key>".to_string()),
        })
        .filter(|key| find_field(key).is_none())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_field() {
        assert_eq!(find_field("pubDate"), Some(&PUB_DATE));
        assert_eq!(find_field("pub_date"), None);
    }

    #[test]
    fn test_unknown_keys() {
        let raw: Mapping = serde_yaml::from_str(r#"
title: "x"
layout: post
draft: true
tags: []
"#).unwrap();
        assert_eq!(unknown_keys(&raw), vec!["layout", "draft"]);
    }

    #[test]
    fn test_only_optional_fields_may_be_absent() {
        let optional: Vec<&str> = FIELDS.iter()
            .filter(|f| f.presence == Presence::Optional)
            .map(|f| f.key)
            .collect();
        assert_eq!(optional, ["originalUrl", "readingTime", "image"]);
    }
}
