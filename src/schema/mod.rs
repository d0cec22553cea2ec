use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::schema::date_coercion::format_date_time;
use crate::schema::fields::{AUTHOR, CATEGORY, DESCRIPTION, IMAGE, ORIGINAL_URL, PUB_DATE, READING_TIME, TAGS, TITLE};

pub mod date_coercion;
pub mod errors;
pub mod fields;
pub mod validator;

pub use errors::{FieldValidationError, SchemaError, ValidationErrorList};
pub use validator::{validate, validate_value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    News,
    Paper,
    Repo,
    Analysis,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::News, Category::Paper, Category::Repo, Category::Analysis];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::News => "news",
            Category::Paper => "paper",
            Category::Repo => "repo",
            Category::Analysis => "analysis",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL.iter()
            .find(|category| category.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown category {:?}, expected one of news, paper, repo, analysis", s))
    }
}

/// Validated front-matter of one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMetadata {
    pub title: String,
    pub description: String,
    pub pub_date: DateTime<Utc>,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ArticleMetadata {
    /// Plain front-matter for this record. Validating it again yields the same record.
    pub fn to_mapping(&self) -> Mapping {
        let mut mapping = Mapping::new();
        let mut put = |key: &str, value: Value| {
            mapping.insert(Value::String(key.to_string()), value);
        };

        put(TITLE.key, Value::String(self.title.clone()));
        put(DESCRIPTION.key, Value::String(self.description.clone()));
        put(PUB_DATE.key, Value::String(format_date_time(&self.pub_date)));
        put(CATEGORY.key, Value::String(self.category.to_string()));
        if let Some(ref url) = self.original_url {
            put(ORIGINAL_URL.key, Value::String(url.clone()));
        }
        put(AUTHOR.key, Value::String(self.author.clone()));
        if let Some(ref reading_time) = self.reading_time {
            put(READING_TIME.key, Value::String(reading_time.clone()));
        }
        put(TAGS.key, Value::Sequence(self.tags.iter().cloned().map(Value::String).collect()));
        if let Some(ref image) = self.image {
            put(IMAGE.key, Value::String(image.clone()));
        }

        mapping
    }
}
