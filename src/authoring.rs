use std::fmt::Write;

use chrono::{NaiveDate, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde_yaml::{Mapping, Value};

use crate::schema::date_coercion::format_date_time;
use crate::schema::fields::{CATEGORY, DESCRIPTION, IMAGE, ORIGINAL_URL, PUB_DATE, READING_TIME, TAGS, TITLE};
use crate::schema::{validate, ArticleMetadata, Category, ValidationErrorList};

const MAX_SLUG_LEN: usize = 60;
const MAX_DESCRIPTION_LEN: usize = 200;
const WORDS_PER_MINUTE: f64 = 200.0;

/// URL-safe slug: ASCII, lower case, words joined by `-`, at most 60 characters.
pub fn slugify(text: &str) -> String {
    lazy_static! {
        static ref STRIP_REGEX: Regex = Regex::new(r"[^\w\s-]").unwrap();
        static ref DASH_REGEX: Regex = Regex::new(r"[-\s]+").unwrap();
    }

    let ascii = unidecode::unidecode(text).to_lowercase();
    let stripped = STRIP_REGEX.replace_all(&ascii, "");
    let dashed = DASH_REGEX.replace_all(&stripped, "-");

    dashed.trim_matches('-')
        .chars()
        .take(MAX_SLUG_LEN)
        .collect()
}

/// Reading time at 200 words per minute, never less than a minute.
pub fn estimate_reading_time(text: &str) -> String {
    let words = text.split_whitespace().count();
    let minutes = (words as f64 / WORDS_PER_MINUTE).round_ties_even().max(1.0) as u64;
    format!("{} min", minutes)
}

pub fn summarize_description(text: &str) -> String {
    if text.chars().count() < MAX_DESCRIPTION_LEN {
        return text.to_string();
    }
    let mut summary: String = text.chars().take(MAX_DESCRIPTION_LEN - 3).collect();
    summary.push_str("...");
    summary
}

pub fn article_file_name(date: &NaiveDate, title: &str) -> String {
    format!("{}-{}.md", date.format("%Y-%m-%d"), slugify(title))
}

fn quote(text: &str) -> String {
    serde_json::Value::String(text.replace('"', "'")).to_string()
}

fn render_date(metadata: &ArticleMetadata) -> String {
    if metadata.pub_date.time() == NaiveTime::MIN {
        metadata.pub_date.format("%Y-%m-%d").to_string()
    } else {
        format_date_time(&metadata.pub_date)
    }
}

pub fn render_front_matter(metadata: &ArticleMetadata) -> String {
    let mut buf = String::new();
    let tags = serde_json::Value::from(metadata.tags.clone());

    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf, "title: {}", quote(&metadata.title));
    let _ = writeln!(&mut buf, "description: {}", quote(&metadata.description));
    let _ = writeln!(&mut buf, "pubDate: {}", render_date(metadata));
    let _ = writeln!(&mut buf, "category: {}", metadata.category);
    if let Some(ref url) = metadata.original_url {
        let _ = writeln!(&mut buf, "originalUrl: {}", quote(url));
    }
    let _ = writeln!(&mut buf, "author: {}", quote(&metadata.author));
    if let Some(ref reading_time) = metadata.reading_time {
        let _ = writeln!(&mut buf, "readingTime: {}", quote(reading_time));
    }
    let _ = writeln!(&mut buf, "tags: {}", tags);
    if let Some(ref image) = metadata.image {
        let _ = writeln!(&mut buf, "image: {}", quote(image));
    }
    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf);
    buf
}

pub fn render_article(metadata: &ArticleMetadata, body: &str) -> String {
    let mut buf = render_front_matter(metadata);
    buf.push_str(body);
    buf
}

/// What an author provides for a new article. The rest is derived or defaulted.
#[derive(Debug, Clone)]
pub struct ArticleDraft {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub original_url: Option<String>,
    pub tags: Vec<String>,
    pub image: Option<String>,
}

impl ArticleDraft {
    /// Builds the metadata through the validator, so a draft can never produce invalid front-matter.
    pub fn into_metadata(self, pub_date: &NaiveDate, body: &str) -> Result<ArticleMetadata, ValidationErrorList> {
        let mut raw = Mapping::new();
        let mut put = |key: &str, value: Value| {
            raw.insert(Value::String(key.to_string()), value);
        };

        put(TITLE.key, Value::String(self.title));
        put(DESCRIPTION.key, Value::String(summarize_description(&self.description)));
        put(PUB_DATE.key, Value::String(pub_date.format("%Y-%m-%d").to_string()));
        put(CATEGORY.key, Value::String(self.category.to_string()));
        if let Some(url) = self.original_url {
            put(ORIGINAL_URL.key, Value::String(url));
        }
        put(READING_TIME.key, Value::String(estimate_reading_time(body)));
        put(TAGS.key, Value::Sequence(self.tags.into_iter().map(Value::String).collect()));
        if let Some(image) = self.image {
            put(IMAGE.key, Value::String(image));
        }

        validate(&raw)
    }
}
