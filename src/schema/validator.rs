use chrono::{DateTime, Utc};
use serde_yaml::{Mapping, Value};
use url::Url;

use crate::schema::date_coercion::{coerce_date, DateCoercionError};
use crate::schema::errors::{describe, FieldValidationError, SchemaError, ValidationErrorList};
use crate::schema::fields::{FieldDescriptor, AUTHOR, CATEGORY, DEFAULT_AUTHOR, DESCRIPTION, IMAGE, ORIGINAL_URL, PUB_DATE, READING_TIME, TAGS, TITLE};
use crate::schema::{ArticleMetadata, Category};

/// Collects field errors while the fields are checked one after the other.
///
/// Every check returns `None` after recording an error, so the final record can
/// only be assembled when no error was recorded.
struct Checker<'a> {
    raw: &'a Mapping,
    errors: Vec<FieldValidationError>,
}

impl<'a> Checker<'a> {
    fn new(raw: &'a Mapping) -> Self {
        Checker { raw, errors: vec![] }
    }

    fn fail(&mut self, field: &str, expected: &str, received: String) {
        self.errors.push(FieldValidationError::new(field, expected, received));
    }

    fn lookup(&self, field: &FieldDescriptor) -> Option<&'a Value> {
        self.raw.get(field.key)
    }

    fn required(&mut self, field: &FieldDescriptor) -> Option<&'a Value> {
        let value = self.lookup(field);
        if value.is_none() {
            self.fail(field.key, field.kind.expected(), "missing".to_string());
        }
        value
    }

    fn string(&mut self, field: &FieldDescriptor, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            other => {
                self.fail(field.key, field.kind.expected(), describe(other));
                None
            }
        }
    }

    fn required_text(&mut self, field: &FieldDescriptor) -> Option<String> {
        let value = self.required(field)?;
        let text = self.string(field, value)?;
        if text.is_empty() {
            self.fail(field.key, "non-empty string", describe(value));
            return None;
        }
        Some(text)
    }

    fn defaulted_text(&mut self, field: &FieldDescriptor, default: &str) -> Option<String> {
        match self.lookup(field) {
            None => Some(default.to_string()),
            Some(value) => self.string(field, value),
        }
    }

    fn optional_text(&mut self, field: &FieldDescriptor) -> Option<Option<String>> {
        match self.lookup(field) {
            None => Some(None),
            Some(value) => self.string(field, value).map(Some),
        }
    }

    fn date(&mut self, field: &FieldDescriptor) -> Option<DateTime<Utc>> {
        let value = self.required(field)?;
        match coerce_date(value) {
            Ok(date_time) => Some(date_time),
            Err(DateCoercionError::UnsupportedType) => {
                self.fail(field.key, field.kind.expected(), describe(value));
                None
            }
            Err(e) => {
                self.fail(field.key, field.kind.expected(), format!("{} ({})", describe(value), e));
                None
            }
        }
    }

    fn category(&mut self, field: &FieldDescriptor) -> Option<Category> {
        let value = self.required(field)?;
        let text = self.string(field, value)?;
        match text.parse::<Category>() {
            Ok(category) => Some(category),
            Err(_) => {
                self.fail(field.key, field.kind.expected(), describe(value));
                None
            }
        }
    }

    fn optional_url(&mut self, field: &FieldDescriptor) -> Option<Option<String>> {
        let Some(value) = self.lookup(field) else {
            return Some(None);
        };
        let text = self.string(field, value)?;
        match Url::parse(&text) {
            Ok(_) => Some(Some(text)),
            Err(e) => {
                self.fail(field.key, field.kind.expected(), format!("{} ({})", describe(value), e));
                None
            }
        }
    }

    fn text_list(&mut self, field: &FieldDescriptor) -> Option<Vec<String>> {
        let items = match self.lookup(field) {
            None => return Some(vec![]),
            Some(Value::Sequence(items)) => items,
            Some(other) => {
                self.fail(field.key, field.kind.expected(), describe(other));
                return None;
            }
        };

        let mut list = Vec::with_capacity(items.len());
        let mut valid = true;
        for (i, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => list.push(s.clone()),
                other => {
                    self.fail(&format!("{}[{}]", field.key, i), "string", describe(other));
                    valid = false;
                }
            }
        }

        valid.then_some(list)
    }

    fn into_error(self) -> ValidationErrorList {
        ValidationErrorList::new(self.errors)
    }
}

/// Validates parsed front-matter into an [`ArticleMetadata`].
///
/// Every field is checked, so the error list names each problem of the document at once.
/// Keys the schema does not declare are ignored.
pub fn validate(raw: &Mapping) -> Result<ArticleMetadata, ValidationErrorList> {
    let mut checker = Checker::new(raw);

    let title = checker.required_text(&TITLE);
    let description = checker.required_text(&DESCRIPTION);
    let pub_date = checker.date(&PUB_DATE);
    let category = checker.category(&CATEGORY);
    let original_url = checker.optional_url(&ORIGINAL_URL);
    let author = checker.defaulted_text(&AUTHOR, DEFAULT_AUTHOR);
    let reading_time = checker.optional_text(&READING_TIME);
    let tags = checker.text_list(&TAGS);
    let image = checker.optional_text(&IMAGE);

    match (title, description, pub_date, category, original_url, author, reading_time, tags, image) {
        (
            Some(title),
            Some(description),
            Some(pub_date),
            Some(category),
            Some(original_url),
            Some(author),
            Some(reading_time),
            Some(tags),
            Some(image),
        ) => Ok(ArticleMetadata {
            title,
            description,
            pub_date,
            category,
            original_url,
            author,
            reading_time,
            tags,
            image,
        }),
        _ => Err(checker.into_error()),
    }
}

/// Like [`validate`], for input that may not be a mapping at all.
pub fn validate_value(raw: &Value) -> Result<ArticleMetadata, SchemaError> {
    match raw {
        Value::Mapping(mapping) => Ok(validate(mapping)?),
        other => Err(SchemaError::NotAMapping { received: describe(other) }),
    }
}
