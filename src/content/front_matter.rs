use serde_yaml::{Mapping, Value};
use thiserror::Error;

use crate::schema::{validate_value, ArticleMetadata, SchemaError};

const DELIMITER: &str = "---";
const END_DELIMITER: &str = "...";

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("document has no front-matter block")]
    Missing,
    #[error("front-matter block is not closed with '---'")]
    Unterminated,
    #[error("front-matter is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

fn is_delimiter(line: &str, delimiter: &str) -> bool {
    line.trim_end() == delimiter
}

/// Splits a document into its front-matter block and body.
///
/// The block must start on the very first line. A document without it is all body.
pub fn split_front_matter(text: &str) -> Result<(Option<&str>, &str), FrontMatterError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split_inclusive('\n');

    match lines.next() {
        Some(first) if is_delimiter(first, DELIMITER) => {
            let start = first.len();
            let mut offset = start;
            for line in lines {
                if is_delimiter(line, DELIMITER) || is_delimiter(line, END_DELIMITER) {
                    let block = &text[start..offset];
                    let body = &text[offset + line.len()..];
                    return Ok((Some(block), body));
                }
                offset += line.len();
            }
            Err(FrontMatterError::Unterminated)
        }
        _ => Ok((None, text)),
    }
}

/// Parses the front-matter block as YAML. An empty block is an empty mapping.
pub fn parse_front_matter(text: &str) -> Result<(Value, &str), FrontMatterError> {
    let (block, body) = split_front_matter(text)?;
    let block = block.ok_or(FrontMatterError::Missing)?;

    if block.trim().is_empty() {
        return Ok((Value::Mapping(Mapping::new()), body));
    }

    let value: Value = serde_yaml::from_str(block)?;
    let value = match value {
        Value::Null => Value::Mapping(Mapping::new()),
        other => other,
    };

    Ok((value, body))
}

pub fn read_article(text: &str) -> Result<(ArticleMetadata, &str), FrontMatterError> {
    let (value, body) = parse_front_matter(text)?;
    let metadata = validate_value(&value)?;
    Ok((metadata, body))
}

#[cfg(test)]
mod tests {
    use crate::schema::Category;
    use crate::test_data::{ARTICLE_MD, ARTICLE_NO_FRONT_MATTER};

    use super::*;

    #[test]
    fn test_split() {
        let text = "---\ntitle: x\n---\nbody\n";
        let (block, body) = split_front_matter(text).unwrap();
        assert_eq!(block, Some("title: x\n"));
        assert_eq!(body, "body\n");
    }

    #[test]
    fn test_split_crlf_and_bom() {
        let text = "\u{feff}---\r\ntitle: x\r\n---\r\nbody";
        let (block, body) = split_front_matter(text).unwrap();
        assert_eq!(block, Some("title: x\r\n"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_split_without_front_matter() {
        let (block, body) = split_front_matter(ARTICLE_NO_FRONT_MATTER).unwrap();
        assert_eq!(block, None);
        assert_eq!(body, ARTICLE_NO_FRONT_MATTER);

        // A delimiter further down is a horizontal rule, not front-matter
        let text = "# Title\n---\ntitle: x\n---\n";
        assert_eq!(split_front_matter(text).unwrap().0, None);
    }

    #[test]
    fn test_unterminated() {
        let err = split_front_matter("---\ntitle: x\nbody\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Unterminated));
    }

    #[test]
    fn test_closing_dots() {
        let (block, body) = split_front_matter("---\na: 1\n...\nrest").unwrap();
        assert_eq!(block, Some("a: 1\n"));
        assert_eq!(body, "rest");
    }

    #[test]
    fn test_parse_missing() {
        let err = parse_front_matter(ARTICLE_NO_FRONT_MATTER).unwrap_err();
        assert!(matches!(err, FrontMatterError::Missing));
    }

    #[test]
    fn test_parse_empty_block() {
        let (value, body) = parse_front_matter("---\n---\nbody").unwrap();
        assert_eq!(value, Value::Mapping(Mapping::new()));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_parse_bad_yaml() {
        let err = parse_front_matter("---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn test_read_article() {
        let (metadata, body) = read_article(ARTICLE_MD).unwrap();
        assert_eq!(metadata.title, "Meta lança Llama 3 com 70B parâmetros");
        assert_eq!(metadata.category, Category::News);
        assert_eq!(metadata.reading_time.as_deref(), Some("3 min"));
        assert_eq!(metadata.tags, ["llm", "meta", "open-source"]);
        assert!(body.starts_with("\n## Sobre"));
    }

    #[test]
    fn test_read_article_not_a_mapping() {
        let err = read_article("---\n- a\n- b\n---\n").unwrap_err();
        match err {
            FrontMatterError::Schema(SchemaError::NotAMapping { received }) => assert_eq!(received, "sequence of 2 item(s)"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_read_article_field_errors() {
        let err = read_article("---\ntitle: x\ncategory: blog\n---\n").unwrap_err();
        let FrontMatterError::Schema(schema_error) = err else {
            panic!("expected a schema error");
        };
        let fields = schema_error.field_errors().unwrap().fields();
        assert_eq!(fields, vec!["description", "pubDate", "category"]);
    }
}
