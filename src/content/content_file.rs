use std::{fs, io};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use spdlog::{debug, warn};

use crate::content::content_format::ContentFormat;
use crate::content::front_matter::{parse_front_matter, FrontMatterError};
use crate::content::Article;
use crate::schema::fields::unknown_keys;
use crate::schema::validate_value;

pub struct ContentFile {
    pub slug: String,
    pub file_path: PathBuf,
    pub format: ContentFormat,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_file(file_path: PathBuf) -> io::Result<ContentFile> {
        let format = match ContentFormat::from_path(&file_path) {
            None => return Err(io::Error::new(ErrorKind::Unsupported, format!("Could not guess the type of the file {}", file_path.display()))),
            Some(format) => format,
        };

        let raw_content = fs::read_to_string(&file_path)?;

        Ok(ContentFile {
            slug: Self::slug_of(&file_path),
            file_path,
            format,
            raw_content,
        })
    }

    pub fn slug_of(file_path: &Path) -> String {
        file_path.file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub fn to_article(&self, warn_unknown_keys: bool) -> Result<Article, FrontMatterError> {
        debug!("Parsing {} as {:?}", self.file_path.display(), self.format);
        let (value, body) = parse_front_matter(&self.raw_content)?;

        if warn_unknown_keys {
            if let Some(mapping) = value.as_mapping() {
                let unknown = unknown_keys(mapping);
                if !unknown.is_empty() {
                    warn!("{}: ignoring unknown front-matter keys {}", self.file_path.display(), unknown.join(", "));
                }
            }
        }

        let metadata = validate_value(&value)?;

        Ok(Article {
            slug: self.slug.clone(),
            path: self.file_path.clone(),
            metadata,
            body: body.to_string(),
        })
    }
}
