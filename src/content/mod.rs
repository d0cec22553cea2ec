use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::content::front_matter::FrontMatterError;
use crate::schema::ArticleMetadata;

pub mod collection;
pub mod content_file;
pub mod content_format;
pub mod front_matter;

#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub slug: String,
    pub path: PathBuf,
    pub metadata: ArticleMetadata,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum ArticleError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    FrontMatter(#[from] FrontMatterError),
}
