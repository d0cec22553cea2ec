use std::{fs, io};
use std::cmp::Reverse;
use std::path::PathBuf;

use spdlog::{debug, info, warn};

use crate::content::content_file::ContentFile;
use crate::content::content_format::ContentFormat;
use crate::content::{Article, ArticleError};

/// A directory of articles, one document per file.
pub struct Collection {
    pub root_dir: PathBuf,
    pub warn_unknown_keys: bool,
}

#[derive(Debug)]
pub struct ArticleFailure {
    pub path: PathBuf,
    pub error: ArticleError,
}

#[derive(Debug, Default)]
pub struct CollectionReport {
    pub articles: Vec<Article>,
    pub failures: Vec<ArticleFailure>,
}

impl CollectionReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn newest_first(&self) -> Vec<&Article> {
        let mut articles: Vec<&Article> = self.articles.iter().collect();
        articles.sort_by_key(|article| (Reverse(article.metadata.pub_date), article.slug.clone()));
        articles
    }
}

impl Collection {
    pub fn new(root_dir: PathBuf) -> Self {
        Collection { root_dir, warn_unknown_keys: true }
    }

    pub fn with_unknown_key_warnings(mut self, warn_unknown_keys: bool) -> Self {
        self.warn_unknown_keys = warn_unknown_keys;
        self
    }

    /// Markdown and MDX files directly inside the collection directory, sorted by name.
    /// Symbolic links are followed.
    pub fn retrieve_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut files = vec![];
        let entries = fs::read_dir(self.root_dir.as_path())?;
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if ContentFormat::from_path(&path).is_some() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Validates every file. A failing document is reported and the others are still loaded.
    pub fn load(&self) -> io::Result<CollectionReport> {
        info!("Loading articles from {}", self.root_dir.display());

        let mut report = CollectionReport::default();
        for path in self.retrieve_files()? {
            match self.load_file(&path) {
                Ok(article) => {
                    debug!("Loaded {} ({})", article.slug, article.metadata.category);
                    report.articles.push(article);
                }
                Err(error) => {
                    warn!("Invalid article {}: {}", path.display(), error);
                    report.failures.push(ArticleFailure { path, error });
                }
            }
        }

        info!("{} article(s) loaded, {} invalid", report.articles.len(), report.failures.len());
        Ok(report)
    }

    fn load_file(&self, path: &PathBuf) -> Result<Article, ArticleError> {
        let content = ContentFile::from_file(path.clone())?;
        Ok(content.to_article(self.warn_unknown_keys)?)
    }
}
