use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use spdlog::{error, info, Level, LevelFilter};

use article_schema::config::Config;
use article_schema::content::collection::{ArticleFailure, Collection};

use crate::CheckArgs;

fn render_failure(failure: &ArticleFailure) -> String {
    let mut buf = format!("{}\n", failure.path.display());
    for line in failure.error.to_string().lines() {
        buf.push_str("  - ");
        buf.push_str(line);
        buf.push('\n');
    }
    buf
}

pub fn check_cmd(config: Config, args: CheckArgs) -> Result<ExitCode> {
    if args.json {
        // Keep stdout for the JSON document
        spdlog::default_logger().set_level_filter(LevelFilter::MoreSevereEqual(Level::Warn));
    }

    let content_dir = args.content_dir
        .map(PathBuf::from)
        .unwrap_or(config.paths.content_dir);

    let collection = Collection::new(content_dir)
        .with_unknown_key_warnings(config.check.warn_unknown_keys);
    let report = collection.load()
        .with_context(|| format!("Error reading content dir {}", collection.root_dir.display()))?;

    for failure in &report.failures {
        error!("Invalid front-matter in {}", failure.path.display());
        eprint!("{}", render_failure(failure));
    }

    if args.json {
        let records: Vec<_> = report.newest_first()
            .into_iter()
            .map(|article| &article.metadata)
            .collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        println!("{} valid, {} invalid", report.articles.len(), report.failures.len());
    }

    if report.is_clean() {
        info!("All articles are valid");
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, io};

    use article_schema::content::front_matter::FrontMatterError;
    use article_schema::content::ArticleError;

    use super::*;

    #[test]
    fn test_render_failure() {
        let failure = ArticleFailure {
            path: PathBuf::from("articles/a.md"),
            error: ArticleError::Io(io::Error::new(io::ErrorKind::NotFound, "gone")),
        };
        assert_eq!(render_failure(&failure), "articles/a.md\n  - gone\n");

        let failure = ArticleFailure {
            path: PathBuf::from("articles/b.md"),
            error: ArticleError::FrontMatter(FrontMatterError::Missing),
        };
        assert_eq!(render_failure(&failure), "articles/b.md\n  - document has no front-matter block\n");
    }

    #[test]
    fn test_check_cmd_exit_code() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("2024-01-15-a.md"), "---\ntitle: A\ndescription: B\npubDate: 2024-01-15\ncategory: news\nlayout: post\n---\nBody\n")?;

        let run = || -> Result<String> {
            let mut config = Config::default();
            config.check.warn_unknown_keys = false;
            let args = CheckArgs { config_path: None, content_dir: Some(dir.path().display().to_string()), json: false };
            Ok(format!("{:?}", check_cmd(config, args)?))
        };
        assert_eq!(run()?, format!("{:?}", ExitCode::SUCCESS));

        fs::write(dir.path().join("2024-01-16-b.md"), "---\ntitle: A\n---\n")?;
        assert_eq!(run()?, format!("{:?}", ExitCode::FAILURE));
        Ok(())
    }
}
