use std::fmt::Write;
use std::fs;

use anyhow::{bail, Result};
use chrono::Utc;
use spdlog::info;

use article_schema::authoring::{article_file_name, render_article, ArticleDraft};
use article_schema::config::Config;

use crate::{ArticleOutput, NewArgs};

fn render_body() -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "## Sobre");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "This is a body example");
    let _ = writeln!(&mut buf, "Please remove it and replace with your content");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "## Fonte Original");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "Link to the source and credit the authors here.");

    buf
}

pub fn new_cmd(config: &Config, args: NewArgs) -> Result<()> {
    let date = Utc::now().date_naive();
    let body = render_body();
    let file_name = article_file_name(&date, &args.title);

    let draft = ArticleDraft {
        title: args.title,
        description: args.description,
        category: args.category,
        original_url: args.url,
        tags: args.tags,
        image: args.image,
    };
    let metadata = draft.into_metadata(&date, &body)?;
    let article = render_article(&metadata, &body);

    match args.output {
        ArticleOutput::Stdout => {
            print!("{}", article);
        }
        ArticleOutput::File => {
            let content_dir = &config.paths.content_dir;
            let file_path = content_dir.join(&file_name);
            if file_path.exists() {
                bail!("{} already exists", file_path.display());
            }
            fs::create_dir_all(content_dir)?;
            fs::write(&file_path, article)?;
            info!("Created {}", file_path.display());
            println!("Creating file {}", file_path.display());
        }
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use article_schema::content::front_matter::read_article;
    use article_schema::schema::Category;

    use super::*;

    #[test]
    fn test_skeleton_is_valid() {
        let date = Utc::now().date_naive();
        let draft = ArticleDraft {
            title: "A new repo".to_string(),
            description: "Something useful".to_string(),
            category: Category::Repo,
            original_url: None,
            tags: vec![],
            image: None,
        };
        let body = render_body();
        let metadata = draft.into_metadata(&date, &body).unwrap();
        let article = render_article(&metadata, &body);

        let (parsed, parsed_body) = read_article(&article).unwrap();
        assert_eq!(parsed, metadata);
        assert_eq!(parsed_body, format!("\n{}", body));
    }
}
