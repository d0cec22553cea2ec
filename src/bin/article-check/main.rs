use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use spdlog::warn;

use article_schema::logger::configure_logger;
use article_schema::schema::fields::FIELDS;
use article_schema::schema::Category;

use crate::check::check_cmd;
use crate::config::open_config;
use crate::new_article::new_cmd;

mod check;
mod config;
mod new_article;

const CFG_FILE_NAME: &str = "article-check.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Args {
    /// Validate the front-matter of every article in the collection
    Check(CheckArgs),
    /// Create a new article with valid front-matter
    New(NewArgs),
    /// Print the front-matter schema
    Schema,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    /// Directory holding the articles. Overrides the configuration
    #[arg(short = 'd', long)]
    content_dir: Option<String>,

    /// Print the validated articles as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct NewArgs {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    /// Title of the article
    #[arg(short, long)]
    title: String,

    /// One of news, paper, repo, analysis
    #[arg(short = 'k', long)]
    category: Category,

    /// Short description. Trimmed to 200 characters
    #[arg(short = 's', long)]
    description: String,

    /// URL of the original source
    #[arg(short, long)]
    url: Option<String>,

    /// Tag, can be repeated
    #[arg(short = 'g', long = "tag")]
    tags: Vec<String>,

    /// Cover image
    #[arg(short, long)]
    image: Option<String>,

    /// Where the new article goes
    #[arg(short, long, default_value_t = ArticleOutput::Stdout)]
    output: ArticleOutput,
}

#[derive(Clone, Debug, ValueEnum)]
enum ArticleOutput {
    /// Writes the new article to the stdout
    Stdout,
    /// Writes the new article to a file in the content directory
    File,
}

impl Display for ArticleOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ArticleOutput::Stdout => write!(f, "stdout"),
            ArticleOutput::File => write!(f, "file"),
        }
    }
}

fn print_schema() {
    for field in FIELDS.iter() {
        println!("{}", field);
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let config_path = match args {
        Args::Check(ref args) => args.config_path.clone(),
        Args::New(ref args) => args.config_path.clone(),
        Args::Schema => {
            print_schema();
            return Ok(ExitCode::SUCCESS);
        }
    };

    let config = open_config(config_path.map(PathBuf::from))?;
    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    match args {
        Args::Check(args) => check_cmd(config, args),
        Args::New(args) => new_cmd(&config, args).map(|_| ExitCode::SUCCESS),
        Args::Schema => Ok(ExitCode::SUCCESS),
    }
}
