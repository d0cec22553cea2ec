use std::io::ErrorKind;
use std::path::PathBuf;
use std::{env, fs, io};

use serde::Deserialize;

pub const DEFAULT_CONTENT_DIR: &str = "src/content/articles";

#[derive(Deserialize)]
pub struct Paths {
    pub content_dir: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Paths { content_dir: PathBuf::from(DEFAULT_CONTENT_DIR) }
    }
}

#[derive(Deserialize)]
pub struct Check {
    #[serde(default = "default_warn_unknown_keys")]
    pub warn_unknown_keys: bool,
}

fn default_warn_unknown_keys() -> bool {
    true
}

impl Default for Check {
    fn default() -> Self {
        Check { warn_unknown_keys: default_warn_unknown_keys() }
    }
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub check: Check,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    let Some(str_path) = path.to_str() else {
        return Ok(path);
    };
    if !str_path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent()
        .map(|dir| dir.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok(PathBuf::from(str_path.replace("${exe_dir}", &exe_dir)))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        content_dir: parse_path(cfg.paths.content_dir)?,
    };
    if let Some(ref mut log) = cfg.log {
        if let Some(location) = log.location.take() {
            log.location = Some(parse_path(location)?);
        }
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
