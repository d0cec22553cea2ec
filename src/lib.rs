pub mod authoring;
pub mod config;
pub mod content;
pub mod logger;
pub mod schema;
#[cfg(test)]
mod test_data;
