//! Error type for generating and saving the synthetic table.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Opening, writing or reading a table file failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Writing or reading a delimited record failed
    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),
    /// The generator settings are not usable
    #[error("Config error: {0}")]
    Config(String),
    /// The config file is not valid YAML for the settings
    #[error("Config file error: {0}")]
    ConfigFile(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
