use crate::error::{Error, Result};
use crate::rank::TOP_K;
use crate::types::QueryKind;
use crate::writer::{DEFAULT_DELIMITER, DEFAULT_RUN_TAG};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Run configuration, read from a JSON file; `run_tag`, `delimiter` and `top_k` are optional
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// TREC `<DOC>` files to index
    #[serde(default)]
    pub corpus_paths: Vec<PathBuf>,
    pub topics_path: PathBuf,
    pub output_dir: PathBuf,
    /// Prefix of the run file names
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_run_tag")]
    pub run_tag: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_algorithm() -> String {
    "MYRANK1".to_string()
}

fn default_run_tag() -> String {
    DEFAULT_RUN_TAG.to_string()
}

fn default_delimiter() -> String {
    DEFAULT_DELIMITER.to_string()
}

fn default_top_k() -> usize {
    TOP_K
}

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&text)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: RunConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::Config("top_k must be positive".to_string()));
        }
        if self.run_tag.trim().is_empty() {
            return Err(Error::Config("run_tag must not be empty".to_string()));
        }
        if self.run_tag.contains(char::is_whitespace) {
            return Err(Error::Config(format!(
                "run_tag {:?} must not contain whitespace",
                self.run_tag
            )));
        }
        if self.delimiter.is_empty() {
            return Err(Error::Config("delimiter must not be empty".to_string()));
        }
        if self.algorithm.is_empty() {
            return Err(Error::Config("algorithm must not be empty".to_string()));
        }
        Ok(())
    }

    /// Run file for one query kind: `<output_dir>/<algorithm><Short|Long>Query.txt`
    pub fn output_path(&self, kind: QueryKind) -> PathBuf {
        self.output_dir
            .join(format!("{}{}.txt", self.algorithm, kind.file_suffix()))
    }
}
