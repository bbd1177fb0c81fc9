//! Options for chunked reads and writes.
//!
//! `ReadOptions` and `WriteOptions` are what the readers and writers take per
//! call. `ChunkConfig` is the layered, serializable form used by the CLI:
//! defaults, then an optional YAML file, then `PQCHUNK_*` environment
//! variables, then explicit flags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default file name prefix for written chunks.
pub const DEFAULT_PREFIX: &str = "data";

/// Order in which matched files are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOrder {
    /// Digit runs compare by numeric value, so `data_2` sorts before `data_10`.
    #[default]
    Natural,
    /// Plain byte-wise ordering of the path.
    Lexical,
    /// Whatever order directory enumeration produced.
    Unsorted,
}

impl fmt::Display for FileOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileOrder::Natural => "natural",
            FileOrder::Lexical => "lexical",
            FileOrder::Unsorted => "unsorted",
        };
        f.write_str(s)
    }
}

impl FromStr for FileOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "natural" => Ok(FileOrder::Natural),
            "lexical" | "lexicographic" => Ok(FileOrder::Lexical),
            "unsorted" | "none" => Ok(FileOrder::Unsorted),
            other => Err(Error::Config(format!(
                "unknown file order '{other}' (expected natural, lexical or unsorted)"
            ))),
        }
    }
}

/// Options for reading a chunked dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Stop after this many files. Ignored when exactly one file matches.
    pub limit: Option<usize>,
    /// Replace the concatenated row labels with a fresh `0..rows` range.
    pub reset_index: bool,
    pub order: FileOrder,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            limit: None,
            reset_index: true,
            order: FileOrder::default(),
        }
    }
}

impl ReadOptions {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_reset_index(mut self, reset_index: bool) -> Self {
        self.reset_index = reset_index;
        self
    }

    pub fn with_order(mut self, order: FileOrder) -> Self {
        self.order = order;
        self
    }
}

/// Options for writing a dataset as chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Number of files to split the rows across.
    pub chunks: usize,
    /// File name stem; chunk `n` is written as `{prefix}_{n}.parquet`.
    pub prefix: String,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            chunks: 1,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl WriteOptions {
    pub fn with_chunks(mut self, chunks: usize) -> Self {
        self.chunks = chunks;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

/// Layered configuration backing the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChunkConfig {
    pub chunks: usize,
    pub prefix: String,
    pub limit: Option<usize>,
    pub reset_index: bool,
    pub order: FileOrder,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        let read = ReadOptions::default();
        let write = WriteOptions::default();
        Self {
            chunks: write.chunks,
            prefix: write.prefix,
            limit: read.limit,
            reset_index: read.reset_index,
            order: read.order,
        }
    }
}

impl ChunkConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self> {
        Self::default().apply_vars(std::env::vars())
    }

    /// Parse a YAML document; keys that are absent keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ChunkConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `PQCHUNK_*` variables. Unrelated variables are ignored.
    pub fn apply_vars<I, K, V>(mut self, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "PQCHUNK_CHUNKS" => self.chunks = parse_var(key, value)?,
                "PQCHUNK_PREFIX" => self.prefix = value.to_string(),
                "PQCHUNK_LIMIT" => {
                    self.limit = if value.trim().is_empty() {
                        None
                    } else {
                        Some(parse_var(key, value)?)
                    }
                }
                "PQCHUNK_RESET_INDEX" => self.reset_index = parse_bool(key, value)?,
                "PQCHUNK_ORDER" => {
                    self.order = value
                        .parse::<FileOrder>()
                        .map_err(|e| Error::Config(format!("{key}: {e}")))?
                }
                _ => {}
            }
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunks == 0 {
            return Err(Error::Config("chunks must be at least 1".into()));
        }
        if self.prefix.is_empty() {
            return Err(Error::Config("prefix must not be empty".into()));
        }
        Ok(())
    }

    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            limit: self.limit,
            reset_index: self.reset_index,
            order: self.order,
        }
    }

    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            chunks: self.chunks,
            prefix: self.prefix.clone(),
        }
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("{key}={value}: {e}")))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::Config(format!("{key}={value}: expected a boolean"))),
    }
}
