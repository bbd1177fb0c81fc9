use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),

    /// Error with context chain for better debugging
    #[error("Error in {context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Add context to an error, creating an error chain.
    ///
    /// # Example
    /// ```rust,no_run
    /// use pqchunk_core::error::Error;
    /// let err = Error::InvalidArgument("chunks must be at least 1".into());
    /// let err = err.with_context("while writing chunked dataset");
    /// ```
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Error::Context {
            context: context.into(),
            source: Box::new(self) as Box<dyn std::error::Error + Send + Sync>,
        }
    }

    /// Get suggestions for common misuse.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Error::Schema(msg) => {
                if msg.contains("column") {
                    vec![
                        "Check that every file in the dataset uses the same type for each column".into(),
                        "Make sure the path prefix only matches files of one dataset".into(),
                    ]
                } else {
                    vec![]
                }
            }
            Error::InvalidArgument(msg) if msg.contains("chunks") => {
                vec!["Pass a chunk count of 1 or more".into()]
            }
            Error::Config(msg) => {
                if msg.contains("PQCHUNK_") {
                    vec!["Check the PQCHUNK_* environment variables".into()]
                } else {
                    vec!["Check the config file against the documented keys".into()]
                }
            }
            Error::Context { source, .. } => source
                .downcast_ref::<Error>()
                .map(Error::suggestions)
                .unwrap_or_default(),
            _ => vec![],
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Config(e.to_string())
    }
}
