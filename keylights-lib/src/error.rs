use std::path::PathBuf;

/// All error types that can occur when loading a light config or talking to a
/// Key Light.
///
/// [`Error::Config`] and [`Error::UnknownAlias`] are fatal: they happen before
/// any device has been contacted, so the whole invocation aborts. The
/// [`Error::Transport`] and [`Error::Protocol`] variants are recoverable at the
/// batch level and are isolated to the light that produced them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The config file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file is not valid JSON.
    #[error("invalid JSON in config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The config file parsed but its contents are unusable.
    #[error("invalid config: {0}")]
    Config(String),

    /// The requested target alias does not exist in the config.
    #[error("no light with alias '{0}' found in config")]
    UnknownAlias(String),

    /// A network-level failure reaching a light (refused, timeout, DNS).
    #[error("network error reaching {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    /// The light answered, but not the way a Key Light should.
    #[error("unexpected response from {url}: {reason}")]
    Protocol { url: String, reason: String },
}

impl Error {
    /// Create a new transport error for the given device URL.
    pub fn transport(url: &str, source: reqwest::Error) -> Self {
        Error::Transport {
            url: url.to_string(),
            source,
        }
    }

    /// Create a new protocol error for the given device URL.
    pub fn protocol(url: &str, reason: impl Into<String>) -> Self {
        Error::Protocol {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error aborts the whole invocation rather than a single
    /// light.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::ConfigRead { .. }
                | Error::ConfigParse { .. }
                | Error::Config(_)
                | Error::UnknownAlias(_)
        )
    }
}
