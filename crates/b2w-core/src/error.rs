use std::io;
use std::path::PathBuf;

use b2w_domain::PlatformError;

/// Failures surfaced by a wheel build. None are retried.
#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error("binary not found or unreadable: {}", path.display())]
    BinaryNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("readme not readable: {}", path.display())]
    Readme {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
    #[error("writing wheel archive: {0}")]
    Archive(#[from] zip::result::ZipError),
}

impl BuildError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Stable machine-readable code for JSON output.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Platform(_) => "invalid_platform",
            Self::BinaryNotFound { .. } => "binary_not_found",
            Self::Readme { .. } => "readme_unreadable",
            Self::Io { .. } | Self::Archive(_) => "io_error",
        }
    }

    /// Whether the caller can fix this by changing the invocation.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Io { .. } | Self::Archive(_))
    }
}
