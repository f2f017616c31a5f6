use std::io;
use std::path::PathBuf;

/// Errors from reading or writing the prompt record.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("prompt record not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// Classify an io error raised while touching `path`
    pub fn from_io(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
