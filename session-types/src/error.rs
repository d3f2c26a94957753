use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed input at `{key}`: {reason}")]
    MalformedInput { key: String, reason: String },

    #[error("{}: invalid JSON", source_name(.path))]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode JSON")]
    Encode {
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: file not found", .path.display())]
    NotFound { path: PathBuf },

    #[error("{}: permission denied", .path.display())]
    PermissionDenied { path: PathBuf },

    #[error("{}: {source}", .path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid hex color: {0}")]
    InvalidHex(String),
}

impl Error {
    pub(crate) fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::FileIo { path, source },
        }
    }
}

fn source_name(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map_or_else(|| "<string>".to_string(), |p| p.display().to_string())
}

pub type Result<T> = std::result::Result<T, Error>;
