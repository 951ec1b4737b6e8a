use std::path::{Path, PathBuf};

/// Errors raised while reading dumps or reading/writing artifacts.
#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Required file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("JSON error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Invalid string table: {0}")]
    InvalidStrings(String),
}

impl DumpError {
    pub fn json(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn invalid_strings(msg: impl Into<String>) -> Self {
        Self::InvalidStrings(msg.into())
    }
}
