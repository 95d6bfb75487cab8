//! Input files handed to the engine
//!
//!     An [`InputFile`] is an id, a declared encoding, a main/test classification and a way
//!     to read its bytes: from disk, or from memory for callers that already hold the content.

use crate::source::Encoding;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    #[default]
    Main,
    Test,
}

#[derive(Debug, Clone)]
enum Contents {
    Disk(PathBuf),
    Memory(Arc<[u8]>),
}

#[derive(Debug, Clone)]
pub struct InputFile {
    id: String,
    kind: FileKind,
    encoding: Encoding,
    contents: Contents,
}

impl InputFile {
    pub fn from_path(path: impl AsRef<Path>, kind: FileKind, encoding: Encoding) -> Self {
        let path = path.as_ref();
        Self {
            id: path.display().to_string(),
            kind,
            encoding,
            contents: Contents::Disk(path.to_path_buf()),
        }
    }

    pub fn from_bytes(
        id: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
        kind: FileKind,
        encoding: Encoding,
    ) -> Self {
        let bytes: Vec<u8> = bytes.into();
        Self {
            id: id.into(),
            kind,
            encoding,
            contents: Contents::Memory(bytes.into()),
        }
    }

    /// In-memory UTF-8 file.
    pub fn from_text(id: impl Into<String>, text: &str, kind: FileKind) -> Self {
        Self::from_bytes(id, text.as_bytes(), kind, Encoding::Utf8)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn is_test(&self) -> bool {
        self.kind == FileKind::Test
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn read_bytes(&self) -> io::Result<Vec<u8>> {
        match &self.contents {
            Contents::Disk(path) => std::fs::read(path),
            Contents::Memory(bytes) => Ok(bytes.to_vec()),
        }
    }
}
