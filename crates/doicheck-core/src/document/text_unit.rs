//! Extracted text and where it came from

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::DocumentError;

/// Position of a unit within its document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkIndex {
    /// The whole document in one unit
    Whole,
    /// Zero-based chunk number in a chunked read
    Index(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Provenance {
    pub path: PathBuf,
    pub chunk: ChunkIndex,
}

/// One piece of extracted text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUnit {
    pub text: String,
    pub provenance: Provenance,
}

impl TextUnit {
    pub fn whole(path: &Path, text: String) -> Self {
        Self {
            text,
            provenance: Provenance {
                path: path.to_path_buf(),
                chunk: ChunkIndex::Whole,
            },
        }
    }

    pub fn chunk(path: &Path, index: usize, text: String) -> Self {
        Self {
            text,
            provenance: Provenance {
                path: path.to_path_buf(),
                chunk: ChunkIndex::Index(index),
            },
        }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Finite, single-pass sequence of units. Reading again means opening the
/// resource again.
pub type TextStream = Box<dyn Iterator<Item = Result<TextUnit, DocumentError>> + Send>;
