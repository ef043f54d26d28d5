//! Supported document formats

use serde::{Deserialize, Serialize};

/// Document formats doicheck can read text from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// Plain text, read as raw bytes
    PlainText,
    /// Word processing (Office Open XML)
    WordProcessing,
    /// Presentation (Office Open XML)
    Presentation,
    /// Portable Document Format
    Pdf,
}

impl DocumentFormat {
    /// Get all document formats
    pub fn all() -> &'static [DocumentFormat] {
        &[
            DocumentFormat::PlainText,
            DocumentFormat::WordProcessing,
            DocumentFormat::Presentation,
            DocumentFormat::Pdf,
        ]
    }

    /// Resolve a format from a file extension (no leading dot, any case)
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|format| format.extensions().contains(&extension.as_str()))
    }

    /// Extensions mapped to this format
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            DocumentFormat::PlainText => &["txt"],
            DocumentFormat::WordProcessing => &["doc", "docx"],
            DocumentFormat::Presentation => &["ppt", "pptx"],
            DocumentFormat::Pdf => &["pdf"],
        }
    }

    /// Every extension any format understands
    pub fn supported_extensions() -> Vec<&'static str> {
        Self::all()
            .iter()
            .flat_map(|format| format.extensions().iter().copied())
            .collect()
    }

    pub fn display_name(self) -> &'static str {
        match self {
            DocumentFormat::PlainText => "plain text",
            DocumentFormat::WordProcessing => "word processing",
            DocumentFormat::Presentation => "presentation",
            DocumentFormat::Pdf => "PDF",
        }
    }
}
