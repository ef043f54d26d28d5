//! Per-format readers

pub(crate) mod docx;
pub(crate) mod ooxml;
pub(crate) mod pdf;
pub(crate) mod plain;
pub(crate) mod pptx;
