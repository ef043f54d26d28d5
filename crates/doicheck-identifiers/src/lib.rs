//! DOI identification for doicheck
//!
//! This crate provides the text-level half of a citation audit:
//! - DOI extraction from arbitrary text with a fixed boundary policy
//! - `Doi` / `DoiSet`, case-insensitive identity and deduplication
//! - Direct DOI-list input (bypassing document extraction)
//! - Validation helpers for single identifiers

pub mod doi;
pub mod extractors;
pub mod input;
pub mod validators;

pub use doi::*;
pub use extractors::*;
pub use input::*;
pub use validators::*;
