//! Word processing reader (`.docx`)

use std::io::Cursor;
use std::path::PathBuf;

use super::ooxml::{open_archive, read_part, ParagraphReader};
use crate::document::resource::FileResource;
use crate::document::text_unit::{TextStream, TextUnit};
use crate::error::DocumentError;

const DOCUMENT_PART: &str = "word/document.xml";

fn document_xml(resource: &FileResource) -> Result<Vec<u8>, DocumentError> {
    let mut archive = open_archive(resource)?;
    read_part(&mut archive, DOCUMENT_PART, resource.path())
}

pub(crate) fn read_all(resource: &FileResource) -> Result<String, DocumentError> {
    let xml = document_xml(resource)?;
    ParagraphReader::new(xml.as_slice())
        .read_to_string()
        .map_err(|e| DocumentError::extraction_failed(resource.path(), e))
}

pub(crate) fn stream(resource: &FileResource) -> Result<TextStream, DocumentError> {
    let xml = document_xml(resource)?;
    Ok(Box::new(Paragraphs {
        path: resource.path().to_path_buf(),
        reader: ParagraphReader::new(Cursor::new(xml)),
        index: 0,
        done: false,
    }))
}

/// One unit per non-empty paragraph
struct Paragraphs {
    path: PathBuf,
    reader: ParagraphReader<Cursor<Vec<u8>>>,
    index: usize,
    done: bool,
}

impl Iterator for Paragraphs {
    type Item = Result<TextUnit, DocumentError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.reader.next_paragraph() {
                Ok(Some(text)) if text.trim().is_empty() => continue,
                Ok(Some(text)) => {
                    let unit = TextUnit::chunk(&self.path, self.index, text);
                    self.index += 1;
                    return Some(Ok(unit));
                }
                Ok(None) => self.done = true,
                Err(e) => {
                    self.done = true;
                    return Some(Err(DocumentError::extraction_failed(&self.path, e)));
                }
            }
        }
        None
    }
}
