//! Plain text reader

use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;

use crate::document::resource::FileResource;
use crate::document::text_unit::{TextStream, TextUnit};
use crate::error::DocumentError;

pub(crate) fn read_all(resource: &FileResource) -> Result<String, DocumentError> {
    let mut file = resource.open_read()?;
    let mut bytes = Vec::with_capacity(resource.size() as usize);
    file.read_to_end(&mut bytes)
        .map_err(|e| DocumentError::extraction_failed(resource.path(), e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub(crate) fn stream(
    resource: &FileResource,
    chunk_size: usize,
) -> Result<TextStream, DocumentError> {
    let file = resource.open_read()?;
    Ok(Box::new(LineChunks::new(
        resource.path().to_path_buf(),
        file,
        chunk_size,
    )))
}

/// Units of up to `chunk_size` bytes, cut only after a newline.
///
/// Cutting on line boundaries keeps UTF-8 sequences intact, and a line
/// longer than `chunk_size` is emitted on its own.
pub(crate) struct LineChunks<R> {
    path: PathBuf,
    reader: BufReader<R>,
    chunk_size: usize,
    pending: Option<Vec<u8>>,
    index: usize,
    done: bool,
}

impl<R: Read> LineChunks<R> {
    pub(crate) fn new(path: PathBuf, inner: R, chunk_size: usize) -> Self {
        Self {
            path,
            reader: BufReader::new(inner),
            chunk_size: chunk_size.max(1),
            pending: None,
            index: 0,
            done: false,
        }
    }
}

impl<R: Read> Iterator for LineChunks<R> {
    type Item = Result<TextUnit, DocumentError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut chunk = self.pending.take().unwrap_or_default();

        while !self.done && chunk.len() < self.chunk_size {
            let mut line = Vec::new();
            match self.reader.read_until(b'\n', &mut line) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    if !chunk.is_empty() && chunk.len() + line.len() > self.chunk_size {
                        self.pending = Some(line);
                        break;
                    }
                    chunk.extend_from_slice(&line);
                }
                Err(e) => {
                    self.done = true;
                    self.pending = None;
                    return Some(Err(DocumentError::extraction_failed(&self.path, e)));
                }
            }
        }

        if chunk.is_empty() {
            return None;
        }

        let unit = TextUnit::chunk(
            &self.path,
            self.index,
            String::from_utf8_lossy(&chunk).into_owned(),
        );
        self.index += 1;
        Some(Ok(unit))
    }
}
