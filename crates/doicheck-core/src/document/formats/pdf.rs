//! PDF reader backed by the system pdfium library

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use pdfium_render::prelude::*;
use tracing::warn;

use crate::document::resource::FileResource;
use crate::document::text_unit::{TextStream, TextUnit};
use crate::error::DocumentError;

fn bind() -> Result<Pdfium, String> {
    Pdfium::bind_to_system_library()
        .map(Pdfium::new)
        .map_err(|e| format!("pdfium not available: {}", e))
}

/// Visit page texts in order; stops early when `visit` returns false
fn for_each_page<F>(pdfium: &Pdfium, path: &Path, mut visit: F) -> Result<(), String>
where
    F: FnMut(String) -> bool,
{
    let document = pdfium
        .load_pdf_from_file(path, None)
        .map_err(|e| e.to_string())?;

    for (i, page) in document.pages().iter().enumerate() {
        let text = page
            .text()
            .map_err(|e| format!("page {}: {}", i + 1, e))?;
        if !visit(text.all()) {
            break;
        }
    }
    Ok(())
}

pub(crate) fn read_all(resource: &FileResource) -> Result<String, DocumentError> {
    let pdfium = bind().map_err(|e| DocumentError::extraction_failed(resource.path(), e))?;

    let mut full_text = String::new();
    for_each_page(&pdfium, resource.path(), |page_text| {
        if !full_text.is_empty() {
            full_text.push('\n');
        }
        full_text.push_str(&page_text);
        true
    })
    .map_err(|e| DocumentError::extraction_failed(resource.path(), e))?;

    Ok(full_text)
}

/// Pages are produced by a helper thread that owns the pdfium document.
///
/// The channel holds at most one page, so memory stays bounded by a page
/// or two. Dropping the stream closes the channel and the helper stops at
/// its next send.
pub(crate) fn stream(resource: &FileResource) -> Result<TextStream, DocumentError> {
    let path = resource.path().to_path_buf();
    let (tx, rx) = mpsc::sync_channel::<Result<String, String>>(1);

    let worker_path = path.clone();
    thread::Builder::new()
        .name("doicheck-pdf".to_string())
        .spawn(move || {
            let outcome = bind().and_then(|pdfium| {
                for_each_page(&pdfium, &worker_path, |page_text| {
                    tx.send(Ok(page_text)).is_ok()
                })
            });
            if let Err(e) = outcome {
                if tx.send(Err(e)).is_err() {
                    warn!(path = %worker_path.display(), "pdf reader stopped after consumer left");
                }
            }
        })
        .map_err(|e| DocumentError::extraction_failed(&path, e))?;

    Ok(Box::new(Pages {
        path,
        rx,
        index: 0,
        failed: false,
    }))
}

struct Pages {
    path: PathBuf,
    rx: Receiver<Result<String, String>>,
    index: usize,
    failed: bool,
}

impl Iterator for Pages {
    type Item = Result<TextUnit, DocumentError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.rx.recv().ok()? {
            Ok(text) => {
                let unit = TextUnit::chunk(&self.path, self.index, text);
                self.index += 1;
                Some(Ok(unit))
            }
            Err(cause) => {
                self.failed = true;
                Some(Err(DocumentError::extraction_failed(&self.path, cause)))
            }
        }
    }
}
