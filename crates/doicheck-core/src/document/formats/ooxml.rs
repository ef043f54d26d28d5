//! Shared Office Open XML helpers (ZIP container + paragraph text)

use std::fs::File;
use std::io::{BufRead, Read};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::document::resource::FileResource;
use crate::error::DocumentError;

/// Open the ZIP container behind an OOXML document.
///
/// Legacy binary `.doc`/`.ppt` files are not ZIP archives and fail here.
pub(crate) fn open_archive(resource: &FileResource) -> Result<ZipArchive<File>, DocumentError> {
    let file = resource.open_read()?;
    ZipArchive::new(file).map_err(|e| {
        DocumentError::extraction_failed(
            resource.path(),
            format!("not an Office Open XML package: {}", e),
        )
    })
}

/// Read one archive entry fully into memory
pub(crate) fn read_part<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
    path: &Path,
) -> Result<Vec<u8>, DocumentError> {
    let mut entry = archive
        .by_name(name)
        .map_err(|e| DocumentError::extraction_failed(path, format!("{}: {}", name, e)))?;
    let mut bytes = Vec::with_capacity(entry.size() as usize);
    entry
        .read_to_end(&mut bytes)
        .map_err(|e| DocumentError::extraction_failed(path, format!("{}: {}", name, e)))?;
    Ok(bytes)
}

/// Pulls paragraph text out of WordprocessingML or DrawingML.
///
/// Both dialects wrap runs of text in `t` elements inside `p` elements, so
/// matching on local names covers `w:p`/`w:t` and `a:p`/`a:t` alike.
pub(crate) struct ParagraphReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
}

impl<R: BufRead> ParagraphReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        let mut reader = Reader::from_reader(inner);
        reader.trim_text(false);
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    /// Text of the next top-level paragraph, or `None` at end of document
    pub(crate) fn next_paragraph(&mut self) -> Result<Option<String>, quick_xml::Error> {
        let mut depth = 0usize;
        let mut in_text = false;
        let mut text = String::new();

        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"p" => depth += 1,
                    b"t" if depth > 0 => in_text = true,
                    _ => {}
                },
                Event::Empty(e) if depth > 0 => match e.local_name().as_ref() {
                    b"tab" => text.push('\t'),
                    b"br" | b"cr" => text.push('\n'),
                    _ => {}
                },
                Event::Text(e) if in_text => text.push_str(&e.unescape()?),
                Event::End(e) => match e.local_name().as_ref() {
                    b"t" => in_text = false,
                    b"p" if depth > 0 => {
                        depth -= 1;
                        if depth == 0 {
                            return Ok(Some(text));
                        }
                    }
                    _ => {}
                },
                Event::Eof => {
                    return Ok(if depth > 0 { Some(text) } else { None });
                }
                _ => {}
            }
        }
    }

    /// All remaining paragraphs joined with `\n`
    pub(crate) fn read_to_string(&mut self) -> Result<String, quick_xml::Error> {
        let mut paragraphs = Vec::new();
        while let Some(paragraph) = self.next_paragraph()? {
            paragraphs.push(paragraph);
        }
        Ok(paragraphs.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>See </w:t></w:r><w:r><w:t>doi:10.1038/nature12373</w:t></w:r></w:p>
    <w:p/>
    <w:p><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t><w:br/><w:t>C &amp; D</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn test_paragraphs() {
        let mut reader = ParagraphReader::new(DOCUMENT.as_bytes());
        assert_eq!(
            reader.next_paragraph().unwrap().as_deref(),
            Some("See doi:10.1038/nature12373")
        );
        assert_eq!(reader.next_paragraph().unwrap().as_deref(), Some("A\tB\nC & D"));
        assert_eq!(reader.next_paragraph().unwrap(), None);
    }

    #[test]
    fn test_drawingml_paragraphs() {
        let slide = r#"<p:sld xmlns:a="a" xmlns:p="p"><p:cSld><p:spTree><p:sp><p:txBody>
            <a:p><a:r><a:t>Title</a:t></a:r></a:p>
            <a:p><a:r><a:t>https://doi.org/10.1126/science.1234567</a:t></a:r></a:p>
        </p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#;
        let text = ParagraphReader::new(slide.as_bytes())
            .read_to_string()
            .unwrap();
        assert_eq!(text, "Title\nhttps://doi.org/10.1126/science.1234567");
    }

    #[test]
    fn test_whitespace_between_runs_kept() {
        let xml = r#"<w:p xmlns:w="w"><w:r><w:t xml:space="preserve">cite </w:t></w:r><w:r><w:t>10.1000/xyz</w:t></w:r></w:p>"#;
        let text = ParagraphReader::new(xml.as_bytes())
            .read_to_string()
            .unwrap();
        assert_eq!(text, "cite 10.1000/xyz");
    }
}
