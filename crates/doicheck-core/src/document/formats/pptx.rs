//! Presentation reader (`.pptx`)

use std::fs::File;
use std::path::PathBuf;

use zip::ZipArchive;

use super::ooxml::{open_archive, read_part, ParagraphReader};
use crate::document::resource::FileResource;
use crate::document::text_unit::{TextStream, TextUnit};
use crate::error::DocumentError;

/// `ppt/slides/slideN.xml` entries ordered by N
fn slide_names<R>(archive: &ZipArchive<R>) -> Vec<String>
where
    R: std::io::Read + std::io::Seek,
{
    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            let number = name
                .strip_prefix("ppt/slides/slide")?
                .strip_suffix(".xml")?
                .parse::<u32>()
                .ok()?;
            Some((number, name.to_string()))
        })
        .collect();
    slides.sort();
    slides.into_iter().map(|(_, name)| name).collect()
}

fn slide_text(
    archive: &mut ZipArchive<File>,
    name: &str,
    path: &std::path::Path,
) -> Result<String, DocumentError> {
    let xml = read_part(archive, name, path)?;
    ParagraphReader::new(xml.as_slice())
        .read_to_string()
        .map_err(|e| DocumentError::extraction_failed(path, format!("{}: {}", name, e)))
}

pub(crate) fn read_all(resource: &FileResource) -> Result<String, DocumentError> {
    let mut archive = open_archive(resource)?;
    let mut slides = Vec::new();
    for name in slide_names(&archive) {
        slides.push(slide_text(&mut archive, &name, resource.path())?);
    }
    Ok(slides.join("\n"))
}

pub(crate) fn stream(resource: &FileResource) -> Result<TextStream, DocumentError> {
    let archive = open_archive(resource)?;
    let names = slide_names(&archive);
    Ok(Box::new(Slides {
        path: resource.path().to_path_buf(),
        archive,
        names: names.into_iter(),
        index: 0,
        failed: false,
    }))
}

/// One unit per slide; each slide is decompressed only when reached
struct Slides {
    path: PathBuf,
    archive: ZipArchive<File>,
    names: std::vec::IntoIter<String>,
    index: usize,
    failed: bool,
}

impl Iterator for Slides {
    type Item = Result<TextUnit, DocumentError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let name = self.names.next()?;
        match slide_text(&mut self.archive, &name, &self.path) {
            Ok(text) => {
                let unit = TextUnit::chunk(&self.path, self.index, text);
                self.index += 1;
                Some(Ok(unit))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    #[test]
    fn test_slide_names_numeric_order() {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for name in [
            "ppt/slides/slide10.xml",
            "ppt/slides/slide2.xml",
            "ppt/slides/_rels/slide1.xml.rels",
            "ppt/slides/slide1.xml",
            "ppt/presentation.xml",
        ] {
            zip.start_file(name, options).unwrap();
            zip.write_all(b"<x/>").unwrap();
        }
        let cursor = zip.finish().unwrap();
        let archive = ZipArchive::new(cursor).unwrap();

        assert_eq!(
            slide_names(&archive),
            vec![
                "ppt/slides/slide1.xml",
                "ppt/slides/slide2.xml",
                "ppt/slides/slide10.xml",
            ]
        );
    }
}
