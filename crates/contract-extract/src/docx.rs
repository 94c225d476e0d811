//! DOCX text extraction
//!
//! A `.docx` file is a zip container; the body lives in
//! `word/document.xml`. Only paragraphs that are direct children of
//! `w:body` are collected, so table cells and text boxes are left out.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::ExtractError;

const DOCUMENT_XML: &str = "word/document.xml";

/// Extract body paragraphs joined with `\n`, in document order
pub fn extract_docx(docx_bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = ZipArchive::new(Cursor::new(docx_bytes))
        .map_err(|e| ExtractError::Docx(format!("not a valid DOCX container: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_XML)
        .map_err(|e| ExtractError::Docx(format!("missing {}: {}", DOCUMENT_XML, e)))?
        .read_to_string(&mut xml)?;

    let paragraphs = body_paragraphs(&xml)?;
    Ok(paragraphs.join("\n"))
}

/// Walk WordprocessingML and collect the text of each body-level `w:p`
fn body_paragraphs(xml: &str) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut depth = 0usize;
    let mut body_depth: Option<usize> = None;
    // Text of the body-level paragraph being read
    let mut current: Option<String> = None;
    // Paragraphs opened inside `current` (text boxes)
    let mut nested = 0usize;
    let mut in_text = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ExtractError::Docx(format!("malformed {}: {}", DOCUMENT_XML, e)))?;

        match event {
            Event::Start(e) => {
                depth += 1;
                match e.name().as_ref() {
                    b"w:body" => body_depth = Some(depth),
                    b"w:p" => {
                        if current.is_some() {
                            nested += 1;
                        } else if body_depth.is_some_and(|b| depth == b + 1) {
                            current = Some(String::new());
                        }
                    }
                    b"w:t" => in_text = true,
                    _ => {}
                }
            }
            Event::Empty(e) => {
                let Some(text) = current.as_mut().filter(|_| nested == 0) else {
                    // A self-closing body paragraph is an empty line
                    if e.name().as_ref() == b"w:p"
                        && current.is_none()
                        && body_depth.is_some_and(|b| depth == b)
                    {
                        paragraphs.push(String::new());
                    }
                    continue;
                };
                match e.name().as_ref() {
                    b"w:tab" => text.push('\t'),
                    b"w:br" | b"w:cr" => text.push('\n'),
                    _ => {}
                }
            }
            Event::Text(e) => {
                if in_text && nested == 0 {
                    if let Some(text) = current.as_mut() {
                        let unescaped = e.unescape().map_err(|err| {
                            ExtractError::Docx(format!("bad text in {}: {}", DOCUMENT_XML, err))
                        })?;
                        text.push_str(&unescaped);
                    }
                }
            }
            Event::End(e) => {
                match e.name().as_ref() {
                    b"w:t" => in_text = false,
                    b"w:p" => {
                        if nested > 0 {
                            nested -= 1;
                        } else if let Some(text) = current.take() {
                            paragraphs.push(text);
                        }
                    }
                    b"w:body" => body_depth = None,
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}
