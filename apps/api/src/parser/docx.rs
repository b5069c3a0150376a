use std::io::{Cursor, Read};

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, Event};
use quick_xml::Reader;

use super::ParseError;

/// Paragraph text of a DOCX file, one paragraph per line. Empty paragraphs are dropped.
pub fn extract_text(bytes: &[u8]) -> Result<String, ParseError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ParseError::DocumentCorrupt(format!("not a DOCX archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ParseError::DocumentCorrupt(format!("word/document.xml missing: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ParseError::DocumentCorrupt(format!("word/document.xml unreadable: {e}")))?;

    paragraphs(&xml).map(|p| p.join("\n"))
}

/// Paragraphs in document order. A paragraph nested in a text box ends the
/// text collected so far for its enclosing paragraph instead of discarding it.
fn paragraphs(xml: &str) -> Result<Vec<String>, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;
    // legacy copy of drawings that Word also writes under mc:Choice
    let mut fallback_depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"Fallback" => fallback_depth += 1,
                _ if fallback_depth > 0 => {}
                b"t" => in_text = true,
                b"p" => push_paragraph(&mut paragraphs, &mut current),
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"Fallback" => fallback_depth = fallback_depth.saturating_sub(1),
                _ if fallback_depth > 0 => {}
                b"t" => in_text = false,
                b"p" => push_paragraph(&mut paragraphs, &mut current),
                _ => {}
            },
            Ok(Event::Empty(ref e)) if fallback_depth == 0 => match e.local_name().as_ref() {
                b"tab" => current.push('\t'),
                b"br" | b"cr" => current.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text && fallback_depth == 0 => {
                let decoded = e
                    .decode()
                    .map_err(|e| ParseError::DocumentCorrupt(format!("bad text run: {e}")))?;
                current.push_str(&decoded);
            }
            Ok(Event::GeneralRef(r)) if in_text && fallback_depth == 0 => {
                push_reference(&mut current, &r)?;
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ParseError::DocumentCorrupt(format!(
                    "XML error at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
    }
    // text outside any <w:p>
    push_paragraph(&mut paragraphs, &mut current);

    Ok(paragraphs)
}

/// Appends the text of `&name;` or `&#N;`. Unknown entities are kept verbatim.
fn push_reference(current: &mut String, r: &BytesRef<'_>) -> Result<(), ParseError> {
    let corrupt = |detail: String| ParseError::DocumentCorrupt(format!("bad reference: {detail}"));

    if let Some(ch) = r.resolve_char_ref().map_err(|e| corrupt(e.to_string()))? {
        current.push(ch);
        return Ok(());
    }
    let name = r.decode().map_err(|e| corrupt(e.to_string()))?;
    match resolve_predefined_entity(&name) {
        Some(text) => current.push_str(text),
        None => {
            current.push('&');
            current.push_str(&name);
            current.push(';');
        }
    }
    Ok(())
}

fn push_paragraph(paragraphs: &mut Vec<String>, current: &mut String) {
    let text = current.trim();
    if !text.is_empty() {
        paragraphs.push(text.to_string());
    }
    current.clear();
}
