//! Media type detection
//!
//! Detects a media type from the leading bytes of an upload. Detection
//! is by magic bytes only; client-declared content types and filenames
//! are never trusted for the type gate.

/// Number of leading bytes captured for detection.
pub const SNIFF_SAMPLE_LEN: usize = 512;

/// Detect a media type from a sample of at most [`SNIFF_SAMPLE_LEN`] bytes.
///
/// Returns `application/octet-stream` when no signature matches or the
/// sample is empty.
pub fn sniff_media_type(sample: &[u8]) -> &'static str {
    if sample.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return "image/jpeg";
    }
    if sample.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        return "image/png";
    }
    if sample.starts_with(b"GIF87a") || sample.starts_with(b"GIF89a") {
        return "image/gif";
    }
    if sample.len() >= 12 && &sample[0..4] == b"RIFF" && &sample[8..12] == b"WEBP" {
        return "image/webp";
    }
    // SVG must be checked before the text heuristic, an SVG document is plain text.
    if looks_like_svg(sample) {
        return "image/svg+xml";
    }
    if looks_like_text(sample) {
        return "text/plain";
    }
    "application/octet-stream"
}

/// Strip any `;charset=...` parameters from a media type.
pub fn normalize_media_type(media_type: &str) -> &str {
    media_type
        .split(';')
        .next()
        .map(str::trim)
        .unwrap_or(media_type)
}

/// Markup whose first element, after any XML prologue, is an `<svg` tag.
///
/// An `<svg` buried deeper in a document (inline svg in HTML) does not
/// make the document an image.
fn looks_like_svg(sample: &[u8]) -> bool {
    let mut rest = sample.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(sample);
    loop {
        rest = rest.trim_ascii_start();
        if !rest.starts_with(b"<") {
            return false;
        }
        if rest.starts_with(b"<?") {
            // XML declaration or processing instruction.
            match rest.windows(2).position(|w| w == b"?>") {
                Some(i) => rest = &rest[i + 2..],
                None => return false,
            }
        } else if rest.starts_with(b"<!--") {
            match rest.windows(3).position(|w| w == b"-->") {
                Some(i) => rest = &rest[i + 3..],
                None => return false,
            }
        } else if rest.starts_with(b"<!") {
            // DOCTYPE.
            match rest.iter().position(|&b| b == b'>') {
                Some(i) => rest = &rest[i + 1..],
                None => return false,
            }
        } else {
            break;
        }
    }
    if !rest
        .get(..4)
        .is_some_and(|tag| tag.eq_ignore_ascii_case(b"<svg"))
    {
        return false;
    }
    // The tag name must end here, `<svgfoo>` is not an svg element.
    match rest.get(4) {
        Some(&b) => b.is_ascii_whitespace() || b == b'>' || b == b'/' || b == b':',
        None => true,
    }
}

/// Non-empty content with no NUL and no control bytes other than
/// tab, newline, form feed, and carriage return.
fn looks_like_text(sample: &[u8]) -> bool {
    !sample.is_empty()
        && !sample
            .iter()
            .any(|&b| b == 0 || (b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\x0C' | b'\r')))
}
