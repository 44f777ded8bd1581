//! Minimal PDF 1.4 writer for printable record sheets.
//!
//! Text only, using the standard Helvetica faces with `WinAnsiEncoding`, on
//! A4 pages. Lines that do not fit on the current page start a new one.

use std::fmt::Write as _;

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 56.0;

/// Object numbers of the fixed objects; pages follow from `FIRST_PAGE_OBJ`.
const CATALOG_OBJ: usize = 1;
const PAGES_OBJ: usize = 2;
const FONT_REGULAR_OBJ: usize = 3;
const FONT_BOLD_OBJ: usize = 4;
const FONT_ITALIC_OBJ: usize = 5;
const INFO_OBJ: usize = 6;
const FIRST_PAGE_OBJ: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Title,
    Heading,
    Body,
    Italic,
    Label,
}

impl Style {
    const fn font(self) -> &'static str {
        match self {
            Self::Title | Self::Heading | Self::Label => "F2",
            Self::Body => "F1",
            Self::Italic => "F3",
        }
    }

    const fn size(self) -> f32 {
        match self {
            Self::Title => 20.0,
            Self::Heading => 14.0,
            Self::Body | Self::Italic | Self::Label => 10.0,
        }
    }

    fn leading(self) -> f32 {
        self.size() * 1.4
    }
}

/// Rough number of Helvetica glyphs fitting in `width` points.
fn chars_for_width(width: f32, size: f32) -> usize {
    // Helvetica averages a little over half an em per glyph.
    let per_char = size * 0.52;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = (width / per_char).floor() as usize;
    n.max(1)
}

/// Greedy word wrap on character counts.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            let line_len = line.chars().count();

            if line_len > 0 && line_len + 1 + word_len > max_chars {
                lines.push(std::mem::take(&mut line));
            }

            if word_len > max_chars {
                let chars: Vec<char> = word.chars().collect();
                for chunk in chars.chunks(max_chars) {
                    if !line.is_empty() {
                        lines.push(std::mem::take(&mut line));
                    }
                    line = chunk.iter().collect();
                }
                continue;
            }

            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Encodes `text` as the body of a PDF literal string in `WinAnsiEncoding`.
fn encode_literal(text: &str, out: &mut Vec<u8>) {
    for c in text.chars() {
        let byte = match c {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                c as u8
            }
            '\u{20}'..='\u{7e}' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '\u{20ac}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{0152}' => 0x8c,
            '\u{0153}' => 0x9c,
            _ => b'?',
        };
        out.push(byte);
    }
}

fn write_object(out: &mut Vec<u8>, offsets: &mut [usize], id: usize, body: &[u8]) {
    offsets[id] = out.len();
    out.extend_from_slice(format!("{id} 0 obj\n").as_bytes());
    out.extend_from_slice(body);
    out.extend_from_slice(b"\nendobj\n");
}

pub struct PdfDocument {
    title: String,
    pages: Vec<Vec<u8>>,
    current: Vec<u8>,
    cursor: f32,
}

impl PdfDocument {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            pages: Vec::new(),
            current: Vec::new(),
            cursor: PAGE_HEIGHT - MARGIN,
        }
    }

    fn break_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.cursor = PAGE_HEIGHT - MARGIN;
    }

    /// Moves the cursor down one line of `leading`, breaking the page if needed.
    fn advance(&mut self, leading: f32) {
        if self.cursor - leading < MARGIN {
            self.break_page();
        }
        self.cursor -= leading;
    }

    fn show(&mut self, style: Style, x: f32, text: &str) {
        let mut op = String::new();
        let _ = write!(
            op,
            "BT /{} {} Tf {:.2} {:.2} Td (",
            style.font(),
            style.size(),
            x,
            self.cursor
        );
        self.current.extend_from_slice(op.as_bytes());
        encode_literal(text, &mut self.current);
        self.current.extend_from_slice(b") Tj ET\n");
    }

    /// Wrapped paragraph across the full text width.
    pub fn text(&mut self, style: Style, text: &str) {
        let max = chars_for_width(PAGE_WIDTH - 2.0 * MARGIN, style.size());
        for line in wrap(text, max) {
            self.advance(style.leading());
            self.show(style, MARGIN, &line);
        }
    }

    /// `label` in bold with its value aligned in a second column.
    pub fn field(&mut self, label: &str, value: &str) {
        const VALUE_X: f32 = MARGIN + 150.0;

        let max = chars_for_width(PAGE_WIDTH - MARGIN - VALUE_X, Style::Body.size());
        for (i, line) in wrap(value, max).iter().enumerate() {
            self.advance(Style::Body.leading());
            if i == 0 {
                self.show(Style::Label, MARGIN, label);
            }
            self.show(Style::Body, VALUE_X, line);
        }
    }

    /// Table with a bold header row; cells are cut to their column width.
    pub fn table(&mut self, header: &[&str], rows: &[Vec<String>], widths: &[f32]) {
        self.table_row(Style::Label, header.iter().copied(), widths);
        for row in rows {
            self.table_row(Style::Body, row.iter().map(String::as_str), widths);
        }
    }

    fn table_row<'a>(&mut self, style: Style, cells: impl Iterator<Item = &'a str>, widths: &[f32]) {
        self.advance(style.leading());
        let mut x = MARGIN;
        for (cell, width) in cells.zip(widths) {
            let max = chars_for_width(width - 6.0, style.size());
            let text: String = cell.chars().take(max).collect();
            self.show(style, x, &text);
            x += width;
        }
    }

    pub fn space(&mut self, points: f32) {
        if self.cursor - points < MARGIN {
            self.break_page();
        } else {
            self.cursor -= points;
        }
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len() + 1
    }

    /// Serializes the document.
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        self.pages.push(std::mem::take(&mut self.current));

        let page_count = self.pages.len();
        let object_count = FIRST_PAGE_OBJ - 1 + page_count * 2;
        let mut out: Vec<u8> = Vec::new();
        let mut offsets = vec![0usize; object_count + 1];

        out.extend_from_slice(b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n");

        let kids = (0..page_count)
            .map(|i| format!("{} 0 R", FIRST_PAGE_OBJ + 2 * i))
            .collect::<Vec<_>>()
            .join(" ");

        write_object(
            &mut out,
            &mut offsets,
            CATALOG_OBJ,
            format!("<< /Type /Catalog /Pages {PAGES_OBJ} 0 R >>").as_bytes(),
        );
        write_object(
            &mut out,
            &mut offsets,
            PAGES_OBJ,
            format!("<< /Type /Pages /Kids [{kids}] /Count {page_count} >>").as_bytes(),
        );
        for (id, base) in [
            (FONT_REGULAR_OBJ, "Helvetica"),
            (FONT_BOLD_OBJ, "Helvetica-Bold"),
            (FONT_ITALIC_OBJ, "Helvetica-Oblique"),
        ] {
            write_object(
                &mut out,
                &mut offsets,
                id,
                format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{base} /Encoding /WinAnsiEncoding >>"
                )
                .as_bytes(),
            );
        }

        let mut info = b"<< /Producer (opkb) /Title (".to_vec();
        encode_literal(&self.title, &mut info);
        info.extend_from_slice(b") >>");
        write_object(&mut out, &mut offsets, INFO_OBJ, &info);

        for (i, content) in self.pages.iter().enumerate() {
            let page_id = FIRST_PAGE_OBJ + 2 * i;
            let content_id = page_id + 1;

            write_object(
                &mut out,
                &mut offsets,
                page_id,
                format!(
                    "<< /Type /Page /Parent {PAGES_OBJ} 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                     /Resources << /Font << /F1 {FONT_REGULAR_OBJ} 0 R /F2 {FONT_BOLD_OBJ} 0 R \
                     /F3 {FONT_ITALIC_OBJ} 0 R >> >> /Contents {content_id} 0 R >>"
                )
                .as_bytes(),
            );

            let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
            stream.extend_from_slice(content);
            stream.extend_from_slice(b"\nendstream");
            write_object(&mut out, &mut offsets, content_id, &stream);
        }

        let xref_offset = out.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", object_count + 1);
        for offset in offsets.iter().skip(1) {
            let _ = write!(xref, "{offset:010} 00000 n \n");
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {} /Root {CATALOG_OBJ} 0 R /Info {INFO_OBJ} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            object_count + 1
        );
        out.extend_from_slice(xref.as_bytes());

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_minimal_document_structure() {
        let mut doc = PdfDocument::new("Fiche");
        doc.text(Style::Title, "Fiche Personnage: Nami");
        let bytes = doc.finish();

        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        assert!(contains(&bytes, b"(Fiche Personnage: Nami) Tj"));
        assert!(contains(&bytes, b"/Count 1"));
        assert!(contains(&bytes, b"/BaseFont /Helvetica-Bold"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let mut doc = PdfDocument::new("x");
        doc.text(Style::Body, "hello");
        let bytes = doc.finish();

        let marker = b"startxref\n";
        let at = bytes
            .windows(marker.len())
            .rposition(|w| w == marker)
            .unwrap();
        let tail = std::str::from_utf8(&bytes[at + marker.len()..]).unwrap();
        let xref_at: usize = tail.lines().next().unwrap().parse().unwrap();
        assert!(bytes[xref_at..].starts_with(b"xref"));

        let table = std::str::from_utf8(&bytes[xref_at..]).unwrap();
        let first_entry = table.lines().nth(3).unwrap();
        let offset: usize = first_entry[..10].parse().unwrap();
        assert!(bytes[offset..].starts_with(b"1 0 obj"));
    }

    #[test]
    fn test_latin1_and_escaping() {
        let mut out = Vec::new();
        encode_literal("Généré (à) \\", &mut out);
        assert_eq!(out, b"G\xe9n\xe9r\xe9 \\(\xe0\\) \\\\".to_vec());

        let mut out = Vec::new();
        encode_literal("悪魔の実", &mut out);
        assert_eq!(out, b"????".to_vec());
    }

    #[test]
    fn test_long_content_spans_pages() {
        let mut doc = PdfDocument::new("long");
        for i in 0..80 {
            doc.text(Style::Body, &format!("ligne {i}"));
        }
        assert!(doc.page_count() > 1);
        let bytes = doc.finish();
        assert!(contains(&bytes, b"/Count 2"));
    }

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap("un deux trois quatre cinq", 10);
        assert_eq!(lines, vec!["un deux", "trois", "quatre", "cinq"]);

        let lines = wrap("abcdefghijkl", 5);
        assert_eq!(lines, vec!["abcde", "fghij", "kl"]);
    }
}
