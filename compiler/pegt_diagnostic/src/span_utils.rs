//! Offset to line/column conversion and source highlighting.
//!
//! Offsets are byte offsets into UTF-8 source. Columns count characters,
//! not bytes.

/// Pre-computed line offset table for efficient line/column lookup.
///
/// # Example
///
/// ```
/// use pegt_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "line1\nline2\nline3";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 1));  // 'l' in line1
/// assert_eq!(table.offset_to_line_col(source, 6), (2, 1));  // 'l' in line2
/// assert_eq!(table.offset_to_line_col(source, 14), (3, 3)); // 'n' in line3
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start; `offsets[0]` is always 0.
    offsets: Vec<usize>,
}

impl LineOffsetTable {
    /// Build a line offset table from source text.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(i + 1);
            }
        }
        LineOffsetTable { offsets }
    }

    /// Get 1-based line number from a byte offset using binary search.
    pub fn line_from_offset(&self, offset: usize) -> usize {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        line_idx + 1
    }

    /// Get 1-based (line, column) from a byte offset.
    ///
    /// Offsets past the end are clamped to the end of the source; offsets
    /// inside a multi-byte character resolve to that character.
    pub fn offset_to_line_col(&self, source: &str, offset: usize) -> (usize, usize) {
        let offset = floor_char_boundary(source, offset);
        let line = self.line_from_offset(offset);
        let line_start = self.offsets[line - 1];
        let col = source[line_start..offset].chars().count() + 1;
        (line, col)
    }

    /// Byte range of a line's text (1-based), without its line terminator.
    pub fn line_range(&self, source: &str, line: usize) -> Option<std::ops::Range<usize>> {
        let start = *self.offsets.get(line.checked_sub(1)?)?;
        let end = self.offsets.get(line).map_or(source.len(), |next| next - 1);
        let text = &source[start..end];
        let end = start + text.strip_suffix('\r').unwrap_or(text).len();
        Some(start..end)
    }
}

fn floor_char_boundary(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Render the line containing `offset` with a caret under its column.
///
/// ```text
/// 3 | Num = { value: ^+Digit }
///                              ^
/// ```
///
/// Any offset is accepted: past the end points after the last character,
/// and an empty source renders an empty line 1.
pub fn render_highlight(source: &str, offset: usize) -> String {
    let table = LineOffsetTable::build(source);
    let offset = floor_char_boundary(source, offset);
    let line = table.line_from_offset(offset);
    let range = table.line_range(source, line).unwrap_or(0..0);
    let text = &source[range.clone()];

    let prefix = format!("{line} | ");
    let mut out = String::with_capacity(2 * (prefix.len() + text.len()) + 2);
    out.push_str(&prefix);
    out.push_str(text);
    out.push('\n');
    out.push_str(&" ".repeat(prefix.len()));
    // Tabs are echoed so the caret lines up with the source as displayed.
    let before = &source[range.start..offset.max(range.start).min(range.end)];
    out.extend(before.chars().map(|c| if c == '\t' { '\t' } else { ' ' }));
    if offset > range.end {
        out.push(' ');
    }
    out.push('^');
    out.push('\n');
    out
}
