//! Minimal delimited-text reader for the hand-authored data files.
//!
//! Fields may be wrapped in double quotes to carry separators; a doubled quote
//! inside a quoted field is a literal quote. Each row picks its separator from
//! the first unquoted `,` or `;` it contains.

/// A data row with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Iterates the data rows of `text`, skipping the header and blank lines.
pub fn data_rows(text: &str) -> impl Iterator<Item = Row> + '_ {
    text.lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| Row {
            line: index + 1,
            fields: split_record(line),
        })
}

/// The first separator found outside quotes, defaulting to `,`.
pub fn detect_separator(line: &str) -> char {
    let mut quoted = false;
    for ch in line.chars() {
        match ch {
            '"' => quoted = !quoted,
            ',' | ';' if !quoted => return ch,
            _ => {}
        }
    }
    ','
}

pub fn split_record(line: &str) -> Vec<String> {
    split_with(line, detect_separator(line))
}

pub fn split_with(line: &str, separator: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if quoted && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            c if c == separator && !quoted => {
                fields.push(std::mem::take(&mut current));
            }
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}
