/// Box-drawn table with per-column width limits.
///
/// Each column is as wide as its widest cell, capped at the column's limit
/// and never narrower than its header. Longer cells are truncated.
pub struct TableFormatter {
    headers: Vec<&'static str>,
    widths: Vec<usize>,
}

impl TableFormatter {
    pub fn new(columns: &[(&'static str, usize)], rows: &[Vec<String>]) -> Self {
        let widths = columns
            .iter()
            .enumerate()
            .map(|(i, (header, max_width))| {
                let header_width = header.chars().count();
                rows.iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
                    .min(*max_width)
                    .max(header_width)
            })
            .collect();

        Self {
            headers: columns.iter().map(|(header, _)| *header).collect(),
            widths,
        }
    }

    pub fn print_table(&self, rows: &[Vec<String>]) {
        print!("{}", self.render(rows));
    }

    pub fn render(&self, rows: &[Vec<String>]) -> String {
        let mut out = String::new();
        out.push_str(&self.border('┌', '┬', '┐'));
        out.push_str(&self.row(&self.headers));
        out.push_str(&self.border('├', '┼', '┤'));
        for row in rows {
            out.push_str(&self.row(row));
        }
        out.push_str(&self.border('└', '┴', '┘'));
        out
    }

    fn border(&self, left: char, middle: char, right: char) -> String {
        let segments: Vec<String> = self.widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}\n", segments.join(&middle.to_string()))
    }

    fn row<S: AsRef<str>>(&self, cells: &[S]) -> String {
        let cells: Vec<String> = self
            .widths
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let cell = cells.get(i).map(AsRef::as_ref).unwrap_or("");
                truncate(cell, *width)
            })
            .collect();
        format!("│ {} │\n", cells.join(" │ "))
    }
}

/// Truncate a string to a maximum display width, padding if shorter.
///
/// Uses character count rather than byte length to handle multi-byte
/// UTF-8 characters in business names.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}
