//! Plain box-drawn console table for the replacement report.
//!
//! ```text
//! ┌──────────┬──────────┬───────┐
//! │ File     │ Variable │ Value │
//! ├──────────┼──────────┼───────┤
//! │ app.js   │ ${HOST}  │ a.com │
//! └──────────┴──────────┴───────┘
//! ```
//!
//! Every row is separated by a rule. Cells containing newlines span
//! several lines. No colors are emitted.

/// A table with a fixed header and any number of rows.
#[derive(Debug, Clone)]
pub struct Table {
    head: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(head: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            head: head.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Missing cells render empty; extra cells are dropped.
    pub fn push<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = row.into_iter().map(Into::into).collect();
        row.resize(self.head.len(), String::new());
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.head.iter().map(|h| cell_width(h)).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell_width(cell));
            }
        }
        widths
    }

    /// Render the table; the result has no trailing newline.
    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = Vec::new();

        out.push(rule(&widths, '┌', '┬', '┐'));
        out.extend(render_row(&self.head, &widths));
        for row in &self.rows {
            out.push(rule(&widths, '├', '┼', '┤'));
            out.extend(render_row(row, &widths));
        }
        out.push(rule(&widths, '└', '┴', '┘'));

        out.join("\n")
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// Display width of a cell, counted in chars.
///
/// East Asian wide characters and emoji occupy two terminal columns but count
/// as one here, so rows containing them render misaligned.
fn cell_width(cell: &str) -> usize {
    cell.split('\n').map(|l| l.chars().count()).max().unwrap_or(0)
}

fn rule(widths: &[usize], left: char, mid: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}", segments.join(&mid.to_string()))
}

fn render_row(cells: &[String], widths: &[usize]) -> Vec<String> {
    let lines: Vec<Vec<&str>> = cells.iter().map(|c| c.split('\n').collect()).collect();
    let height = lines.iter().map(Vec::len).max().unwrap_or(1);

    (0..height)
        .map(|i| {
            let padded: Vec<String> = lines
                .iter()
                .zip(widths)
                .map(|(cell, &width)| {
                    let text = cell.get(i).copied().unwrap_or("");
                    let pad = width - text.chars().count();
                    format!(" {text}{} ", " ".repeat(pad))
                })
                .collect();
            format!("│{}│", padded.join("│"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_header_and_rows() {
        let mut table = Table::new(["File", "Variable", "Value"]);
        table.push(["a.js", "${HOST}", "example.com"]);
        table.push(["b.js", "${PORT:-80}", "80"]);

        let expected = "\
┌──────┬─────────────┬─────────────┐
│ File │ Variable    │ Value       │
├──────┼─────────────┼─────────────┤
│ a.js │ ${HOST}     │ example.com │
├──────┼─────────────┼─────────────┤
│ b.js │ ${PORT:-80} │ 80          │
└──────┴─────────────┴─────────────┘";
        assert_eq!(table.render(), expected);
    }

    #[test]
    fn test_multiline_cells_span_lines() {
        let mut table = Table::new(["K", "V"]);
        table.push(["x", "one\ntwo"]);
        let rendered = table.to_string();
        assert!(rendered.contains("│ x │ one │"));
        assert!(rendered.contains("│   │ two │"));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut table = Table::new(["A", "B"]);
        table.push(["only"]);
        assert!(table.render().contains("│ only │   │"));
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new(["A"]);
        assert_eq!(table.render(), "┌───┐\n│ A │\n└───┘");
    }
}
