use super::{Alignment, TableSerializer};
use std::io::{self, Write};

/// `| a | b |` rows with an alignment separator line after the header;
/// marked rows wrap every cell in bold emphasis.
pub struct MarkdownTable {
    out: Box<dyn Write>,
}

impl MarkdownTable {
    pub fn new(out: Box<dyn Write>) -> Self {
        Self { out }
    }

    fn write_cells(&mut self, columns: &[String]) -> io::Result<()> {
        writeln!(self.out, "| {} |", columns.join(" | "))
    }
}

impl TableSerializer for MarkdownTable {
    fn write_header(&mut self, columns: &[String], align: &[Alignment]) -> io::Result<()> {
        self.write_cells(columns)?;
        let markers: Vec<String> = (0..columns.len())
            .map(|i| match align.get(i).copied().unwrap_or(Alignment::Left) {
                Alignment::Left => "---".to_string(),
                Alignment::Right => "---:".to_string(),
            })
            .collect();
        writeln!(self.out, "| {} |", markers.join(" | "))
    }

    fn write_row(&mut self, columns: &[String], mark: bool) -> io::Result<()> {
        if mark {
            let bold: Vec<String> = columns.iter().map(|c| format!("**{c}**")).collect();
            self.write_cells(&bold)
        } else {
            self.write_cells(columns)
        }
    }

    fn close(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
