use super::{Alignment, TableSerializer};
use std::io::{self, Write};

/// Joins cells with `;`. The header is just a normal row; alignment and
/// row marking have no delimited representation.
pub struct DelimitedTable {
    out: Box<dyn Write>,
}

impl DelimitedTable {
    pub fn new(out: Box<dyn Write>) -> Self {
        Self { out }
    }
}

impl TableSerializer for DelimitedTable {
    fn write_header(&mut self, columns: &[String], _align: &[Alignment]) -> io::Result<()> {
        self.write_row(columns, false)
    }

    fn write_row(&mut self, columns: &[String], _mark: bool) -> io::Result<()> {
        writeln!(self.out, "{}", columns.join(";"))
    }

    fn close(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
