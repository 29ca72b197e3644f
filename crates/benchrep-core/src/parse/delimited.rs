use crate::errors::ReportError;
use crate::record::Record;
use anyhow::Context;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Lazy reader of delimited text files.
///
/// The first line supplies the field names; every following line becomes a
/// [`Record`] keyed by those names. Rows with fewer cells than the header
/// simply lack the trailing fields, extra cells are ignored (the inputs
/// are machine-written and occasionally ragged).
pub struct DelimitedReader<R: BufRead> {
    reader: R,
    header: Vec<String>,
    delimiter: char,
    path: String,
    line: usize,
    failed: Option<ReportError>,
}

impl DelimitedReader<BufReader<File>> {
    pub fn open(path: &Path, delimiter: char) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open input file {}", path.display()))?;
        Ok(Self::new(
            BufReader::new(file),
            delimiter,
            path.display().to_string(),
        ))
    }
}

impl<R: BufRead> DelimitedReader<R> {
    pub fn new(reader: R, delimiter: char, path: String) -> Self {
        let mut parser = Self {
            reader,
            header: Vec::new(),
            delimiter,
            path,
            line: 0,
            failed: None,
        };
        match parser.next_line() {
            Ok(Some(first)) => {
                parser.header = first
                    .split(parser.delimiter)
                    .map(str::to_string)
                    .collect();
            }
            Ok(None) => {}
            Err(error) => parser.failed = Some(error),
        }
        parser
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    fn next_line(&mut self) -> Result<Option<String>, ReportError> {
        loop {
            let mut buffer = String::new();
            let read = self
                .reader
                .read_line(&mut buffer)
                .map_err(|error| ReportError::Parse {
                    path: self.path.clone(),
                    line: self.line + 1,
                    message: error.to_string(),
                })?;
            if read == 0 {
                return Ok(None);
            }
            self.line += 1;
            let trimmed = buffer.trim_end_matches(['\n', '\r']);
            if trimmed.is_empty() {
                continue;
            }
            return Ok(Some(trimmed.to_string()));
        }
    }
}

impl<R: BufRead> Iterator for DelimitedReader<R> {
    type Item = Result<Record, ReportError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(error) = self.failed.take() {
            return Some(Err(error));
        }
        match self.next_line() {
            Err(error) => Some(Err(error)),
            Ok(None) => None,
            Ok(Some(row)) => {
                let mut record = Record::new();
                for (name, value) in self.header.iter().zip(row.split(self.delimiter)) {
                    record.set(name.clone(), value);
                }
                Some(Ok(record))
            }
        }
    }
}
