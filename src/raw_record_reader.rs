use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, ScraperError};
use crate::types::RawRecord;

/// Reads crawler output: one JSON object per line, blank lines ignored.
pub struct RawRecordReader<R: BufRead> {
    reader: R,
    line: usize,
}

impl RawRecordReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> RawRecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line: 0 }
    }
}

impl<R: BufRead> Iterator for RawRecordReader<R> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut buf = String::new();
            match self.reader.read_line(&mut buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line += 1;
            if buf.trim().is_empty() {
                continue;
            }
            let line = self.line;
            return Some(serde_json::from_str(&buf).map_err(|e| ScraperError::Input {
                line,
                message: e.to_string(),
            }));
        }
    }
}
