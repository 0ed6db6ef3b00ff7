use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::model::{ExtractionRecord, FILENAME_COLUMNS, FilenameRecord, METADATA_COLUMNS};

/// A CSV table whose header is written once, when the table is opened.
pub struct Table<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl<W: Write> Table<W> {
    pub fn new(inner: W, columns: &[&str]) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(inner);
        writer.write_record(columns)?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn append<R: Serialize>(&mut self, row: &R) -> Result<()> {
        self.writer.serialize(row)?;
        self.rows += 1;
        Ok(())
    }

    pub fn append_extraction(&mut self, record: &ExtractionRecord) -> Result<()> {
        self.append(record)
    }

    pub fn append_filename(&mut self, record: &FilenameRecord) -> Result<()> {
        self.append(record)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flushes buffered rows and hands back the underlying writer.
    pub fn finish(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error().into())
    }
}

pub fn metadata_table<W: Write>(inner: W) -> Result<Table<W>> {
    Table::new(inner, &METADATA_COLUMNS)
}

pub fn filename_table<W: Write>(inner: W) -> Result<Table<W>> {
    Table::new(inner, &FILENAME_COLUMNS)
}

/// Creates (or truncates) a table file on disk.
pub fn create_file(path: &Path) -> Result<File> {
    Ok(File::create(path)?)
}
