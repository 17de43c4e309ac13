// Copyright (c) 2024, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

use crate::country_block::RangeRecord;
use csv::{Position, ReaderBuilder, StringRecord};
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub const DEFAULT_START_INDEX: usize = 0;
pub const DEFAULT_END_INDEX: usize = 1;
pub const DEFAULT_COUNTRY_INDEX: usize = 2;

#[derive(Debug)]
pub enum SourceReadError {
    Open { path: PathBuf, error: io::Error },
    Read { line: usize, error: io::Error },
}

impl Display for SourceReadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceReadError::Open { path, error } => {
                write!(f, "Can't open database {}: {}", path.display(), error)
            }
            SourceReadError::Read { line, error } => {
                write!(f, "Database read failed at line {}: {}", line, error)
            }
        }
    }
}

/// Which fields of a row hold the start address, the end address and the country code.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FieldLayout {
    pub start_index: usize,
    pub end_index: usize,
    pub country_index: usize,
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self {
            start_index: DEFAULT_START_INDEX,
            end_index: DEFAULT_END_INDEX,
            country_index: DEFAULT_COUNTRY_INDEX,
        }
    }
}

impl FieldLayout {
    pub fn extract(&self, string_record: &StringRecord) -> Result<RangeRecord, String> {
        let field = |index: usize| match string_record.get(index) {
            Some(value) => Ok(value),
            None => Err(format!(
                "CSV line contains {} fields, but field {} is required",
                string_record.len(),
                index
            )),
        };
        Ok(RangeRecord::new(
            field(self.start_index)?,
            field(self.end_index)?,
            field(self.country_index)?,
        ))
    }
}

pub trait RangeRecordParser {
    /// Rows that can't be used are described in `errors` and skipped. Only a failure of the
    /// underlying stream is returned as an error.
    fn parse(
        &self,
        input: &mut dyn io::Read,
        errors: &mut Vec<String>,
    ) -> Result<Vec<RangeRecord>, SourceReadError>;
}

pub struct CSVParser {
    layout: FieldLayout,
}

impl RangeRecordParser for CSVParser {
    fn parse(
        &self,
        input: &mut dyn io::Read,
        errors: &mut Vec<String>,
    ) -> Result<Vec<RangeRecord>, SourceReadError> {
        let mut csv_rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input);
        let mut records = vec![];
        // Physical line numbers; the reader skips blank lines without yielding a record
        let mut next_line = 1;
        for string_record_result in csv_rdr.records() {
            let (line, record_result) = match string_record_result {
                Ok(string_record) => (
                    Self::line_of(string_record.position(), next_line),
                    self.layout.extract(&string_record),
                ),
                Err(e) => {
                    let line = Self::line_of(e.position(), next_line);
                    match e.into_kind() {
                        csv::ErrorKind::Io(error) => {
                            return Err(SourceReadError::Read { line, error });
                        }
                        kind => (line, Err(format!("CSV format error: {:?}", kind))),
                    }
                }
            };
            next_line = line + 1;
            match record_result {
                Ok(record) => records.push(record),
                Err(msg) => errors.push(format!("Line {}: {}", line, msg)),
            }
        }
        Ok(records)
    }
}

impl CSVParser {
    pub fn new(layout: FieldLayout) -> Self {
        Self { layout }
    }

    fn line_of(position_opt: Option<&Position>, fallback: usize) -> usize {
        position_opt
            .map(|position| position.line() as usize)
            .unwrap_or(fallback)
    }
}
