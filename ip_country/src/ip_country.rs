// Copyright (c) 2024, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

use crate::configuration::{ConfigurationError, IpCountryConfig};
use crate::country_finder::CountryFinder;
use crate::ip_country_csv::{CSVParser, RangeRecordParser, SourceReadError};
use crate::logger::{init_logging, Logger};
use crate::range_table::RangeTable;
use crate::{debug, error, info};
use itertools::Itertools;
use log::LevelFilter;
use std::fs::File;
use std::io;
use std::io::BufRead;
use std::path::Path;

pub trait DatabaseOpener {
    fn open(&self, path: &Path) -> io::Result<Box<dyn io::Read>>;
}

pub struct DatabaseOpenerReal {}

impl DatabaseOpener for DatabaseOpenerReal {
    fn open(&self, path: &Path) -> io::Result<Box<dyn io::Read>> {
        Ok(Box::new(File::open(path)?))
    }
}

pub trait LoggerInitializerWrapper {
    fn init(&mut self, log_level: LevelFilter);
}

pub struct LoggerInitializerWrapperReal {}

impl LoggerInitializerWrapper for LoggerInitializerWrapperReal {
    fn init(&mut self, log_level: LevelFilter) {
        if let Err(e) = init_logging(log_level) {
            eprintln!("Logging subsystem failed to start: {}", e);
        }
    }
}

pub struct IpCountry {
    database_opener: Box<dyn DatabaseOpener>,
    logger_initializer: Box<dyn LoggerInitializerWrapper>,
    logger: Logger,
}

impl Default for IpCountry {
    fn default() -> Self {
        Self::new()
    }
}

impl IpCountry {
    pub fn new() -> Self {
        Self {
            database_opener: Box::new(DatabaseOpenerReal {}),
            logger_initializer: Box::new(LoggerInitializerWrapperReal {}),
            logger: Logger::new("IpCountry"),
        }
    }

    /// Runs the whole tool and returns the process exit code.
    pub fn go(
        &mut self,
        args: &[String],
        stdin: &mut dyn io::Read,
        stdout: &mut dyn io::Write,
        stderr: &mut dyn io::Write,
    ) -> i32 {
        match self.handle(args, stdin, stdout, stderr) {
            Ok(exit_code) => exit_code,
            Err(e) => {
                let _ = writeln!(stderr, "Can't write output: {}", e);
                1
            }
        }
    }

    fn handle(
        &mut self,
        args: &[String],
        stdin: &mut dyn io::Read,
        stdout: &mut dyn io::Write,
        stderr: &mut dyn io::Write,
    ) -> io::Result<i32> {
        let config = match IpCountryConfig::from_args(args) {
            Ok(config) => config,
            Err(ConfigurationError::Help(text)) => {
                // clap prints --version itself and leaves the text empty
                if !text.is_empty() {
                    writeln!(stdout, "{}", text)?;
                }
                return Ok(0);
            }
            Err(e) => {
                writeln!(stderr, "{}", e)?;
                return Ok(1);
            }
        };
        self.logger_initializer.init(config.log_level);
        let table = match self.load_table(&config) {
            Ok(table) => table,
            Err(e) => {
                error!(self.logger, "{}", e);
                writeln!(stderr, "{}", e)?;
                return Ok(1);
            }
        };
        if config.report_size || config.report_completeness {
            if config.report_size {
                writeln!(stdout, "Total number of records are {}", table.size())?;
            }
            if config.report_completeness {
                writeln!(
                    stdout,
                    "GeoIP database covers all IPv4 addresses: {}",
                    table.is_complete()
                )?;
            }
            return Ok(0);
        }
        let finder = CountryFinder::new(&table, config.subnet_mask, config.scan_policy);
        if !config.addresses.is_empty() {
            for address in &config.addresses {
                Self::write_countries(&finder, address, stdout)?;
            }
            return Ok(0);
        }
        for (idx, line_result) in io::BufReader::new(stdin).split(b'\n').enumerate() {
            match line_result {
                Ok(mut bytes) => {
                    if bytes.last() == Some(&b'\r') {
                        bytes.pop();
                    }
                    match String::from_utf8(bytes) {
                        Ok(address) => Self::write_countries(&finder, &address, stdout)?,
                        Err(e) => {
                            debug!(self.logger, "Query at line {} is not text: {}", idx + 1, e);
                            writeln!(stdout)?;
                        }
                    }
                }
                Err(e) => {
                    error!(self.logger, "Query input failed at line {}: {}", idx + 1, e);
                    writeln!(stderr, "Can't read query at line {}: {}", idx + 1, e)?;
                    return Ok(1);
                }
            }
        }
        Ok(0)
    }

    fn load_table(&self, config: &IpCountryConfig) -> Result<RangeTable, SourceReadError> {
        let mut input = self
            .database_opener
            .open(&config.database_path)
            .map_err(|error| SourceReadError::Open {
                path: config.database_path.clone(),
                error,
            })?;
        let mut errors = vec![];
        let records = CSVParser::new(config.field_layout).parse(input.as_mut(), &mut errors)?;
        errors.iter().for_each(|e| debug!(self.logger, "{}", e));
        let table = RangeTable::build(records);
        info!(
            self.logger,
            "Loaded {} ranges from {}; skipped {}",
            table.size(),
            config.database_path.display(),
            errors.len() + table.skipped()
        );
        Ok(table)
    }

    fn write_countries(
        finder: &CountryFinder,
        address: &str,
        stdout: &mut dyn io::Write,
    ) -> io::Result<()> {
        writeln!(stdout, "{}", finder.find_country(address).iter().join(", "))
    }
}
