// Copyright (c) 2019, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

use chrono::{DateTime, Local};
use flexi_logger::{DeferredNow, FlexiLoggerError, LogSpecBuilder};
use log::{logger, Level, LevelFilter, Metadata, Record};
use std::fmt::{Debug, Formatter};
use std::{io, thread};

pub const TIME_FORMATTING_STRING: &str = "%Y-%m-%dT%H:%M:%S%.3f";

#[derive(Clone)]
pub struct Logger {
    name: String,
    level_limit: Level,
}

impl Debug for Logger {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Logger{{ name: \"{}\" }}", self.name)
    }
}

#[macro_export]
macro_rules! trace {
    ($logger: expr, $($arg:tt)*) => {
        $logger.trace(|| format!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug {
    ($logger: expr, $($arg:tt)*) => {
        $logger.debug(|| format!($($arg)*))
    };
}

#[macro_export]
macro_rules! info {
    ($logger: expr, $($arg:tt)*) => {
        $logger.info(|| format!($($arg)*))
    };
}

#[macro_export]
macro_rules! warning {
    ($logger: expr, $($arg:tt)*) => {
        $logger.warning(|| format!($($arg)*))
    };
}

#[macro_export]
macro_rules! error {
    ($logger: expr, $($arg:tt)*) => {
        $logger.error(|| format!($($arg)*))
    };
}

impl Logger {
    pub fn new(name: &str) -> Logger {
        Logger {
            name: String::from(name),
            level_limit: Level::Trace,
        }
    }

    pub fn trace<F>(&self, log_function: F)
    where
        F: FnOnce() -> String,
    {
        self.generic_log(Level::Trace, log_function);
    }

    pub fn debug<F>(&self, log_function: F)
    where
        F: FnOnce() -> String,
    {
        self.generic_log(Level::Debug, log_function);
    }

    pub fn info<F>(&self, log_function: F)
    where
        F: FnOnce() -> String,
    {
        self.generic_log(Level::Info, log_function);
    }

    pub fn warning<F>(&self, log_function: F)
    where
        F: FnOnce() -> String,
    {
        self.generic_log(Level::Warn, log_function);
    }

    pub fn error<F>(&self, log_function: F)
    where
        F: FnOnce() -> String,
    {
        self.generic_log(Level::Error, log_function);
    }

    pub fn level_enabled(&self, level: Level) -> bool {
        level <= log::max_level() && level <= self.level_limit
    }

    #[cfg(test)]
    pub fn set_level_for_test(&mut self, level: Level) {
        self.level_limit = level
    }

    fn generic_log<F>(&self, level: Level, log_function: F)
    where
        F: FnOnce() -> String,
    {
        if self.level_enabled(level) {
            self.log(level, log_function())
        }
    }

    pub fn log(&self, level: Level, msg: String) {
        logger().log(
            &Record::builder()
                .args(format_args!("{}", msg))
                .metadata(Metadata::builder().level(level).target(&self.name).build())
                .module_path(Some(self.name.as_str()))
                .build(),
        );
    }
}

/// Starts the process-wide log backend. Log lines go to stderr so they never mix with query
/// results on stdout.
pub fn init_logging(log_level: LevelFilter) -> Result<(), FlexiLoggerError> {
    flexi_logger::Logger::with(LogSpecBuilder::new().default(log_level).build())
        .format(format_function)
        .start()
        .map(|_| ())
}

// flexi_logger hands us its own clock...
fn format_function(
    write: &mut dyn io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), io::Error> {
    real_format_function(write, now.now(), record)
}

// ...tests bring theirs.
pub fn real_format_function(
    write: &mut dyn io::Write,
    timestamp: &DateTime<Local>,
    record: &Record,
) -> Result<(), io::Error> {
    let timestamp = timestamp.naive_local().format(TIME_FORMATTING_STRING);
    let thread_id_str = format!("{:?}", thread::current().id());
    let thread_id = thread_id_str
        .trim_start_matches("ThreadId(")
        .trim_end_matches(')');
    let level = record.level();
    let name = record.module_path().unwrap_or("<unnamed>");
    write.write_fmt(format_args!(
        "{} Thd{}: {}: {}: ",
        timestamp, thread_id, level, name
    ))?;
    write.write_fmt(*record.args())
}
