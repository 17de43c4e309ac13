// Copyright (c) 2017-2019, Substratum LLC (https://substratum.net) and/or its affiliates. All rights reserved.

use crate::logger::real_format_function;
use chrono::Local;
use lazy_static::lazy_static;
use log::{set_logger, LevelFilter, Log, Metadata, Record};
use std::sync::{Mutex, MutexGuard};
use test_utilities::byte_array_reader_writer::ByteArrayWriter;

lazy_static! {
    static ref TEST_LOGS: Mutex<Option<Vec<String>>> = Mutex::new(None);
}
static TEST_LOGGER: TestLogger = TestLogger {};

#[derive(Default)]
pub struct TestLogHandler {}

impl TestLogHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_log(&self, log: String) {
        if let Some(logs) = self.lock().as_mut() {
            logs.push(log)
        }
    }

    pub fn exists_log_containing(&self, fragment: &str) -> usize {
        match self.find_first_log_containing(fragment) {
            Some(index) => index,
            None => panic!(
                "No existing logs contain '{}':\n------\n{}\n------",
                fragment,
                self.list_logs()
            ),
        }
    }

    pub fn exists_no_log_containing(&self, fragment: &str) {
        if let Some(index) = self.find_first_log_containing(fragment) {
            panic!(
                "Log at index {} contains '{}':\n------\n{}\n------",
                index,
                fragment,
                self.get_logs()[index]
            )
        }
    }

    pub fn assert_logs_contain_in_order(&self, fragments: Vec<&str>) {
        let indexes: Vec<usize> = fragments
            .iter()
            .map(|fragment| self.exists_log_containing(fragment))
            .collect();
        if indexes.windows(2).all(|pair| pair[0] <= pair[1]) {
            return;
        }
        let mut msg = String::from("Logs were found, but not in specified order:\n");
        for (index, fragment) in indexes.iter().zip(fragments.iter()) {
            msg.push_str(&format!("  {}: '{}'\n", index, fragment))
        }
        panic!("{}\nGot:\n{}", msg, self.list_logs());
    }

    fn lock(&self) -> MutexGuard<'_, Option<Vec<String>>> {
        TEST_LOGS.lock().expect("TestLogHandler is poisoned")
    }

    fn get_logs(&self) -> Vec<String> {
        self.lock()
            .clone()
            .expect("Test Logging in not initialized; please call `init_test_logging`")
    }

    fn list_logs(&self) -> String {
        self.get_logs().join("\n")
    }

    fn find_first_log_containing(&self, fragment: &str) -> Option<usize> {
        self.get_logs().iter().position(|log| log.contains(fragment))
    }
}

pub fn init_test_logging() -> bool {
    let mut logs = TEST_LOGS.lock().expect("TestLogHandler is poisoned");
    if logs.is_some() {
        return true;
    }
    *logs = Some(vec![]);
    log::set_max_level(LevelFilter::Trace);
    match set_logger(&TEST_LOGGER) {
        Ok(_) => true,
        Err(e) => {
            eprintln!("Couldn't set logger: {:?}", e);
            false
        }
    }
}

#[derive(Clone, Default)]
pub struct TestLogger {}

impl Log for TestLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        let mut buffer = ByteArrayWriter::new();
        real_format_function(&mut buffer, &Local::now(), record).unwrap();
        TestLogHandler::new().add_log(buffer.get_string());
    }

    fn flush(&self) {}
}
