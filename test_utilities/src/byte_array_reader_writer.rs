// Copyright (c) 2019, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

use std::cmp::min;
use std::io;
use std::io::{BufRead, Error, Read, Write};
use std::sync::{Arc, Mutex};

/// Collects everything written to it; clones share the same buffer, so a test can keep one
/// handle while the code under test owns another.
#[derive(Clone, Default)]
pub struct ByteArrayWriter {
    inner_arc: Arc<Mutex<ByteArrayWriterInner>>,
}

#[derive(Default)]
struct ByteArrayWriterInner {
    byte_array: Vec<u8>,
    next_error: Option<Error>,
}

impl ByteArrayWriter {
    pub fn new() -> ByteArrayWriter {
        Self::default()
    }

    pub fn get_bytes(&self) -> Vec<u8> {
        self.inner_arc.lock().unwrap().byte_array.clone()
    }

    pub fn get_string(&self) -> String {
        String::from_utf8(self.get_bytes()).unwrap()
    }

    pub fn reject_next_write(self, error: Error) -> ByteArrayWriter {
        self.inner_arc.lock().unwrap().next_error = Some(error);
        self
    }
}

impl Write for ByteArrayWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self.inner_arc.lock().unwrap();
        if let Some(next_error) = inner.next_error.take() {
            Err(next_error)
        } else {
            inner.byte_array.extend_from_slice(buf);
            Ok(buf.len())
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Serves a fixed byte array. It can be told to fail once a given number of bytes has been
/// handed out, which is how tests simulate a source that breaks mid-stream.
pub struct ByteArrayReader {
    byte_array: Vec<u8>,
    position: usize,
    error_opt: Option<(usize, Error)>,
}

impl ByteArrayReader {
    pub fn new(byte_array: &[u8]) -> ByteArrayReader {
        ByteArrayReader {
            byte_array: byte_array.to_vec(),
            position: 0,
            error_opt: None,
        }
    }

    pub fn reject_next_read(self, error: Error) -> ByteArrayReader {
        self.reject_read_after(0, error)
    }

    pub fn reject_read_after(mut self, byte_count: usize, error: Error) -> ByteArrayReader {
        self.error_opt = Some((byte_count, error));
        self
    }

    fn limit(&self) -> usize {
        match &self.error_opt {
            Some((byte_count, _)) => min(*byte_count, self.byte_array.len()),
            None => self.byte_array.len(),
        }
    }

    fn take_error_if_due(&mut self) -> io::Result<()> {
        let due = matches!(&self.error_opt, Some((byte_count, _)) if self.position >= *byte_count);
        if due {
            if let Some((_, error)) = self.error_opt.take() {
                return Err(error);
            }
        }
        Ok(())
    }
}

impl Read for ByteArrayReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.take_error_if_due()?;
        let to_copy = min(buf.len(), self.limit() - self.position);
        buf[..to_copy].copy_from_slice(&self.byte_array[self.position..self.position + to_copy]);
        self.position += to_copy;
        Ok(to_copy)
    }
}

impl BufRead for ByteArrayReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.take_error_if_due()?;
        let limit = self.limit();
        Ok(&self.byte_array[self.position..limit])
    }

    fn consume(&mut self, amt: usize) {
        self.position = min(self.position + amt, self.limit());
    }
}
