// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Diagnostic log buffer
//!
//! A no_std ring buffer of formatted diagnostic records. The hashing fast
//! path never writes here; the buffer records configuration problems and
//! integrity faults so that they can be retrieved after the fact (for
//! example from a crash dump of the buffer memory).
//!
//! # Security
//!
//! - Message blocks and digest words must NEVER be logged
//! - Log levels control what is output in production vs development

use core::fmt::{self, Write};
use heapless::String;

use crate::errors::Error;

/// Maximum log message length
pub const MAX_LOG_MESSAGE_LEN: usize = 96;

/// Log buffer size (number of records)
pub const LOG_BUFFER_SIZE: usize = 16;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LogLevel {
    /// Faults that terminate the system
    Fatal = 0,
    /// Errors that require immediate attention
    Error = 1,
    /// Warnings about potential issues
    Warn = 2,
    /// Informational messages
    Info = 3,
    /// Debug messages (development only)
    Debug = 4,
}

impl LogLevel {
    /// Get the log level name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fatal => "FATAL",
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }

    /// Get a short prefix for the log level
    #[must_use]
    pub const fn prefix(&self) -> char {
        match self {
            Self::Fatal => 'F',
            Self::Error => 'E',
            Self::Warn => 'W',
            Self::Info => 'I',
            Self::Debug => 'D',
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single diagnostic record
#[derive(Clone)]
pub struct LogRecord {
    /// Log level
    pub level: LogLevel,
    /// Timestamp (system ticks)
    pub timestamp: u32,
    /// Error code attached to the record, if any
    pub code: Option<u16>,
    /// Log message
    pub message: String<MAX_LOG_MESSAGE_LEN>,
}

impl LogRecord {
    /// Create a new record from a plain message
    ///
    /// Messages longer than [`MAX_LOG_MESSAGE_LEN`] are truncated on a
    /// character boundary.
    #[must_use]
    pub fn new(level: LogLevel, timestamp: u32, message: &str) -> Self {
        let mut end = message.len().min(MAX_LOG_MESSAGE_LEN);
        while !message.is_char_boundary(end) {
            end -= 1;
        }

        let mut msg = String::new();
        let _ = msg.push_str(&message[..end]);

        Self {
            level,
            timestamp,
            code: None,
            message: msg,
        }
    }

    /// Attach the code of `error` to this record
    #[must_use]
    pub fn with_error(mut self, error: Error) -> Self {
        self.code = Some(error.code());
        self
    }
}

impl fmt::Debug for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:08X}] {} ", self.timestamp, self.level.prefix())?;
        if let Some(code) = self.code {
            write!(f, "(0x{code:04X}) ")?;
        }
        f.write_str(&self.message)
    }
}

/// Circular diagnostic log
pub struct LogBuffer {
    records: [Option<LogRecord>; LOG_BUFFER_SIZE],
    write_index: usize,
    count: usize,
    min_level: LogLevel,
}

impl LogBuffer {
    /// Create a new empty log buffer
    #[must_use]
    pub const fn new() -> Self {
        const NONE: Option<LogRecord> = None;
        Self {
            records: [NONE; LOG_BUFFER_SIZE],
            write_index: 0,
            count: 0,
            min_level: LogLevel::Warn,
        }
    }

    /// Set the minimum log level
    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    /// Get the minimum log level
    #[must_use]
    pub const fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Check if a log level should be recorded
    #[must_use]
    pub const fn should_log(&self, level: LogLevel) -> bool {
        (level as u8) <= (self.min_level as u8)
    }

    /// Write a record
    pub fn write(&mut self, record: LogRecord) {
        if !self.should_log(record.level) {
            return;
        }

        self.records[self.write_index] = Some(record);
        self.write_index = (self.write_index + 1) % LOG_BUFFER_SIZE;
        if self.count < LOG_BUFFER_SIZE {
            self.count += 1;
        }
    }

    /// Log with format arguments
    pub fn log(
        &mut self,
        level: LogLevel,
        timestamp: u32,
        code: Option<u16>,
        args: fmt::Arguments<'_>,
    ) {
        if !self.should_log(level) {
            return;
        }

        let mut message = String::<MAX_LOG_MESSAGE_LEN>::new();
        let _ = message.write_fmt(args);

        self.write(LogRecord {
            level,
            timestamp,
            code,
            message,
        });
    }

    /// Get the number of records
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Check if buffer is empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Most recently written record
    #[must_use]
    pub fn last(&self) -> Option<&LogRecord> {
        if self.count == 0 {
            return None;
        }
        let index = (self.write_index + LOG_BUFFER_SIZE - 1) % LOG_BUFFER_SIZE;
        self.records[index].as_ref()
    }

    /// Clear all records
    pub fn clear(&mut self) {
        for record in &mut self.records {
            *record = None;
        }
        self.write_index = 0;
        self.count = 0;
    }

    /// Iterate over records (oldest first)
    pub fn iter(&self) -> LogBufferIter<'_> {
        LogBufferIter {
            buffer: self,
            index: 0,
            remaining: self.count,
        }
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over log buffer records
pub struct LogBufferIter<'a> {
    buffer: &'a LogBuffer,
    index: usize,
    remaining: usize,
}

impl<'a> Iterator for LogBufferIter<'a> {
    type Item = &'a LogRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let start_index = if self.buffer.count < LOG_BUFFER_SIZE {
            0
        } else {
            self.buffer.write_index
        };

        let actual_index = (start_index + self.index) % LOG_BUFFER_SIZE;
        self.index += 1;
        self.remaining -= 1;

        self.buffer.records[actual_index].as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Log a fatal record carrying an error code
#[macro_export]
macro_rules! log_fatal {
    ($buffer:expr, $ts:expr, $err:expr, $($arg:tt)*) => {
        $buffer.log(
            $crate::log::LogLevel::Fatal,
            $ts,
            Some($crate::errors::Error::code(&$err)),
            format_args!($($arg)*),
        )
    };
}
