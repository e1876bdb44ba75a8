// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Digest integrity countermeasure
//!
//! A running digest is never all zero in practice. Reading one back means
//! the engine was glitched or its registers were cleared under us, so the
//! HAL hands the condition to a [`FaultHandler`] that must not return. No
//! caller ever receives the zeroed words.

use core::fmt;

use sha_common::log::LogBuffer;

use crate::error::HalError;
use crate::variant::HashVariant;

// =============================================================================
// Fault Condition
// =============================================================================

/// An all-zero digest read back from the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegrityFault {
    /// Variant being read
    pub variant: HashVariant,
    /// Number of words read, all of them zero
    pub words: usize,
}

impl fmt::Display for IntegrityFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {} digest words read as zero",
            HalError::IntegrityFault,
            self.words,
            self.variant
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for IntegrityFault {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "integrity fault: {} x{} words zero", self.variant, self.words);
    }
}

impl From<IntegrityFault> for HalError {
    fn from(_: IntegrityFault) -> Self {
        Self::IntegrityFault
    }
}

/// Whether every word is zero; true for an empty slice
///
/// Reads every word, without stopping at the first non-zero one.
pub(crate) fn is_all_zero(words: &[u32]) -> bool {
    words.iter().fold(0, |acc, &w| acc | w) == 0
}

// =============================================================================
// Handlers
// =============================================================================

/// Terminal reaction to an integrity fault
pub trait FaultHandler {
    /// Handle the fault; never returns
    fn integrity_fault(&mut self, fault: IntegrityFault) -> !;
}

/// Terminate immediately
///
/// Aborts the process with `std`, executes a permanently undefined
/// instruction with `cortex-m`, and panics otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct Abort;

impl FaultHandler for Abort {
    fn integrity_fault(&mut self, fault: IntegrityFault) -> ! {
        terminate(&fault)
    }
}

/// Record the fault in a log buffer, then terminate like [`Abort`]
pub struct LogAndAbort<'a> {
    log: &'a mut LogBuffer,
    clock: fn() -> u32,
}

impl<'a> LogAndAbort<'a> {
    /// Log into `log`, timestamping with `clock`
    pub fn new(log: &'a mut LogBuffer, clock: fn() -> u32) -> Self {
        Self { log, clock }
    }
}

impl FaultHandler for LogAndAbort<'_> {
    fn integrity_fault(&mut self, fault: IntegrityFault) -> ! {
        sha_common::log_fatal!(
            self.log,
            (self.clock)(),
            sha_common::Error::IntegrityFault,
            "{} digest read as {} zero words",
            fault.variant,
            fault.words
        );
        terminate(&fault)
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        fn terminate(_fault: &IntegrityFault) -> ! {
            std::process::abort()
        }
    } else if #[cfg(feature = "cortex-m")] {
        fn terminate(_fault: &IntegrityFault) -> ! {
            cortex_m::asm::udf()
        }
    } else {
        fn terminate(fault: &IntegrityFault) -> ! {
            panic!("{}", fault)
        }
    }
}
