// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Common library for the SHA engine HAL
//!
//! This crate provides the error definitions, logging buffer and static
//! target configuration shared by the hash-engine crates.
//!
//! # Features
//!
//! - `std`: Enable standard library support (disabled by default for embedded)
//! - `defmt`: Enable defmt formatting support for embedded debugging
//! - `esp32`, `esp32s2`, `esp32s3`, `esp32c3`: Select the target whose
//!   capability set is reported by [`Target::current`]. At most one may be
//!   enabled; with none the host profile is used.
//!
//! No heap allocations are performed - all buffers use fixed-size arrays or heapless collections.

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod errors;
pub mod log;

// Re-export commonly used items
pub use config::{Capabilities, DmaKind, Target};
pub use errors::{Error, Result};
