// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Hardware Abstraction Layer for the SHA hash engine
//!
//! This crate sequences the SHA accelerator found on the ESP32 family of
//! microcontrollers:
//!
//! - **ESP32**: SHA-1/256/384/512, register-fed only
//! - **ESP32-S2**: full variant set, crypto-dedicated DMA
//! - **ESP32-S3**: full variant set, general-purpose DMA with external memory
//! - **ESP32-C3**: SHA-1/224/256, general-purpose DMA
//!
//! # Architecture
//!
//! The HAL is structured in layers:
//!
//! 1. **Traits**: Register-level primitives supplied by the platform
//!    (`traits` module)
//! 2. **DMA**: Descriptor chains and the two DMA backends (`dma` module)
//! 3. **Engine**: Block, DMA and digest operations ([`ShaHal`])
//!
//! The compression functions run in hardware; this crate never hashes.
//!
//! # Security
//!
//! - A digest read back as all-zero words goes to a [`FaultHandler`] that
//!   terminates the system; it is never returned to the caller
//! - Suspended session state is wiped on drop ([`DigestState`])
//! - No locking: exclusive engine access follows ownership of [`ShaHal`]

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod dma;
pub mod engine;
pub mod error;
pub mod fault;
pub mod state;
pub mod traits;
pub mod variant;

// Re-export main types
pub use dma::{CryptoDma, DescriptorChain, DmaBackend, DmaDescriptor, GeneralDma, NoDma};
pub use engine::{DmaTransfer, ShaHal};
pub use error::{HalError, HalResult};
pub use fault::{Abort, FaultHandler, IntegrityFault, LogAndAbort};
pub use state::DigestState;
pub use traits::*;
pub use variant::{state_length, HashFamily, HashVariant, Sha512TParams, MAX_STATE_WORDS};

pub use sha_common::{Capabilities, DmaKind, Target};
