// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Static target configuration
//!
//! Which hash variants and which DMA backend a chip offers is fixed in
//! silicon. This module describes that as a [`Capabilities`] value that is
//! resolved once at build time from the selected target feature. Nothing
//! here changes at runtime.

use crate::errors::{Error, Result};

/// DMA engine that streams message blocks into the hash engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DmaKind {
    /// Shared general-purpose DMA controller (GDMA)
    General,
    /// DMA controller dedicated to the crypto peripherals
    Crypto,
}

/// Hash-engine capability set of a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// SHA-224 is available
    pub sha224: bool,
    /// SHA-384 is available
    pub sha384: bool,
    /// SHA-512 is available
    pub sha512: bool,
    /// SHA-512/224, SHA-512/256 and SHA-512/t are available
    pub sha512_t: bool,
    /// The running digest can be written back to resume a session
    pub resume: bool,
    /// Blocks can be streamed through DMA
    pub dma: bool,
    /// DMA goes through the general-purpose controller
    pub general_dma: bool,
    /// DMA goes through the crypto-dedicated controller
    pub crypto_dma: bool,
    /// The general-purpose controller can fetch from external memory
    pub dma_ext_mem: bool,
}

impl Capabilities {
    /// Original ESP32: fixed SHA-1/256/384/512 set, no DMA, no resume
    pub const ESP32: Self = Self {
        sha224: false,
        sha384: true,
        sha512: true,
        sha512_t: false,
        resume: false,
        dma: false,
        general_dma: false,
        crypto_dma: false,
        dma_ext_mem: false,
    };

    /// ESP32-S2: full variant set, crypto DMA
    pub const ESP32S2: Self = Self {
        sha224: true,
        sha384: true,
        sha512: true,
        sha512_t: true,
        resume: true,
        dma: true,
        general_dma: false,
        crypto_dma: true,
        dma_ext_mem: false,
    };

    /// ESP32-S3: full variant set, GDMA with external memory
    pub const ESP32S3: Self = Self {
        sha224: true,
        sha384: true,
        sha512: true,
        sha512_t: true,
        resume: true,
        dma: true,
        general_dma: true,
        crypto_dma: false,
        dma_ext_mem: true,
    };

    /// ESP32-C3: SHA-1/224/256 only, GDMA
    pub const ESP32C3: Self = Self {
        sha224: true,
        sha384: false,
        sha512: false,
        sha512_t: false,
        resume: true,
        dma: true,
        general_dma: true,
        crypto_dma: false,
        dma_ext_mem: false,
    };

    /// Host profile: every variant, GDMA without external memory
    pub const HOST: Self = Self {
        sha224: true,
        sha384: true,
        sha512: true,
        sha512_t: true,
        resume: true,
        dma: true,
        general_dma: true,
        crypto_dma: false,
        dma_ext_mem: false,
    };

    /// Capability set of the target selected at build time
    #[must_use]
    pub const fn current() -> Self {
        Target::current().capabilities()
    }

    /// Resolve the DMA backend of this configuration
    ///
    /// Returns `Ok(None)` for targets without DMA.
    ///
    /// # Errors
    ///
    /// [`Error::ConflictingDmaBackends`] when both backends are selected and
    /// [`Error::MissingDmaBackend`] when DMA is enabled without a backend.
    pub const fn dma_backend(&self) -> Result<Option<DmaKind>> {
        if !self.dma {
            return Ok(None);
        }
        match (self.general_dma, self.crypto_dma) {
            (true, false) => Ok(Some(DmaKind::General)),
            (false, true) => Ok(Some(DmaKind::Crypto)),
            (true, true) => Err(Error::ConflictingDmaBackends),
            (false, false) => Err(Error::MissingDmaBackend),
        }
    }

    /// Check the configuration for internal consistency
    ///
    /// A DMA-capable configuration needs exactly one backend, a backend
    /// flag without DMA is meaningless, and external-memory DMA only exists
    /// on the general-purpose controller.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        if !self.dma {
            return !self.general_dma && !self.crypto_dma && !self.dma_ext_mem;
        }
        if self.dma_ext_mem && !self.general_dma {
            return false;
        }
        self.dma_backend().is_ok()
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::current()
    }
}

/// Chip the HAL is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// ESP32 (Xtensa LX6)
    Esp32,
    /// ESP32-S2 (Xtensa LX7)
    Esp32S2,
    /// ESP32-S3 (Xtensa LX7, dual core)
    Esp32S3,
    /// ESP32-C3 (RISC-V)
    Esp32C3,
    /// Host build, used with simulated engines
    Host,
}

impl Target {
    /// Get the target selected by cargo features
    #[must_use]
    pub const fn current() -> Self {
        cfg_if::cfg_if! {
            if #[cfg(feature = "esp32")] {
                Self::Esp32
            } else if #[cfg(feature = "esp32s2")] {
                Self::Esp32S2
            } else if #[cfg(feature = "esp32s3")] {
                Self::Esp32S3
            } else if #[cfg(feature = "esp32c3")] {
                Self::Esp32C3
            } else {
                Self::Host
            }
        }
    }

    /// Capability preset of this target
    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        match self {
            Self::Esp32 => Capabilities::ESP32,
            Self::Esp32S2 => Capabilities::ESP32S2,
            Self::Esp32S3 => Capabilities::ESP32S3,
            Self::Esp32C3 => Capabilities::ESP32C3,
            Self::Host => Capabilities::HOST,
        }
    }

    /// Human readable chip name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Esp32 => "esp32",
            Self::Esp32S2 => "esp32s2",
            Self::Esp32S3 => "esp32s3",
            Self::Esp32C3 => "esp32c3",
            Self::Host => "host",
        }
    }
}

#[cfg(any(
    all(feature = "esp32", feature = "esp32s2"),
    all(feature = "esp32", feature = "esp32s3"),
    all(feature = "esp32", feature = "esp32c3"),
    all(feature = "esp32s2", feature = "esp32s3"),
    all(feature = "esp32s2", feature = "esp32c3"),
    all(feature = "esp32s3", feature = "esp32c3"),
))]
compile_error!("select at most one target feature (esp32, esp32s2, esp32s3, esp32c3)");

const _: () = assert!(Capabilities::ESP32.is_valid());
const _: () = assert!(Capabilities::ESP32S2.is_valid());
const _: () = assert!(Capabilities::ESP32S3.is_valid());
const _: () = assert!(Capabilities::ESP32C3.is_valid());
const _: () = assert!(Capabilities::HOST.is_valid());
