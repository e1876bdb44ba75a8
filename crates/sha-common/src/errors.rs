// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Error types for the SHA engine stack
//!
//! This module defines the unified error type used by every crate above the
//! register driver. All errors are `Copy`, no_std compatible and carry a
//! stable numeric code.

use core::fmt;

/// Result type alias for SHA engine operations
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the SHA engine stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    // =========================================================================
    // Hashing Errors (0x01xx)
    // =========================================================================
    /// Hash variant is not available on the active target
    UnsupportedVariant,
    /// Truncation length is not valid for SHA-512/t
    InvalidTruncation,
    /// Digest read back from the engine failed the integrity check
    IntegrityFault,

    // =========================================================================
    // Configuration Errors (0x02xx)
    // =========================================================================
    /// Both DMA backends are selected for one target
    ConflictingDmaBackends,
    /// DMA support is enabled but no backend is selected
    MissingDmaBackend,
    /// The supplied DMA backend does not match the target's backend
    DmaBackendMismatch,

    // =========================================================================
    // HAL Errors (0x08xx)
    // =========================================================================
    /// Descriptor chain has no free slot
    DescriptorChainFull,

    // =========================================================================
    // General Errors (0xFFxx)
    // =========================================================================
    /// Buffer is too small for operation
    BufferTooSmall,
    /// Invalid parameter provided
    InvalidParameter,
    /// Feature not implemented on this target
    NotImplemented,
}

impl Error {
    /// Get the error code for this error
    ///
    /// Error codes are organized by category:
    /// - 0x01xx: Hashing errors
    /// - 0x02xx: Configuration errors
    /// - 0x08xx: HAL errors
    /// - 0xFFxx: General errors
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::UnsupportedVariant => 0x0101,
            Self::InvalidTruncation => 0x0102,
            Self::IntegrityFault => 0x0103,

            Self::ConflictingDmaBackends => 0x0201,
            Self::MissingDmaBackend => 0x0202,
            Self::DmaBackendMismatch => 0x0203,

            Self::DescriptorChainFull => 0x0802,

            Self::BufferTooSmall => 0xFF01,
            Self::InvalidParameter => 0xFF02,
            Self::NotImplemented => 0xFF06,
        }
    }

    /// Check if this is a security-critical error
    #[must_use]
    pub const fn is_security_error(&self) -> bool {
        matches!(self, Self::IntegrityFault)
    }

    /// Check if this is a target configuration error
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedVariant
                | Self::ConflictingDmaBackends
                | Self::MissingDmaBackend
                | Self::DmaBackendMismatch
                | Self::NotImplemented
        )
    }

    /// Get a short description of the error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::UnsupportedVariant => "hash variant not supported on this target",
            Self::InvalidTruncation => "invalid SHA-512/t truncation length",
            Self::IntegrityFault => "digest integrity fault",
            Self::ConflictingDmaBackends => "both DMA backends selected",
            Self::MissingDmaBackend => "no DMA backend selected",
            Self::DmaBackendMismatch => "DMA backend does not match target",
            Self::DescriptorChainFull => "descriptor chain full",
            Self::BufferTooSmall => "buffer too small",
            Self::InvalidParameter => "invalid parameter",
            Self::NotImplemented => "not implemented",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[0x{:04X}] {}", self.code(), self.description())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "[0x{:04X}] {}", self.code(), self.description());
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
