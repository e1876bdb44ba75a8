// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! HAL error types

use core::fmt;

/// HAL error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    /// Operation not supported by the target's hash engine
    NotSupported,
    /// Hash variant not available on the target
    UnsupportedVariant,
    /// Truncation length outside 1..=512 or equal to 384
    InvalidTruncation,
    /// Both DMA backends are selected in the capability set
    ConflictingDmaBackends,
    /// DMA is enabled in the capability set without a backend
    MissingDmaBackend,
    /// DMA backend type does not match the target's backend
    DmaBackendMismatch,
    /// Descriptor chain has no free slot
    DescriptorChainFull,
    /// Buffer does not fit in a single DMA descriptor
    DescriptorBufferTooLarge,
    /// Invalid parameter
    InvalidParameter,
    /// Digest read back as all-zero words
    IntegrityFault,
}

impl HalError {
    /// Get error code
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::NotSupported => 0x08FF,
            Self::UnsupportedVariant => 0x0810,
            Self::InvalidTruncation => 0x0811,
            Self::ConflictingDmaBackends => 0x0880,
            Self::MissingDmaBackend => 0x0881,
            Self::DmaBackendMismatch => 0x0882,
            Self::DescriptorChainFull => 0x0883,
            Self::DescriptorBufferTooLarge => 0x0884,
            Self::InvalidParameter => 0x08F0,
            Self::IntegrityFault => 0x08D0,
        }
    }

    /// Get error description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::NotSupported => "not supported",
            Self::UnsupportedVariant => "hash variant not supported",
            Self::InvalidTruncation => "invalid SHA-512/t truncation length",
            Self::ConflictingDmaBackends => "both DMA backends selected",
            Self::MissingDmaBackend => "no DMA backend selected",
            Self::DmaBackendMismatch => "DMA backend does not match target",
            Self::DescriptorChainFull => "descriptor chain full",
            Self::DescriptorBufferTooLarge => "buffer too large for one descriptor",
            Self::InvalidParameter => "invalid parameter",
            Self::IntegrityFault => "digest integrity fault",
        }
    }

    /// Whether the error must terminate the system
    ///
    /// Only [`HalError::IntegrityFault`] is fatal. It is never handed back
    /// to a caller as a recoverable result; see [`crate::fault`].
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::IntegrityFault)
    }
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[0x{:04X}] {}", self.code(), self.description())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for HalError {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "[0x{:04X}] {}", self.code(), self.description());
    }
}

impl From<sha_common::Error> for HalError {
    fn from(e: sha_common::Error) -> Self {
        match e {
            sha_common::Error::UnsupportedVariant => Self::UnsupportedVariant,
            sha_common::Error::InvalidTruncation => Self::InvalidTruncation,
            sha_common::Error::IntegrityFault => Self::IntegrityFault,
            sha_common::Error::ConflictingDmaBackends => Self::ConflictingDmaBackends,
            sha_common::Error::MissingDmaBackend => Self::MissingDmaBackend,
            sha_common::Error::DmaBackendMismatch => Self::DmaBackendMismatch,
            sha_common::Error::DescriptorChainFull => Self::DescriptorChainFull,
            sha_common::Error::NotImplemented => Self::NotSupported,
            _ => Self::InvalidParameter,
        }
    }
}

impl From<HalError> for sha_common::Error {
    fn from(e: HalError) -> Self {
        match e {
            HalError::NotSupported => Self::NotImplemented,
            HalError::UnsupportedVariant => Self::UnsupportedVariant,
            HalError::InvalidTruncation => Self::InvalidTruncation,
            HalError::ConflictingDmaBackends => Self::ConflictingDmaBackends,
            HalError::MissingDmaBackend => Self::MissingDmaBackend,
            HalError::DmaBackendMismatch => Self::DmaBackendMismatch,
            HalError::DescriptorChainFull => Self::DescriptorChainFull,
            HalError::DescriptorBufferTooLarge => Self::BufferTooSmall,
            HalError::InvalidParameter => Self::InvalidParameter,
            HalError::IntegrityFault => Self::IntegrityFault,
        }
    }
}

/// HAL Result type
pub type HalResult<T> = Result<T, HalError>;
