// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Hash variants and the digest-size table

use core::fmt;

use sha_common::Capabilities;

use crate::error::{HalError, HalResult};

/// SHA-1 running state, in words
pub const SHA1_STATE_WORDS: usize = 160 / 32;
/// SHA-224/256 running state, in words
pub const SHA256_STATE_WORDS: usize = 256 / 32;
/// SHA-384/512 (and truncated forms) running state, in words
pub const SHA512_STATE_WORDS: usize = 512 / 32;

/// Largest running state of any variant, in words
pub const MAX_STATE_WORDS: usize = SHA512_STATE_WORDS;

/// Hash algorithm selected on the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashVariant {
    /// SHA-1 - NOT RECOMMENDED for security
    Sha1,
    /// SHA-224
    Sha224,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
    /// SHA-512/224
    Sha512_224,
    /// SHA-512/256
    Sha512_256,
    /// SHA-512/t with a custom initial value, see
    /// [`ShaHal::init_extended_hash`](crate::ShaHal::init_extended_hash)
    Sha512T,
}

/// Block-size family a variant belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashFamily {
    /// SHA-1, 512-bit blocks
    Sha1,
    /// SHA-224/256, 512-bit blocks
    Sha256,
    /// SHA-384/512 and truncated forms, 1024-bit blocks
    Sha512,
}

impl HashVariant {
    /// Every variant, in declaration order
    pub const ALL: [Self; 8] = [
        Self::Sha1,
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
        Self::Sha512_224,
        Self::Sha512_256,
        Self::Sha512T,
    ];

    /// Family of this variant
    #[must_use]
    pub const fn family(&self) -> HashFamily {
        match self {
            Self::Sha1 => HashFamily::Sha1,
            Self::Sha224 | Self::Sha256 => HashFamily::Sha256,
            Self::Sha384 | Self::Sha512 | Self::Sha512_224 | Self::Sha512_256 | Self::Sha512T => {
                HashFamily::Sha512
            }
        }
    }

    /// Message block size in 32-bit words
    #[must_use]
    pub const fn block_words(&self) -> usize {
        match self.family() {
            HashFamily::Sha1 | HashFamily::Sha256 => 16,
            HashFamily::Sha512 => 32,
        }
    }

    /// Message block size in bytes
    #[must_use]
    pub const fn block_bytes(&self) -> usize {
        self.block_words() * 4
    }

    /// Final digest size in bytes
    ///
    /// For [`HashVariant::Sha512T`] the caller truncates to `t` bits; the full
    /// 64-byte state is reported here.
    #[must_use]
    pub const fn digest_bytes(&self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha224 | Self::Sha512_224 => 28,
            Self::Sha256 | Self::Sha512_256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 | Self::Sha512T => 64,
        }
    }

    /// Running-state length in words on a target with `caps`
    ///
    /// Returns 0 for a variant the target does not provide. The table does
    /// not signal this any other way; see [`HashVariant::checked_state_length`].
    #[must_use]
    pub const fn state_length(&self, caps: &Capabilities) -> usize {
        match self {
            Self::Sha1 => SHA1_STATE_WORDS,
            Self::Sha256 => SHA256_STATE_WORDS,
            Self::Sha224 if caps.sha224 => SHA256_STATE_WORDS,
            Self::Sha384 if caps.sha384 => SHA512_STATE_WORDS,
            Self::Sha512 if caps.sha512 => SHA512_STATE_WORDS,
            Self::Sha512_224 | Self::Sha512_256 | Self::Sha512T if caps.sha512_t => {
                SHA512_STATE_WORDS
            }
            _ => 0,
        }
    }

    /// Whether the target provides this variant
    #[must_use]
    pub const fn is_supported(&self, caps: &Capabilities) -> bool {
        self.state_length(caps) != 0
    }

    /// Running-state length, or an error for unsupported variants
    ///
    /// # Errors
    ///
    /// [`HalError::UnsupportedVariant`] when the table yields 0.
    pub const fn checked_state_length(&self, caps: &Capabilities) -> HalResult<usize> {
        match self.state_length(caps) {
            0 => Err(HalError::UnsupportedVariant),
            words => Ok(words),
        }
    }

    /// Short algorithm name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sha1 => "SHA-1",
            Self::Sha224 => "SHA-224",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
            Self::Sha512_224 => "SHA-512/224",
            Self::Sha512_256 => "SHA-512/256",
            Self::Sha512T => "SHA-512/t",
        }
    }
}

impl fmt::Display for HashVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for HashVariant {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.name());
    }
}

/// Digest state length for `variant` on a target with `caps`
///
/// Free-function form of [`HashVariant::state_length`].
#[must_use]
pub const fn state_length(variant: HashVariant, caps: &Capabilities) -> usize {
    variant.state_length(caps)
}

/// Register values that select a SHA-512/t initial hash value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sha512TParams {
    /// ASCII digits of `t` followed by the 0x80 padding byte, big-endian
    pub t_string: u32,
    /// Bit length of the string `"SHA-512/<t>"`
    pub t_len: u8,
}

impl Sha512TParams {
    /// Bit length of the `"SHA-512/"` prefix
    const PREFIX_BITS: u8 = 8 * 8;

    /// Derive the parameters for truncation length `t`
    ///
    /// # Errors
    ///
    /// [`HalError::InvalidTruncation`] for `t == 0`, `t > 512` or `t == 384`
    /// (SHA-384 has its own initial value).
    pub const fn for_truncation(t: u16) -> HalResult<Self> {
        if t == 0 || t > 512 || t == 384 {
            return Err(HalError::InvalidTruncation);
        }

        let (t_string, digits) = if t <= 9 {
            ((ascii_digit(t) << 24) | (0x80 << 16), 1)
        } else if t <= 99 {
            ((ascii_digit(t / 10) << 24) | (ascii_digit(t % 10) << 16) | (0x80 << 8), 2)
        } else {
            (
                (ascii_digit(t / 100) << 24)
                    | (ascii_digit((t / 10) % 10) << 16)
                    | (ascii_digit(t % 10) << 8)
                    | 0x80,
                3,
            )
        };

        Ok(Self {
            t_string,
            t_len: Self::PREFIX_BITS + 8 * digits,
        })
    }
}

// `u32::from` is not callable in a const fn
#[allow(clippy::cast_lossless)]
const fn ascii_digit(d: u16) -> u32 {
    0x30 + d as u32
}
