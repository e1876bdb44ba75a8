// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Owned running-digest state
//!
//! A [`DigestState`] carries a suspended hash session between
//! [`ShaHal::read_state`](crate::ShaHal::read_state) and
//! [`ShaHal::restore_state`](crate::ShaHal::restore_state). Intermediate
//! states leak message content, so the words are wiped on drop.

use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{HalError, HalResult};
use crate::variant::{HashVariant, MAX_STATE_WORDS};

/// Running digest words of one hash session
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DigestState {
    words: [u32; MAX_STATE_WORDS],
    len: usize,
    #[zeroize(skip)]
    variant: HashVariant,
}

impl DigestState {
    pub(crate) const fn empty(variant: HashVariant, len: usize) -> Self {
        Self {
            words: [0; MAX_STATE_WORDS],
            len,
            variant,
        }
    }

    /// Build a state from saved words
    ///
    /// # Errors
    ///
    /// [`HalError::InvalidParameter`] when `words` is longer than
    /// [`MAX_STATE_WORDS`].
    pub fn from_words(variant: HashVariant, words: &[u32]) -> HalResult<Self> {
        if words.len() > MAX_STATE_WORDS {
            return Err(HalError::InvalidParameter);
        }

        let mut state = Self::empty(variant, words.len());
        state.words[..words.len()].copy_from_slice(words);
        Ok(state)
    }

    /// Variant the state belongs to
    #[must_use]
    pub const fn variant(&self) -> HashVariant {
        self.variant
    }

    /// Number of state words
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the state holds no words
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// State words
    #[must_use]
    pub fn as_words(&self) -> &[u32] {
        &self.words[..self.len]
    }

    pub(crate) fn as_words_mut(&mut self) -> &mut [u32] {
        &mut self.words[..self.len]
    }
}

impl fmt::Debug for DigestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestState")
            .field("variant", &self.variant)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}
