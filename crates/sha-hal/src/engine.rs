// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! SHA engine operations
//!
//! [`ShaHal`] sequences the low-level register driver: it loads message
//! blocks (through the text registers or a DMA descriptor chain), triggers
//! start/continue, waits for the engine and moves digest state in and out.
//!
//! The HAL performs no locking. Whoever owns the `ShaHal` owns the engine;
//! sharing it between sessions is the caller's business.

use sha_common::Capabilities;

use crate::dma::{DescriptorChain, DmaBackend, NoDma};
use crate::error::{HalError, HalResult};
use crate::fault::{self, Abort, FaultHandler, IntegrityFault};
use crate::state::DigestState;
use crate::traits::ShaLowLevel;
use crate::variant::{HashVariant, Sha512TParams};

/// SHA hash engine
///
/// * `LL` - register driver
/// * `D` - DMA backend, [`NoDma`] when blocks only go through registers
/// * `F` - reaction to an all-zero digest
pub struct ShaHal<LL, D = NoDma, F = Abort> {
    ll: LL,
    dma: D,
    fault: F,
    caps: Capabilities,
}

impl<LL: ShaLowLevel> ShaHal<LL> {
    /// Create a HAL for the target selected at build time
    pub fn new(ll: LL) -> Self {
        Self {
            ll,
            dma: NoDma,
            fault: Abort,
            caps: Capabilities::current(),
        }
    }

    /// Create a HAL with an explicit capability set
    ///
    /// # Errors
    ///
    /// [`HalError::ConflictingDmaBackends`] or [`HalError::MissingDmaBackend`]
    /// when the set enables DMA with both or neither backend, and
    /// [`HalError::InvalidParameter`] for any other inconsistent set.
    pub fn with_capabilities(ll: LL, caps: Capabilities) -> HalResult<Self> {
        caps.dma_backend()?;
        if !caps.is_valid() {
            return Err(HalError::InvalidParameter);
        }
        Ok(Self {
            ll,
            dma: NoDma,
            fault: Abort,
            caps,
        })
    }
}

impl<LL: ShaLowLevel, F: FaultHandler> ShaHal<LL, NoDma, F> {
    /// Attach the DMA backend
    ///
    /// # Errors
    ///
    /// [`HalError::NotSupported`] when the target has no DMA and
    /// [`HalError::DmaBackendMismatch`] when `D` is not the target's backend.
    pub fn with_dma<D: DmaBackend>(self, dma: D) -> HalResult<ShaHal<LL, D, F>> {
        match self.caps.dma_backend()? {
            Some(kind) if kind == D::KIND => Ok(ShaHal {
                ll: self.ll,
                dma,
                fault: self.fault,
                caps: self.caps,
            }),
            Some(_) => Err(HalError::DmaBackendMismatch),
            None => Err(HalError::NotSupported),
        }
    }
}

impl<LL: ShaLowLevel, D, F> ShaHal<LL, D, F> {
    /// Busy-wait until the engine is idle
    ///
    /// Polls without timeout or backoff; a stuck engine stalls the caller.
    pub fn wait_idle(&self) {
        while self.ll.busy() {
            core::hint::spin_loop();
        }
    }
}

impl<LL: ShaLowLevel, D, F: FaultHandler> ShaHal<LL, D, F> {
    /// Replace the integrity-fault handler
    pub fn with_fault_handler<G: FaultHandler>(self, handler: G) -> ShaHal<LL, D, G> {
        ShaHal {
            ll: self.ll,
            dma: self.dma,
            fault: handler,
            caps: self.caps,
        }
    }

    /// Capability set in use
    #[must_use]
    pub const fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    /// Running-state length of `variant`, 0 when unsupported
    #[must_use]
    pub const fn state_length(&self, variant: HashVariant) -> usize {
        variant.state_length(&self.caps)
    }

    /// Hash one message block written through the text registers
    ///
    /// # Arguments
    /// * `variant` - Hash algorithm
    /// * `block` - One block of message words, `variant.block_words()` long
    /// * `first_block` - Start from the initial value instead of continuing
    pub fn hash_block(&mut self, variant: HashVariant, block: &[u32], first_block: bool) {
        self.wait_idle();
        self.ll.fill_text_block(block);

        if first_block {
            self.ll.start_block(variant);
        } else {
            self.ll.continue_block(variant);
        }
    }

    /// Read the running digest
    ///
    /// Copies `state_length(variant)` words into `out`. An all-zero result
    /// (including an empty one for an unsupported variant) goes to the
    /// fault handler and never returns.
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than `state_length(variant)`.
    pub fn read_digest(&mut self, variant: HashVariant, out: &mut [u32]) {
        let words = self.state_length(variant);
        let out = &mut out[..words];

        self.ll.load(variant);
        self.wait_idle();
        self.ll.read_digest(variant, out);

        if fault::is_all_zero(out) {
            self.fault.integrity_fault(IntegrityFault { variant, words });
        }
    }

    /// Overwrite the running digest to resume a session
    ///
    /// # Errors
    ///
    /// [`HalError::NotSupported`] when the target cannot resume.
    ///
    /// # Panics
    ///
    /// Panics if `state` is shorter than `state_length(variant)`.
    pub fn write_digest(&mut self, variant: HashVariant, state: &[u32]) -> HalResult<()> {
        if !self.caps.resume {
            return Err(HalError::NotSupported);
        }

        let words = self.state_length(variant);
        self.ll.write_digest(variant, &state[..words]);
        Ok(())
    }

    /// Suspend the session into an owned state
    ///
    /// # Errors
    ///
    /// [`HalError::UnsupportedVariant`] when the target lacks `variant`.
    pub fn read_state(&mut self, variant: HashVariant) -> HalResult<DigestState> {
        let words = variant.checked_state_length(&self.caps)?;
        let mut state = DigestState::empty(variant, words);
        self.read_digest(variant, state.as_words_mut());
        Ok(state)
    }

    /// Resume a session saved with [`ShaHal::read_state`]
    ///
    /// # Errors
    ///
    /// [`HalError::NotSupported`] without resume support,
    /// [`HalError::UnsupportedVariant`] when the target lacks the variant and
    /// [`HalError::InvalidParameter`] when the state has the wrong length.
    pub fn restore_state(&mut self, state: &DigestState) -> HalResult<()> {
        let words = state.variant().checked_state_length(&self.caps)?;
        if state.len() != words {
            return Err(HalError::InvalidParameter);
        }
        self.write_digest(state.variant(), state.as_words())
    }

    /// Compute a SHA-512/t initial value on the engine
    ///
    /// # Arguments
    /// * `t_string` - Customization string register value
    /// * `t_len` - Customization length register value
    ///
    /// # Errors
    ///
    /// [`HalError::NotSupported`] when the target lacks SHA-512/t.
    pub fn init_extended_hash(&mut self, t_string: u32, t_len: u8) -> HalResult<()> {
        if !self.caps.sha512_t {
            return Err(HalError::NotSupported);
        }

        self.ll.set_t_string(t_string);
        self.ll.set_t_len(t_len);
        self.ll.start_block(HashVariant::Sha512T);
        self.wait_idle();
        Ok(())
    }

    /// Prepare SHA-512/t for truncation length `t`
    ///
    /// Blocks hashed afterwards must use `first_block = false` so they
    /// continue from the computed initial value.
    ///
    /// # Errors
    ///
    /// [`HalError::InvalidTruncation`] for an invalid `t`, otherwise as
    /// [`ShaHal::init_extended_hash`].
    pub fn init_sha512_t(&mut self, t: u16) -> HalResult<()> {
        let params = Sha512TParams::for_truncation(t)?;
        self.init_extended_hash(params.t_string, params.t_len)
    }

    /// Release the register driver and DMA backend
    pub fn release(self) -> (LL, D) {
        (self.ll, self.dma)
    }
}

impl<LL: ShaLowLevel, D: DmaBackend, F: FaultHandler> ShaHal<LL, D, F> {
    /// Hash message blocks fed by DMA
    ///
    /// The engine reads the chain's descriptors and buffers while the
    /// transfer runs. The returned [`DmaTransfer`] borrows both the HAL and
    /// the chain and waits for the engine when it is dropped, so neither can
    /// be touched before the engine is done with them.
    ///
    /// # Arguments
    /// * `variant` - Hash algorithm
    /// * `chain` - Descriptors over the message blocks
    /// * `num_blocks` - Number of blocks the engine consumes
    /// * `first_block` - Start from the initial value instead of continuing
    pub fn hash_dma<'h, 'c, 'a, const N: usize>(
        &'h mut self,
        variant: HashVariant,
        chain: &'c mut DescriptorChain<'a, N>,
        num_blocks: usize,
        first_block: bool,
    ) -> DmaTransfer<'h, 'c, 'a, LL, D, F, N> {
        self.wait_idle();

        let head = chain.link();
        self.dma.start_outlink(head, &self.caps);

        self.ll.set_block_num(num_blocks);
        if first_block {
            self.ll.start_dma(variant);
        } else {
            self.ll.continue_dma(variant);
        }

        DmaTransfer { hal: self, chain }
    }
}

/// A running DMA transfer
///
/// Holds the engine and the descriptor chain until the engine goes idle.
/// Dropping the transfer busy-waits like [`DmaTransfer::wait`]. Leaking it
/// with `mem::forget` skips the wait and releases the borrows early.
#[must_use = "the engine may still be reading the chain; call `wait`"]
pub struct DmaTransfer<'h, 'c, 'a, LL: ShaLowLevel, D, F, const N: usize> {
    hal: &'h mut ShaHal<LL, D, F>,
    chain: &'c mut DescriptorChain<'a, N>,
}

impl<LL: ShaLowLevel, D, F, const N: usize> DmaTransfer<'_, '_, '_, LL, D, F, N> {
    /// Chain being transferred
    #[must_use]
    pub fn chain(&self) -> &DescriptorChain<'_, N> {
        self.chain
    }

    /// Block until the engine is idle and release the chain
    pub fn wait(self) {}
}

impl<LL: ShaLowLevel, D, F, const N: usize> Drop for DmaTransfer<'_, '_, '_, LL, D, F, N> {
    fn drop(&mut self) {
        self.hal.wait_idle();
    }
}
