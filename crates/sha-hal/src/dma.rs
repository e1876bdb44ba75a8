// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! DMA descriptors and backends
//!
//! Message blocks reach the engine either through the text registers or
//! through a linked list of [`DmaDescriptor`]s that a DMA controller walks.
//! Each target has exactly one controller for this: the shared
//! general-purpose DMA ([`GeneralDma`]) or the crypto-dedicated one
//! ([`CryptoDma`]). The HAL only links the caller's chain and hands its head
//! to the backend; it never reads the blocks.

use core::marker::PhantomData;
use core::ptr;

use sha_common::{Capabilities, DmaKind};

use crate::error::{HalError, HalResult};
use crate::traits::{CryptoDmaLowLevel, CryptoDmaMode, ExtMemBlockSize, GdmaLowLevel, GdmaPeripheral};
use crate::variant::HashVariant;

/// Largest buffer one descriptor can describe, in bytes
pub const MAX_DESCRIPTOR_LEN: usize = 4095;

/// TX FIFO size required for external-memory fetches
const EXT_MEM_FIFO_SIZE: u32 = 40;

// Descriptor flag word layout
const DESC_SIZE_MASK: u32 = 0xFFF;
const DESC_LENGTH_SHIFT: u32 = 12;
const DESC_LENGTH_MASK: u32 = 0xFFF << DESC_LENGTH_SHIFT;
const DESC_EOF: u32 = 1 << 30;
const DESC_OWNER_DMA: u32 = 1 << 31;

/// Linked-list DMA descriptor as walked by the hardware
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct DmaDescriptor {
    flags: u32,
    buffer: *const u8,
    next: *const DmaDescriptor,
}

impl DmaDescriptor {
    /// Descriptor with no buffer
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            flags: 0,
            buffer: ptr::null(),
            next: ptr::null(),
        }
    }

    // Length fits in 12 bits, checked by the caller
    #[allow(clippy::cast_possible_truncation)]
    fn for_buffer(buf: &[u8]) -> Self {
        let len = buf.len() as u32;
        Self {
            flags: (len & DESC_SIZE_MASK) | ((len << DESC_LENGTH_SHIFT) & DESC_LENGTH_MASK),
            buffer: buf.as_ptr(),
            next: ptr::null(),
        }
    }

    /// Size of the buffer in bytes
    #[must_use]
    pub const fn size(&self) -> usize {
        (self.flags & DESC_SIZE_MASK) as usize
    }

    /// Number of valid bytes in the buffer
    #[must_use]
    pub const fn len(&self) -> usize {
        ((self.flags & DESC_LENGTH_MASK) >> DESC_LENGTH_SHIFT) as usize
    }

    /// Whether the descriptor holds no data
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this is the last descriptor of its chain
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        self.flags & DESC_EOF != 0
    }

    /// Whether the descriptor is handed to the DMA controller
    #[must_use]
    pub const fn is_dma_owned(&self) -> bool {
        self.flags & DESC_OWNER_DMA != 0
    }

    /// Start of the described buffer
    #[must_use]
    pub const fn buffer(&self) -> *const u8 {
        self.buffer
    }

    /// Next descriptor, null at the end of the chain
    #[must_use]
    pub const fn next(&self) -> *const DmaDescriptor {
        self.next
    }
}

impl Default for DmaDescriptor {
    fn default() -> Self {
        Self::empty()
    }
}

/// Fixed-capacity descriptor chain over caller buffers
///
/// The chain borrows every buffer for `'a`, so the blocks cannot be freed or
/// modified while the chain exists. Links are written by
/// [`DescriptorChain::link`] right before a transfer, which keeps the chain
/// movable until then. Once linked, the descriptors point into the chain
/// itself; [`ShaHal::hash_dma`](crate::ShaHal::hash_dma) keeps the chain
/// borrowed until the engine is idle.
pub struct DescriptorChain<'a, const N: usize> {
    descs: [DmaDescriptor; N],
    count: usize,
    total: usize,
    _buffers: PhantomData<&'a [u8]>,
}

impl<'a, const N: usize> DescriptorChain<'a, N> {
    /// Create an empty chain
    #[must_use]
    pub const fn new() -> Self {
        Self {
            descs: [DmaDescriptor::empty(); N],
            count: 0,
            total: 0,
            _buffers: PhantomData,
        }
    }

    /// Append a buffer
    ///
    /// # Errors
    ///
    /// [`HalError::DescriptorChainFull`] when all `N` slots are used and
    /// [`HalError::DescriptorBufferTooLarge`] for buffers over
    /// [`MAX_DESCRIPTOR_LEN`] bytes.
    pub fn push(&mut self, buf: &'a [u8]) -> HalResult<()> {
        if self.count == N {
            return Err(HalError::DescriptorChainFull);
        }
        if buf.len() > MAX_DESCRIPTOR_LEN {
            return Err(HalError::DescriptorBufferTooLarge);
        }

        self.descs[self.count] = DmaDescriptor::for_buffer(buf);
        self.count += 1;
        self.total += buf.len();
        Ok(())
    }

    /// Number of descriptors in use
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Whether no buffer has been pushed
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Total bytes described by the chain
    #[must_use]
    pub const fn total_bytes(&self) -> usize {
        self.total
    }

    /// Whole `variant` blocks described by the chain
    #[must_use]
    pub const fn blocks(&self, variant: HashVariant) -> usize {
        self.total / variant.block_bytes()
    }

    /// Descriptors in use
    #[must_use]
    pub fn descriptors(&self) -> &[DmaDescriptor] {
        &self.descs[..self.count]
    }

    /// Link the descriptors, hand them to DMA and return the head
    ///
    /// Returns null for an empty chain. The returned pointer stays valid
    /// until the chain is moved or dropped.
    pub fn link(&mut self) -> *const DmaDescriptor {
        let count = self.count;
        let base = self.descs.as_ptr();

        for (i, desc) in self.descs[..count].iter_mut().enumerate() {
            let last = i + 1 == count;
            desc.next = if last { ptr::null() } else { base.wrapping_add(i + 1) };
            desc.flags |= DESC_OWNER_DMA;
            if last {
                desc.flags |= DESC_EOF;
            } else {
                desc.flags &= !DESC_EOF;
            }
        }

        if count == 0 {
            ptr::null()
        } else {
            base
        }
    }
}

impl<const N: usize> Default for DescriptorChain<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// A DMA controller able to feed the SHA engine
pub trait DmaBackend {
    /// Controller kind, matched against the target's capability set
    const KIND: DmaKind;

    /// Configure the controller for SHA, bind `head` and start the transfer
    fn start_outlink(&mut self, head: *const DmaDescriptor, caps: &Capabilities);
}

/// Placeholder backend of a HAL built without DMA
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDma;

/// Shared general-purpose DMA controller
pub struct GeneralDma<G> {
    channel: G,
}

impl<G: GdmaLowLevel> GeneralDma<G> {
    /// Wrap the channel assigned to the SHA engine
    pub const fn new(channel: G) -> Self {
        Self { channel }
    }

    /// Release the channel
    pub fn into_inner(self) -> G {
        self.channel
    }
}

impl<G: GdmaLowLevel> DmaBackend for GeneralDma<G> {
    const KIND: DmaKind = DmaKind::General;

    fn start_outlink(&mut self, head: *const DmaDescriptor, caps: &Capabilities) {
        let ch = &mut self.channel;

        // Bursting and write-back change fetch timing; keep them off
        ch.tx_enable_descriptor_burst(false);
        ch.tx_enable_data_burst(false);
        ch.tx_enable_auto_write_back(false);

        ch.tx_connect_to_periph(GdmaPeripheral::Sha);

        if caps.dma_ext_mem {
            ch.tx_extend_fifo_size_to(EXT_MEM_FIFO_SIZE);
            ch.tx_set_block_size_psram(ExtMemBlockSize::Bytes16);
        }

        ch.tx_set_desc_addr(head);

        ch.rx_reset_channel();
        ch.tx_reset_channel();

        ch.tx_start();
    }
}

/// DMA controller dedicated to the crypto peripherals
pub struct CryptoDma<C> {
    controller: C,
}

impl<C: CryptoDmaLowLevel> CryptoDma<C> {
    /// Wrap the crypto DMA controller
    pub const fn new(controller: C) -> Self {
        Self { controller }
    }

    /// Release the controller
    pub fn into_inner(self) -> C {
        self.controller
    }
}

impl<C: CryptoDmaLowLevel> DmaBackend for CryptoDma<C> {
    const KIND: DmaKind = DmaKind::Crypto;

    fn start_outlink(&mut self, head: *const DmaDescriptor, _caps: &Capabilities) {
        self.controller.set_mode(CryptoDmaMode::Sha);
        self.controller.reset();

        self.controller.outlink_set(head);
        self.controller.outlink_start();
    }
}
