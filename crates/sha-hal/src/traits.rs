// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Low-level driver traits
//!
//! These are the register-level primitives the HAL sequences. Each method
//! corresponds to one register access (or one tightly coupled group) on the
//! peripheral; none of them waits for the engine.

use crate::dma::DmaDescriptor;
use crate::variant::HashVariant;

/// SHA engine register driver
pub trait ShaLowLevel {
    /// Copy one message block into the engine's text registers
    ///
    /// # Arguments
    /// * `block` - Message words, big-endian word order
    fn fill_text_block(&mut self, block: &[u32]);

    /// Hash the text registers from the variant's standard initial value
    fn start_block(&mut self, variant: HashVariant);

    /// Hash the text registers onto the running digest
    fn continue_block(&mut self, variant: HashVariant);

    /// Hash DMA-fed blocks from the variant's standard initial value
    fn start_dma(&mut self, variant: HashVariant);

    /// Hash DMA-fed blocks onto the running digest
    fn continue_dma(&mut self, variant: HashVariant);

    /// Number of blocks the next DMA operation will consume
    fn set_block_num(&mut self, num_blocks: usize);

    /// Latch the running digest into the readable register bank
    fn load(&mut self, variant: HashVariant);

    /// Copy `out.len()` words from the digest registers
    fn read_digest(&self, variant: HashVariant, out: &mut [u32]);

    /// Copy `state.len()` words into the running-digest registers
    fn write_digest(&mut self, variant: HashVariant, state: &[u32]);

    /// Whether the engine is processing
    fn busy(&self) -> bool;

    /// SHA-512/t customization string register
    fn set_t_string(&mut self, t_string: u32);

    /// SHA-512/t customization length register
    fn set_t_len(&mut self, t_len: u8);
}

/// Peripheral a GDMA channel is connected to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GdmaPeripheral {
    /// SHA accelerator
    Sha,
}

/// Block size used when a GDMA channel reads external RAM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtMemBlockSize {
    /// 16 byte bursts
    Bytes16,
    /// 32 byte bursts
    Bytes32,
    /// 64 byte bursts
    Bytes64,
}

/// General-purpose DMA channel bound to the SHA engine
///
/// Implementations own one channel; the channel number is theirs to pick.
pub trait GdmaLowLevel {
    /// Enable bursts when fetching TX descriptors
    fn tx_enable_descriptor_burst(&mut self, enable: bool);

    /// Enable bursts when fetching TX data
    fn tx_enable_data_burst(&mut self, enable: bool);

    /// Write descriptors back to memory once consumed
    fn tx_enable_auto_write_back(&mut self, enable: bool);

    /// Route the TX channel to a peripheral
    fn tx_connect_to_periph(&mut self, periph: GdmaPeripheral);

    /// Grow the TX FIFO, needed for external memory
    fn tx_extend_fifo_size_to(&mut self, size: u32);

    /// External-memory block size for TX
    fn tx_set_block_size_psram(&mut self, size: ExtMemBlockSize);

    /// Address of the first TX descriptor
    fn tx_set_desc_addr(&mut self, head: *const DmaDescriptor);

    /// Reset the RX side of the channel
    fn rx_reset_channel(&mut self);

    /// Reset the TX side of the channel
    fn tx_reset_channel(&mut self);

    /// Start fetching TX descriptors
    fn tx_start(&mut self);
}

/// Function a crypto DMA transfer is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoDmaMode {
    /// AES accelerator
    Aes,
    /// SHA accelerator
    Sha,
}

/// DMA controller dedicated to the crypto peripherals
pub trait CryptoDmaLowLevel {
    /// Route transfers to the AES or SHA accelerator
    fn set_mode(&mut self, mode: CryptoDmaMode);

    /// Reset the controller
    fn reset(&mut self);

    /// Address of the first outlink descriptor
    fn outlink_set(&mut self, head: *const DmaDescriptor);

    /// Start the outlink
    fn outlink_start(&mut self);
}

impl<T: ShaLowLevel + ?Sized> ShaLowLevel for &mut T {
    fn fill_text_block(&mut self, block: &[u32]) {
        (**self).fill_text_block(block);
    }

    fn start_block(&mut self, variant: HashVariant) {
        (**self).start_block(variant);
    }

    fn continue_block(&mut self, variant: HashVariant) {
        (**self).continue_block(variant);
    }

    fn start_dma(&mut self, variant: HashVariant) {
        (**self).start_dma(variant);
    }

    fn continue_dma(&mut self, variant: HashVariant) {
        (**self).continue_dma(variant);
    }

    fn set_block_num(&mut self, num_blocks: usize) {
        (**self).set_block_num(num_blocks);
    }

    fn load(&mut self, variant: HashVariant) {
        (**self).load(variant);
    }

    fn read_digest(&self, variant: HashVariant, out: &mut [u32]) {
        (**self).read_digest(variant, out);
    }

    fn write_digest(&mut self, variant: HashVariant, state: &[u32]) {
        (**self).write_digest(variant, state);
    }

    fn busy(&self) -> bool {
        (**self).busy()
    }

    fn set_t_string(&mut self, t_string: u32) {
        (**self).set_t_string(t_string);
    }

    fn set_t_len(&mut self, t_len: u8) {
        (**self).set_t_len(t_len);
    }
}
