// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Simulated SHA engine for host tests
//!
//! Implements the low-level traits over shared state. Compression is done
//! with the `sha2` crate; SHA-1 blocks are accepted but not compressed.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use sha2::digest::generic_array::GenericArray;
use sha_hal::{
    Capabilities, CryptoDmaLowLevel, CryptoDmaMode, DmaDescriptor, ExtMemBlockSize, FaultHandler,
    GdmaLowLevel, GdmaPeripheral, HashFamily, HashVariant, IntegrityFault, NoDma, Sha512TParams,
    ShaHal, ShaLowLevel, MAX_STATE_WORDS,
};

const SHA1_IV: [u32; 5] = [0x6745_2301, 0xefcd_ab89, 0x98ba_dcfe, 0x1032_5476, 0xc3d2_e1f0];

const SHA224_IV: [u32; 8] = [
    0xc105_9ed8, 0x367c_d507, 0x3070_dd17, 0xf70e_5939,
    0xffc0_0b31, 0x6858_1511, 0x64f9_8fa7, 0xbefa_4fa4,
];

const SHA256_IV: [u32; 8] = [
    0x6a09_e667, 0xbb67_ae85, 0x3c6e_f372, 0xa54f_f53a,
    0x510e_527f, 0x9b05_688c, 0x1f83_d9ab, 0x5be0_cd19,
];

const SHA384_IV: [u64; 8] = [
    0xcbbb_9d5d_c105_9ed8, 0x629a_292a_367c_d507, 0x9159_015a_3070_dd17, 0x152f_ecd8_f70e_5939,
    0x6733_2667_ffc0_0b31, 0x8eb4_4a87_6858_1511, 0xdb0c_2e0d_64f9_8fa7, 0x47b5_481d_befa_4fa4,
];

const SHA512_IV: [u64; 8] = [
    0x6a09_e667_f3bc_c908, 0xbb67_ae85_84ca_a73b, 0x3c6e_f372_fe94_f82b, 0xa54f_f53a_5f1d_36f1,
    0x510e_527f_ade6_82d1, 0x9b05_688c_2b3e_6c1f, 0x1f83_d9ab_fb41_bd6b, 0x5be0_cd19_137e_2179,
];

/// Engine registers and bookkeeping
#[derive(Default)]
pub struct SimState {
    /// Running digest, SHA-512 words stored high half first
    pub h: [u32; MAX_STATE_WORDS],
    /// Digest register bank latched by `load`
    pub latched: [u32; MAX_STATE_WORDS],
    pub text: Vec<u32>,
    pub t_string: u32,
    pub t_len: u8,
    pub block_num: usize,
    /// Busy polls reported after each start, continue or load
    pub latency: usize,
    pub busy_left: usize,
    pub polls: usize,
    /// Force digest reads to return zeros
    pub glitch: bool,
    pub blocks_hashed: usize,
    pub pending_outlink: usize,
    pub outlink: usize,
    pub gdma_ext_fifo: Option<u32>,
    pub gdma_psram_block: Option<ExtMemBlockSize>,
    pub gdma_periph: Option<GdmaPeripheral>,
    pub crypto_mode: Option<CryptoDmaMode>,
}

pub type Shared = Rc<RefCell<SimState>>;

/// Register driver over the shared state
#[derive(Clone)]
pub struct SimEngine(pub Shared);

impl SimEngine {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(SimState::default())))
    }

    pub fn state(&self) -> std::cell::RefMut<'_, SimState> {
        self.0.borrow_mut()
    }

    pub fn gdma(&self) -> SimGdma {
        SimGdma(Rc::clone(&self.0))
    }

    pub fn crypto_dma(&self) -> SimCryptoDma {
        SimCryptoDma(Rc::clone(&self.0))
    }

    fn begin(&self, variant: HashVariant, data: &[u8], first: bool) {
        let mut st = self.0.borrow_mut();
        if first {
            set_iv(&mut st, variant);
        }
        if variant != HashVariant::Sha512T || !first {
            for block in data.chunks_exact(variant.block_bytes()) {
                compress(&mut st.h, variant.family(), block);
                st.blocks_hashed += 1;
            }
        }
        st.busy_left = st.latency;
    }
}

impl ShaLowLevel for SimEngine {
    fn fill_text_block(&mut self, block: &[u32]) {
        self.0.borrow_mut().text = block.to_vec();
    }

    fn start_block(&mut self, variant: HashVariant) {
        let data = words_to_bytes(&self.0.borrow().text);
        self.begin(variant, &data, true);
    }

    fn continue_block(&mut self, variant: HashVariant) {
        let data = words_to_bytes(&self.0.borrow().text);
        self.begin(variant, &data, false);
    }

    fn start_dma(&mut self, variant: HashVariant) {
        let data = self.dma_bytes(variant);
        self.begin(variant, &data, true);
    }

    fn continue_dma(&mut self, variant: HashVariant) {
        let data = self.dma_bytes(variant);
        self.begin(variant, &data, false);
    }

    fn set_block_num(&mut self, num_blocks: usize) {
        self.0.borrow_mut().block_num = num_blocks;
    }

    fn load(&mut self, _variant: HashVariant) {
        let mut st = self.0.borrow_mut();
        st.latched = st.h;
        st.busy_left = st.latency;
    }

    fn read_digest(&self, _variant: HashVariant, out: &mut [u32]) {
        let st = self.0.borrow();
        if st.glitch {
            out.fill(0);
        } else {
            out.copy_from_slice(&st.latched[..out.len()]);
        }
    }

    fn write_digest(&mut self, _variant: HashVariant, state: &[u32]) {
        self.0.borrow_mut().h[..state.len()].copy_from_slice(state);
    }

    fn busy(&self) -> bool {
        let mut st = self.0.borrow_mut();
        st.polls += 1;
        if st.busy_left == 0 {
            false
        } else {
            st.busy_left -= 1;
            true
        }
    }

    fn set_t_string(&mut self, t_string: u32) {
        self.0.borrow_mut().t_string = t_string;
    }

    fn set_t_len(&mut self, t_len: u8) {
        self.0.borrow_mut().t_len = t_len;
    }
}

impl SimEngine {
    /// Bytes of the first `block_num` blocks behind the committed outlink
    fn dma_bytes(&self, variant: HashVariant) -> Vec<u8> {
        let (head, blocks) = {
            let st = self.0.borrow();
            (st.outlink as *const DmaDescriptor, st.block_num)
        };

        let mut data = Vec::new();
        let mut cur = head;
        while !cur.is_null() {
            // SAFETY: the chain is borrowed by the hash_dma call driving us
            let desc = unsafe { &*cur };
            // SAFETY: descriptors describe live borrowed buffers
            let buf = unsafe { std::slice::from_raw_parts(desc.buffer(), desc.len()) };
            data.extend_from_slice(buf);
            if desc.is_eof() {
                break;
            }
            cur = desc.next();
        }

        data.truncate(blocks * variant.block_bytes());
        data
    }
}

/// General-purpose DMA channel over the shared state
pub struct SimGdma(Shared);

impl GdmaLowLevel for SimGdma {
    fn tx_enable_descriptor_burst(&mut self, _enable: bool) {}

    fn tx_enable_data_burst(&mut self, _enable: bool) {}

    fn tx_enable_auto_write_back(&mut self, _enable: bool) {}

    fn tx_connect_to_periph(&mut self, periph: GdmaPeripheral) {
        self.0.borrow_mut().gdma_periph = Some(periph);
    }

    fn tx_extend_fifo_size_to(&mut self, size: u32) {
        self.0.borrow_mut().gdma_ext_fifo = Some(size);
    }

    fn tx_set_block_size_psram(&mut self, size: ExtMemBlockSize) {
        self.0.borrow_mut().gdma_psram_block = Some(size);
    }

    fn tx_set_desc_addr(&mut self, head: *const DmaDescriptor) {
        self.0.borrow_mut().pending_outlink = head as usize;
    }

    fn rx_reset_channel(&mut self) {}

    fn tx_reset_channel(&mut self) {
        self.0.borrow_mut().outlink = 0;
    }

    fn tx_start(&mut self) {
        let mut st = self.0.borrow_mut();
        st.outlink = st.pending_outlink;
    }
}

/// Crypto DMA controller over the shared state
pub struct SimCryptoDma(Shared);

impl CryptoDmaLowLevel for SimCryptoDma {
    fn set_mode(&mut self, mode: CryptoDmaMode) {
        self.0.borrow_mut().crypto_mode = Some(mode);
    }

    fn reset(&mut self) {
        self.0.borrow_mut().outlink = 0;
    }

    fn outlink_set(&mut self, head: *const DmaDescriptor) {
        self.0.borrow_mut().pending_outlink = head as usize;
    }

    fn outlink_start(&mut self) {
        let mut st = self.0.borrow_mut();
        st.outlink = st.pending_outlink;
    }
}

/// Fault handler that unwinds so tests can observe the fault
pub struct PanicOnFault;

impl FaultHandler for PanicOnFault {
    fn integrity_fault(&mut self, fault: IntegrityFault) -> ! {
        panic!("{fault}")
    }
}

fn set_iv(st: &mut SimState, variant: HashVariant) {
    st.h = [0; MAX_STATE_WORDS];
    match variant {
        HashVariant::Sha1 => st.h[..5].copy_from_slice(&SHA1_IV),
        HashVariant::Sha224 => st.h[..8].copy_from_slice(&SHA224_IV),
        HashVariant::Sha256 => st.h[..8].copy_from_slice(&SHA256_IV),
        HashVariant::Sha384 => store512(&mut st.h, &SHA384_IV),
        HashVariant::Sha512 => store512(&mut st.h, &SHA512_IV),
        HashVariant::Sha512_224 => store512(&mut st.h, &sha512_t_iv(224)),
        HashVariant::Sha512_256 => store512(&mut st.h, &sha512_t_iv(256)),
        HashVariant::Sha512T => {
            let iv = sha512_t_iv_from_regs(st.t_string, st.t_len);
            store512(&mut st.h, &iv);
        }
    }
}

fn sha512_t_iv(t: u16) -> [u64; 8] {
    let params = Sha512TParams::for_truncation(t).unwrap();
    sha512_t_iv_from_regs(params.t_string, params.t_len)
}

/// FIPS 180-4 5.3.6: hash "SHA-512/t" from the modified SHA-512 IV
fn sha512_t_iv_from_regs(t_string: u32, t_len: u8) -> [u64; 8] {
    let mut iv = SHA512_IV.map(|w| w ^ 0xa5a5_a5a5_a5a5_a5a5);

    let mut block = [0u8; 128];
    block[..8].copy_from_slice(b"SHA-512/");
    block[8..12].copy_from_slice(&t_string.to_be_bytes());
    block[120..].copy_from_slice(&u64::from(t_len).to_be_bytes());

    sha2::compress512(&mut iv, &[GenericArray::clone_from_slice(&block)]);
    iv
}

fn compress(h: &mut [u32; MAX_STATE_WORDS], family: HashFamily, block: &[u8]) {
    match family {
        HashFamily::Sha1 => {
            let mut st = [0u32; 5];
            st.copy_from_slice(&h[..5]);
            sha1::compress(&mut st, &[GenericArray::clone_from_slice(block)]);
            h[..5].copy_from_slice(&st);
        }
        HashFamily::Sha256 => {
            let mut st = [0u32; 8];
            st.copy_from_slice(&h[..8]);
            sha2::compress256(&mut st, &[GenericArray::clone_from_slice(block)]);
            h[..8].copy_from_slice(&st);
        }
        HashFamily::Sha512 => {
            let mut st = load512(h);
            sha2::compress512(&mut st, &[GenericArray::clone_from_slice(block)]);
            store512(h, &st);
        }
    }
}

fn load512(h: &[u32; MAX_STATE_WORDS]) -> [u64; 8] {
    core::array::from_fn(|i| (u64::from(h[2 * i]) << 32) | u64::from(h[2 * i + 1]))
}

fn store512(h: &mut [u32; MAX_STATE_WORDS], st: &[u64; 8]) {
    for (i, w) in st.iter().enumerate() {
        h[2 * i] = (w >> 32) as u32;
        h[2 * i + 1] = *w as u32;
    }
}

// =============================================================================
// Message helpers
// =============================================================================

/// HAL over a fresh simulated engine, unwinding on integrity faults
pub fn sim_hal(caps: Capabilities) -> (SimEngine, ShaHal<SimEngine, NoDma, PanicOnFault>) {
    let engine = SimEngine::new();
    let hal = ShaHal::with_capabilities(engine.clone(), caps)
        .unwrap()
        .with_fault_handler(PanicOnFault);
    (engine, hal)
}

/// Pad `msg`, hash it block by block and return the digest bytes
pub fn hash_message<D>(
    hal: &mut ShaHal<SimEngine, D, PanicOnFault>,
    variant: HashVariant,
    msg: &[u8],
) -> Vec<u8> {
    let block_bytes = variant.block_bytes();
    for (i, block) in pad(msg, block_bytes).chunks(block_bytes).enumerate() {
        hal.hash_block(variant, &to_words(block), i == 0);
    }
    read_digest_bytes(hal, variant)
}

/// Read the digest and truncate it to the variant's output length
pub fn read_digest_bytes<D>(
    hal: &mut ShaHal<SimEngine, D, PanicOnFault>,
    variant: HashVariant,
) -> Vec<u8> {
    let mut out = [0u32; MAX_STATE_WORDS];
    hal.read_digest(variant, &mut out);
    let mut bytes = words_to_bytes(&out[..hal.state_length(variant)]);
    bytes.truncate(variant.digest_bytes());
    bytes
}

/// Apply SHA padding for a `block_bytes` block size
pub fn pad(msg: &[u8], block_bytes: usize) -> Vec<u8> {
    let len_bytes = block_bytes / 8;
    let mut out = msg.to_vec();
    out.push(0x80);
    while out.len() % block_bytes != block_bytes - len_bytes {
        out.push(0);
    }
    let bits = (msg.len() as u128) * 8;
    out.extend_from_slice(&bits.to_be_bytes()[16 - len_bytes..]);
    out
}

/// Big-endian message words
pub fn to_words(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks_exact(4)
        .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

pub fn words_to_bytes(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_be_bytes()).collect()
}
