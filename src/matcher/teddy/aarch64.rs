use super::*;

use crate::std_ext::arch::aarch64::*;
use std::arch::aarch64::*;

pub(super) struct Neon;
impl TeddySimd for Neon {
    type Block = uint8x16_t;

    #[inline(always)]
    fn load(bytes: &[u8; WIDTH]) -> Self::Block {
        // SAFETY: In this module, Neon is always available
        unsafe { vld1q_u8(bytes.as_ptr()) }
    }

    #[inline(always)]
    fn splat(b: u8) -> Self::Block {
        // SAFETY: In this module, Neon is always available
        unsafe { vdupq_n_u8(b) }
    }

    #[inline(always)]
    fn classify(lo: Self::Block, hi: Self::Block, block: Self::Block) -> Self::Block {
        // SAFETY: In this module, Neon is always available
        unsafe {
            let lo_nibbles = vandq_u8(block, vdupq_n_u8(0x0f));
            let hi_nibbles = vshrq_n_u8::<4>(block);

            vorrq_u8(vqtbl1q_u8(lo, lo_nibbles), vqtbl1q_u8(hi, hi_nibbles))
        }
    }

    #[inline(always)]
    fn shift_in(curr: Self::Block, prev: Self::Block, by: usize) -> Self::Block {
        // SAFETY: In this module, Neon is always available
        unsafe {
            match by {
                1 => vextq_u8::<15>(prev, curr),
                2 => vextq_u8::<14>(prev, curr),
                3 => vextq_u8::<13>(prev, curr),
                _ => curr,
            }
        }
    }

    #[inline(always)]
    fn or(a: Self::Block, b: Self::Block) -> Self::Block {
        // SAFETY: In this module, Neon is always available
        unsafe { vorrq_u8(a, b) }
    }

    #[inline(always)]
    fn andnot(v: Self::Block, mask: Self::Block) -> Self::Block {
        // SAFETY: In this module, Neon is always available
        unsafe { vbicq_u8(mask, v) }
    }

    #[inline(always)]
    fn nonzero(v: Self::Block) -> u16 {
        // SAFETY: In this module, Neon is always available
        unsafe { vmovemaskq_u8(vtstq_u8(v, v)) }
    }

    #[inline(always)]
    fn store(v: Self::Block) -> [u8; WIDTH] {
        let mut out = [0; WIDTH];

        // SAFETY: In this module, Neon is always available
        unsafe { vst1q_u8(out.as_mut_ptr(), v) };

        out
    }
}

// SAFETY: Callers must ensure Neon is available
#[target_feature(enable = "neon")]
pub(super) unsafe fn scan(
    input: &[u8],
    table: &CompiledTable,
    verifier: &Verifier,
    sink: &mut impl Sink,
) {
    scan_windows::<Neon>(input, table, verifier, sink)
}
