use super::*;

use std::arch::x86_64::*;

pub(super) struct Ssse3;
impl TeddySimd for Ssse3 {
    type Block = __m128i;

    #[inline(always)]
    fn load(bytes: &[u8; WIDTH]) -> Self::Block {
        // SAFETY: The pointer is valid for 16 bytes, and unaligned loads are fine
        unsafe { _mm_loadu_si128(bytes.as_ptr() as *const __m128i) }
    }

    #[inline(always)]
    fn splat(b: u8) -> Self::Block {
        // SAFETY: In this module, SSSE3 is always available
        unsafe { _mm_set1_epi8(b as i8) }
    }

    #[inline(always)]
    fn classify(lo: Self::Block, hi: Self::Block, block: Self::Block) -> Self::Block {
        // SAFETY: In this module, SSSE3 is always available
        unsafe {
            let nibble = _mm_set1_epi8(0x0f);

            // `pshufb` zeroes lanes with the top bit set, so both indexes are masked to 4 bits
            let lo_nibbles = _mm_and_si128(block, nibble);
            let hi_nibbles = _mm_and_si128(_mm_srli_epi16::<4>(block), nibble);

            _mm_or_si128(
                _mm_shuffle_epi8(lo, lo_nibbles),
                _mm_shuffle_epi8(hi, hi_nibbles),
            )
        }
    }

    #[inline(always)]
    fn shift_in(curr: Self::Block, prev: Self::Block, by: usize) -> Self::Block {
        // SAFETY: In this module, SSSE3 is always available
        unsafe {
            match by {
                1 => _mm_alignr_epi8::<15>(curr, prev),
                2 => _mm_alignr_epi8::<14>(curr, prev),
                3 => _mm_alignr_epi8::<13>(curr, prev),
                _ => curr,
            }
        }
    }

    #[inline(always)]
    fn or(a: Self::Block, b: Self::Block) -> Self::Block {
        // SAFETY: In this module, SSSE3 is always available
        unsafe { _mm_or_si128(a, b) }
    }

    #[inline(always)]
    fn andnot(v: Self::Block, mask: Self::Block) -> Self::Block {
        // SAFETY: In this module, SSSE3 is always available
        unsafe { _mm_andnot_si128(v, mask) }
    }

    #[inline(always)]
    fn nonzero(v: Self::Block) -> u16 {
        // SAFETY: In this module, SSSE3 is always available
        unsafe {
            let zero = _mm_cmpeq_epi8(v, _mm_setzero_si128());

            !(_mm_movemask_epi8(zero) as u16)
        }
    }

    #[inline(always)]
    fn store(v: Self::Block) -> [u8; WIDTH] {
        let mut out = [0; WIDTH];

        // SAFETY: The pointer is valid for 16 bytes, and unaligned stores are fine
        unsafe { _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, v) };

        out
    }
}

// SAFETY: Callers must ensure SSSE3 is available
#[target_feature(enable = "ssse3")]
pub(super) unsafe fn scan(
    input: &[u8],
    table: &CompiledTable,
    verifier: &Verifier,
    sink: &mut impl Sink,
) {
    scan_windows::<Ssse3>(input, table, verifier, sink)
}
