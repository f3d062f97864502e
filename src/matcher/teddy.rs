/*!
The vectorized Teddy filter.

Input is processed in 16 byte windows. Each window is classified against every suffix position's
nibble tables, then the classes for earlier suffix positions are shifted forward so that lane `p`
holds the groups excluded by every byte of the `sigma` byte window ending at `p`. The first few
lanes of a window take their shifted classes from the previous window, so keys that straddle
a window boundary are still found.

Each backend implements [`TeddySimd`] and the window loop is shared.
*/

// without a backend only the tests use the window loop
#![cfg_attr(
    not(all(any(target_arch = "x86_64", target_arch = "aarch64"), not(portable))),
    allow(dead_code)
)]

use super::verify::Verifier;

use crate::{
    compile::{CompiledTable, MAX_SIGMA},
    sink::Sink,
};

#[cfg(all(target_arch = "x86_64", not(portable)))]
mod x86_64;

#[cfg(all(target_arch = "aarch64", not(portable)))]
mod aarch64;

/**
The number of bytes processed at once.
*/
pub(super) const WIDTH: usize = 16;

/**
The byte used to pad the last window.

Lanes past the end of the input are never reported, the sentinel just needs to be some byte.
*/
const SENTINEL: u8 = 0xff;

/**
The vector operations the window loop needs.

Implementations assume the instructions they use are available.
*/
pub(super) trait TeddySimd {
    type Block: Copy;

    fn load(bytes: &[u8; WIDTH]) -> Self::Block;

    fn splat(b: u8) -> Self::Block;

    /**
    Look up the low and high nibble of each byte in `block` and combine the results.
    */
    fn classify(lo: Self::Block, hi: Self::Block, block: Self::Block) -> Self::Block;

    /**
    Move each lane of `curr` up by `by` lanes, filling the bottom with the top lanes of `prev`.
    */
    fn shift_in(curr: Self::Block, prev: Self::Block, by: usize) -> Self::Block;

    fn or(a: Self::Block, b: Self::Block) -> Self::Block;

    /**
    Compute `mask & !v`.
    */
    fn andnot(v: Self::Block, mask: Self::Block) -> Self::Block;

    /**
    A bitmask with a set bit for each non-zero lane.
    */
    fn nonzero(v: Self::Block) -> u16;

    fn store(v: Self::Block) -> [u8; WIDTH];
}

#[cfg(all(target_arch = "x86_64", not(portable)))]
pub(super) fn is_supported() -> bool {
    is_x86_feature_detected!("ssse3")
}

#[cfg(all(target_arch = "aarch64", not(portable)))]
pub(super) fn is_supported() -> bool {
    std::arch::is_aarch64_feature_detected!("neon")
}

#[cfg(not(all(any(target_arch = "x86_64", target_arch = "aarch64"), not(portable))))]
pub(super) fn is_supported() -> bool {
    false
}

pub(super) fn scan(input: &[u8], table: &CompiledTable, verifier: &Verifier, sink: &mut impl Sink) {
    if table.is_empty() {
        return;
    }

    #[cfg(all(target_arch = "x86_64", not(portable)))]
    {
        if is_supported() {
            // SAFETY: SSSE3 is available
            unsafe { x86_64::scan(input, table, verifier, sink) };
            return;
        }
    }

    #[cfg(all(target_arch = "aarch64", not(portable)))]
    {
        if is_supported() {
            // SAFETY: Neon is available
            unsafe { aarch64::scan(input, table, verifier, sink) };
            return;
        }
    }

    // callers check support first, but the baseline gives the same answer anyway
    super::baseline::scan(input, table, verifier, sink)
}

/**
Run the filter over `input` and verify every candidate it finds.
*/
#[inline(always)]
pub(super) fn scan_windows<T: TeddySimd>(
    input: &[u8],
    table: &CompiledTable,
    verifier: &Verifier,
    sink: &mut impl Sink,
) {
    let sigma = table.sigma();

    test_assert!(sigma > 0 && sigma <= MAX_SIGMA);

    let excluded = T::splat(SENTINEL);

    let mut lo = [excluded; MAX_SIGMA];
    let mut hi = [excluded; MAX_SIGMA];

    for i in 0..sigma {
        lo[i] = T::load(table.lo(i));
        hi[i] = T::load(table.hi(i));
    }

    let group_mask = T::splat(table.group_mask());

    // before the first window every group is excluded, so nothing hits
    // until there are at least `sigma` bytes of lookback
    let mut prev = [excluded; MAX_SIGMA];
    let mut base = 0;

    while base < input.len() {
        let block = match input
            .get(base..base + WIDTH)
            .and_then(|window| <&[u8; WIDTH]>::try_from(window).ok())
        {
            Some(window) => T::load(window),
            None => {
                let rest = &input[base..];

                let mut tail = [SENTINEL; WIDTH];
                tail[..rest.len()].copy_from_slice(rest);

                T::load(&tail)
            }
        };

        let mut curr = [excluded; MAX_SIGMA];
        for i in 0..sigma {
            curr[i] = T::classify(lo[i], hi[i], block);
        }

        let mut classes = curr[sigma - 1];
        for i in 0..sigma - 1 {
            classes = T::or(classes, T::shift_in(curr[i], prev[i], sigma - 1 - i));
        }

        let hits = T::andnot(classes, group_mask);
        let mut mask = T::nonzero(hits);

        if mask != 0 {
            let lanes = T::store(hits);

            while mask != 0 {
                let lane = mask.trailing_zeros() as usize;
                mask &= mask - 1;

                let end = base + lane;

                // lanes in the padding of the last window
                if end >= input.len() {
                    break;
                }

                test_assert_eq!(table.hits(input, end), lanes[lane]);

                verifier.candidate(end, lanes[lane], sink);
            }
        }

        prev = curr;
        base += WIDTH;
    }
}
