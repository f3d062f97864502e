use std::arch::aarch64::*;

// Neon doesn't have a built-in equivalent to x86's movemask
// We implement our own by masking each lane to a single bit in its half of the target `u16`
// We then add the bytes across each half to combine them, producing a single
// value that contains a set bit corresponding to each `ff` value in the original
#[target_feature(enable = "neon")]
#[inline]
// SAFETY: Callers must ensure Neon is available
pub unsafe fn vmovemaskq_u8(a: uint8x16_t) -> u16 {
    const BITS: [u8; 16] = [
        0b0000_0001,
        0b0000_0010,
        0b0000_0100,
        0b0000_1000,
        0b0001_0000,
        0b0010_0000,
        0b0100_0000,
        0b1000_0000,
        0b0000_0001,
        0b0000_0010,
        0b0000_0100,
        0b0000_1000,
        0b0001_0000,
        0b0010_0000,
        0b0100_0000,
        0b1000_0000,
    ];

    // Loading the array is used instead of transmuting it into a `uint8x16_t`
    // The alignment of an array is less strict
    let bits = vandq_u8(a, vld1q_u8(BITS.as_ptr()));

    let lo = vaddv_u8(vget_low_u8(bits)) as u16;
    let hi = vaddv_u8(vget_high_u8(bits)) as u16;

    lo | (hi << 8)
}
