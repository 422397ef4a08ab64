//! Raw-bits to IEEE-754 reinterpretation

/// Reinterpret a 32-bit word as the single-precision float with the same bit
/// pattern. NaN payloads and infinities pass through untouched.
pub fn reinterpret_f32(word: u32) -> f32 {
    f32::from_bits(word)
}
