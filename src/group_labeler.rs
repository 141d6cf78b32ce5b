//! Deterministic coloring groups for graph nodes.
//!
//! The group id carries no graph meaning; the renderer only uses it to pick a
//! color. It must be stable across runs and independent of note order.

/// Number of coloring groups. Group ids are 1-indexed.
pub const GROUP_COUNT: u32 = 6;

/// Hash `text` into a group id in `[1, GROUP_COUNT]`.
///
/// Rolling hash over UTF-16 code units: `h = h * 31 + unit` with 32-bit
/// signed wraparound, folded by absolute value.
pub fn hash_to_group(text: &str) -> u32 {
    let mut h: i32 = 0;
    for unit in text.encode_utf16() {
        h = h.wrapping_mul(31).wrapping_add(i32::from(unit));
    }

    // unsigned_abs keeps i32::MIN representable
    h.unsigned_abs() % GROUP_COUNT + 1
}
