//! Deterministic string hashing used to place keys into slots.

/// Maps `key` to a slot index in `[0, max)`.
///
/// Polynomial rolling hash over the key's UTF-16 code units:
/// `acc = acc * 31 + unit`, wrapping at 32 bits. Pure and stateless,
/// so for a given `max` the same key always lands on the same slot.
///
/// `max` must be positive; a table's limit never reaches zero.
pub fn index_below(key: &str, max: usize) -> usize {
    let mut acc: u32 = 0;
    for unit in key.encode_utf16() {
        acc = acc.wrapping_mul(31).wrapping_add(u32::from(unit));
    }
    acc as usize % max
}
