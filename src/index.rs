//! Bucket index function: character-code sum modulo capacity.
//!
//! The sum ignores character order, so anagrams ("listen", "silent") always
//! land in the same bucket. Chains absorb these collisions; callers that key
//! on permutations of the same characters should expect longer chains.

/// Map `key` to a bucket in `[0, capacity)`.
///
/// Sums the Unicode scalar value of every character (wrapping on overflow)
/// and reduces modulo `capacity`. `capacity` must be non-zero; tables never
/// hold a zero-length bucket array.
#[inline]
pub(crate) fn bucket_index(key: &str, capacity: usize) -> usize {
    debug_assert!(capacity > 0, "bucket array must be non-empty");
    let sum = key
        .chars()
        .fold(0usize, |acc, c| acc.wrapping_add(c as usize));
    sum % capacity
}
