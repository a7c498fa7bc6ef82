//! Stable 32-bit string hash
//!
//! Shaders compare hashed string literals against values the host computes
//! at runtime, so this hash must never change between releases.

/// Hash `bytes` the way `getStringHash` literals are hashed
///
/// Each byte is sign-extended before mixing.
pub fn compute_string_hash(bytes: &[u8]) -> i32 {
    let mut hash: u32 = 0;
    for &byte in bytes {
        let c = byte as i8 as i32 as u32;
        hash = c
            .wrapping_add(hash << 6)
            .wrapping_add(hash << 16)
            .wrapping_sub(hash);
    }
    hash as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_hashes_to_zero() {
        assert_eq!(compute_string_hash(b""), 0);
    }

    #[test]
    fn test_single_byte() {
        assert_eq!(compute_string_hash(b"a"), 97);
    }

    #[test]
    fn test_two_bytes() {
        // 98 + (97 << 6) + (97 << 16) - 97
        assert_eq!(compute_string_hash(b"ab"), 98 + 6208 + 6_356_992 - 97);
    }

    #[test]
    fn test_high_bytes_are_sign_extended() {
        assert_eq!(compute_string_hash(&[0xFF]), -1);
    }

    #[test]
    fn test_stable_across_calls() {
        let a = compute_string_hash(b"albedoTexture");
        let b = compute_string_hash(b"albedoTexture");
        assert_eq!(a, b);
        assert_ne!(a, compute_string_hash(b"normalTexture"));
    }
}
