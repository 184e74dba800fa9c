//! # Display Formatting
//!
//! Functions for formatting chain hashes and addresses for display:
//! - [`format_hash`] - Format a hash with ellipsis (first N and last M characters)
//! - [`truncate_hash`] - Leading slice of a hash, as shown in status messages
//!
//! ## Usage
//!
//! ```rust
//! use lib_utils::format::format_hash;
//!
//! let hash = "0x9b2f8c0e51f9d4a7c3b6e8d0a2f4c6e8b0d2f4a6c8e0b2d4f6a8c0e2b4d6f8a0";
//! assert_eq!(format_hash(hash, 6, 4), "0x9b2f...f8a0");
//! ```

/// Format a hash or address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the value is shorter than `prefix_len + suffix_len`, it is returned as-is.
pub fn format_hash(hash: &str, prefix_len: usize, suffix_len: usize) -> String {
    let len = hash.len();

    // Return early if the value is too short to truncate meaningfully.
    // Hex hashes and SS58 addresses are ASCII-only, so byte slicing is safe.
    if len <= prefix_len + suffix_len || prefix_len >= len || suffix_len >= len {
        return hash.to_string();
    }

    let prefix = &hash[..prefix_len];
    let suffix = &hash[len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Leading slice of a hash followed by an ellipsis, e.g. `0x9b2f8c0e...`.
///
/// Matches the block-hash form used in transaction status messages.
pub fn truncate_hash(hash: &str) -> String {
    if hash.len() <= 10 {
        return hash.to_string();
    }
    format!("{}...", &hash[..10])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hash() {
        let hash = "0x9b2f8c0e51f9d4a7c3b6e8d0a2f4c6e8b0d2f4a6c8e0b2d4f6a8c0e2b4d6f8a0";
        assert_eq!(format_hash(hash, 6, 4), "0x9b2f...f8a0");
        assert_eq!(format_hash(hash, 4, 4), "0x9b...f8a0");
    }

    #[test]
    fn test_format_hash_short() {
        assert_eq!(format_hash("0x12", 6, 4), "0x12");
        assert_eq!(format_hash("", 6, 4), "");
    }

    #[test]
    fn test_truncate_hash() {
        let hash = "0x9b2f8c0e51f9d4a7c3b6e8d0a2f4c6e8b0d2f4a6c8e0b2d4f6a8c0e2b4d6f8a0";
        assert_eq!(truncate_hash(hash), "0x9b2f8c0e...");
        assert_eq!(truncate_hash("0x12"), "0x12");
    }
}
