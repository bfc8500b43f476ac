//! SHA-256 checksum of serialized documents, used to spot re-submissions.

use sha2::{Digest, Sha256};

/// Compute the hex SHA-256 checksum of a string
pub fn compute_checksum(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_is_stable_hex() {
        let a = compute_checksum("{\"AnalysisId\":\"a1\"}");
        let b = compute_checksum("{\"AnalysisId\":\"a1\"}");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert_ne!(a, compute_checksum("{\"AnalysisId\":\"a2\"}"));
    }
}
