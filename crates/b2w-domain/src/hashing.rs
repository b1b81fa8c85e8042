use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};

/// SHA-256 of `data`, base64url-encoded without `=` padding.
///
/// This is the digest form wheel `RECORD` files carry after `sha256=`.
#[must_use]
pub fn record_digest(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    URL_SAFE_NO_PAD.encode(digest)
}

/// Lowercase hex SHA-256 of `data`, for human-facing summaries.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
