//! Hash related utils.

use hmac::Hmac;
use hmac::Mac;
use sha2::Sha256;

/// Upper-case hex encoded HMAC with SHA256 hash.
///
/// The output is always 64 characters of `0-9A-F`.
pub fn upper_hex_hmac_sha256(key: &[u8], content: &[u8]) -> String {
    // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
    let mut h = Hmac::<Sha256>::new_from_slice(key).unwrap();
    h.update(content);

    hex::encode_upper(h.finalize().into_bytes())
}
