//! Content digests for identifier derivation
//!
//! The hash identifier policy names remote objects by an MD5 digest of the
//! manifest row's content. MD5 is used as a fast 128-bit content fingerprint,
//! not for any security property.

use md5::{Digest, Md5};

/// Compute the hex MD5 digest of a byte slice
pub fn md5_hex(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Compute the hex MD5 digest of a sequence of string parts
///
/// Parts are fed to the hasher in iteration order, so the digest is
/// equivalent to hashing their concatenation. Order matters.
pub fn md5_hex_parts<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let mut hasher = Md5::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    hex::encode(hasher.finalize())
}
