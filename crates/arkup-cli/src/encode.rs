//! Source URL re-encoding
//!
//! Manifests in the wild carry raw, unescaped paths (spaces, unicode,
//! brackets). Rows are normalized by parsing the URL and reassembling it
//! from scheme, authority, and the percent-encoded path, which tolerates
//! both raw and already-encoded inputs: `/`, `+`, and existing `%xx`
//! sequences are preserved, so the operation is idempotent.
//!
//! Query strings and fragments are dropped; the manifest contract is a
//! plain file URL.

use crate::error::{CliError, Result};
use url::Url;

/// Re-encode a row's source URL into a canonical fetchable form
pub fn encode_url(raw: &str) -> Result<String> {
    let parsed =
        Url::parse(raw).map_err(|e| CliError::invalid_url(raw, e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(CliError::invalid_url(
            raw,
            format!("unsupported scheme '{}'", parsed.scheme()),
        ));
    }

    let host = parsed
        .host_str()
        .ok_or_else(|| CliError::invalid_url(raw, "missing host"))?;

    let mut encoded = format!("{}://{}", parsed.scheme(), host);
    if let Some(port) = parsed.port() {
        encoded.push_str(&format!(":{}", port));
    }
    encoded.push_str(parsed.path());

    Ok(encoded)
}

/// The final path segment of an encoded URL, used for scratch-file naming
pub fn url_basename(encoded: &str) -> &str {
    encoded.rsplit('/').next().unwrap_or(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encodes_raw_spaces() {
        let encoded = encode_url("http://example.com/films/a trip.mp4").unwrap();
        assert_eq!(encoded, "http://example.com/films/a%20trip.mp4");
    }

    #[test]
    fn test_idempotent_on_encoded_input() {
        let once = encode_url("http://example.com/films/a trip.mp4").unwrap();
        let twice = encode_url(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_preserves_slash_and_plus() {
        let encoded = encode_url("http://example.com/a/b+c.mp4").unwrap();
        assert_eq!(encoded, "http://example.com/a/b+c.mp4");
    }

    #[test]
    fn test_preserves_port_and_drops_query() {
        let encoded = encode_url("http://example.com:8080/a.mp4?session=1#t=10").unwrap();
        assert_eq!(encoded, "http://example.com:8080/a.mp4");
    }

    #[test]
    fn test_rejects_unsupported_scheme() {
        assert!(matches!(
            encode_url("ftp://example.com/a.mp4"),
            Err(CliError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            encode_url("not a url"),
            Err(CliError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_url_basename() {
        assert_eq!(url_basename("http://example.com/a/b/c.mp4"), "c.mp4");
    }
}
