//! Remote identifier derivation
//!
//! Three policies name the remote object for a manifest row:
//!
//! - `explicit`: take the row's `identifier` column verbatim
//! - `hash`: MD5 over the row's values in column order, so identical rows
//!   map to identical identifiers across runs (idempotent re-runs)
//! - `random`: 30 alphanumeric characters of fresh entropy per row

use crate::error::{CliError, Result};
use crate::manifest::{Row, IDENTIFIER_COLUMN};
use arkup_common::digest;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of generated random identifiers.
///
/// 62^30 possible values; collisions are not detected, so the length must
/// carry the collision-resistance burden for unattended bulk runs.
pub const RANDOM_ID_LEN: usize = 30;

/// Identifier derivation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum IdPolicy {
    /// Use the row's `identifier` column verbatim
    Explicit,
    /// Derive a deterministic content hash from the row
    #[default]
    Hash,
    /// Generate a fresh random identifier
    Random,
}

/// Resolve the remote identifier for a row under the given policy
///
/// Pure function of its inputs (modulo entropy under `Random`).
pub fn resolve(row: &Row, policy: IdPolicy) -> Result<String> {
    match policy {
        IdPolicy::Explicit => row
            .get(IDENTIFIER_COLUMN)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
            .ok_or_else(|| CliError::MissingField(IDENTIFIER_COLUMN.to_string())),
        IdPolicy::Hash => Ok(digest::md5_hex_parts(row.values())),
        IdPolicy::Random => Ok(random_identifier(RANDOM_ID_LEN)),
    }
}

fn random_identifier(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        Row::new(
            pairs
                .iter()
                .map(|(c, v)| (c.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_explicit_policy() {
        let r = row(&[("file", "http://x/a.mp4"), ("identifier", "abc")]);
        assert_eq!(resolve(&r, IdPolicy::Explicit).unwrap(), "abc");
    }

    #[test]
    fn test_explicit_policy_missing_column() {
        let r = row(&[("file", "http://x/a.mp4")]);
        assert!(matches!(
            resolve(&r, IdPolicy::Explicit),
            Err(CliError::MissingField(_))
        ));
    }

    #[test]
    fn test_explicit_policy_empty_value() {
        let r = row(&[("file", "http://x/a.mp4"), ("identifier", "")]);
        assert!(matches!(
            resolve(&r, IdPolicy::Explicit),
            Err(CliError::MissingField(_))
        ));
    }

    #[test]
    fn test_hash_policy_deterministic() {
        let a = row(&[("file", "http://x/a.mp4"), ("title", "A Trip")]);
        let b = row(&[("file", "http://x/a.mp4"), ("title", "A Trip")]);
        assert_eq!(
            resolve(&a, IdPolicy::Hash).unwrap(),
            resolve(&b, IdPolicy::Hash).unwrap()
        );
    }

    #[test]
    fn test_hash_policy_distinct_content() {
        let a = row(&[("file", "http://x/a.mp4"), ("title", "A Trip")]);
        let b = row(&[("file", "http://x/b.mp4"), ("title", "A Trip")]);
        assert_ne!(
            resolve(&a, IdPolicy::Hash).unwrap(),
            resolve(&b, IdPolicy::Hash).unwrap()
        );
    }

    #[test]
    fn test_hash_policy_is_hex_digest() {
        let r = row(&[("file", "http://x/a.mp4")]);
        let id = resolve(&r, IdPolicy::Hash).unwrap();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_random_policy_shape() {
        let r = row(&[("file", "http://x/a.mp4")]);
        let id = resolve(&r, IdPolicy::Random).unwrap();
        assert_eq!(id.len(), RANDOM_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_random_policy_varies() {
        let r = row(&[("file", "http://x/a.mp4")]);
        let a = resolve(&r, IdPolicy::Random).unwrap();
        let b = resolve(&r, IdPolicy::Random).unwrap();
        assert_ne!(a, b);
    }
}
