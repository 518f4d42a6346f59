// Credential normalization
//
// Shelly devices store `ha1 = sha256("<user>:<realm>:<password>")` as lowercase
// hex. Callers may hand us either the cleartext password or an already
// hashed value; we must hash the former exactly once and never re-hash the
// latter.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Error;

/// Default (and only supported) account name on Gen2 devices.
pub const DEFAULT_USER: &str = "admin";

/// Length of a hex-encoded SHA-256 digest.
const DIGEST_HEX_LEN: usize = 64;

/// Non-hex secrets longer than this are assumed to be hashed already.
const CLEARTEXT_MAX_LEN: usize = 20;

/// Parameters of `Shelly.SetAuth`.
///
/// `ha1: None` disables authentication on the device, so the field is
/// always serialized (as `null` when absent).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthParams {
    pub user: Option<String>,
    pub realm: Option<String>,
    pub ha1: Option<String>,
}

impl AuthParams {
    /// Replace a cleartext `ha1` with its digest. Leaves empty or already
    /// hashed values untouched. Never touches the network.
    pub fn normalize(&mut self) -> Result<(), Error> {
        let Some(secret) = self.ha1.as_deref() else {
            return Ok(());
        };
        let normalized = normalize_secret(
            self.user.as_deref().unwrap_or_default(),
            self.realm.as_deref().unwrap_or_default(),
            secret,
        )?;
        self.ha1 = Some(normalized);
        Ok(())
    }
}

/// Whether `secret` already looks like a stored digest.
///
/// A 64-character hex string, in either case, is a digest. Hex strings of
/// any other length are cleartext: they cannot be a SHA-256 digest, and a
/// numeric PIN or short hex passphrase must still be hashed. A non-hex
/// string longer than 20 characters is treated as hashed, which means a
/// long cleartext password is sent as-is.
pub fn is_hashed(secret: &str) -> bool {
    let is_hex = !secret.is_empty() && secret.chars().all(|c| c.is_ascii_hexdigit());
    if is_hex {
        secret.len() == DIGEST_HEX_LEN
    } else {
        secret.chars().count() > CLEARTEXT_MAX_LEN
    }
}

/// Hex-encoded `sha256("<user>:<realm>:<secret>")`.
pub fn ha1(user: &str, realm: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(user.as_bytes());
    hasher.update(b":");
    hasher.update(realm.as_bytes());
    hasher.update(b":");
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Return the request-ready form of `secret`.
///
/// Empty and already hashed secrets pass through; a hex digest is
/// lowercased to match what `ha1` produces. Cleartext requires a
/// non-empty `user` and `realm`.
pub fn normalize_secret(user: &str, realm: &str, secret: &str) -> Result<String, Error> {
    if secret.is_empty() {
        return Ok(String::new());
    }
    if is_hashed(secret) {
        let is_digest =
            secret.len() == DIGEST_HEX_LEN && secret.chars().all(|c| c.is_ascii_hexdigit());
        return Ok(if is_digest {
            secret.to_ascii_lowercase()
        } else {
            secret.to_owned()
        });
    }
    if user.is_empty() {
        return Err(Error::validation("user", "user is required to hash the password"));
    }
    if realm.is_empty() {
        return Err(Error::validation("realm", "realm is required to hash the password"));
    }
    Ok(ha1(user, realm, secret))
}
