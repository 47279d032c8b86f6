//! The account domain entity and its credential semantics.

use sha2::{Digest, Sha256};

/// The single distinguished login with elevated privileges. There is no
/// role column; privilege is keyed on this exact value.
pub const SUPERUSER_LOGIN: &str = "root";

/// Seconds a freshly set password is nominally valid for. Only feeds the
/// stored `expires` column; no code path ever checks it.
pub const DEFAULT_PASSWORD_TTL_SECS: i64 = 86_400;

/// One login identity as stored.
///
/// Invariant, enforced at creation and never revisited: the fingerprint is
/// absent if and only if `is_external_account` is true. No operation flips
/// the flag after the row exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i32,
    pub login: String,
    pub password_fingerprint: Option<String>,
    pub is_external_account: bool,
    /// Unix seconds; informational only.
    pub expires: i64,
}

/// One-way digest stored in place of the plaintext. Unsalted, single pass;
/// every stored fingerprint depends on this exact rendering.
#[must_use]
pub fn fingerprint(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

impl Account {
    /// Credential check. Never fails; a non-match is just `false`.
    ///
    /// Presenting no password matches exactly the accounts that store no
    /// fingerprint, which is how an external account's identity-only login
    /// is accepted. Any supplied password is compared by fingerprint and
    /// can never match an external account.
    #[must_use]
    pub fn password_matches(&self, supplied: Option<&str>) -> bool {
        match supplied {
            None => self.password_fingerprint.is_none(),
            Some(password) => {
                self.password_fingerprint.as_deref() == Some(fingerprint(password).as_str())
            }
        }
    }
}
