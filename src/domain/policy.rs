//! Password strength rules.

use serde::{Deserialize, Serialize};

/// The current rule set for new passwords. One row in storage, replaced
/// wholesale by the superuser; read fresh on every password-accepting
/// operation, so a change never touches already-stored fingerprints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    pub length: i32,
    pub numbers: bool,
    pub uppercase_letters: bool,
    pub lowercase_letters: bool,
    pub special_symbols: bool,
}

impl Default for PasswordPolicy {
    /// Permissive: no length floor, no required categories.
    fn default() -> Self {
        Self {
            length: 0,
            numbers: false,
            uppercase_letters: false,
            lowercase_letters: false,
            special_symbols: false,
        }
    }
}

impl PasswordPolicy {
    /// Whether `password` satisfies this policy.
    ///
    /// Every character lands in exactly one bucket, first predicate wins:
    /// digit, then uppercase, then lowercase, then anything else counts as
    /// special. Required categories must all be observed; categories the
    /// policy does not require impose nothing.
    #[must_use]
    pub fn allows(&self, password: &str) -> bool {
        if password.chars().count() < usize::try_from(self.length).unwrap_or(0) {
            return false;
        }

        let mut saw_digit = false;
        let mut saw_upper = false;
        let mut saw_lower = false;
        let mut saw_special = false;

        for c in password.chars() {
            if c.is_numeric() {
                saw_digit = true;
            } else if c.is_uppercase() {
                saw_upper = true;
            } else if c.is_lowercase() {
                saw_lower = true;
            } else {
                saw_special = true;
            }
        }

        (saw_digit || !self.numbers)
            && (saw_upper || !self.uppercase_letters)
            && (saw_lower || !self.lowercase_letters)
            && (saw_special || !self.special_symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict() -> PasswordPolicy {
        PasswordPolicy {
            length: 8,
            numbers: true,
            uppercase_letters: true,
            lowercase_letters: true,
            special_symbols: true,
        }
    }

    #[test]
    fn default_policy_accepts_anything() {
        let policy = PasswordPolicy::default();
        assert!(policy.allows(""));
        assert!(policy.allows("a"));
        assert!(policy.allows("correct horse battery staple"));
    }

    #[test]
    fn length_floor() {
        let policy = PasswordPolicy {
            length: 4,
            ..PasswordPolicy::default()
        };
        assert!(!policy.allows("abc"));
        assert!(policy.allows("abcd"));
    }

    #[test]
    fn strict_policy_requires_every_category() {
        let policy = strict();
        assert!(!policy.allows("a"));
        assert!(!policy.allows("alllowercase"));
        assert!(!policy.allows("NoDigits!"));
        assert!(!policy.allows("n0special1"));
        assert!(policy.allows("pa$$w0_rD"));
    }

    #[test]
    fn each_character_counts_for_one_bucket_only() {
        // Digits are consumed by the digit bucket and never reach the
        // special catch-all, so an all-digit password has no specials.
        let policy = PasswordPolicy {
            special_symbols: true,
            ..PasswordPolicy::default()
        };
        assert!(!policy.allows("12345678"));
        assert!(policy.allows("1234567!"));
    }

    #[test]
    fn caseless_letters_count_as_special() {
        // Han characters are neither upper nor lower nor digits.
        let policy = PasswordPolicy {
            special_symbols: true,
            ..PasswordPolicy::default()
        };
        assert!(policy.allows("密码"));
    }

    #[test]
    fn unicode_length_counts_chars_not_bytes() {
        let policy = PasswordPolicy {
            length: 2,
            ..PasswordPolicy::default()
        };
        assert!(policy.allows("密码"));
        assert!(!policy.allows("密"));
    }

    #[test]
    fn required_categories_ignore_length_zero() {
        let policy = PasswordPolicy {
            numbers: true,
            ..PasswordPolicy::default()
        };
        assert!(!policy.allows(""));
        assert!(policy.allows("7"));
    }
}
