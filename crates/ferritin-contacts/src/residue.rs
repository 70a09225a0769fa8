//! Canonical residue tokens.
//!
//! A residue token is an uppercase residue code followed by a residue number, e.g. `HIS51`.
//! Fragments are matched after dropping every non-alphanumeric character, so `his-51`,
//! `His 51` and `HIS51` all map to the same token.

use std::fmt;

/// Residue-code length tiers tried in order: three-letter (or longer) amino-acid codes,
/// then one- to three-letter codes.
const CODE_TIERS: [(usize, usize); 2] = [(3, usize::MAX), (1, 3)];

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResidueToken(String);

impl ResidueToken {
    /// Canonicalize `fragment`, or `None` when it does not start with a code-number run.
    ///
    /// Characters after the first run of digits are ignored: `HIS51A` gives `HIS51`.
    pub fn normalize(fragment: &str) -> Option<Self> {
        let cleaned = strip_punctuation(fragment);
        CODE_TIERS
            .iter()
            .find_map(|&(min, max)| leading_code_number(&cleaned, min, max))
    }

    /// Like [`normalize`](Self::normalize), but only when the whole fragment is consumed.
    pub fn complete(fragment: &str) -> Option<Self> {
        let cleaned = strip_punctuation(fragment);
        Self::normalize(&cleaned).filter(|token| token.0.len() == cleaned.len())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResidueToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResidueToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn strip_punctuation(fragment: &str) -> String {
    fragment
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

fn leading_code_number(s: &str, min_code: usize, max_code: usize) -> Option<ResidueToken> {
    let code_len = s.bytes().take_while(u8::is_ascii_alphabetic).count();
    if code_len < min_code || code_len > max_code {
        return None;
    }
    let number_len = s[code_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if number_len == 0 {
        return None;
    }
    let code = s[..code_len].to_ascii_uppercase();
    let number = &s[code_len..code_len + number_len];
    Some(ResidueToken(format!("{code}{number}")))
}
