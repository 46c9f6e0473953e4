use core::str::FromStr;
use serde::{Deserialize, Serialize};

use farmers_core::{DomainError, ValueObject};

/// Unit price in the smallest currency unit (cents).
///
/// Parsed from and rendered as dollar text (`"$0.75"`). Stored as an integer
/// so equal prices compare equal regardless of how they were written.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Price {
    cents: u64,
}

impl ValueObject for Price {}

impl Price {
    pub fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    pub fn cents(&self) -> u64 {
        self.cents
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl FromStr for Price {
    type Err = DomainError;

    /// Accepts `$1.25`, `1.25`, `$5`, `$5.3` (one fractional digit means tenths).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let body = raw.strip_prefix('$').unwrap_or(raw);

        let (whole, fraction) = match body.split_once('.') {
            Some((w, f)) => (w, Some(f)),
            None => (body, None),
        };

        let digits_only = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !digits_only(whole) {
            return Err(DomainError::invalid_price(s));
        }

        let dollars: u64 = whole.parse().map_err(|_| DomainError::invalid_price(s))?;
        let cents: u64 = match fraction {
            None => 0,
            Some(f) if digits_only(f) && f.len() <= 2 => {
                let value: u64 = f.parse().map_err(|_| DomainError::invalid_price(s))?;
                if f.len() == 1 { value * 10 } else { value }
            }
            Some(_) => return Err(DomainError::invalid_price(s)),
        };

        dollars
            .checked_mul(100)
            .and_then(|d| d.checked_add(cents))
            .map(Self::from_cents)
            .ok_or_else(|| DomainError::invalid_price(s))
    }
}

impl TryFrom<String> for Price {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Price> for String {
    fn from(value: Price) -> Self {
        value.to_string()
    }
}
