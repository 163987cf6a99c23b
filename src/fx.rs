#![allow(dead_code)]

use core::fmt;
use std::cmp::Ordering;

/// Fixed-point scale: value × 10⁻⁸. Shared by prices and quantities.
pub const SCALE: i64 = 100_000_000;

/// Parse/format errors for decimal-string `Fx` values.
#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum FxParseError {
    #[error("empty decimal string")]
    Empty,
    #[error("malformed decimal string")]
    Malformed,
    #[error("value overflows i64 fixed-point range")]
    Overflow,
}

/// Signed fixed-point scalar, `i64` scaled by `SCALE`. Used for both prices
/// and quantities; all matching-core arithmetic on it is integer.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Fx {
    val: i64,
}

impl Fx {
    pub const ZERO: Fx = Fx { val: 0 };

    #[inline]
    pub const fn from_raw(val: i64) -> Self {
        Self { val }
    }

    #[inline]
    pub const fn raw(self) -> i64 {
        self.val
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.val == 0
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.val > 0
    }

    #[inline]
    pub fn add(self, other: Fx) -> Fx {
        Fx { val: self.val.checked_add(other.val).expect("Fx::add overflow") }
    }

    #[inline]
    pub fn sub(self, other: Fx) -> Fx {
        Fx { val: self.val.checked_sub(other.val).expect("Fx::sub overflow") }
    }

    #[inline]
    pub fn add_mut(&mut self, other: Fx) {
        self.val = self.val.checked_add(other.val).expect("Fx::add_mut overflow");
    }

    #[inline]
    pub fn sub_mut(&mut self, other: Fx) {
        self.val = self.val.checked_sub(other.val).expect("Fx::sub_mut overflow");
    }

    #[inline]
    pub fn set_zero(&mut self) {
        self.val = 0;
    }

    #[inline]
    pub fn neg(self) -> Fx {
        Fx { val: -self.val }
    }

    #[inline]
    pub fn min(self, other: Fx) -> Fx {
        if self.val <= other.val { self } else { other }
    }

    /// Lossy conversion; only to be used where the caller explicitly
    /// tolerates imprecision (never in matching decisions).
    #[inline]
    pub fn to_f64_lossy(self) -> f64 {
        self.val as f64 / SCALE as f64
    }

    /// Lossy conversion; only to be used where the caller explicitly
    /// tolerates imprecision (never in matching decisions).
    #[inline]
    pub fn from_f64_lossy(f: f64) -> Fx {
        Fx { val: (f * SCALE as f64).round() as i64 }
    }

    /// Parse a decimal string: optional leading `-`, integer part, up to 8
    /// fractional digits (truncated, not rounded, beyond that).
    pub fn parse(s: &str) -> Result<Fx, FxParseError> {
        if s.is_empty() {
            return Err(FxParseError::Empty);
        }

        let (neg, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if rest.is_empty() {
            return Err(FxParseError::Malformed);
        }

        let mut parts = rest.splitn(2, '.');
        let int_part = parts.next().unwrap();
        let frac_part = parts.next();

        if int_part.is_empty() && frac_part.is_none_or(str::is_empty) {
            return Err(FxParseError::Malformed);
        }
        if !int_part.is_empty() && !int_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FxParseError::Malformed);
        }

        let int_val: i64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| FxParseError::Overflow)?
        };

        let frac_val: i64 = match frac_part {
            None => 0,
            Some(f) => {
                if !f.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(FxParseError::Malformed);
                }
                let truncated = if f.len() > 8 { &f[..8] } else { f };
                let scaled = format!("{truncated:0<8}");
                scaled.parse().map_err(|_| FxParseError::Overflow)?
            }
        };

        let magnitude = int_val
            .checked_mul(SCALE)
            .and_then(|v| v.checked_add(frac_val))
            .ok_or(FxParseError::Overflow)?;

        Ok(Fx { val: if neg { -magnitude } else { magnitude } })
    }

    /// Format to the shortest exact decimal string (no trailing zeros, no
    /// trailing `.` when the value is a whole number).
    pub fn to_decimal_string(self) -> String {
        let neg = self.val < 0;
        let mag = self.val.unsigned_abs();
        let int_part = mag / (SCALE as u64);
        let frac_part = mag % (SCALE as u64);

        let mut s = String::new();
        if neg {
            s.push('-');
        }
        s.push_str(&int_part.to_string());

        if frac_part != 0 {
            let frac_str = format!("{frac_part:08}");
            let trimmed = frac_str.trim_end_matches('0');
            s.push('.');
            s.push_str(trimmed);
        }
        s
    }
}

impl fmt::Debug for Fx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fx({})", self.to_decimal_string())
    }
}

impl fmt::Display for Fx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal_string())
    }
}

impl Ord for Fx {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.val.cmp(&other.val)
    }
}

impl PartialOrd for Fx {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Default for Fx {
    fn default() -> Self {
        Fx::ZERO
    }
}
