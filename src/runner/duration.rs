//! # Go Duration Module / Go 时长模块
//!
//! A value type for the `timeout` field of the argument file. It accepts the
//! grammar of Go's `time.ParseDuration` and renders values the way Go's
//! `Duration.String()` does, so the `-timeout=` flag handed to `go test`
//! reads exactly like one a Go user would write.
//!
//! `timeout` 字段的值类型。它接受 Go `time.ParseDuration` 的语法，
//! 并以 Go `Duration.String()` 的方式渲染，使传给 `go test` 的
//! `-timeout=` 标志与 Go 用户手写的一致。

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Unit suffixes and their length in nanoseconds.
/// Both the micro sign (U+00B5) and the Greek mu (U+03BC) are accepted.
const UNITS: &[(&str, u64)] = &[
    ("ns", 1),
    ("us", NANOS_PER_MICRO),
    ("\u{b5}s", NANOS_PER_MICRO),
    ("\u{3bc}s", NANOS_PER_MICRO),
    ("ms", NANOS_PER_MILLI),
    ("s", NANOS_PER_SECOND),
    ("m", 60 * NANOS_PER_SECOND),
    ("h", 3_600 * NANOS_PER_SECOND),
];

/// Errors produced by [`GoDuration::parse`]. The messages match Go's.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("time: invalid duration {0:?}")]
    Invalid(String),
    #[error("time: missing unit in duration {0:?}")]
    MissingUnit(String),
    #[error("time: unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },
}

/// A signed span of time in nanoseconds, as understood by the Go toolchain.
/// 以纳秒表示的有符号时长，与 Go 工具链的理解一致。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GoDuration(i64);

impl GoDuration {
    pub const ZERO: GoDuration = GoDuration(0);

    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Parses a duration string such as `"300ms"`, `"-1.5h"` or `"2h45m"`.
    ///
    /// A duration is an optional sign followed by one or more decimal numbers,
    /// each with an optional fraction and a mandatory unit suffix.
    ///
    /// 解析诸如 `"300ms"`、`"-1.5h"` 或 `"2h45m"` 的时长字符串。
    pub fn parse(input: &str) -> Result<Self, DurationError> {
        let invalid = || DurationError::Invalid(input.to_string());

        let mut s = input;
        let mut negative = false;
        if let Some(rest) = s.strip_prefix('-') {
            negative = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('+') {
            s = rest;
        }

        if s == "0" {
            return Ok(Self::ZERO);
        }
        if s.is_empty() {
            return Err(invalid());
        }

        let mut total: u64 = 0;
        while !s.is_empty() {
            if !s.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
                return Err(invalid());
            }

            let int_len = leading_digits(s);
            let whole = parse_whole(&s[..int_len]).ok_or_else(invalid)?;
            s = &s[int_len..];

            let mut fraction: u64 = 0;
            let mut scale: u64 = 1;
            let mut frac_len = 0;
            if let Some(rest) = s.strip_prefix('.') {
                frac_len = leading_digits(rest);
                (fraction, scale) = parse_fraction(&rest[..frac_len]);
                s = &rest[frac_len..];
            }
            // "." or ".s" carry no digits at all
            if int_len == 0 && frac_len == 0 {
                return Err(invalid());
            }

            let unit_len = s
                .find(|c: char| c == '.' || c.is_ascii_digit())
                .unwrap_or(s.len());
            if unit_len == 0 {
                return Err(DurationError::MissingUnit(input.to_string()));
            }
            let (unit, rest) = s.split_at(unit_len);
            s = rest;

            let multiplier = UNITS
                .iter()
                .find(|(name, _)| *name == unit)
                .map(|(_, nanos)| *nanos)
                .ok_or_else(|| DurationError::UnknownUnit {
                    unit: unit.to_string(),
                    input: input.to_string(),
                })?;

            let mut value = whole.checked_mul(multiplier).ok_or_else(invalid)?;
            if fraction > 0 {
                let extra = u128::from(fraction) * u128::from(multiplier) / u128::from(scale);
                let extra = u64::try_from(extra).map_err(|_| invalid())?;
                value = value.checked_add(extra).ok_or_else(invalid)?;
            }

            total = total.checked_add(value).ok_or_else(invalid)?;
            if total > i64::MIN.unsigned_abs() {
                return Err(invalid());
            }
        }

        // -2^63 is representable, +2^63 is not
        if negative {
            return Ok(Self(0i64.wrapping_sub_unsigned(total)));
        }
        let nanos = i64::try_from(total).map_err(|_| invalid())?;
        Ok(Self(nanos))
    }
}

fn leading_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

fn parse_whole(digits: &str) -> Option<u64> {
    digits.bytes().try_fold(0u64, |acc, b| {
        acc.checked_mul(10)?.checked_add(u64::from(b - b'0'))
    })
}

/// Accumulates fraction digits into `(value, scale)`.
/// Digits past the point where either would overflow are dropped.
fn parse_fraction(digits: &str) -> (u64, u64) {
    let mut value: u64 = 0;
    let mut scale: u64 = 1;
    for b in digits.bytes() {
        let next_value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')));
        match (next_value, scale.checked_mul(10)) {
            (Some(v), Some(sc)) => {
                value = v;
                scale = sc;
            }
            _ => break,
        }
    }
    (value, scale)
}

/// Splits `v` into its integer part and a `.ddd` fraction of `prec` digits,
/// trailing zeros trimmed. The fraction is empty when it is zero.
fn split_fraction(v: u64, prec: u32) -> (u64, String) {
    let scale = 10u64.pow(prec);
    let frac = v % scale;
    if frac == 0 {
        return (v / scale, String::new());
    }
    let digits = format!("{frac:0width$}", width = prec as usize);
    (v / scale, format!(".{}", digits.trim_end_matches('0')))
}

impl fmt::Display for GoDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nanos = self.0.unsigned_abs();
        if nanos == 0 {
            return f.write_str("0s");
        }
        if self.0 < 0 {
            f.write_str("-")?;
        }

        // Below one second Go switches to the largest fitting sub-second unit.
        if nanos < NANOS_PER_SECOND {
            let (prec, unit) = if nanos < NANOS_PER_MICRO {
                (0, "ns")
            } else if nanos < NANOS_PER_MILLI {
                (3, "\u{b5}s")
            } else {
                (6, "ms")
            };
            let (whole, frac) = split_fraction(nanos, prec);
            return write!(f, "{whole}{frac}{unit}");
        }

        let (total_secs, frac) = split_fraction(nanos, 9);
        let minutes = total_secs / 60;
        let hours = minutes / 60;
        if hours > 0 {
            write!(f, "{hours}h")?;
        }
        if minutes > 0 {
            write!(f, "{}m", minutes % 60)?;
        }
        write!(f, "{}{frac}s", total_secs % 60)
    }
}

impl FromStr for GoDuration {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Decodes a quoted duration string. `null` and `""` both mean "no timeout".
impl<'de> Deserialize<'de> for GoDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(Self::ZERO),
            Some(s) if s.is_empty() => Ok(Self::ZERO),
            Some(s) => Self::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}
