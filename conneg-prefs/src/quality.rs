//! Quality value codec (RFC 2616 Section 3.9).
//!
//! Quality values weight a preference between 0 (not acceptable) and 1
//! (most preferred). On the wire they carry at most two fractional digits
//! and always use `.` as the decimal separator.
//!
//! Rounding to two digits applies to the exact binary value of the `f32`.
//! Only exact ties round half-even; a literal such as `0.025` is stored
//! slightly above the tie and rounds up:
//!
//! | value     | stored as        | wire   |
//! |-----------|------------------|--------|
//! | `1.0`     | `1`              | `1`    |
//! | `0.5`     | `0.5`            | `0.5`  |
//! | `0.33333` | `0.33333000540…` | `0.33` |
//! | `0.125`   | `0.125`          | `0.12` |
//! | `0.375`   | `0.375`          | `0.38` |
//! | `0.015`   | `0.01499999966…` | `0.01` |
//! | `0.025`   | `0.02500000037…` | `0.03` |
//! | `0.995`   | `0.99500000476…` | `1`    |

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

/// The implicit quality of a preference that does not state one.
pub const QUALITY_MAX: f32 = 1.0;

/// The quality marking a value as not acceptable.
pub const QUALITY_MIN: f32 = 0.0;

const HUNDREDTHS: f64 = 100.0;

/// Returns true if `quality` is within `[0, 1]`. NaN is never a quality.
#[inline]
pub fn is_quality(quality: f32) -> bool {
    (QUALITY_MIN..=QUALITY_MAX).contains(&quality)
}

/// Appends the wire form of `quality` to `dst`.
///
/// # Errors
///
/// Returns [`Error::InvalidQuality`] if `quality` is outside `[0, 1]`, or
/// [`Error::Format`] if `dst` rejects the write.
pub fn format_quality<W: fmt::Write + ?Sized>(quality: f32, dst: &mut W) -> Result<()> {
    if !is_quality(quality) {
        return Err(Error::invalid_quality(quality));
    }

    match round_hundredths(quality) {
        0 => dst.write_str("0")?,
        100 => dst.write_str("1")?,
        x if x < 10 => write!(dst, "0.0{}", x)?,
        x if x % 10 == 0 => write!(dst, "0.{}", x / 10)?,
        x => write!(dst, "0.{}", x)?,
    }

    Ok(())
}

/// Parses quality text such as `0.8` or ` .5 `.
///
/// # Errors
///
/// Returns [`Error::InvalidQuality`] both for text that is not a number and
/// for numbers outside `[0, 1]`.
pub fn parse_quality(text: &str) -> Result<f32> {
    let trimmed = text.trim();
    match trimmed.parse::<f32>() {
        // abs() folds -0 into 0
        Ok(value) if is_quality(value) => Ok(value.abs()),
        _ => Err(Error::invalid_quality(trimmed)),
    }
}

/// Rounds a quality in `[0, 1]` to whole hundredths, ties to even.
fn round_hundredths(quality: f32) -> u8 {
    // Exact: an f32 mantissa times 100 fits in an f64 mantissa.
    let scaled = f64::from(quality.abs()) * HUNDREDTHS;
    let floor = scaled.floor();

    let rounded = match (scaled - floor).partial_cmp(&0.5) {
        Some(Ordering::Greater) => floor + 1.0,
        Some(Ordering::Equal) if floor % 2.0 != 0.0 => floor + 1.0,
        _ => floor,
    };

    // `quality` is at most 1, so `rounded` is in 0..=100.
    rounded as u8
}
