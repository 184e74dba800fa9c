//! # Unit Conversion
//!
//! Exact conversion from a user-entered decimal amount to the chain's
//! minimal unit. The parse is pure integer arithmetic over the digit string;
//! no floating point is involved, so there is no rounding drift at the
//! minimal-unit boundary.
//!
//! Inputs with more fractional digits than the chain's decimal count are
//! rejected rather than silently truncated.

use lib_core::error::{AppError, Result};

/// Parse a decimal amount string into minimal units (`amount * 10^decimals`).
///
/// Accepted forms: `"12"`, `"12.5"`, `".5"`, `"12."`. Rejected: empty input,
/// signs, exponents, non-digit characters, more than `decimals` fractional
/// digits, and values that overflow `u128`.
///
/// # Example
///
/// ```rust
/// use lib_payment::units::parse_amount;
///
/// assert_eq!(parse_amount("0.1", 10).unwrap(), 1_000_000_000);
/// assert_eq!(parse_amount("1", 10).unwrap(), 10_000_000_000);
/// ```
pub fn parse_amount(amount: &str, decimals: u32) -> Result<u128> {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("Amount cannot be empty.".to_string()));
    }
    if trimmed.starts_with('-') {
        return Err(AppError::Validation(
            "Amount must be a positive number.".to_string(),
        ));
    }

    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (trimmed, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(AppError::Validation(
            "Amount must be a valid decimal number.".to_string(),
        ));
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(AppError::Validation(
            "Amount must be a valid decimal number.".to_string(),
        ));
    }
    if frac_part.len() > decimals as usize {
        return Err(AppError::Validation(format!(
            "Amount has more than {} decimal places.",
            decimals
        )));
    }

    let scale = 10u128
        .checked_pow(decimals)
        .ok_or_else(|| AppError::Validation("Unsupported decimal count.".to_string()))?;

    let int_value: u128 = if int_part.is_empty() {
        0
    } else {
        int_part
            .parse()
            .map_err(|_| AppError::Validation("Amount is too large.".to_string()))?
    };

    let frac_value: u128 = if frac_part.is_empty() {
        0
    } else {
        let parsed: u128 = frac_part
            .parse()
            .map_err(|_| AppError::Validation("Amount is too large.".to_string()))?;
        // Scale the fraction up to the full decimal width, e.g. "1" -> 10^9
        // tenths for a 10-decimal chain.
        parsed * 10u128.pow(decimals - frac_part.len() as u32)
    };

    int_value
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_value))
        .ok_or_else(|| AppError::Validation("Amount is too large.".to_string()))
}
