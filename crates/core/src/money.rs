//! Monetary input validation.
//!
//! Form fields arrive as raw text and may use either `1,234.56` or
//! `1.234,56` conventions. [`parse_amount`] normalizes both into a
//! [`Decimal`]; anything else is rejected with a fixed message.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{DomainError, DomainResult};

/// Fixed rejection message for non-monetary input.
pub const INVALID_AMOUNT: &str = "price is not a valid monetary amount";

/// Declarative description of the monetary check for a view layer that wants
/// to mirror it client-side.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ClientRule {
    pub attribute: &'static str,
    pub message: &'static str,
}

pub const CURRENCY_RULE: ClientRule = ClientRule {
    attribute: "data-val-currency",
    message: INVALID_AMOUNT,
};

/// Parse a culturally-formatted monetary value.
///
/// Accepted: plain integers and decimals (`10`, `10.50`), a single comma as
/// decimal separator (`10,50`), and grouped forms in either convention
/// (`1,234.56`, `1.234,56`, `1.234.567`). Group widths after the first must
/// be exactly three digits.
pub fn parse_amount(raw: &str) -> DomainResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(INVALID_AMOUNT));
    }

    let normalized = normalize(trimmed).ok_or_else(|| DomainError::validation(INVALID_AMOUNT))?;
    Decimal::from_str(&normalized).map_err(|_| DomainError::validation(INVALID_AMOUNT))
}

/// Rewrite `raw` into `Decimal`-parseable form (`.` decimal separator, no
/// grouping). Returns `None` when the separator layout is not a valid
/// monetary shape.
fn normalize(raw: &str) -> Option<String> {
    let (sign, digits) = match raw.strip_prefix(['-', '+']) {
        Some(rest) => (&raw[..1], rest),
        None => ("", raw),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return None;
    }

    let commas = digits.matches(',').count();
    let dots = digits.matches('.').count();

    let normalized = match (commas, dots) {
        (0, 0) => digits.to_string(),
        (0, 1) => decimal_form(digits, '.')?,
        (1, 0) => decimal_form(digits, ',')?,
        // Both present: the later separator is the decimal point.
        (_, _) if commas > 0 && dots > 0 => {
            let (decimal_sep, group_sep) =
                if digits.rfind(',') > digits.rfind('.') { (',', '.') } else { ('.', ',') };
            let (int_part, frac_part) = digits.rsplit_once(decimal_sep)?;
            if int_part.contains(decimal_sep) || frac_part.contains(group_sep) || frac_part.is_empty() {
                return None;
            }
            format!("{}.{}", strip_groups(int_part, group_sep)?, frac_part)
        }
        // A lone separator kind repeated: grouping only.
        (_, 0) => strip_groups(digits, ',')?,
        (0, _) => strip_groups(digits, '.')?,
        _ => return None,
    };

    Some(format!("{sign}{normalized}"))
}

/// A single separator used as the decimal point; both sides must be digits.
fn decimal_form(s: &str, sep: char) -> Option<String> {
    let (int_part, frac_part) = s.split_once(sep)?;
    if int_part.is_empty() || frac_part.is_empty() {
        return None;
    }
    Some(format!("{int_part}.{frac_part}"))
}

/// Remove grouping separators, insisting that every group after the first is
/// exactly three digits (so `12,34,56` does not sneak through as `123456`).
fn strip_groups(s: &str, sep: char) -> Option<String> {
    let mut parts = s.split(sep);
    let head = parts.next()?;
    if head.is_empty() || head.len() > 3 {
        return None;
    }
    let mut out = String::from(head);
    for group in parts {
        if group.len() != 3 || !group.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        out.push_str(group);
    }
    Some(out)
}
