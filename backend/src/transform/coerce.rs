//! Field coercion.
//!
//! Turns loosely typed cell values into the canonical candidate fields, or a
//! precise [`IngestError`] naming the offending value.
//!
//! | Field        | Accepts                                                   |
//! |--------------|-----------------------------------------------------------|
//! | seniority    | `junior`, `senior` (any case, surrounding spaces ignored) |
//! | years        | numbers, numeric text, decimal comma (`"2,5"`), blank = 0 |
//! | availability | booleans, numbers (non-zero = true), yes/no vocabulary    |

use once_cell::sync::Lazy;
use std::collections::HashSet;

use super::columns::ResolvedAttributes;
use crate::error::{IngestError, IngestResult};
use crate::models::{CoercedFields, Seniority};
use crate::parser::CellValue;

/// Spellings read as `true` (after trim + lowercase).
static TRUE_WORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["true", "yes", "1", "si", "sí", "y", "on"]));

/// Spellings read as `false` (after trim + lowercase).
static FALSE_WORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["false", "no", "0", "n", "off"]));

/// Coerce all three fields, stopping at the first failure.
///
/// Order is seniority, years, availability. Any field that was never
/// resolved fails the whole call with [`IngestError::MissingColumns`] before
/// a single coercer runs.
pub fn coerce_fields(attributes: &ResolvedAttributes) -> IngestResult<CoercedFields> {
    let (Some(seniority), Some(years), Some(availability)) = (
        attributes.seniority.as_ref(),
        attributes.years.as_ref(),
        attributes.availability.as_ref(),
    ) else {
        return Err(IngestError::MissingColumns {
            missing: attributes.missing(),
        });
    };

    Ok(CoercedFields {
        seniority: coerce_seniority(seniority)?,
        years: coerce_years(years)?,
        availability: coerce_availability(availability)?,
    })
}

/// `junior` or `senior`, case-insensitive.
pub fn coerce_seniority(raw: &CellValue) -> IngestResult<Seniority> {
    let label = raw.to_text().trim().to_lowercase();
    Seniority::from_normalized(&label).ok_or_else(|| IngestError::invalid_seniority(raw))
}

/// Non-negative finite number; text may use a decimal comma.
///
/// An empty cell or whitespace-only text reads as `0`.
pub fn coerce_years(raw: &CellValue) -> IngestResult<f64> {
    let years = match raw {
        CellValue::Number(n) => *n,
        other => {
            let text = other.to_text();
            let text = text.trim();
            if text.is_empty() {
                0.0
            } else {
                text.replacen(',', ".", 1)
                    .parse::<f64>()
                    .map_err(|_| IngestError::invalid_years(raw))?
            }
        }
    };

    if !years.is_finite() {
        return Err(IngestError::invalid_years(raw));
    }
    if years < 0.0 {
        return Err(IngestError::NegativeYears { value: years });
    }
    // -0 becomes 0
    Ok(years + 0.0)
}

/// Boolean-like value.
///
/// An empty cell (or whitespace-only text) is read as `false` rather than
/// rejected: a blank availability column means "not available".
pub fn coerce_availability(raw: &CellValue) -> IngestResult<bool> {
    match raw {
        CellValue::Bool(b) => Ok(*b),
        CellValue::Number(n) => Ok(*n != 0.0),
        CellValue::Empty => Ok(false),
        CellValue::Text(s) => {
            let word = s.trim().to_lowercase();
            if TRUE_WORDS.contains(word.as_str()) {
                Ok(true)
            } else if FALSE_WORDS.contains(word.as_str()) || word.is_empty() {
                Ok(false)
            } else {
                Err(IngestError::invalid_availability(raw))
            }
        }
    }
}
