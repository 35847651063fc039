//! Column label resolution.
//!
//! Maps free-form spreadsheet labels ("Years of experience", "AÑOS",
//! "years_of_experience", ...) onto the three canonical candidate fields.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::parser::{CellValue, KeyedRow};

/// Runs of whitespace, underscores, dots and hyphens are dropped from labels.
static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s._-]+").expect("Invalid separator pattern"));

/// Normalized alias -> (field, priority). Lower priority wins.
static ALIAS_TABLE: Lazy<HashMap<&'static str, (CanonicalField, usize)>> = Lazy::new(|| {
    CanonicalField::ALL
        .iter()
        .flat_map(|field| {
            field
                .aliases()
                .iter()
                .enumerate()
                .map(move |(rank, alias)| (*alias, (*field, rank)))
        })
        .collect()
});

// =============================================================================
// Canonical fields
// =============================================================================

/// The fixed set of spreadsheet fields a candidate needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalField {
    Seniority,
    Years,
    Availability,
}

impl CanonicalField {
    /// Fields in coercion order.
    pub const ALL: [CanonicalField; 3] = [Self::Seniority, Self::Years, Self::Availability];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seniority => "seniority",
            Self::Years => "years",
            Self::Availability => "availability",
        }
    }

    /// Accepted normalized labels, highest priority first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Seniority => &["seniority", "nivel", "categoria"],
            Self::Years => &[
                "yearsofexperience",
                "years",
                "experienceyears",
                "años",
                "añosdeexperiencia",
                "aniosdeexperiencia",
            ],
            Self::Availability => &["availability", "disponible", "disponibilidad"],
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a column label: trim, lowercase, drop separator runs.
///
/// ```ignore
/// assert_eq!(normalize_label(" Years of experience "), "yearsofexperience");
/// assert_eq!(normalize_label("years_of-experience"), "yearsofexperience");
/// ```
pub fn normalize_label(label: &str) -> String {
    let lowered = label.trim().to_lowercase();
    SEPARATORS.replace_all(&lowered, "").into_owned()
}

/// Canonical field a raw label refers to, if any.
pub fn field_for_label(label: &str) -> Option<CanonicalField> {
    ALIAS_TABLE
        .get(normalize_label(label).as_str())
        .map(|(field, _)| *field)
}

// =============================================================================
// Resolved attributes
// =============================================================================

/// Raw values located for each canonical field.
///
/// `None` means no column matched (the key was never resolved); a matched but
/// empty cell is `Some(CellValue::Empty)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedAttributes {
    pub seniority: Option<CellValue>,
    pub years: Option<CellValue>,
    pub availability: Option<CellValue>,
}

impl ResolvedAttributes {
    /// Assign the first three cells to seniority, years, availability.
    pub fn from_positional(cells: &[CellValue]) -> Self {
        Self {
            seniority: cells.first().cloned(),
            years: cells.get(1).cloned(),
            availability: cells.get(2).cloned(),
        }
    }

    pub fn get(&self, field: CanonicalField) -> Option<&CellValue> {
        match field {
            CanonicalField::Seniority => self.seniority.as_ref(),
            CanonicalField::Years => self.years.as_ref(),
            CanonicalField::Availability => self.availability.as_ref(),
        }
    }

    fn slot(&mut self, field: CanonicalField) -> &mut Option<CellValue> {
        match field {
            CanonicalField::Seniority => &mut self.seniority,
            CanonicalField::Years => &mut self.years,
            CanonicalField::Availability => &mut self.availability,
        }
    }

    /// True when at least one canonical field was located.
    pub fn has_any(&self) -> bool {
        CanonicalField::ALL.iter().any(|f| self.get(*f).is_some())
    }

    /// Canonical fields with no value, in coercion order.
    pub fn missing(&self) -> Vec<&'static str> {
        CanonicalField::ALL
            .iter()
            .filter(|f| self.get(**f).is_none())
            .map(CanonicalField::as_str)
            .collect()
    }
}

/// Resolve a header-keyed row onto the canonical fields.
///
/// Aliases are honoured in priority order (`yearsofexperience` beats `years`).
/// When two columns normalize to the same alias, the rightmost one wins.
pub fn resolve_row(row: &KeyedRow) -> ResolvedAttributes {
    let mut best: HashMap<CanonicalField, (usize, &CellValue)> = HashMap::new();

    for (label, value) in row.iter() {
        let Some((field, rank)) = ALIAS_TABLE.get(normalize_label(label).as_str()) else {
            continue;
        };
        let replace = best
            .get(field)
            .map_or(true, |(current, _)| *rank <= *current);
        if replace {
            best.insert(*field, (*rank, value));
        }
    }

    let mut resolved = ResolvedAttributes::default();
    for (field, (_, value)) in best {
        *resolved.slot(field) = Some(value.clone());
    }
    resolved
}
