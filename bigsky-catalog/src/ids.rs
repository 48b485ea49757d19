//! Identifier normalization for Tycho (TYC) and Hipparcos (HIP) designations.
//!
//! Tycho designations arrive as space-separated, zero-padded fields
//! (`"4901 00455 1"`) and leave as `"4901-455-1"`. Hipparcos numbers may carry
//! a CCDM component suffix (`"39825C"`) naming one member of a multiple system.

use crate::{CatalogError, CatalogResult};
use once_cell::sync::Lazy;
use regex::Regex;

static SUFFIXED_HIP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+)\s*([A-Za-z]+)").expect("HIP suffix pattern is valid")
});

/// A Hipparcos number and its component suffix (empty when there is none).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HipId {
    pub number: u32,
    pub component: String,
}

pub fn normalize_secondary_id(raw: &str) -> CatalogResult<HipId> {
    let trimmed = raw.trim();
    if let Ok(number) = trimmed.parse::<u32>() {
        return Ok(HipId {
            number,
            component: String::new(),
        });
    }

    let caps = SUFFIXED_HIP
        .captures(trimmed)
        .ok_or_else(|| CatalogError::identifier_format(raw, "expected digits with an optional letter suffix"))?;
    let number = caps[1]
        .parse::<u32>()
        .map_err(|e| CatalogError::identifier_format(raw, e.to_string()))?;

    Ok(HipId {
        number,
        component: caps[2].to_string(),
    })
}

pub fn normalize_primary_id(raw: &str) -> CatalogResult<String> {
    let parts = raw
        .split(' ')
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u32>()
                .map(|n| n.to_string())
                .map_err(|_| CatalogError::identifier_format(raw, format!("non-numeric field '{}'", part)))
        })
        .collect::<CatalogResult<Vec<_>>>()?;

    if parts.is_empty() {
        return Err(CatalogError::identifier_format(raw, "empty designation"));
    }
    Ok(parts.join("-"))
}
