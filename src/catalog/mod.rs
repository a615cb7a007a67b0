//! Pure operations over a plant collection.
//!
//! Every mutation takes the collection by value and hands back the new one,
//! leaving persistence to the caller. A refused operation consumes the input,
//! so callers that must keep their state on failure pass a clone.

mod error;
mod validate;

use std::collections::HashSet;

pub use error::CatalogError;
pub use validate::{find_duplicate, parse_price, validate, validate_fields};

use crate::models::{Collection, Plant, PlantForm};

/// Next sequential id: one past the highest id in use, or 1 when empty.
pub fn next_id(plants: &[Plant]) -> Result<u64, CatalogError> {
    match plants.iter().map(|p| p.id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or(CatalogError::IdsExhausted),
    }
}

/// Validates the form and appends it as a new record.
pub fn add(mut plants: Collection, form: &PlantForm) -> Result<Collection, CatalogError> {
    validate(&plants, form, None)?;

    let plant = Plant::from_form(next_id(&plants)?, form);
    plants.push(plant);
    Ok(plants)
}

/// Validates the form and merges it into the record at `index`.
///
/// The record being edited is excluded from the duplicate check.
pub fn update(
    mut plants: Collection,
    index: usize,
    form: &PlantForm,
) -> Result<Collection, CatalogError> {
    if index >= plants.len() {
        return Err(CatalogError::RowOutOfRange(index));
    }
    validate(&plants, form, Some(index))?;

    plants[index].merge_form(form);
    Ok(plants)
}

/// Removes the record at `index`, returning the new collection and the
/// removed record.
pub fn delete(mut plants: Collection, index: usize) -> Result<(Collection, Plant), CatalogError> {
    if index >= plants.len() {
        return Err(CatalogError::RowOutOfRange(index));
    }
    let removed = plants.remove(index);
    Ok((plants, removed))
}

/// Keeps the first record for each `(common, botanical)` pair and renumbers
/// the survivors from 1.
///
/// Returns the collection and how many records were dropped. When nothing
/// was dropped the collection comes back untouched, ids included.
pub fn deduplicate(plants: Collection) -> (Collection, usize) {
    let before = plants.len();
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(before);

    for plant in plants.iter() {
        if seen.insert(plant.identity_key()) {
            unique.push(plant);
        } else {
            tracing::debug!(
                "Removed duplicate plant: {} ({})",
                plant.common,
                plant.botanical
            );
        }
    }

    let removed = before - unique.len();
    if removed == 0 {
        return (plants, 0);
    }

    let renumbered = unique
        .into_iter()
        .zip(1..)
        .map(|(plant, id)| Plant {
            id,
            ..plant.clone()
        })
        .collect();
    (renumbered, removed)
}

/// Distinct zone values in the collection, sorted.
pub fn distinct_zones(plants: &[Plant]) -> Vec<String> {
    let mut zones: Vec<String> = plants
        .iter()
        .map(|p| p.zone.clone())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    zones.sort();
    zones
}
