//! Schema validation and reshaping of item payloads.
//!
//! The definition's field list is authoritative: output always follows its
//! order, and labels the schema does not declare are dropped.

use std::collections::HashMap;

use crudbase_core::{AppError, AppResult};

use crate::crud::FieldSpec;
use crate::item::{FieldValue, ItemField, ProposedField};

/// Validates `proposed` against `fields` and rebuilds it in canonical shape.
///
/// Returns one [`ItemField`] per [`FieldSpec`], in schema order. A required
/// field without a non-blank value fails with a validation error. When a
/// label is proposed more than once the last occurrence wins.
pub fn validate_and_shape(
    fields: &[FieldSpec],
    proposed: &[ProposedField],
) -> AppResult<Vec<ItemField>> {
    let proposed_by_label = index_by_label(proposed);

    fields
        .iter()
        .map(|spec| {
            let value = proposed_by_label
                .get(spec.label())
                .and_then(|proposed| proposed.value())
                .cloned();
            ensure_required(spec.label(), spec.required(), value.as_ref())?;

            Ok(ItemField::from_spec(spec, value))
        })
        .collect()
}

/// Merges `updates` into `existing` by label.
///
/// Matched fields take the supplied value and the metadata of the current
/// schema entry with the same label, then are re-checked for required-ness.
/// Unmatched existing fields pass through unchanged and updates for labels the
/// item does not carry are ignored.
pub fn merge_item_fields(
    fields: &[FieldSpec],
    existing: &[ItemField],
    updates: &[ProposedField],
) -> AppResult<Vec<ItemField>> {
    let updates_by_label = index_by_label(updates);
    let specs_by_label: HashMap<&str, &FieldSpec> =
        fields.iter().map(|spec| (spec.label(), spec)).collect();

    existing
        .iter()
        .map(|field| {
            let Some(update) = updates_by_label.get(field.label()) else {
                return Ok(field.clone());
            };
            let value = update.value().cloned();

            match specs_by_label.get(field.label()) {
                Some(spec) => {
                    ensure_required(spec.label(), spec.required(), value.as_ref())?;
                    Ok(ItemField::from_spec(spec, value))
                }
                None => {
                    ensure_required(field.label(), field.required(), value.as_ref())?;
                    Ok(field.with_value(value))
                }
            }
        })
        .collect()
}

fn index_by_label(proposed: &[ProposedField]) -> HashMap<&str, &ProposedField> {
    proposed
        .iter()
        .map(|field| (field.label(), field))
        .collect()
}

fn ensure_required(label: &str, required: bool, value: Option<&FieldValue>) -> AppResult<()> {
    if required && value.is_none_or(FieldValue::is_blank) {
        return Err(AppError::Validation(format!("field {label} is required")));
    }

    Ok(())
}

#[cfg(test)]
mod tests;
