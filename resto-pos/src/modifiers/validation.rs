use shared::order::SelectedModifier;

use crate::catalog::{ModifierGroup, Product};
use crate::error::SelectionError;

/// Required-group completeness check before commit
///
/// Fails on the first required group (in `groups` order) holding fewer than
/// `min_select` selections. Pure.
pub fn validate(
    product: &Product,
    groups: &[&ModifierGroup],
    selections: &[SelectedModifier],
) -> Result<(), SelectionError> {
    for group in groups.iter().filter(|g| g.required) {
        let selected = selections.iter().filter(|m| m.group_id == group.id).count() as u32;
        let required = group.min_select;
        if selected < required {
            tracing::debug!(
                product_id = %product.id,
                group_id = %group.id,
                required,
                selected,
                "Required modifier group incomplete"
            );
            return Err(SelectionError::MissingRequiredSelection {
                group_id: group.id.clone(),
                group_name: group.name.clone(),
                required,
                selected,
            });
        }
    }
    Ok(())
}
