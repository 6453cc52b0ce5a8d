use shared::models::SelectionMode;
use shared::order::SelectedModifier;

use crate::catalog::{ModifierGroup, ModifierItem, Product};
use crate::error::SelectionError;

/// Result of a toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Item added
    Selected,
    /// Item removed
    Deselected,
    /// SINGLE group: the previous choice was swapped for this item
    Replaced { previous: String },
    /// Ignored, selection unchanged
    Rejected(RejectReason),
}

impl ToggleOutcome {
    pub fn changed(&self) -> bool {
        !matches!(self, ToggleOutcome::Rejected(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// MULTIPLE group already holds `max_select` items
    CapacityExceeded,
    /// Item is marked unavailable
    Unavailable,
    /// Item belongs to another group
    GroupMismatch,
}

/// In-progress modifier choices for one product
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierSelection {
    selected: Vec<SelectedModifier>,
}

impl ModifierSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle `item` of `group`
    ///
    /// SINGLE: any previous choice of the group is dropped; re-clicking the
    /// chosen item deselects it. MULTIPLE: a selected item is removed, an
    /// unselected one is added only while the group is below `max_select`.
    pub fn toggle(&mut self, group: &ModifierGroup, item: &ModifierItem) -> ToggleOutcome {
        if item.group_id != group.id {
            tracing::debug!(group_id = %group.id, item_id = %item.id, "Toggle ignored: item of another group");
            return ToggleOutcome::Rejected(RejectReason::GroupMismatch);
        }

        let already = self.is_selected(&item.id);

        match group.mode {
            SelectionMode::Single => {
                let previous = self
                    .selected
                    .iter()
                    .find(|m| m.group_id == group.id && m.id != item.id)
                    .map(|m| m.id.clone());

                if already {
                    self.selected.retain(|m| m.group_id != group.id);
                    return ToggleOutcome::Deselected;
                }
                if !item.available {
                    tracing::debug!(item_id = %item.id, "Toggle ignored: item unavailable");
                    return ToggleOutcome::Rejected(RejectReason::Unavailable);
                }
                self.selected.retain(|m| m.group_id != group.id);
                self.selected.push(snapshot(group, item));
                match previous {
                    Some(previous) => ToggleOutcome::Replaced { previous },
                    None => ToggleOutcome::Selected,
                }
            }
            SelectionMode::Multiple => {
                if already {
                    self.selected.retain(|m| m.id != item.id);
                    return ToggleOutcome::Deselected;
                }
                if !item.available {
                    tracing::debug!(item_id = %item.id, "Toggle ignored: item unavailable");
                    return ToggleOutcome::Rejected(RejectReason::Unavailable);
                }
                let count = self.count_in_group(&group.id);
                if count >= group.max_select as usize {
                    tracing::debug!(
                        group_id = %group.id,
                        count,
                        max_select = group.max_select,
                        "Toggle ignored: group is full"
                    );
                    return ToggleOutcome::Rejected(RejectReason::CapacityExceeded);
                }
                self.selected.push(snapshot(group, item));
                ToggleOutcome::Selected
            }
        }
    }

    pub fn is_selected(&self, item_id: &str) -> bool {
        self.selected.iter().any(|m| m.id == item_id)
    }

    pub fn count_in_group(&self, group_id: &str) -> usize {
        self.selected.iter().filter(|m| m.group_id == group_id).count()
    }

    /// Selections in toggle order
    pub fn selected(&self) -> &[SelectedModifier] {
        &self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Σ price adjustments
    pub fn modifier_total(&self) -> i64 {
        self.selected.iter().map(|m| m.price).sum()
    }

    /// Running unit price shown while choosing
    pub fn preview_price(&self, product: &Product) -> i64 {
        product.base_price + self.modifier_total()
    }

    /// Check required groups of `product`
    pub fn validate(
        &self,
        product: &Product,
        groups: &[&ModifierGroup],
    ) -> Result<(), SelectionError> {
        super::validate(product, groups, &self.selected)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn into_modifiers(self) -> Vec<SelectedModifier> {
        self.selected
    }
}

fn snapshot(group: &ModifierGroup, item: &ModifierItem) -> SelectedModifier {
    SelectedModifier {
        id: item.id.clone(),
        name: item.name.clone(),
        price: item.price_adjust,
        group_id: group.id.clone(),
        group_name: group.name.clone(),
    }
}
