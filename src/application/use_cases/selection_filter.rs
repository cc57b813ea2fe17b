use crate::application::dto::Selection;
use crate::entity_mediation::domain::EntityKind;
use crate::entity_mediation::policies::{SelectionFilterPolicy, SelectionPurpose};
use crate::shared::error::HyperionError;
use crate::shared::Result;

/// Filter string that makes the kind's list command return the selection.
pub(super) fn selection_filter(
    kind: EntityKind,
    selection: &Selection,
    purpose: SelectionPurpose,
) -> Result<String> {
    if !kind.supports_bulk_actions() {
        return Err(HyperionError::invalid_input(format!(
            "Bulk actions are not available for {}",
            kind
        ))
        .into());
    }

    Ok(match selection {
        Selection::Ids(ids) => SelectionFilterPolicy::filter_for_ids(kind, ids, purpose),
        Selection::Filter(filter) => filter.clone(),
    })
}
