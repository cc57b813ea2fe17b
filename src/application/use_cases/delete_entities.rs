use super::selection_filter::selection_filter;
use crate::application::dto::{BulkDeleteResponse, Selection};
use crate::entity_mediation::domain::EntityKind;
use crate::entity_mediation::policies::SelectionPurpose;
use crate::entity_mediation::services::EntityMapper;
use crate::ports::outbound::GmpClient;
use crate::shared::Result;

/// DeleteEntitiesUseCase - resolves a selection and deletes what matched
///
/// Deletes run one at a time in response order. A failing delete aborts
/// the remaining ones; nothing already deleted is restored.
pub struct DeleteEntitiesUseCase<'a, C: GmpClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: GmpClient + ?Sized> DeleteEntitiesUseCase<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn execute(&self, kind: EntityKind, selection: Selection) -> Result<BulkDeleteResponse> {
        let filter = selection_filter(kind, &selection, SelectionPurpose::Delete)?;
        let response = self.client.get_entities(kind, &filter, false).await?;
        let ids = EntityMapper::entity_ids(kind, &response.root);

        for id in &ids {
            self.client.delete_entity(kind, id).await?;
        }

        let outcome = BulkDeleteResponse {
            requested: match &selection {
                Selection::Ids(requested) => Some(requested.len()),
                Selection::Filter(_) => None,
            },
            deleted: ids.len(),
        };

        if outcome.ok() {
            tracing::info!(kind = %kind, deleted = outcome.deleted, "Deleted entities");
        } else {
            tracing::warn!(
                kind = %kind,
                requested = ?outcome.requested,
                deleted = outcome.deleted,
                "Only part of the requested entities matched"
            );
        }
        Ok(outcome)
    }
}
