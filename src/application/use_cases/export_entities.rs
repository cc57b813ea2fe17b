use super::selection_filter::selection_filter;
use crate::application::dto::Selection;
use crate::entity_mediation::domain::EntityKind;
use crate::entity_mediation::policies::SelectionPurpose;
use crate::ports::outbound::GmpClient;
use crate::shared::Result;

/// ExportEntitiesUseCase - returns gvmd's detailed list response verbatim
pub struct ExportEntitiesUseCase<'a, C: GmpClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: GmpClient + ?Sized> ExportEntitiesUseCase<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn execute(&self, kind: EntityKind, selection: Selection) -> Result<String> {
        let filter = selection_filter(kind, &selection, SelectionPurpose::Export)?;
        let response = self.client.get_entities(kind, &filter, true).await?;
        Ok(response.raw)
    }
}
