use crate::entity_mediation::domain::EntityKind;
use crate::ports::outbound::GmpClient;
use crate::shared::Result;

/// CloneEntityUseCase - copies one entity, returning the copy's id
pub struct CloneEntityUseCase<'a, C: GmpClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: GmpClient + ?Sized> CloneEntityUseCase<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn execute(&self, kind: EntityKind, id: &str) -> Result<String> {
        let copy_id = self.client.clone_entity(kind, id).await?;
        tracing::info!(kind = %kind, source = id, copy = %copy_id, "Cloned entity");
        Ok(copy_id)
    }
}
