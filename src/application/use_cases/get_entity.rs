use crate::entity_mediation::domain::{Entity, EntityKind};
use crate::entity_mediation::services::EntityMapper;
use crate::ports::outbound::GmpClient;
use crate::shared::error::HyperionError;
use crate::shared::Result;

/// GetEntityUseCase - fetches a single entity by id
pub struct GetEntityUseCase<'a, C: GmpClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: GmpClient + ?Sized> GetEntityUseCase<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// # Errors
    /// `HyperionError::EntityNotFound` when gvmd answers 404 or returns no
    /// element for the id.
    pub async fn execute(&self, kind: EntityKind, id: &str) -> Result<Entity> {
        let not_found = || HyperionError::EntityNotFound {
            kind: kind.display_name().to_string(),
            id: id.to_string(),
        };

        let response = match self.client.get_entity(kind, id).await {
            Ok(response) => response,
            Err(e) => {
                return match e.downcast_ref::<HyperionError>() {
                    Some(HyperionError::GmpStatus { status: 404, .. }) => Err(not_found().into()),
                    _ => Err(e),
                }
            }
        };

        let entity = EntityMapper::entity_elements(kind, &response.root)
            .next()
            .map(|element| EntityMapper::entity_from_element(kind, element));
        entity.ok_or_else(|| not_found().into())
    }
}
