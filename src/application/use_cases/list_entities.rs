use crate::application::dto::ListRequest;
use crate::entity_mediation::domain::{EntityPage, FilterString};
use crate::entity_mediation::services::{EntityMapper, PageWindow};
use crate::ports::outbound::GmpClient;
use crate::shared::Result;

/// ListEntitiesUseCase - one Relay connection field
///
/// Translates the page window into `first=`/`rows=` filter keywords, issues
/// exactly one list command and places the result back in the window.
pub struct ListEntitiesUseCase<'a, C: GmpClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: GmpClient + ?Sized> ListEntitiesUseCase<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn execute(&self, request: ListRequest) -> Result<EntityPage> {
        let window = PageWindow::from_arguments(&request.page)?;

        let mut filter = FilterString::parse(request.filter_string.as_deref().unwrap_or_default());
        if !request.sort_by.is_empty() {
            filter.set_sort_orders(&request.sort_by);
        }
        window.apply(&mut filter);

        let filter = filter.to_string();
        tracing::debug!(kind = %request.kind, filter = %filter, "Listing entities");

        let response = self
            .client
            .get_entities(request.kind, &filter, false)
            .await?;
        let listing = EntityMapper::listing_from_response(request.kind, &response.root);
        Ok(window.place(listing))
    }
}
