use super::GmpClient;
use crate::shared::Result;
use async_trait::async_trait;

/// GmpConnector port opening fresh, unauthenticated GMP connections
///
/// Each GraphQL request gets its own connection, authenticated with the
/// session's credentials and dropped when the request completes.
#[async_trait]
pub trait GmpConnector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn GmpClient>>;
}
