/// Data Transfer Objects for application layer
///
/// DTOs carry resolver arguments into the use cases and their outcomes
/// back out, keeping GraphQL types out of the core.
mod bulk_delete_response;
mod list_request;
mod selection;

pub use bulk_delete_response::BulkDeleteResponse;
pub use list_request::ListRequest;
pub use selection::Selection;
