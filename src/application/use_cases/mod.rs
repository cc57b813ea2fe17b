/// Use cases module containing application business logic orchestration
mod clone_entity;
mod delete_entities;
mod export_entities;
mod get_entity;
mod list_entities;
mod manage_session;
mod selection_filter;


pub use clone_entity::CloneEntityUseCase;
pub use delete_entities::DeleteEntitiesUseCase;
pub use export_entities::ExportEntitiesUseCase;
pub use get_entity::GetEntityUseCase;
pub use list_entities::ListEntitiesUseCase;
pub use manage_session::ManageSessionUseCase;
