mod entity_mapper;
mod page_window;
mod response_status;

pub use entity_mapper::EntityMapper;
pub use page_window::{PageArguments, PageWindow};
pub use response_status::check_response;
