/// Mock implementations for testing
mod mock_gvmd;

#[allow(unused_imports)]
pub use mock_gvmd::{MockEntity, MockGvmd};
