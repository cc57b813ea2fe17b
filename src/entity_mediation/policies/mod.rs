mod selection_filter_policy;

pub use selection_filter_policy::{SelectionFilterPolicy, SelectionPurpose};
