use crate::entity_mediation::domain::{EntityKind, SortOrder};
use crate::entity_mediation::services::PageArguments;

/// ListRequest - paginated listing of one entity kind
#[derive(Debug, Clone)]
pub struct ListRequest {
    pub kind: EntityKind,
    /// User filter; `None` means gvmd's default filter
    pub filter_string: Option<String>,
    pub page: PageArguments,
    /// Replaces any sort terms of the filter when non-empty
    pub sort_by: Vec<SortOrder>,
}

impl ListRequest {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            filter_string: None,
            page: PageArguments::default(),
            sort_by: Vec::new(),
        }
    }
}
