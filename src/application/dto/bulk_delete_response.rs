/// BulkDeleteResponse - outcome of a delete-by-ids or delete-by-filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkDeleteResponse {
    /// Number of ids asked for; `None` for filter selections
    pub requested: Option<usize>,
    /// Entities gvmd returned for the selection (all of them were deleted)
    pub deleted: usize,
}

impl BulkDeleteResponse {
    /// Ids selections succeed only when every id matched an entity.
    pub fn ok(&self) -> bool {
        match self.requested {
            Some(requested) => requested == self.deleted,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_id_match_is_not_ok() {
        let response = BulkDeleteResponse {
            requested: Some(3),
            deleted: 2,
        };
        assert!(!response.ok());
    }

    #[test]
    fn test_filter_selection_is_ok() {
        let response = BulkDeleteResponse {
            requested: None,
            deleted: 0,
        };
        assert!(response.ok());
    }
}
