use crate::entity_mediation::domain::{EmptyIdsEncoding, EntityKind};

/// What a resolved selection is about to be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPurpose {
    Delete,
    Export,
}

/// SelectionFilterPolicy turns an explicit id selection into the filter
/// string sent with the kind's list command.
///
/// Rules:
/// 1. Ids become `uuid=<id>` terms joined by single spaces, followed by
///    `rows=-1` so every requested id fits on one page.
/// 2. An empty selection is never answered locally. It is encoded with the
///    kind's empty-ids encoding when exporting, and always with the
///    `uuid= ` sentinel when deleting: a blank filter would select the
///    user's default page and delete it.
/// 3. Ids are not validated; gvmd reports malformed ones.
pub struct SelectionFilterPolicy;

impl SelectionFilterPolicy {
    pub fn filter_for_ids(kind: EntityKind, ids: &[String], purpose: SelectionPurpose) -> String {
        if ids.is_empty() {
            return Self::empty_selection_encoding(kind, purpose)
                .as_filter()
                .to_string();
        }

        let mut terms: Vec<String> = ids.iter().map(|id| format!("uuid={}", id)).collect();
        terms.push("rows=-1".to_string());
        terms.join(" ")
    }

    pub fn empty_selection_encoding(kind: EntityKind, purpose: SelectionPurpose) -> EmptyIdsEncoding {
        match purpose {
            SelectionPurpose::Delete => EmptyIdsEncoding::UuidSentinel,
            SelectionPurpose::Export => kind.empty_ids_encoding(),
        }
    }
}
