use super::EntityKind;
use chrono::{DateTime, Utc};

/// Common fields every GMP entity carries.
///
/// Built from one response element and dropped after serialization; the
/// gateway never stores entities.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    pub id: String,
    pub name: Option<String>,
    pub comment: Option<String>,
    pub owner: Option<String>,
    pub creation_time: Option<DateTime<Utc>>,
    pub modification_time: Option<DateTime<Utc>>,
    pub writable: bool,
    pub in_use: bool,
}

impl Entity {
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            name: None,
            comment: None,
            owner: None,
            creation_time: None,
            modification_time: None,
            writable: false,
            in_use: false,
        }
    }
}

/// One page of entities as gvmd reported it.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityListing {
    pub entities: Vec<Entity>,
    /// 1-based index of the first returned row
    pub start: usize,
    /// Page size gvmd applied, when reported
    pub rows: Option<usize>,
    pub total: usize,
    pub filtered: usize,
}

/// A window of a listing with its Relay bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityPage {
    /// Entities paired with their 0-based offset in the filtered set
    pub items: Vec<(usize, Entity)>,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub total: usize,
    pub filtered: usize,
    /// Offset of the first row in the window
    pub offset: usize,
    /// Page size the window asked for
    pub limit: usize,
    /// Offset to pass as `after` to land on the final page
    pub last_page_after: Option<usize>,
}

impl EntityPage {
    pub fn length(&self) -> usize {
        self.items.len()
    }
}
