use crate::entity_mediation::domain::cursor::offset_to_cursor;
use crate::entity_mediation::domain::{Entity, EntityPage, SortOrder};
use async_graphql::{Enum, InputObject, SimpleObject};
use chrono::{DateTime, Utc};

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[graphql(name = "EntityType", remote = "crate::entity_mediation::domain::EntityKind")]
pub enum EntityKindType {
    Alert,
    Audit,
    Credential,
    Filter,
    Host,
    Note,
    Nvt,
    Override,
    Permission,
    Policy,
    PortList,
    Report,
    Result,
    Role,
    Scanner,
    Schedule,
    Tag,
    Target,
    Task,
    Ticket,
    TlsCertificate,
    User,
    Vulnerability,
}

/// Fields shared by every GMP entity.
#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "Entity")]
pub struct EntityObject {
    pub id: String,
    pub name: Option<String>,
    pub comment: Option<String>,
    pub owner: Option<String>,
    pub creation_time: Option<DateTime<Utc>>,
    pub modification_time: Option<DateTime<Utc>>,
    pub writable: bool,
    pub in_use: bool,
    pub kind: EntityKindType,
}

impl From<Entity> for EntityObject {
    fn from(entity: Entity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            comment: entity.comment,
            owner: entity.owner,
            creation_time: entity.creation_time,
            modification_time: entity.modification_time,
            writable: entity.writable,
            in_use: entity.in_use,
            kind: entity.kind.into(),
        }
    }
}

#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "EntityEdge")]
pub struct EntityEdge {
    pub cursor: String,
    pub node: EntityObject,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
    /// Pass as `after` to fetch the final page
    pub last_page_cursor: Option<String>,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct Counts {
    pub total: i32,
    pub filtered: i32,
    pub offset: i32,
    pub limit: i32,
    pub length: i32,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct EntityConnection {
    pub nodes: Vec<EntityObject>,
    pub edges: Vec<EntityEdge>,
    pub page_info: PageInfo,
    pub counts: Counts,
}

impl From<EntityPage> for EntityConnection {
    fn from(page: EntityPage) -> Self {
        let counts = Counts {
            total: to_int(page.total),
            filtered: to_int(page.filtered),
            offset: to_int(page.offset),
            limit: to_int(page.limit),
            length: to_int(page.length()),
        };

        let edges: Vec<EntityEdge> = page
            .items
            .into_iter()
            .map(|(offset, entity)| EntityEdge {
                cursor: offset_to_cursor(offset),
                node: entity.into(),
            })
            .collect();

        Self {
            nodes: edges.iter().map(|edge| edge.node.clone()).collect(),
            page_info: PageInfo {
                has_next_page: page.has_next_page,
                has_previous_page: page.has_previous_page,
                start_cursor: edges.first().map(|edge| edge.cursor.clone()),
                end_cursor: edges.last().map(|edge| edge.cursor.clone()),
                last_page_cursor: page.last_page_after.map(offset_to_cursor),
            },
            edges,
            counts,
        }
    }
}

fn to_int(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(InputObject, Debug, Clone)]
pub struct SortInput {
    pub field: String,
    #[graphql(default)]
    pub direction: SortDirection,
}

impl From<SortInput> for SortOrder {
    fn from(input: SortInput) -> Self {
        match input.direction {
            SortDirection::Ascending => SortOrder::ascending(input.field),
            SortDirection::Descending => SortOrder::descending(input.field),
        }
    }
}

#[derive(SimpleObject, Debug, Clone)]
pub struct DeleteByIdsPayload {
    pub ok: bool,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct DeleteByFilterPayload {
    pub ok: bool,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct ExportPayload {
    /// gvmd's list response, unmodified
    pub exported_entities: String,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct ClonePayload {
    pub id: String,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct LoginPayload {
    pub ok: bool,
    pub timezone: Option<String>,
    pub session_timeout: DateTime<Utc>,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct LogoutPayload {
    pub ok: bool,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct RenewSessionPayload {
    pub timeout_time: DateTime<Utc>,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct CurrentUser {
    pub username: String,
    pub timezone: Option<String>,
    pub session_timeout: DateTime<Utc>,
}
