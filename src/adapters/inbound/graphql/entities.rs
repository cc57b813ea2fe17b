//! Per-kind query and mutation groups.
//!
//! Every entity kind contributes one query object (`<kind>(id)` and the
//! `<kinds>` connection) and, when bulk actions apply, one mutation object.
//! The groups are merged into the root types in `mod.rs`.

use super::context::RequestContext;
use super::types::{
    ClonePayload, DeleteByFilterPayload, DeleteByIdsPayload, EntityConnection, EntityObject,
    ExportPayload, SortInput,
};
use crate::application::dto::{ListRequest, Selection};
use crate::application::use_cases::{
    CloneEntityUseCase, DeleteEntitiesUseCase, ExportEntitiesUseCase, GetEntityUseCase,
    ListEntitiesUseCase,
};
use crate::entity_mediation::domain::EntityKind;
use crate::entity_mediation::services::PageArguments;
use async_graphql::{Context, Object, Result};

async fn get_entity(ctx: &Context<'_>, kind: EntityKind, id: String) -> Result<EntityObject> {
    let gmp = ctx.data::<RequestContext>()?.gmp().await?;
    let entity = GetEntityUseCase::new(gmp).execute(kind, &id).await?;
    Ok(entity.into())
}

async fn list_entities(ctx: &Context<'_>, request: ListRequest) -> Result<EntityConnection> {
    let gmp = ctx.data::<RequestContext>()?.gmp().await?;
    let page = ListEntitiesUseCase::new(gmp).execute(request).await?;
    Ok(page.into())
}

async fn delete_entities(ctx: &Context<'_>, kind: EntityKind, selection: Selection) -> Result<bool> {
    let gmp = ctx.data::<RequestContext>()?.gmp().await?;
    let outcome = DeleteEntitiesUseCase::new(gmp).execute(kind, selection).await?;
    Ok(outcome.ok())
}

async fn export_entities(
    ctx: &Context<'_>,
    kind: EntityKind,
    selection: Selection,
) -> Result<ExportPayload> {
    let gmp = ctx.data::<RequestContext>()?.gmp().await?;
    let exported_entities = ExportEntitiesUseCase::new(gmp).execute(kind, selection).await?;
    Ok(ExportPayload { exported_entities })
}

async fn clone_entity(ctx: &Context<'_>, kind: EntityKind, id: String) -> Result<ClonePayload> {
    let gmp = ctx.data::<RequestContext>()?.gmp().await?;
    let id = CloneEntityUseCase::new(gmp).execute(kind, &id).await?;
    Ok(ClonePayload { id })
}

macro_rules! entity_query {
    ($query:ident, $kind:expr, $single:tt, $plural:tt) => {
        #[derive(Default)]
        pub struct $query;

        #[Object]
        impl $query {
            #[graphql(name = $single)]
            async fn entity(&self, ctx: &Context<'_>, id: String) -> Result<EntityObject> {
                get_entity(ctx, $kind, id).await
            }

            #[allow(clippy::too_many_arguments)]
            #[graphql(name = $plural)]
            async fn entities(
                &self,
                ctx: &Context<'_>,
                filter_string: Option<String>,
                first: Option<i32>,
                after: Option<String>,
                last: Option<i32>,
                before: Option<String>,
                sort_by: Option<Vec<SortInput>>,
            ) -> Result<EntityConnection> {
                let request = ListRequest {
                    kind: $kind,
                    filter_string,
                    page: PageArguments {
                        first,
                        after,
                        last,
                        before,
                    },
                    sort_by: sort_by
                        .unwrap_or_default()
                        .into_iter()
                        .map(Into::into)
                        .collect(),
                };
                list_entities(ctx, request).await
            }
        }
    };
}

macro_rules! entity_mutation {
    (
        $mutation:ident, $kind:expr,
        $delete_ids:tt, $delete_filter:tt, $export_ids:tt, $export_filter:tt
        $(, clone: $clone:tt)?
    ) => {
        #[derive(Default)]
        pub struct $mutation;

        #[Object]
        impl $mutation {
            #[graphql(name = $delete_ids)]
            async fn delete_by_ids(
                &self,
                ctx: &Context<'_>,
                ids: Vec<String>,
            ) -> Result<DeleteByIdsPayload> {
                let ok = delete_entities(ctx, $kind, Selection::Ids(ids)).await?;
                Ok(DeleteByIdsPayload { ok })
            }

            #[graphql(name = $delete_filter)]
            async fn delete_by_filter(
                &self,
                ctx: &Context<'_>,
                filter_string: String,
            ) -> Result<DeleteByFilterPayload> {
                let ok = delete_entities(ctx, $kind, Selection::Filter(filter_string)).await?;
                Ok(DeleteByFilterPayload { ok })
            }

            #[graphql(name = $export_ids)]
            async fn export_by_ids(&self, ctx: &Context<'_>, ids: Vec<String>) -> Result<ExportPayload> {
                export_entities(ctx, $kind, Selection::Ids(ids)).await
            }

            #[graphql(name = $export_filter)]
            async fn export_by_filter(
                &self,
                ctx: &Context<'_>,
                filter_string: String,
            ) -> Result<ExportPayload> {
                export_entities(ctx, $kind, Selection::Filter(filter_string)).await
            }

            $(
                #[graphql(name = $clone)]
                async fn clone_entity(&self, ctx: &Context<'_>, id: String) -> Result<ClonePayload> {
                    clone_entity(ctx, $kind, id).await
                }
            )?
        }
    };
}

entity_query!(AlertQuery, EntityKind::Alert, "alert", "alerts");
entity_query!(AuditQuery, EntityKind::Audit, "audit", "audits");
entity_query!(CredentialQuery, EntityKind::Credential, "credential", "credentials");
entity_query!(FilterQuery, EntityKind::Filter, "filter", "filters");
entity_query!(HostQuery, EntityKind::Host, "host", "hosts");
entity_query!(NoteQuery, EntityKind::Note, "note", "notes");
entity_query!(NvtQuery, EntityKind::Nvt, "nvt", "nvts");
entity_query!(OverrideQuery, EntityKind::Override, "override", "overrides");
entity_query!(PermissionQuery, EntityKind::Permission, "permission", "permissions");
entity_query!(PolicyQuery, EntityKind::Policy, "policy", "policies");
entity_query!(PortListQuery, EntityKind::PortList, "portList", "portLists");
entity_query!(ReportQuery, EntityKind::Report, "report", "reports");
entity_query!(ResultQuery, EntityKind::Result, "result", "results");
entity_query!(RoleQuery, EntityKind::Role, "role", "roles");
entity_query!(ScannerQuery, EntityKind::Scanner, "scanner", "scanners");
entity_query!(ScheduleQuery, EntityKind::Schedule, "schedule", "schedules");
entity_query!(TagQuery, EntityKind::Tag, "tag", "tags");
entity_query!(TargetQuery, EntityKind::Target, "target", "targets");
entity_query!(TaskQuery, EntityKind::Task, "task", "tasks");
entity_query!(TicketQuery, EntityKind::Ticket, "ticket", "tickets");
entity_query!(TlsCertificateQuery, EntityKind::TlsCertificate, "tlsCertificate", "tlsCertificates");
entity_query!(UserQuery, EntityKind::User, "user", "users");
entity_query!(VulnerabilityQuery, EntityKind::Vulnerability, "vulnerability", "vulnerabilities");

entity_mutation!(
    AlertMutation, EntityKind::Alert,
    "deleteAlertsByIds", "deleteAlertsByFilter", "exportAlertsByIds", "exportAlertsByFilter",
    clone: "cloneAlert"
);
entity_mutation!(
    AuditMutation, EntityKind::Audit,
    "deleteAuditsByIds", "deleteAuditsByFilter", "exportAuditsByIds", "exportAuditsByFilter",
    clone: "cloneAudit"
);
entity_mutation!(
    CredentialMutation, EntityKind::Credential,
    "deleteCredentialsByIds", "deleteCredentialsByFilter",
    "exportCredentialsByIds", "exportCredentialsByFilter"
);
entity_mutation!(
    FilterMutation, EntityKind::Filter,
    "deleteFiltersByIds", "deleteFiltersByFilter", "exportFiltersByIds", "exportFiltersByFilter",
    clone: "cloneFilter"
);
entity_mutation!(
    HostMutation, EntityKind::Host,
    "deleteHostsByIds", "deleteHostsByFilter", "exportHostsByIds", "exportHostsByFilter"
);
entity_mutation!(
    NoteMutation, EntityKind::Note,
    "deleteNotesByIds", "deleteNotesByFilter", "exportNotesByIds", "exportNotesByFilter",
    clone: "cloneNote"
);
entity_mutation!(
    OverrideMutation, EntityKind::Override,
    "deleteOverridesByIds", "deleteOverridesByFilter",
    "exportOverridesByIds", "exportOverridesByFilter",
    clone: "cloneOverride"
);
entity_mutation!(
    PermissionMutation, EntityKind::Permission,
    "deletePermissionsByIds", "deletePermissionsByFilter",
    "exportPermissionsByIds", "exportPermissionsByFilter",
    clone: "clonePermission"
);
entity_mutation!(
    PolicyMutation, EntityKind::Policy,
    "deletePoliciesByIds", "deletePoliciesByFilter",
    "exportPoliciesByIds", "exportPoliciesByFilter",
    clone: "clonePolicy"
);
entity_mutation!(
    PortListMutation, EntityKind::PortList,
    "deletePortListsByIds", "deletePortListsByFilter",
    "exportPortListsByIds", "exportPortListsByFilter"
);
entity_mutation!(
    ReportMutation, EntityKind::Report,
    "deleteReportsByIds", "deleteReportsByFilter", "exportReportsByIds", "exportReportsByFilter"
);
entity_mutation!(
    RoleMutation, EntityKind::Role,
    "deleteRolesByIds", "deleteRolesByFilter", "exportRolesByIds", "exportRolesByFilter",
    clone: "cloneRole"
);
entity_mutation!(
    ScannerMutation, EntityKind::Scanner,
    "deleteScannersByIds", "deleteScannersByFilter",
    "exportScannersByIds", "exportScannersByFilter",
    clone: "cloneScanner"
);
entity_mutation!(
    ScheduleMutation, EntityKind::Schedule,
    "deleteSchedulesByIds", "deleteSchedulesByFilter",
    "exportSchedulesByIds", "exportSchedulesByFilter",
    clone: "cloneSchedule"
);
entity_mutation!(
    TagMutation, EntityKind::Tag,
    "deleteTagsByIds", "deleteTagsByFilter", "exportTagsByIds", "exportTagsByFilter",
    clone: "cloneTag"
);
entity_mutation!(
    TargetMutation, EntityKind::Target,
    "deleteTargetsByIds", "deleteTargetsByFilter", "exportTargetsByIds", "exportTargetsByFilter",
    clone: "cloneTarget"
);
entity_mutation!(
    TaskMutation, EntityKind::Task,
    "deleteTasksByIds", "deleteTasksByFilter", "exportTasksByIds", "exportTasksByFilter",
    clone: "cloneTask"
);
entity_mutation!(
    TicketMutation, EntityKind::Ticket,
    "deleteTicketsByIds", "deleteTicketsByFilter", "exportTicketsByIds", "exportTicketsByFilter",
    clone: "cloneTicket"
);
entity_mutation!(
    TlsCertificateMutation, EntityKind::TlsCertificate,
    "deleteTlsCertificatesByIds", "deleteTlsCertificatesByFilter",
    "exportTlsCertificatesByIds", "exportTlsCertificatesByFilter"
);
entity_mutation!(
    UserMutation, EntityKind::User,
    "deleteUsersByIds", "deleteUsersByFilter", "exportUsersByIds", "exportUsersByFilter",
    clone: "cloneUser"
);
