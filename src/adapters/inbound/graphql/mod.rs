//! GraphQL schema: per-kind query/mutation groups merged into the roots.

mod context;
mod entities;
mod session;
mod types;

pub use context::RequestContext;

use async_graphql::{EmptySubscription, MergedObject, Schema};
use entities::*;
use session::{SessionMutation, SessionQuery};

#[derive(Default, MergedObject)]
pub struct QueryRoot(
    SessionQuery,
    AlertQuery,
    AuditQuery,
    CredentialQuery,
    FilterQuery,
    HostQuery,
    NoteQuery,
    NvtQuery,
    OverrideQuery,
    PermissionQuery,
    PolicyQuery,
    PortListQuery,
    ReportQuery,
    ResultQuery,
    RoleQuery,
    ScannerQuery,
    ScheduleQuery,
    TagQuery,
    TargetQuery,
    TaskQuery,
    TicketQuery,
    TlsCertificateQuery,
    UserQuery,
    VulnerabilityQuery,
);

#[derive(Default, MergedObject)]
pub struct MutationRoot(
    SessionMutation,
    AlertMutation,
    AuditMutation,
    CredentialMutation,
    FilterMutation,
    HostMutation,
    NoteMutation,
    OverrideMutation,
    PermissionMutation,
    PolicyMutation,
    PortListMutation,
    ReportMutation,
    RoleMutation,
    ScannerMutation,
    ScheduleMutation,
    TagMutation,
    TargetMutation,
    TaskMutation,
    TicketMutation,
    TlsCertificateMutation,
    UserMutation,
);

pub type HyperionSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the schema once at startup; it is shared read-only afterwards.
pub fn build_schema() -> HyperionSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription).finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_exposes_every_kind() {
        let sdl = build_schema().sdl();

        for field in [
            "tasks(", "audits(", "nvts(", "vulnerabilities(", "tlsCertificates(", "policies(",
            "currentUser", "gmpVersion",
        ] {
            assert!(sdl.contains(field), "missing query field {}", field);
        }
        for field in [
            "deleteTasksByIds(", "exportAuditsByFilter(", "cloneTask(", "login(", "logout",
            "renewSession",
        ] {
            assert!(sdl.contains(field), "missing mutation field {}", field);
        }
    }

    #[test]
    fn test_read_only_kinds_have_no_mutations() {
        let sdl = build_schema().sdl();
        assert!(!sdl.contains("deleteNvtsByIds"));
        assert!(!sdl.contains("deleteResultsByIds"));
        assert!(!sdl.contains("exportVulnerabilitiesByFilter"));
        assert!(!sdl.contains("cloneReport"));
    }
}
