use std::fmt;

/// How a kind encodes an empty id selection as a filter string.
///
/// gvmd treats both differently: a blank filter selects the user's default
/// page, `uuid= ` selects nothing. Which one a kind uses is part of its
/// observable behaviour and is kept per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyIdsEncoding {
    /// `''`
    Blank,
    /// `'uuid= '`
    UuidSentinel,
}

impl EmptyIdsEncoding {
    pub fn as_filter(self) -> &'static str {
        match self {
            EmptyIdsEncoding::Blank => "",
            EmptyIdsEncoding::UuidSentinel => "uuid= ",
        }
    }
}

/// Every GMP entity kind the GraphQL API serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
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

impl EntityKind {
    pub const ALL: [EntityKind; 23] = [
        EntityKind::Alert,
        EntityKind::Audit,
        EntityKind::Credential,
        EntityKind::Filter,
        EntityKind::Host,
        EntityKind::Note,
        EntityKind::Nvt,
        EntityKind::Override,
        EntityKind::Permission,
        EntityKind::Policy,
        EntityKind::PortList,
        EntityKind::Report,
        EntityKind::Result,
        EntityKind::Role,
        EntityKind::Scanner,
        EntityKind::Schedule,
        EntityKind::Tag,
        EntityKind::Target,
        EntityKind::Task,
        EntityKind::Ticket,
        EntityKind::TlsCertificate,
        EntityKind::User,
        EntityKind::Vulnerability,
    ];

    /// Element name of a single entity inside GMP responses.
    ///
    /// Audits are tasks, policies are scan configs, hosts are assets and
    /// NVTs are served through the generic `info` command.
    pub fn element(self) -> &'static str {
        match self {
            EntityKind::Alert => "alert",
            EntityKind::Audit | EntityKind::Task => "task",
            EntityKind::Credential => "credential",
            EntityKind::Filter => "filter",
            EntityKind::Host => "asset",
            EntityKind::Note => "note",
            EntityKind::Nvt => "info",
            EntityKind::Override => "override",
            EntityKind::Permission => "permission",
            EntityKind::Policy => "config",
            EntityKind::PortList => "port_list",
            EntityKind::Report => "report",
            EntityKind::Result => "result",
            EntityKind::Role => "role",
            EntityKind::Scanner => "scanner",
            EntityKind::Schedule => "schedule",
            EntityKind::Tag => "tag",
            EntityKind::Target => "target",
            EntityKind::Ticket => "ticket",
            EntityKind::TlsCertificate => "tls_certificate",
            EntityKind::User => "user",
            EntityKind::Vulnerability => "vuln",
        }
    }

    /// Plural used by the list command and by the `<plural start max>`
    /// pagination element of list responses.
    pub fn plural(self) -> String {
        match self {
            EntityKind::Nvt => "info".to_string(),
            _ => format!("{}s", self.element()),
        }
    }

    pub fn list_command(self) -> String {
        format!("get_{}", self.plural())
    }

    pub fn count_element(self) -> String {
        format!("{}_count", self.element())
    }

    pub fn id_attribute(self) -> String {
        format!("{}_id", self.element())
    }

    /// `None` for read-only kinds.
    pub fn delete_command(self) -> Option<String> {
        self.supports_bulk_actions()
            .then(|| format!("delete_{}", self.element()))
    }

    /// `None` for kinds gvmd cannot copy.
    pub fn create_command(self) -> Option<String> {
        self.is_clonable()
            .then(|| format!("create_{}", self.element()))
    }

    /// Attributes every get command for this kind carries.
    pub fn list_attributes(self) -> &'static [(&'static str, &'static str)] {
        match self {
            EntityKind::Audit => &[("usage_type", "audit")],
            EntityKind::Task => &[("usage_type", "scan")],
            EntityKind::Policy => &[("usage_type", "policy")],
            EntityKind::Host => &[("type", "host")],
            EntityKind::Nvt => &[("type", "nvt")],
            _ => &[],
        }
    }

    /// Delete and export mutations exist for these kinds.
    pub fn supports_bulk_actions(self) -> bool {
        !matches!(
            self,
            EntityKind::Nvt | EntityKind::Result | EntityKind::Vulnerability
        )
    }

    pub fn is_clonable(self) -> bool {
        matches!(
            self,
            EntityKind::Alert
                | EntityKind::Audit
                | EntityKind::Filter
                | EntityKind::Note
                | EntityKind::Override
                | EntityKind::Permission
                | EntityKind::Policy
                | EntityKind::Role
                | EntityKind::Scanner
                | EntityKind::Schedule
                | EntityKind::Tag
                | EntityKind::Target
                | EntityKind::Task
                | EntityKind::Ticket
                | EntityKind::User
        )
    }

    pub fn empty_ids_encoding(self) -> EmptyIdsEncoding {
        match self {
            EntityKind::Audit | EntityKind::Policy | EntityKind::Host => EmptyIdsEncoding::Blank,
            _ => EmptyIdsEncoding::UuidSentinel,
        }
    }

    /// Human readable name used in error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            EntityKind::Alert => "alert",
            EntityKind::Audit => "audit",
            EntityKind::Credential => "credential",
            EntityKind::Filter => "filter",
            EntityKind::Host => "host",
            EntityKind::Note => "note",
            EntityKind::Nvt => "NVT",
            EntityKind::Override => "override",
            EntityKind::Permission => "permission",
            EntityKind::Policy => "policy",
            EntityKind::PortList => "port list",
            EntityKind::Report => "report",
            EntityKind::Result => "result",
            EntityKind::Role => "role",
            EntityKind::Scanner => "scanner",
            EntityKind::Schedule => "schedule",
            EntityKind::Tag => "tag",
            EntityKind::Target => "target",
            EntityKind::Task => "task",
            EntityKind::Ticket => "ticket",
            EntityKind::TlsCertificate => "TLS certificate",
            EntityKind::User => "user",
            EntityKind::Vulnerability => "vulnerability",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
