/// Which entities a bulk action applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Explicit entity ids; an empty list still goes to gvmd
    Ids(Vec<String>),
    /// A gvmd filter string, passed through unchanged
    Filter(String),
}
