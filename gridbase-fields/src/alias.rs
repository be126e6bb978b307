//! Identity-key aliasing for the attribute accessors.
//!
//! The three identity fields are reachable under several attribute names.
//! `get`/`set` consult this table first; only names that resolve to no
//! identity slot touch the generic attribute map, so identity keys can
//! never leak into it.

/// The identity slot an attribute name routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IdentityKey {
    App,
    Table,
    Fid,
}

impl IdentityKey {
    /// Resolve an attribute name against the alias table.
    ///
    /// Matching is case-sensitive and exact; `"FID"` or `"Id"` are ordinary
    /// attribute names.
    pub(crate) fn resolve(name: &str) -> Option<Self> {
        match name {
            "applicationId" | "appId" => Some(Self::App),
            "tableId" => Some(Self::Table),
            "fid" | "id" | "fieldId" => Some(Self::Fid),
            _ => None,
        }
    }
}
