//! Port for static reference data.
//!
//! Flags and committee rosters are read-only lookups the core consults; it
//! never writes to them.

/// Read-only reference lookups.
pub trait ReferenceData: Send + Sync {
    /// Flag or thematic emoji for a delegation name.
    fn flag_for(&self, delegation: &str) -> Option<String>;

    /// Delegations seated on a preset committee.
    fn roster_for(&self, committee: &str) -> Option<Vec<String>>;

    /// Names of the preset committees.
    fn committees(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Reference source with no data, for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReferenceData;

impl ReferenceData for NoReferenceData {
    fn flag_for(&self, _delegation: &str) -> Option<String> {
        None
    }

    fn roster_for(&self, _committee: &str) -> Option<Vec<String>> {
        None
    }
}
