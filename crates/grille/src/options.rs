/// Name of the metadata sheet when none is configured.
pub const DEFAULT_META_SHEET: &str = "meta";

/// What to do when two records of a `hash` sheet share an `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateIdPolicy {
    /// The later record replaces the earlier one, keeping the earlier
    /// key position.
    #[default]
    LastWins,
    /// Fail with `GrilleError::DuplicateId`.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrilleOptions {
    pub meta_sheet: String,
    pub duplicate_ids: DuplicateIdPolicy,
}

impl Default for GrilleOptions {
    fn default() -> Self {
        Self {
            meta_sheet: DEFAULT_META_SHEET.to_string(),
            duplicate_ids: DuplicateIdPolicy::default(),
        }
    }
}

impl GrilleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn meta_sheet(mut self, name: impl Into<String>) -> Self {
        self.meta_sheet = name.into();
        self
    }

    pub fn duplicate_ids(mut self, policy: DuplicateIdPolicy) -> Self {
        self.duplicate_ids = policy;
        self
    }
}
