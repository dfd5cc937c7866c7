//! Loading flags per load mode.

/// Why a page is being loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum LoadMode {
    /// Initial load or reload after a query change; the table shows a mask.
    Search,
    /// Incremental load of a later page.
    Forward,
    /// Incremental load of an earlier page.
    Backward,
}

/// Count of in-flight loads per mode.
///
/// Counters rather than booleans, so overlapping loads in the same mode do
/// not clear each other's flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct LoadingFlags {
    search: usize,
    forward: usize,
    backward: usize,
}

impl LoadingFlags {
    pub(crate) fn raise(&mut self, mode: LoadMode) {
        *self.slot(mode) += 1;
    }

    pub(crate) fn lower(&mut self, mode: LoadMode) {
        let slot = self.slot(mode);
        *slot = slot.saturating_sub(1);
    }

    pub(crate) fn is_active(&self, mode: LoadMode) -> bool {
        match mode {
            LoadMode::Search => self.search > 0,
            LoadMode::Forward => self.forward > 0,
            LoadMode::Backward => self.backward > 0,
        }
    }

    fn slot(&mut self, mode: LoadMode) -> &mut usize {
        match mode {
            LoadMode::Search => &mut self.search,
            LoadMode::Forward => &mut self.forward,
            LoadMode::Backward => &mut self.backward,
        }
    }
}
