/// Per-element intersection state.
///
/// `has_intersected` is a one-way latch: once an element has been seen it stays `true` for the
/// element's lifetime, however often `is_intersecting` toggles afterwards. Use it to activate
/// lazy content exactly once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibilityRecord {
    pub is_intersecting: bool,
    pub has_intersected: bool,
}

impl VisibilityRecord {
    /// Folds in the latest intersection result.
    pub fn apply(&mut self, is_intersecting: bool) {
        self.is_intersecting = is_intersecting;
        self.has_intersected |= is_intersecting;
    }
}
