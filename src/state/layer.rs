//! Layer visibility state.

/// Toggles for optional overlay layers. Agent layers are always drawn.
pub struct LayerState {
    /// Show bridge status markers and labels
    pub bridges: bool,

    /// Show areas of interest
    pub aois: bool,
}

impl Default for LayerState {
    fn default() -> Self {
        Self {
            bridges: true,
            aois: false,
        }
    }
}
