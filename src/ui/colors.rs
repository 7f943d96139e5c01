//! Centralized color constants for the UI and map layers.

use eframe::egui::Color32;

/// General UI colors for labels and values.
pub mod ui {
    use super::Color32;

    /// Muted gray for stat labels.
    pub const LABEL: Color32 = Color32::from_rgb(100, 100, 100);
    /// Slightly brighter for stat values.
    pub const VALUE: Color32 = Color32::from_rgb(160, 160, 160);
    /// Emphasized color for active states.
    pub const ACTIVE: Color32 = Color32::from_rgb(100, 180, 255);
    /// Success/positive indicator.
    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    /// Error text.
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
}

/// Colors for the map canvas.
pub mod canvas {
    use super::Color32;

    /// Background color.
    pub const BACKGROUND: Color32 = Color32::from_rgb(20, 20, 35);
    /// Overlay info text.
    pub const OVERLAY_TEXT: Color32 = Color32::from_rgb(200, 200, 220);
    /// Ring drawn around the clicked agent.
    pub const SELECTION: Color32 = Color32::from_rgb(255, 255, 255);
    /// Ring drawn around the hovered object.
    pub const HOVER: Color32 = Color32::from_rgb(255, 230, 120);
}

/// Colors for agent layers.
pub mod agents {
    use super::Color32;

    /// Uniform point color below the icon zoom threshold.
    pub const POINT: Color32 = Color32::from_rgb(0, 140, 255);
    /// Name label color.
    pub const LABEL: Color32 = Color32::from_rgb(230, 230, 240);
    /// Icon tint for male icons.
    pub const ICON_BOY: Color32 = Color32::from_rgb(80, 160, 255);
    /// Icon tint for female icons.
    pub const ICON_GIRL: Color32 = Color32::from_rgb(255, 120, 170);
    /// Icon tint for the generic icon.
    pub const ICON_DEFAULT: Color32 = Color32::from_rgb(170, 170, 180);
    /// Icon outline.
    pub const ICON_STROKE: Color32 = Color32::from_rgb(30, 30, 45);
}

/// Colors for bridge status markers.
pub mod bridge {
    use super::Color32;

    /// Work order in progress.
    pub const IN_PROGRESS: Color32 = Color32::from_rgb(255, 165, 0);
    /// Critical priority.
    pub const CRITICAL: Color32 = Color32::from_rgb(220, 20, 60);
    /// Anything else.
    pub const DEFAULT: Color32 = Color32::from_rgb(0, 180, 120);
    /// Marker outline.
    pub const STROKE: Color32 = Color32::from_rgb(20, 20, 20);
    /// Label text.
    pub const LABEL: Color32 = Color32::from_rgb(255, 240, 200);
}

/// Colors for areas of interest.
pub mod aoi {
    use super::Color32;

    /// Polygon fill - requires alpha, use function.
    pub fn fill() -> Color32 {
        Color32::from_rgba_unmultiplied(120, 200, 160, 40)
    }

    /// Polygon outline.
    pub const STROKE: Color32 = Color32::from_rgb(120, 200, 160);
}

/// Colors for the status heatmap.
pub mod heatmap {
    use super::Color32;

    /// Color stops from low to high weight.
    pub const RAMP: [Color32; 5] = [
        Color32::from_rgb(65, 182, 196),
        Color32::from_rgb(127, 205, 187),
        Color32::from_rgb(254, 217, 118),
        Color32::from_rgb(253, 141, 60),
        Color32::from_rgb(227, 26, 28),
    ];

    /// Ramp color for a normalized weight in `[0, 1]`, with alpha scaled
    /// by the weight.
    pub fn ramp(weight: f32) -> Color32 {
        let w = weight.clamp(0.0, 1.0);
        let scaled = w * (RAMP.len() - 1) as f32;
        let idx = (scaled.floor() as usize).min(RAMP.len() - 2);
        let frac = scaled - idx as f32;

        let a = RAMP[idx];
        let b = RAMP[idx + 1];
        let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * frac).round() as u8;
        let alpha = (40.0 + 140.0 * w) as u8;

        Color32::from_rgba_unmultiplied(
            lerp(a.r(), b.r()),
            lerp(a.g(), b.g()),
            lerp(a.b(), b.b()),
            alpha,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heatmap_ramp_endpoints() {
        let low = heatmap::ramp(0.0);
        let high = heatmap::ramp(1.0);
        assert_eq!(low.a(), 40);
        assert_eq!(high.a(), 180);
        // Out-of-range weights clamp instead of indexing past the ramp.
        assert_eq!(heatmap::ramp(5.0).a(), high.a());
    }
}
