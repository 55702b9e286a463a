/// Compile-time layout tokens, not user-overridable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutTokens {
    pub spacing_4: i32,
    pub spacing_8: i32,
    pub spacing_12: i32,
    pub spacing_16: i32,
    pub spacing_20: i32,
    pub spacing_24: i32,
    pub card_radius: u16,
    pub panel_radius: u16,
    pub control_radius: u16,
    pub control_size: u16,
    pub icon_size: u16,
    pub border_width: u16,
    pub motion_standard_ms: u32,
    pub motion_hover_ms: u32,
}

pub const LAYOUT_TOKENS: LayoutTokens = LayoutTokens {
    spacing_4: 4,
    spacing_8: 8,
    spacing_12: 12,
    spacing_16: 16,
    spacing_20: 20,
    spacing_24: 24,
    card_radius: 14,
    panel_radius: 18,
    control_radius: 12,
    control_size: 40,
    icon_size: 18,
    border_width: 1,
    motion_standard_ms: 220,
    motion_hover_ms: 160,
};

impl LayoutTokens {
    /// Stylesheet placeholder values, named after the fields.
    pub fn placeholders(&self) -> Vec<(&'static str, String)> {
        vec![
            ("spacing_4", self.spacing_4.to_string()),
            ("spacing_8", self.spacing_8.to_string()),
            ("spacing_12", self.spacing_12.to_string()),
            ("spacing_16", self.spacing_16.to_string()),
            ("spacing_20", self.spacing_20.to_string()),
            ("spacing_24", self.spacing_24.to_string()),
            ("card_radius", self.card_radius.to_string()),
            ("panel_radius", self.panel_radius.to_string()),
            ("control_radius", self.control_radius.to_string()),
            ("control_size", self.control_size.to_string()),
            ("icon_size", self.icon_size.to_string()),
            ("border_width", self.border_width.to_string()),
            ("motion_standard_ms", self.motion_standard_ms.to_string()),
            ("motion_hover_ms", self.motion_hover_ms.to_string()),
        ]
    }
}
