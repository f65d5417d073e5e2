use crate::board::model::{Accent, Priority};
use crate::sidebar::tree::NodeKind;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    // Primary colors
    pub primary: ColorSpec,
    pub secondary: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Background colors
    pub background: ColorSpec,
    pub surface: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,
    pub info: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,
    pub drop_indicator: ColorSpec,

    // Column accents
    pub amber: ColorSpec,
    pub sky: ColorSpec,
    pub emerald: ColorSpec,
    pub rose: ColorSpec,
    pub slate: ColorSpec,

    // Footer mode colors
    pub footer_normal: ColorSpec,
    pub footer_drag: ColorSpec,
    pub footer_form: ColorSpec,
    pub footer_debug: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        ColorSpec { r, g, b }
    }

    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::tokyo_night()
    }
}

impl Theme {
    /// Tokyo Night theme.
    ///
    pub fn tokyo_night() -> Self {
        Theme {
            name: "tokyo-night".to_string(),
            primary: ColorSpec::rgb(122, 162, 247),   // Blue
            secondary: ColorSpec::rgb(187, 154, 247), // Purple
            text: ColorSpec::rgb(192, 202, 245),
            text_muted: ColorSpec::rgb(86, 95, 137),
            background: ColorSpec::rgb(26, 27, 38),
            surface: ColorSpec::rgb(36, 40, 59),
            success: ColorSpec::rgb(158, 206, 106),
            warning: ColorSpec::rgb(224, 175, 104),
            error: ColorSpec::rgb(247, 118, 142),
            info: ColorSpec::rgb(125, 207, 255),
            border_active: ColorSpec::rgb(122, 162, 247),
            border_normal: ColorSpec::rgb(59, 66, 97),
            highlight_bg: ColorSpec::rgb(41, 46, 66),
            highlight_fg: ColorSpec::rgb(192, 202, 245),
            drop_indicator: ColorSpec::rgb(255, 158, 100),
            amber: ColorSpec::rgb(224, 175, 104),
            sky: ColorSpec::rgb(125, 207, 255),
            emerald: ColorSpec::rgb(115, 218, 202),
            rose: ColorSpec::rgb(247, 118, 142),
            slate: ColorSpec::rgb(169, 177, 214),
            footer_normal: ColorSpec::rgb(122, 162, 247),
            footer_drag: ColorSpec::rgb(255, 158, 100),
            footer_form: ColorSpec::rgb(158, 206, 106),
            footer_debug: ColorSpec::rgb(247, 118, 142),
        }
    }

    /// Rose Pine Dawn theme.
    ///
    pub fn rose_pine_dawn() -> Self {
        Theme {
            name: "rose-pine-dawn".to_string(),
            primary: ColorSpec::rgb(144, 122, 169),  // Iris
            secondary: ColorSpec::rgb(40, 105, 131), // Pine
            text: ColorSpec::rgb(87, 82, 121),
            text_muted: ColorSpec::rgb(152, 147, 165),
            background: ColorSpec::rgb(250, 244, 237),
            surface: ColorSpec::rgb(255, 250, 243),
            success: ColorSpec::rgb(40, 105, 131),
            warning: ColorSpec::rgb(234, 157, 52),
            error: ColorSpec::rgb(180, 99, 122),
            info: ColorSpec::rgb(86, 148, 159),
            border_active: ColorSpec::rgb(144, 122, 169),
            border_normal: ColorSpec::rgb(223, 218, 217),
            highlight_bg: ColorSpec::rgb(242, 233, 225),
            highlight_fg: ColorSpec::rgb(87, 82, 121),
            drop_indicator: ColorSpec::rgb(215, 130, 126),
            amber: ColorSpec::rgb(234, 157, 52),
            sky: ColorSpec::rgb(86, 148, 159),
            emerald: ColorSpec::rgb(40, 105, 131),
            rose: ColorSpec::rgb(215, 130, 126),
            slate: ColorSpec::rgb(121, 117, 147),
            footer_normal: ColorSpec::rgb(144, 122, 169),
            footer_drag: ColorSpec::rgb(215, 130, 126),
            footer_form: ColorSpec::rgb(40, 105, 131),
            footer_debug: ColorSpec::rgb(180, 99, 122),
        }
    }

    /// Dracula theme.
    ///
    pub fn dracula() -> Self {
        Theme {
            name: "dracula".to_string(),
            primary: ColorSpec::rgb(189, 147, 249),   // Purple
            secondary: ColorSpec::rgb(255, 121, 198), // Pink
            text: ColorSpec::rgb(248, 248, 242),
            text_muted: ColorSpec::rgb(98, 114, 164),
            background: ColorSpec::rgb(40, 42, 54),
            surface: ColorSpec::rgb(68, 71, 90),
            success: ColorSpec::rgb(80, 250, 123),
            warning: ColorSpec::rgb(241, 250, 140),
            error: ColorSpec::rgb(255, 85, 85),
            info: ColorSpec::rgb(139, 233, 253),
            border_active: ColorSpec::rgb(189, 147, 249),
            border_normal: ColorSpec::rgb(68, 71, 90),
            highlight_bg: ColorSpec::rgb(68, 71, 90),
            highlight_fg: ColorSpec::rgb(248, 248, 242),
            drop_indicator: ColorSpec::rgb(255, 184, 108),
            amber: ColorSpec::rgb(255, 184, 108),
            sky: ColorSpec::rgb(139, 233, 253),
            emerald: ColorSpec::rgb(80, 250, 123),
            rose: ColorSpec::rgb(255, 121, 198),
            slate: ColorSpec::rgb(98, 114, 164),
            footer_normal: ColorSpec::rgb(189, 147, 249),
            footer_drag: ColorSpec::rgb(255, 184, 108),
            footer_form: ColorSpec::rgb(80, 250, 123),
            footer_debug: ColorSpec::rgb(255, 85, 85),
        }
    }

    /// Catppuccin Mocha theme.
    ///
    pub fn catppuccin_mocha() -> Self {
        Theme {
            name: "catppuccin-mocha".to_string(),
            primary: ColorSpec::rgb(203, 166, 247),   // Mauve
            secondary: ColorSpec::rgb(137, 180, 250), // Blue
            text: ColorSpec::rgb(205, 214, 244),
            text_muted: ColorSpec::rgb(108, 112, 134),
            background: ColorSpec::rgb(30, 30, 46),
            surface: ColorSpec::rgb(49, 50, 68),
            success: ColorSpec::rgb(166, 227, 161),
            warning: ColorSpec::rgb(249, 226, 175),
            error: ColorSpec::rgb(243, 139, 168),
            info: ColorSpec::rgb(137, 220, 235),
            border_active: ColorSpec::rgb(203, 166, 247),
            border_normal: ColorSpec::rgb(69, 71, 90),
            highlight_bg: ColorSpec::rgb(49, 50, 68),
            highlight_fg: ColorSpec::rgb(205, 214, 244),
            drop_indicator: ColorSpec::rgb(250, 179, 135),
            amber: ColorSpec::rgb(250, 179, 135),
            sky: ColorSpec::rgb(137, 220, 235),
            emerald: ColorSpec::rgb(148, 226, 213),
            rose: ColorSpec::rgb(243, 139, 168),
            slate: ColorSpec::rgb(166, 173, 200),
            footer_normal: ColorSpec::rgb(203, 166, 247),
            footer_drag: ColorSpec::rgb(250, 179, 135),
            footer_form: ColorSpec::rgb(166, 227, 161),
            footer_debug: ColorSpec::rgb(243, 139, 168),
        }
    }

    /// Get theme by name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tokyo-night" => Some(Self::tokyo_night()),
            "rose-pine-dawn" => Some(Self::rose_pine_dawn()),
            "dracula" => Some(Self::dracula()),
            "catppuccin-mocha" => Some(Self::catppuccin_mocha()),
            _ => None,
        }
    }

    /// Get list of all available theme names.
    ///
    pub fn available_themes() -> Vec<String> {
        vec![
            "tokyo-night".to_string(),
            "rose-pine-dawn".to_string(),
            "dracula".to_string(),
            "catppuccin-mocha".to_string(),
        ]
    }

    /// Color of a column accent.
    ///
    pub fn accent_color(&self, accent: Accent) -> Color {
        match accent {
            Accent::Amber => self.amber,
            Accent::Sky => self.sky,
            Accent::Emerald => self.emerald,
            Accent::Rose => self.rose,
            Accent::Slate => self.slate,
        }
        .to_color()
    }

    /// Color of a priority badge.
    ///
    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.error,
            Priority::Medium => self.warning,
            Priority::Normal => self.info,
        }
        .to_color()
    }
}

/// Glyph drawn in front of a sidebar node.
///
pub fn node_glyph(kind: NodeKind, expanded: bool) -> &'static str {
    match (kind, expanded) {
        (NodeKind::Folder, true) => "▾ ",
        (NodeKind::Folder, false) => "▸ ",
        (NodeKind::Project, _) => "• ",
    }
}
