//! UI Theme - Design system constants
//!
//! Colors and column widths shared by every pkgidx listing.

use crossterm::style::Color;

/// Default theme for pkgidx output
#[derive(Debug, Clone, Copy, Default)]
pub struct Theme {
    /// Colors for different UI elements
    pub colors: ColorScheme,
    /// Table layout constants
    pub layout: Layout,
}

/// Color scheme for UI elements
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    /// Architectures and tool names (primary content)
    pub primary: Color,
    /// Version numbers
    pub version: Color,
    /// Secondary info (paths, counts)
    pub secondary: Color,
    /// Success states
    pub success: Color,
    /// Warning states
    pub warning: Color,
    /// Error states
    pub error: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            primary: Color::White,
            version: Color::Cyan,
            secondary: Color::DarkGrey,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }
}

/// Column widths
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    /// Width of the architecture / tool name column
    pub name_width: usize,
    /// Width of the label column in key/value blocks
    pub label_width: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            name_width: 28,
            label_width: 12,
        }
    }
}
