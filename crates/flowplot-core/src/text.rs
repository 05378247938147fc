//! Text style definitions and text measurement.
//!
//! Node names and capacity labels are measured so the SVG exporter can size
//! label backgrounds and reserve room around the diagram.
//!
//! # Examples
//!
//! ```
//! # use flowplot_core::text::TextDefinition;
//! let mut style = TextDefinition::new();
//! style.set_font_size(12);
//! style.set_bold(true);
//!
//! let size = style.measure("1/2");
//! assert!(size.height() > 0.0);
//! ```

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Weight};
use log::info;

use crate::geometry::Size;

/// Visual style of a piece of text.
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"sans-serif"` |
/// | Font size | `12` |
/// | Bold | `false` |
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    bold: bool,
}

impl TextDefinition {
    /// Creates a text definition with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    /// Returns the CSS `font-weight` value for this definition.
    pub fn font_weight(&self) -> &'static str {
        if self.bold { "bold" } else { "normal" }
    }

    /// Measures `text` rendered with this definition, in pixels.
    pub fn measure(&self, text: &str) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(text, self)
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: String::from("sans-serif"),
            font_size: 12,
            bold: false,
        }
    }
}

/// Keeps a single `FontSystem` alive; creating one scans system fonts.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let mut font_system = self.font_system.lock().expect("failed to lock FontSystem");

        // Points to pixels at standard DPI
        let font_size_px = text_def.font_size() as f32 * 1.33;
        let line_height = font_size_px * 1.15;
        let metrics = Metrics::new(font_size_px, line_height);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let weight = if text_def.is_bold() {
            Weight::BOLD
        } else {
            Weight::NORMAL
        };
        let attrs = Attrs::new()
            .family(font_family(text_def.font_family()))
            .weight(weight);

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;

        let layout_runs: Vec<_> = buffer.layout_runs().collect();
        if !layout_runs.is_empty() {
            for last in layout_runs.iter().map(|run| run.glyphs.last()) {
                if let Some(last) = last {
                    max_width = max_width.max(last.x + last.w);
                }
                total_height += metrics.line_height;
            }
        } else {
            max_width = text.chars().count() as f32 * (font_size_px * 0.55);
            total_height = metrics.line_height;
        }

        Size::new(max_width, total_height)
    }
}

/// Maps CSS generic family names onto their `cosmic-text` counterparts.
fn font_family(name: &str) -> Family<'_> {
    match name {
        "serif" => Family::Serif,
        "sans-serif" => Family::SansSerif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        _ => Family::Name(name),
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_text_definition_defaults() {
        let def = TextDefinition::default();
        assert_eq!(def.font_family(), "sans-serif");
        assert_eq!(def.font_size(), 12);
        assert!(!def.is_bold());
        assert_eq!(def.font_weight(), "normal");
    }

    #[test]
    fn test_text_definition_setters() {
        let mut def = TextDefinition::new();
        def.set_font_family("Arial");
        def.set_font_size(15);
        def.set_bold(true);
        assert_eq!(def.font_family(), "Arial");
        assert_eq!(def.font_size(), 15);
        assert_eq!(def.font_weight(), "bold");
    }

    #[test]
    fn test_measure_empty_text() {
        let size = TextDefinition::default().measure("");
        assert_approx_eq!(f32, size.width(), 0.0);
        assert_approx_eq!(f32, size.height(), 0.0);
    }

    #[test]
    fn test_measure_single_line_height() {
        let mut def = TextDefinition::default();
        def.set_font_size(20);
        let size = def.measure("42");
        assert_approx_eq!(f32, size.height(), 20.0 * 1.33 * 1.15, epsilon = 0.01);
    }

    #[test]
    fn test_generic_font_families() {
        assert_eq!(font_family("sans-serif"), Family::SansSerif);
        assert_eq!(font_family("monospace"), Family::Monospace);
        assert_eq!(font_family("DejaVu Sans"), Family::Name("DejaVu Sans"));
    }
}
