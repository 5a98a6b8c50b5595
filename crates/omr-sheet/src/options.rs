use crate::constants::{COLUMNS, mm_to_pt};
use crate::types::{MAX_OPTIONS, Result, SheetError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Paper the sheet is printed on
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PaperSize {
    #[default]
    A4,
    Letter,
    Legal,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Portrait dimensions in millimeters
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Portrait dimensions in points
    pub fn dimensions_pt(self) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        (mm_to_pt(w), mm_to_pt(h))
    }

    pub fn name(&self) -> &'static str {
        match self {
            PaperSize::A4 => "A4",
            PaperSize::Letter => "Letter",
            PaperSize::Legal => "Legal",
            PaperSize::Custom { .. } => "Custom",
        }
    }
}

/// Fixed geometry of a sheet. All distances are in points and measured the
/// way PDF measures them: y grows upward from the bottom edge.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SheetLayout {
    pub paper: PaperSize,

    // Title
    /// Distance from the top edge to the title baseline
    pub title_offset_pt: f32,
    pub title_font_size_pt: f32,

    // Grid
    /// Distance from the top edge to the first row's baseline
    pub grid_top_offset_pt: f32,
    pub row_height_pt: f32,
    /// Rows stop above this distance from the bottom edge
    pub bottom_margin_pt: f32,
    /// Gap between a column's left edge and its question labels
    pub column_padding_pt: f32,
    pub label_font_size_pt: f32,

    // Bubbles
    /// Gap between the label origin and the first bubble's center
    pub label_gap_pt: f32,
    /// Center-to-center distance between neighboring bubbles
    pub bubble_spacing_pt: f32,
    pub bubble_radius_pt: f32,
    /// Bubble centers sit this far above the label baseline
    pub bubble_rise_pt: f32,
    /// Option letters sit this far below the bubble center
    pub letter_drop_pt: f32,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            title_offset_pt: 40.0,
            title_font_size_pt: 16.0,
            grid_top_offset_pt: 80.0,
            row_height_pt: 15.0,
            bottom_margin_pt: 36.0,
            column_padding_pt: 20.0,
            label_font_size_pt: 10.0,
            label_gap_pt: 30.0,
            bubble_spacing_pt: 18.0,
            bubble_radius_pt: 6.0,
            bubble_rise_pt: 3.0,
            letter_drop_pt: 3.0,
        }
    }
}

impl SheetLayout {
    /// Load a layout from a JSON file. Missing keys take their defaults.
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let layout: Self = serde_json::from_slice(&bytes)
            .map_err(|e| SheetError::Config(format!("Failed to parse layout: {}", e)))?;
        layout.validate()?;
        Ok(layout)
    }

    /// Save the layout as pretty-printed JSON
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SheetError::Config(format!("Failed to serialize layout: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn page_size_pt(&self) -> (f32, f32) {
        self.paper.dimensions_pt()
    }

    pub fn column_width_pt(&self) -> f32 {
        self.page_size_pt().0 / COLUMNS as f32
    }

    /// Horizontal room a full row of bubbles needs inside one column
    pub fn widest_row_pt(&self) -> f32 {
        self.column_padding_pt
            + self.label_gap_pt
            + (MAX_OPTIONS - 1) as f32 * self.bubble_spacing_pt
            + self.bubble_radius_pt
    }

    /// Validate the layout
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.page_size_pt();
        if width <= 0.0 || height <= 0.0 {
            return Err(SheetError::Config(
                "Paper dimensions must be positive".to_string(),
            ));
        }

        let positive = [
            ("title_font_size_pt", self.title_font_size_pt),
            ("label_font_size_pt", self.label_font_size_pt),
            ("row_height_pt", self.row_height_pt),
            ("bubble_spacing_pt", self.bubble_spacing_pt),
            ("bubble_radius_pt", self.bubble_radius_pt),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(SheetError::Config(format!("{} must be positive", name)));
            }
        }

        let non_negative = [
            ("title_offset_pt", self.title_offset_pt),
            ("grid_top_offset_pt", self.grid_top_offset_pt),
            ("bottom_margin_pt", self.bottom_margin_pt),
            ("column_padding_pt", self.column_padding_pt),
            ("label_gap_pt", self.label_gap_pt),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(SheetError::Config(format!("{} must not be negative", name)));
            }
        }

        if self.grid_top_offset_pt <= self.title_offset_pt {
            return Err(SheetError::Config(
                "Grid must start below the title".to_string(),
            ));
        }

        if height - self.grid_top_offset_pt < self.bottom_margin_pt {
            return Err(SheetError::Config(format!(
                "No room for a single row on {} paper",
                self.paper.name()
            )));
        }

        if self.widest_row_pt() > self.column_width_pt() {
            return Err(SheetError::Config(format!(
                "{} bubbles need {:.1}pt but a column on {} paper is {:.1}pt wide",
                MAX_OPTIONS,
                self.widest_row_pt(),
                self.paper.name(),
                self.column_width_pt()
            )));
        }

        Ok(())
    }
}
