//! Grid layout for answer sheets
//!
//! Questions are spread over four equal columns. Question `q` (0-based) lands
//! in column `q / per_column` and row `q % per_column`, where
//! `per_column = ceil(total / 4)`. Rows that would run past the bottom margin
//! continue on the next page in the same column.

use crate::constants::COLUMNS;
use crate::options::SheetLayout;
use crate::script::Script;
use crate::types::{Result, SheetRequest};

/// Where one question sits in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    pub column: usize,
    pub row: usize,
    pub page: usize,
    pub row_on_page: usize,
}

/// Column and row arithmetic for a given question count
#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    pub total_questions: usize,
    pub questions_per_column: usize,
    pub column_width_pt: f32,
    pub column_padding_pt: f32,
    /// Baseline of the first row on every page
    pub top_y_pt: f32,
    pub row_height_pt: f32,
    pub rows_per_page: usize,
    pub pages: usize,
}

impl GridGeometry {
    pub fn new(total_questions: usize, layout: &SheetLayout) -> Self {
        let (_, page_height) = layout.page_size_pt();
        let top_y_pt = page_height - layout.grid_top_offset_pt;
        let usable = (top_y_pt - layout.bottom_margin_pt).max(0.0);
        let rows_per_page = (usable / layout.row_height_pt).floor() as usize + 1;
        let questions_per_column = questions_per_column(total_questions);
        let pages = questions_per_column.div_ceil(rows_per_page).max(1);

        Self {
            total_questions,
            questions_per_column,
            column_width_pt: layout.column_width_pt(),
            column_padding_pt: layout.column_padding_pt,
            top_y_pt,
            row_height_pt: layout.row_height_pt,
            rows_per_page,
            pages,
        }
    }

    /// Grid position of the 0-based question `index`
    pub fn position(&self, index: usize) -> GridPosition {
        debug_assert!(index < self.total_questions);
        let column = index / self.questions_per_column;
        let row = index % self.questions_per_column;
        GridPosition {
            column,
            row,
            page: row / self.rows_per_page,
            row_on_page: row % self.rows_per_page,
        }
    }

    /// Left edge of the question labels in `column`
    pub fn label_x(&self, column: usize) -> f32 {
        column as f32 * self.column_width_pt + self.column_padding_pt
    }

    /// Baseline of a row on its page
    pub fn row_y(&self, row_on_page: usize) -> f32 {
        self.top_y_pt - row_on_page as f32 * self.row_height_pt
    }
}

/// `ceil(total / 4)`
pub fn questions_per_column(total_questions: usize) -> usize {
    total_questions.div_ceil(COLUMNS)
}

/// A line of text anchored at its horizontal center
#[derive(Debug, Clone, PartialEq)]
pub struct CenteredText {
    pub text: String,
    pub center_x: f32,
    pub baseline_y: f32,
    pub font_size_pt: f32,
}

/// One answer circle with its letter
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
    pub letter: &'static str,
    pub letter_baseline_y: f32,
}

/// A numbered question and its bubbles
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionCell {
    pub index: usize,
    pub position: GridPosition,
    pub label: String,
    pub label_x: f32,
    pub label_y: f32,
    pub bubbles: Vec<Bubble>,
}

/// Everything the renderer draws, fully positioned
#[derive(Debug, Clone, PartialEq)]
pub struct SheetPlan {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub title: CenteredText,
    pub geometry: GridGeometry,
    pub letters: Script,
    pub numerals: Script,
    pub label_font_size_pt: f32,
    pub questions: Vec<QuestionCell>,
}

impl SheetPlan {
    /// Lay out a request. Option letters follow the Bangla flag alone;
    /// numerals switch to Bengali digits only when the Bengali font can
    /// actually draw them.
    pub fn build(
        request: &SheetRequest,
        layout: &SheetLayout,
        bangla_font_available: bool,
    ) -> Result<Self> {
        request.validate()?;
        layout.validate()?;

        let (page_width_pt, page_height_pt) = layout.page_size_pt();
        let geometry = GridGeometry::new(request.total_questions, layout);

        let letters = Script::from_bangla_flag(request.use_bangla);
        let numerals = Script::from_bangla_flag(request.use_bangla && bangla_font_available);
        let option_letters = letters.option_letters(request.options_per_question);

        let questions = (0..request.total_questions)
            .map(|index| {
                let position = geometry.position(index);
                let label_x = geometry.label_x(position.column);
                let label_y = geometry.row_y(position.row_on_page);
                let center_y = label_y + layout.bubble_rise_pt;

                let bubbles = option_letters
                    .iter()
                    .enumerate()
                    .map(|(i, &letter)| Bubble {
                        center_x: label_x
                            + layout.label_gap_pt
                            + i as f32 * layout.bubble_spacing_pt,
                        center_y,
                        radius: layout.bubble_radius_pt,
                        letter,
                        letter_baseline_y: center_y - layout.letter_drop_pt,
                    })
                    .collect();

                QuestionCell {
                    index,
                    position,
                    label: numerals.question_label(index + 1),
                    label_x,
                    label_y,
                    bubbles,
                }
            })
            .collect();

        Ok(Self {
            page_width_pt,
            page_height_pt,
            title: CenteredText {
                text: request.institute_name.clone(),
                center_x: page_width_pt / 2.0,
                baseline_y: page_height_pt - layout.title_offset_pt,
                font_size_pt: layout.title_font_size_pt,
            },
            geometry,
            letters,
            numerals,
            label_font_size_pt: layout.label_font_size_pt,
            questions,
        })
    }

    pub fn page_count(&self) -> usize {
        self.geometry.pages
    }

    /// Questions drawn on `page`, column by column. Each column's rows on a
    /// page form one contiguous index range, so nothing else is visited.
    pub fn questions_on_page(&self, page: usize) -> impl Iterator<Item = &QuestionCell> {
        let geometry = &self.geometry;
        let per_column = geometry.questions_per_column;
        let first_row = (page * geometry.rows_per_page).min(per_column);
        let last_row = ((page + 1) * geometry.rows_per_page).min(per_column);

        (0..COLUMNS).flat_map(move |column| {
            let start = (column * per_column + first_row).min(self.questions.len());
            let end = (column * per_column + last_row).min(self.questions.len());
            &self.questions[start..end]
        })
    }

    pub fn label_count(&self) -> usize {
        self.questions.len()
    }

    pub fn bubble_count(&self) -> usize {
        self.questions.iter().map(|q| q.bubbles.len()).sum()
    }
}
