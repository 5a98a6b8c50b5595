//! Printable OMR answer sheets
//!
//! A sheet is an institute title over a four-column grid of numbered
//! questions, each followed by a row of lettered answer bubbles in Latin or
//! Bengali script.

pub mod constants;
pub mod fonts;
pub mod layout;
mod options;
mod pdf;
pub mod script;
mod types;

pub use fonts::{BanglaFont, DEFAULT_BANGLA_FONT_PATH, FontRegistry};
pub use layout::{GridGeometry, GridPosition, SheetPlan, questions_per_column};
pub use options::*;
pub use pdf::{generate_pdf, generate_sheet_bytes};
pub use script::Script;
pub use types::*;
