//! Shared application state

use std::sync::Arc;

use omr_sheet::{FontRegistry, SheetLayout};

use crate::artifact::ScratchDir;

/// Everything a request needs, fixed at startup
#[derive(Clone)]
pub struct AppState {
    pub fonts: Arc<FontRegistry>,
    pub layout: Arc<SheetLayout>,
    pub scratch: Arc<ScratchDir>,
}

impl AppState {
    pub fn new(fonts: FontRegistry, layout: SheetLayout, scratch: ScratchDir) -> Self {
        Self {
            fonts: Arc::new(fonts),
            layout: Arc::new(layout),
            scratch: Arc::new(scratch),
        }
    }
}
