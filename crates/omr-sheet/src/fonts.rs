//! Bengali font registration
//!
//! Bangla sheets need a TrueType font with Bengali glyphs. The font is
//! optional: registering it once at startup settles whether Bangla mode can
//! print real glyphs, and the renderer falls back to Helvetica when it can't.

use printpdf::ParsedFont;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

/// Where the service looks for the Bengali font unless told otherwise
pub const DEFAULT_BANGLA_FONT_PATH: &str = "assets/SolaimanLipi.ttf";

/// Validated font bytes, cheap to clone across render tasks
#[derive(Clone)]
pub struct BanglaFont {
    bytes: Arc<[u8]>,
    source: PathBuf,
}

impl BanglaFont {
    /// Accept the bytes only if printpdf can parse them
    pub fn from_bytes(bytes: Vec<u8>, source: impl Into<PathBuf>) -> Option<Self> {
        let font = Self {
            bytes: Arc::from(bytes),
            source: source.into(),
        };
        font.parse().map(|_| font)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub(crate) fn parse(&self) -> Option<ParsedFont> {
        let mut warnings = Vec::new();
        ParsedFont::from_bytes(&self.bytes, 0, &mut warnings)
    }
}

impl fmt::Debug for BanglaFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BanglaFont")
            .field("source", &self.source)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Process-wide font capabilities, settled by the first registration
#[derive(Debug, Default)]
pub struct FontRegistry {
    bangla: OnceLock<Option<BanglaFont>>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry and try to register the Bengali font at `path`
    pub fn with_bangla(path: impl AsRef<Path>) -> Self {
        let registry = Self::new();
        registry.register_bangla(path);
        registry
    }

    /// Load the Bengali font. Only the first call does any work; repeated
    /// calls report the recorded outcome and never fail.
    pub fn register_bangla(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        if let Some(existing) = self.bangla.get() {
            debug!(path = %path.display(), "Bengali font registration already settled");
            return existing.is_some();
        }
        self.bangla.get_or_init(|| load_bangla(path)).is_some()
    }

    pub fn bangla_available(&self) -> bool {
        matches!(self.bangla.get(), Some(Some(_)))
    }

    pub fn bangla_font(&self) -> Option<BanglaFont> {
        self.bangla.get().cloned().flatten()
    }
}

fn load_bangla(path: &Path) -> Option<BanglaFont> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Bengali font unavailable, Bangla sheets fall back to Helvetica"
            );
            return None;
        }
    };

    match BanglaFont::from_bytes(bytes, path) {
        Some(font) => {
            info!(path = %path.display(), "Registered Bengali font");
            Some(font)
        }
        None => {
            warn!(
                path = %path.display(),
                "Bengali font could not be parsed, Bangla sheets fall back to Helvetica"
            );
            None
        }
    }
}
