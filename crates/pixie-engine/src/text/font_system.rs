use std::path::Path;

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("font load error: {0}")]
pub struct FontLoadError(pub String);

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Common locations of a general-purpose sans font.
const PRIMARY_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// Outline emoji fonts. Bitmap color emoji (CBDT) cannot be rasterized.
const EMOJI_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/noto/NotoEmoji-Regular.ttf",
    "/usr/share/fonts/noto/NotoEmoji-Regular.ttf",
    "/usr/share/fonts/TTF/Symbola.ttf",
    "/usr/share/fonts/truetype/ancient-scripts/Symbola_hint.ttf",
    "C:\\Windows\\Fonts\\seguiemj.ttf",
];

/// Ordered fallback chain of loaded fonts.
///
/// The first font is the primary face. For each character the first font that
/// has a glyph for it is used; characters no font covers fall back to the
/// primary face (which draws its `.notdef` box).
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the first available primary font and emoji font from the usual
    /// system locations. Missing fonts are logged, not fatal.
    pub fn with_system_fonts() -> Self {
        let mut fs = Self::new();
        for group in [PRIMARY_CANDIDATES, EMOJI_CANDIDATES] {
            if group.iter().find_map(|p| fs.load_path(Path::new(p)).ok()).is_none() {
                log::warn!("no font found among {} candidates", group.len());
            }
        }
        fs
    }

    fn load_path(&mut self, path: &Path) -> Result<FontId, FontLoadError> {
        let bytes = std::fs::read(path).map_err(|e| FontLoadError(format!("{}: {e}", path.display())))?;
        let id = self.load_font(&bytes)?;
        log::info!("loaded font {}", path.display());
        Ok(id)
    }

    /// Parses and appends a TrueType or OpenType font to the fallback chain.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub(crate) fn fonts(&self) -> &[fontdue::Font] {
        &self.fonts
    }

    /// Index of the first font with a glyph for `c`.
    fn font_for(&self, c: char) -> Option<usize> {
        self.fonts.iter().position(|f| f.lookup_glyph_index(c) != 0)
    }

    /// Splits `text` into runs that share one font.
    ///
    /// Whitespace and uncovered characters stay in the current run so a space
    /// between two emoji does not break the emoji run.
    pub fn runs<'t>(&self, text: &'t str) -> Vec<(FontId, &'t str)> {
        let mut runs = Vec::new();
        let mut current = 0usize;
        let mut start = 0usize;

        for (i, c) in text.char_indices() {
            if c.is_whitespace() {
                continue;
            }
            let font = self.font_for(c).unwrap_or(0);
            if font != current {
                if i > start {
                    runs.push((FontId(current), &text[start..i]));
                }
                current = font;
                start = i;
            }
        }

        if start < text.len() {
            runs.push((FontId(current), &text[start..]));
        }
        runs
    }
}
