use std::fmt;
use std::path::{Path, PathBuf};

/// Error returned by the font loaders.
#[derive(Debug, Clone)]
pub enum FontLoadError {
    /// The bytes are not a font fontdue can parse.
    Parse(String),
    /// None of the candidate files could be read.
    NotFound(Vec<PathBuf>),
}

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontLoadError::Parse(msg) => write!(f, "font parse error: {msg}"),
            FontLoadError::NotFound(tried) => {
                write!(f, "no readable font among {} candidates", tried.len())?;
                for p in tried {
                    write!(f, "\n  {}", p.display())?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Owns the loaded fonts. Fonts are immutable after loading.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError::Parse(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    /// Loads the first candidate file that can be read and parsed.
    pub fn load_first<P: AsRef<Path>>(&mut self, candidates: &[P]) -> Result<FontId, FontLoadError> {
        let mut tried = Vec::with_capacity(candidates.len());
        for path in candidates {
            let path = path.as_ref();
            match std::fs::read(path) {
                Ok(bytes) => match self.load_font(&bytes) {
                    Ok(id) => {
                        log::info!("loaded HUD font {}", path.display());
                        return Ok(id);
                    }
                    Err(e) => log::warn!("{}: {e}", path.display()),
                },
                Err(e) => log::debug!("font candidate {}: {e}", path.display()),
            }
            tried.push(path.to_path_buf());
        }
        Err(FontLoadError::NotFound(tried))
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_rejected() {
        let mut fonts = FontSystem::new();
        assert!(matches!(fonts.load_font(b"not a font"), Err(FontLoadError::Parse(_))));
    }

    #[test]
    fn missing_candidates_are_listed() {
        let mut fonts = FontSystem::new();
        let err = fonts.load_first(&["/nope/a.ttf", "/nope/b.ttf"]).unwrap_err();
        match err {
            FontLoadError::NotFound(tried) => assert_eq!(tried.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }
}
