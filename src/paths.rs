use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Characters rejected in file names on common filesystems, plus control characters.
const UNSAFE_CHARS: &str = r#"[<>:"/\\|?*\x00-\x1F]"#;

static UNSAFE_RE: OnceLock<Regex> = OnceLock::new();

fn unsafe_chars() -> &'static Regex {
    UNSAFE_RE.get_or_init(|| Regex::new(UNSAFE_CHARS).expect("valid unsafe file name regex"))
}

/// Output directory layout.
///
/// Symbol and logo images live at the top level; each document gets its own
/// subdirectory for the large per-page assets.
#[derive(Clone, Debug)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the logs directory: `<root>/logs/`
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Returns `<root>/<document>_symbol_<number>.png`
    pub fn symbol_path(&self, document: &str, number: usize) -> PathBuf {
        self.root.join(format!("{}_symbol_{}.png", document, number))
    }

    /// Returns `<root>/<document>_page_<page>_logo_<slot>.png` (1-based page and slot)
    pub fn logo_path(&self, document: &str, page: usize, slot: usize) -> PathBuf {
        self.root
            .join(format!("{}_page_{}_logo_{}.png", document, page, slot))
    }

    /// Returns the per-document directory: `<root>/<document>/`
    pub fn document_dir(&self, document: &str) -> PathBuf {
        self.root.join(document)
    }

    /// Returns `<root>/<document>/<design>_<suffix>.png`, with the design name
    /// made safe for use in a file name.
    pub fn asset_path(&self, document: &str, design_name: &str, suffix: &str) -> PathBuf {
        self.document_dir(document)
            .join(format!("{}_{}.png", sanitize_file_stem(design_name), suffix))
    }

    /// Creates the root and logs directories if absent.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }

    /// Creates the per-document directory if absent.
    pub fn ensure_document_dir(&self, document: &str) -> std::io::Result<PathBuf> {
        let dir = self.document_dir(document);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

/// Replaces characters that are not allowed in file names with `_`.
///
/// OCR output can contain path separators or stray punctuation, so every
/// design name goes through here before it becomes part of a path.
pub fn sanitize_file_stem(name: &str) -> String {
    let cleaned = unsafe_chars().replace_all(name.trim(), "_");
    let cleaned = cleaned.trim_matches(|c: char| c == '.' || c.is_whitespace());

    if cleaned.is_empty() {
        "unnamed".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Returns the file stem of a document path, used to prefix its outputs.
pub fn document_stem(document: &Path) -> String {
    document
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_stem() {
        assert_eq!(sanitize_file_stem("Carrara White"), "Carrara White");
        assert_eq!(sanitize_file_stem("Onyx / Gold"), "Onyx _ Gold");
        assert_eq!(sanitize_file_stem("  a:b*c?  "), "a_b_c_");
        assert_eq!(sanitize_file_stem("line\nbreak"), "line_break");
        assert_eq!(sanitize_file_stem(" .. "), "unnamed");
    }

    #[test]
    fn test_unsafe_chars_pattern_is_compiled_once() {
        assert!(std::ptr::eq(unsafe_chars(), unsafe_chars()));
        assert!(unsafe_chars().is_match("a/b"));
    }

    #[test]
    fn test_layout_paths() {
        let layout = OutputLayout::new("out");
        assert_eq!(
            layout.symbol_path("brochure", 3),
            PathBuf::from("out").join("brochure_symbol_3.png")
        );
        assert_eq!(
            layout.logo_path("brochure", 4, 10),
            PathBuf::from("out").join("brochure_page_4_logo_10.png")
        );
        assert_eq!(
            layout.asset_path("brochure", "Onyx/Gold", "tile_design"),
            PathBuf::from("out")
                .join("brochure")
                .join("Onyx_Gold_tile_design.png")
        );
    }

    #[test]
    fn test_document_stem() {
        assert_eq!(document_stem(Path::new("/pdfs/Spring 2024.pdf")), "Spring 2024");
    }

    #[test]
    fn test_ensure_directories() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path().join("extracted_images"));
        layout.ensure_directories().unwrap();
        assert!(layout.logs_dir().is_dir());
        assert!(layout.ensure_document_dir("doc").unwrap().is_dir());
    }
}
