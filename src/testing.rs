//! In-memory collaborators for pipeline tests.

use anyhow::{anyhow, Result};
use image::RgbImage;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

use crate::ocr::TextRecognizer;
use crate::render::PageRenderer;

/// Replies with queued strings in call order, then empty strings.
pub struct ScriptedOcr {
    replies: RefCell<VecDeque<String>>,
}

impl ScriptedOcr {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: RefCell::new(replies.iter().map(|r| r.to_string()).collect()),
        }
    }
}

impl TextRecognizer for ScriptedOcr {
    fn recognize_text(&self, _image: &RgbImage) -> Result<String> {
        Ok(self.replies.borrow_mut().pop_front().unwrap_or_default())
    }
}

/// Serves pre-built page rasters keyed by document file name.
#[derive(Default)]
pub struct MemoryRenderer {
    documents: HashMap<String, Vec<RgbImage>>,
    broken_pages: HashSet<(String, usize)>,
}

impl MemoryRenderer {
    pub fn with_document(mut self, name: &str, pages: Vec<RgbImage>) -> Self {
        self.documents.insert(name.to_string(), pages);
        self
    }

    /// Makes `render_page` fail for one page while the count stays unchanged.
    pub fn with_broken_page(mut self, name: &str, page_index: usize) -> Self {
        self.broken_pages.insert((name.to_string(), page_index));
        self
    }

    fn pages(&self, document: &Path) -> Result<&Vec<RgbImage>> {
        let name = document
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.documents
            .get(&name)
            .ok_or_else(|| anyhow!("unknown document {}", PathBuf::from(document).display()))
    }
}

impl PageRenderer for MemoryRenderer {
    fn page_count(&self, document: &Path) -> Result<usize> {
        Ok(self.pages(document)?.len())
    }

    fn render_page(&self, document: &Path, page_index: usize) -> Result<RgbImage> {
        let name = document
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.broken_pages.contains(&(name, page_index)) {
            return Err(anyhow!("page {} could not be rasterized", page_index));
        }

        self.pages(document)?
            .get(page_index)
            .cloned()
            .ok_or_else(|| anyhow!("page {} out of range", page_index))
    }
}
