//! Content loading.
//!
//! The content directory is the data source. Page descriptors, markdown
//! partials, promo definitions, and newsletter snapshots all live under a
//! fixed layout:
//!
//! ```text
//! content/
//! ├── config.toml                  # Site config (optional)
//! ├── assets/                      # Copied verbatim to the output root
//! ├── pages/
//! │   ├── index.json               # Descriptor for the home page
//! │   ├── downloads.json           # Descriptor (title, partial refs, promos)
//! │   └── downloads.preview.json   # Draft descriptor, preview mode only
//! ├── partials/
//! │   └── downloads/
//! │       ├── intro.md             # Fragment addressed as "downloads/intro"
//! │       └── intro.preview.md     # Draft fragment, preview mode only
//! ├── promos/
//! │   └── opensource.json          # PromoCard definition
//! └── newsletter/
//!     └── 2024/
//!         └── 03.json              # Snapshot for March 2024
//! ```
//!
//! ## Preview Mode
//!
//! With the preview flag set, the loader prefers `*.preview.json` /
//! `*.preview.md` siblings over their published counterparts, falling back
//! to the published file when no draft exists. Published builds never see
//! draft files.
//!
//! ## The `ContentSource` Seam
//!
//! All reads go through the [`ContentSource`] trait so the composer and the
//! page assemblers can be exercised against an in-memory fake instead of
//! real filesystem state. [`FsContent`] is the production implementation;
//! every read is a blocking local file read scoped to one page's generation.

use crate::types::{
    NewsletterPath, NewsletterSnapshot, PageInfo, PagePartialGroup, PartialData, PartialGroupRef,
    PromoCard,
};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("page descriptor not found: {0}")]
    MissingPage(String),
    #[error("partial not found: {0}")]
    MissingPartial(String),
    #[error("promo not found: {0}")]
    MissingPromo(String),
    #[error("newsletter snapshot not found: {0}/{1}")]
    MissingSnapshot(String, String),
}

/// Read access to portal content.
///
/// `page_content` and `partial_groups` have default implementations built
/// on the other operations; implementors only supply the raw reads.
pub trait ContentSource {
    /// Keys of all generable content pages, sorted.
    fn page_keys(&self) -> Result<Vec<String>, ContentError>;

    /// Load one page's descriptor. Preview mode prefers draft descriptors.
    fn page_info(&self, key: &str, preview: bool) -> Result<PageInfo, ContentError>;

    /// Expand a list of partial refs into one ordered bundle.
    fn partials_as_array(&self, refs: &[String], preview: bool)
    -> Result<PartialData, ContentError>;

    /// Load one promo card definition.
    fn promo(&self, key: &str) -> Result<PromoCard, ContentError>;

    /// Every generable newsletter route, newest first.
    fn newsletter_paths(&self) -> Result<Vec<NewsletterPath>, ContentError>;

    /// Parse the snapshot for one year/month.
    fn newsletter_snapshot(&self, year: &str, month: &str)
    -> Result<NewsletterSnapshot, ContentError>;

    /// Materialize a page's embedded `content` as a single-block bundle.
    ///
    /// The block carries an empty title — the page's own title is never
    /// repeated as a section heading. Pages without embedded content yield
    /// an empty bundle.
    fn page_content(&self, page_info: &PageInfo) -> PartialData {
        match &page_info.content {
            Some(body) => PartialData::default().prepended(
                body.clone(),
                "",
                page_info.file_name.clone().unwrap_or_default(),
            ),
            None => PartialData::default(),
        }
    }

    /// Resolve group refs into render-ready groups, preserving order.
    fn partial_groups(
        &self,
        refs: &[PartialGroupRef],
        preview: bool,
    ) -> Result<Vec<PagePartialGroup>, ContentError> {
        refs.iter()
            .map(|group| {
                Ok(PagePartialGroup {
                    title: group.title.clone(),
                    description: group.description.clone(),
                    partials: self.partials_as_array(&group.partials, preview)?,
                })
            })
            .collect()
    }
}

/// Filesystem-backed [`ContentSource`] rooted at a content directory.
pub struct FsContent {
    root: PathBuf,
}

impl FsContent {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsContent { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read the first existing candidate path, if any.
    fn read_first(candidates: &[PathBuf]) -> Result<Option<String>, ContentError> {
        for path in candidates {
            match fs::read_to_string(path) {
                Ok(body) => return Ok(Some(body)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(None)
    }
}

impl ContentSource for FsContent {
    fn page_keys(&self) -> Result<Vec<String>, ContentError> {
        let pages_dir = self.root.join("pages");
        if !pages_dir.is_dir() {
            // A newsletter-only site has no pages/ directory
            return Ok(Vec::new());
        }

        let mut keys: Vec<String> = fs::read_dir(&pages_dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.is_file()
                    && p.extension()
                        .map(|e| e.eq_ignore_ascii_case("json"))
                        .unwrap_or(false)
            })
            .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().to_string()))
            .filter(|stem| !stem.ends_with(".preview"))
            .collect();

        keys.sort();
        Ok(keys)
    }

    fn page_info(&self, key: &str, preview: bool) -> Result<PageInfo, ContentError> {
        let pages_dir = self.root.join("pages");
        let mut candidates = Vec::new();
        if preview {
            candidates.push(pages_dir.join(format!("{key}.preview.json")));
        }
        candidates.push(pages_dir.join(format!("{key}.json")));

        let body = Self::read_first(&candidates)?
            .ok_or_else(|| ContentError::MissingPage(key.to_string()))?;
        let mut info: PageInfo = serde_json::from_str(&body)?;
        info.preview = preview;
        Ok(info)
    }

    fn partials_as_array(
        &self,
        refs: &[String],
        preview: bool,
    ) -> Result<PartialData, ContentError> {
        let partials_dir = self.root.join("partials");
        let mut data = PartialData::default();

        for partial_ref in refs {
            let mut candidates = Vec::new();
            if preview {
                candidates.push(partials_dir.join(format!("{partial_ref}.preview.md")));
            }
            candidates.push(partials_dir.join(format!("{partial_ref}.md")));

            let markdown = Self::read_first(&candidates)?
                .ok_or_else(|| ContentError::MissingPartial(partial_ref.clone()))?;
            let (title, body) = split_leading_heading(&markdown);
            data.push(body, title, partial_ref.clone());
        }

        Ok(data)
    }

    fn promo(&self, key: &str) -> Result<PromoCard, ContentError> {
        let path = self.root.join("promos").join(format!("{key}.json"));
        let body = Self::read_first(std::slice::from_ref(&path))?
            .ok_or_else(|| ContentError::MissingPromo(key.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }

    fn newsletter_paths(&self) -> Result<Vec<NewsletterPath>, ContentError> {
        let dir = self.root.join("newsletter");
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(2).max_depth(2) {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file()
                || path.extension().map(|e| e != "json").unwrap_or(true)
            {
                continue;
            }
            let (Some(year), Some(month)) = (
                path.parent()
                    .and_then(|p| p.file_name())
                    .map(|s| s.to_string_lossy().to_string()),
                path.file_stem().map(|s| s.to_string_lossy().to_string()),
            ) else {
                continue;
            };
            paths.push(NewsletterPath { year, month });
        }

        // Newest first; zero-padded strings sort the same as numbers
        paths.sort_by(|a, b| (&b.year, &b.month).cmp(&(&a.year, &a.month)));
        Ok(paths)
    }

    fn newsletter_snapshot(
        &self,
        year: &str,
        month: &str,
    ) -> Result<NewsletterSnapshot, ContentError> {
        let path = self
            .root
            .join("newsletter")
            .join(year)
            .join(format!("{month}.json"));
        let body = Self::read_first(std::slice::from_ref(&path))?
            .ok_or_else(|| ContentError::MissingSnapshot(year.to_string(), month.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Split a leading `# ` heading off a markdown fragment.
///
/// The heading becomes the block's display title; it is removed from the
/// body because the composer renders the title as its own section heading,
/// and leaving it in place would show it twice. Fragments without a leading
/// heading get an empty title (untitled block).
fn split_leading_heading(markdown: &str) -> (String, String) {
    let trimmed = markdown.trim_start();
    if let Some(rest) = trimmed.strip_prefix("# ") {
        let (title, body) = rest.split_once('\n').unwrap_or((rest, ""));
        (title.trim().to_string(), body.trim_start().to_string())
    } else {
        (String::new(), markdown.to_string())
    }
}
