//! Shared test utilities for the portalgen test suite.
//!
//! Two kinds of helpers live here:
//!
//! - Small builders (`page_info`, `flat_partials`, `grouped`, `promo`) so
//!   composer tests stay readable.
//! - [`MemoryContent`], an in-memory `ContentSource` for exercising the
//!   assemblers without filesystem state, and [`write_portal_fixture`],
//!   which writes a small but complete content tree for the filesystem
//!   loader and end-to-end tests.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::content::{ContentError, ContentSource};
use crate::types::{
    NewsletterPath, NewsletterSnapshot, PageInfo, PagePartialGroup, PartialData, PromoCard,
};

// =========================================================================
// Builders
// =========================================================================

pub fn page_info(title: &str) -> PageInfo {
    PageInfo {
        title: title.to_string(),
        ..PageInfo::default()
    }
}

/// Build a bundle from `(content, title, file_name)` triples.
pub fn flat_partials(blocks: &[(&str, &str, &str)]) -> PartialData {
    let mut data = PartialData::default();
    for (content, title, file_name) in blocks {
        data.push(*content, *title, *file_name);
    }
    data
}

pub fn grouped(title: &str, blocks: &[(&str, &str, &str)]) -> PagePartialGroup {
    PagePartialGroup {
        title: title.to_string(),
        description: None,
        partials: flat_partials(blocks),
    }
}

pub fn promo(title: &str) -> PromoCard {
    PromoCard {
        title: title.to_string(),
        description: format!("{title} description"),
        image: Some(format!("/assets/{}.png", title.to_lowercase().replace(' ', "-"))),
        link_text: "Learn more".to_string(),
        link_href: "https://example.com".to_string(),
    }
}

// =========================================================================
// In-memory content source
// =========================================================================

/// `ContentSource` backed by maps. Assembler and composer tests use this
/// instead of a real content directory.
#[derive(Default)]
pub struct MemoryContent {
    pages: BTreeMap<String, PageInfo>,
    /// ref -> (title, body)
    partials: BTreeMap<String, (String, String)>,
    promos: BTreeMap<String, PromoCard>,
    newsletters: BTreeMap<(String, String), NewsletterSnapshot>,
}

impl MemoryContent {
    pub fn add_page(&mut self, key: &str, info: PageInfo) {
        self.pages.insert(key.to_string(), info);
    }

    pub fn add_partial(&mut self, partial_ref: &str, title: &str, body: &str) {
        self.partials.insert(
            partial_ref.to_string(),
            (title.to_string(), body.to_string()),
        );
    }

    pub fn add_promo(&mut self, key: &str, title: &str) {
        self.promos.insert(key.to_string(), promo(title));
    }

    pub fn add_newsletter(&mut self, year: &str, month: &str, snapshot: NewsletterSnapshot) {
        self.newsletters
            .insert((year.to_string(), month.to_string()), snapshot);
    }
}

impl ContentSource for MemoryContent {
    fn page_keys(&self) -> Result<Vec<String>, ContentError> {
        Ok(self.pages.keys().cloned().collect())
    }

    fn page_info(&self, key: &str, preview: bool) -> Result<PageInfo, ContentError> {
        let mut info = self
            .pages
            .get(key)
            .cloned()
            .ok_or_else(|| ContentError::MissingPage(key.to_string()))?;
        info.preview = preview;
        Ok(info)
    }

    fn partials_as_array(
        &self,
        refs: &[String],
        _preview: bool,
    ) -> Result<PartialData, ContentError> {
        let mut data = PartialData::default();
        for partial_ref in refs {
            let (title, body) = self
                .partials
                .get(partial_ref)
                .ok_or_else(|| ContentError::MissingPartial(partial_ref.clone()))?;
            data.push(body.clone(), title.clone(), partial_ref.clone());
        }
        Ok(data)
    }

    fn promo(&self, key: &str) -> Result<PromoCard, ContentError> {
        self.promos
            .get(key)
            .cloned()
            .ok_or_else(|| ContentError::MissingPromo(key.to_string()))
    }

    fn newsletter_paths(&self) -> Result<Vec<NewsletterPath>, ContentError> {
        let mut paths: Vec<NewsletterPath> = self
            .newsletters
            .keys()
            .map(|(year, month)| NewsletterPath {
                year: year.clone(),
                month: month.clone(),
            })
            .collect();
        paths.sort_by(|a, b| (&b.year, &b.month).cmp(&(&a.year, &a.month)));
        Ok(paths)
    }

    fn newsletter_snapshot(
        &self,
        year: &str,
        month: &str,
    ) -> Result<NewsletterSnapshot, ContentError> {
        self.newsletters
            .get(&(year.to_string(), month.to_string()))
            .cloned()
            .ok_or_else(|| ContentError::MissingSnapshot(year.to_string(), month.to_string()))
    }
}

// =========================================================================
// Filesystem fixture
// =========================================================================

/// Write a small but complete content tree under `root`.
///
/// Covers every loader path: embedded content, flat partial refs with and
/// without headings, partial groups, preview drafts, promos, newsletter
/// snapshots across two years, and a static asset.
pub fn write_portal_fixture(root: &Path) -> std::io::Result<()> {
    let pages = root.join("pages");
    let partials = root.join("partials/downloads");
    let promos = root.join("promos");
    let assets = root.join("assets");
    fs::create_dir_all(&pages)?;
    fs::create_dir_all(&partials)?;
    fs::create_dir_all(&promos)?;
    fs::create_dir_all(&assets)?;
    fs::create_dir_all(root.join("newsletter/2024"))?;
    fs::create_dir_all(root.join("newsletter/2023"))?;

    fs::write(
        pages.join("index.json"),
        r#"{
  "title": "Developer Portal",
  "description": "Docs, downloads, and news",
  "content": "Welcome to the developer portal.",
  "fileName": "index.md"
}"#,
    )?;

    fs::write(
        pages.join("downloads.json"),
        r#"{
  "title": "Downloads",
  "description": "Get the latest releases",
  "hasInPageNav": true,
  "partials": ["downloads/intro", "downloads/notes"],
  "promoAfter": ["opensource"]
}"#,
    )?;

    fs::write(
        pages.join("downloads.preview.json"),
        r#"{
  "title": "Downloads (draft)",
  "hasInPageNav": true,
  "partials": ["downloads/intro"]
}"#,
    )?;

    fs::write(
        pages.join("getting-started.json"),
        r#"{
  "title": "Getting Started",
  "hasInPageNav": true,
  "partialGroups": [
    {
      "title": "Setup",
      "description": "First steps",
      "partials": ["downloads/intro"]
    }
  ]
}"#,
    )?;

    fs::write(
        partials.join("intro.md"),
        "# Install Guide\n\nGrab the latest build for your platform.\n",
    )?;
    fs::write(
        partials.join("intro.preview.md"),
        "# Install Guide\n\nGrab the draft build for your platform.\n",
    )?;
    fs::write(partials.join("notes.md"), "Release notes land here.\n")?;

    fs::write(
        promos.join("opensource.json"),
        r#"{
  "title": "Open Source",
  "description": "Everything is on GitHub.",
  "image": "/assets/opensource.png",
  "linkText": "Browse the code",
  "linkHref": "https://github.com/example"
}"#,
    )?;

    fs::write(
        root.join("newsletter/2024/03.json"),
        r#"{
  "title": "Spring roundup",
  "description": "What shipped this month",
  "stories": [
    { "title": "New CLI", "summary": "The CLI shipped.", "link": "https://example.com/cli" },
    { "title": "Docs refresh", "summary": "Docs got a refresh.", "link": "https://example.com/docs" }
  ]
}"#,
    )?;
    fs::write(
        root.join("newsletter/2024/04.json"),
        r#"{ "title": "April issue", "description": "", "stories": [] }"#,
    )?;
    fs::write(
        root.join("newsletter/2023/12.json"),
        r#"{ "title": "Year in review", "description": "", "stories": [] }"#,
    )?;

    fs::write(assets.join("favicon.svg"), "<svg></svg>")?;

    Ok(())
}
