//! Shared types flowing between the content source and the renderers.
//!
//! Everything here is deserialized from the content directory (page
//! descriptors, promo definitions, newsletter snapshots) or assembled from
//! it (`PartialData`), then handed to the composition layer read-only.

use serde::{Deserialize, Serialize};

/// Page-level metadata, deserialized from `pages/{key}.json`.
///
/// A page resolves its main content from exactly one of three places, in
/// this order of precedence: `partial_groups`, `partials`, or the embedded
/// `content` string. The composer handles all three shapes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageInfo {
    pub title: String,
    pub description: String,
    /// Markdown embedded directly in the descriptor. Shown before any
    /// flat partials when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Source identifier recorded alongside embedded content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub has_in_page_nav: bool,
    /// Marks the main content band as grid-styled.
    pub has_grid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_logo: Option<String>,
    /// Flat partial refs, resolved against `partials/{ref}.md`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partials: Option<Vec<String>>,
    /// Named partial groups. Take precedence over `partials` when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_groups: Option<Vec<PartialGroupRef>>,
    /// Promo refs rendered before the main content, in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub promo_before: Vec<String>,
    /// Promo refs rendered after the main content, in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub promo_after: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub youtube: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub twitter: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stackexchange: Vec<String>,
    /// Set by the loader when draft content was resolved.
    #[serde(skip)]
    pub preview: bool,
}

/// An ordered bundle of content blocks as three parallel sequences.
///
/// Invariant: `content`, `titles`, and `file_names` always have identical
/// length with index-aligned correspondence. An empty string in `titles`
/// means "untitled block" — the block renders without a section heading
/// and gets no in-page nav entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialData {
    pub content: Vec<String>,
    pub titles: Vec<String>,
    pub file_names: Vec<String>,
}

impl PartialData {
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Append one block, keeping the three sequences aligned.
    pub fn push(
        &mut self,
        content: impl Into<String>,
        title: impl Into<String>,
        file_name: impl Into<String>,
    ) {
        self.content.push(content.into());
        self.titles.push(title.into());
        self.file_names.push(file_name.into());
    }

    /// Return a new bundle with one block prepended. The receiver is left
    /// untouched, so callers holding the original never observe the
    /// injected block on a later render.
    #[must_use]
    pub fn prepended(
        &self,
        content: impl Into<String>,
        title: impl Into<String>,
        file_name: impl Into<String>,
    ) -> PartialData {
        let mut out = PartialData {
            content: Vec::with_capacity(self.len() + 1),
            titles: Vec::with_capacity(self.len() + 1),
            file_names: Vec::with_capacity(self.len() + 1),
        };
        out.push(content, title, file_name);
        out.content.extend(self.content.iter().cloned());
        out.titles.extend(self.titles.iter().cloned());
        out.file_names.extend(self.file_names.iter().cloned());
        out
    }
}

/// A partial group as written in a page descriptor: a section title plus
/// the refs of the partials it contains.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialGroupRef {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub partials: Vec<String>,
}

/// A resolved partial group: the ref's title and description with its
/// partials expanded into a [`PartialData`] bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePartialGroup {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub partials: PartialData,
}

/// A promotional insert, deserialized from `promos/{key}.json`.
/// Consumed read-only; image side alternates by position parity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCard {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub link_text: String,
    pub link_href: String,
}

/// A generable newsletter route. Year and month stay zero-padded strings
/// ("2024", "03") because they double as directory and file names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterPath {
    pub year: String,
    pub month: String,
}

/// One story inside a monthly newsletter snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterStory {
    pub title: String,
    pub summary: String,
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A pre-generated monthly snapshot, read from `newsletter/{year}/{month}.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSnapshot {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub stories: Vec<NewsletterStory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_sequences_aligned() {
        let mut data = PartialData::default();
        data.push("body", "Title", "file");
        data.push("more", "", "other");
        assert_eq!(data.len(), 2);
        assert_eq!(data.content.len(), data.titles.len());
        assert_eq!(data.titles.len(), data.file_names.len());
    }

    #[test]
    fn prepended_returns_new_bundle_with_block_first() {
        let mut data = PartialData::default();
        data.push("second", "Two", "b");

        let out = data.prepended("first", "", "a");
        assert_eq!(out.content, vec!["first", "second"]);
        assert_eq!(out.titles, vec!["", "Two"]);
        assert_eq!(out.file_names, vec!["a", "b"]);
    }

    #[test]
    fn prepended_leaves_original_untouched() {
        let mut data = PartialData::default();
        data.push("second", "Two", "b");

        let _ = data.prepended("first", "", "a");
        assert_eq!(data.content, vec!["second"]);
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn prepended_on_empty_bundle() {
        let out = PartialData::default().prepended("only", "", "f");
        assert_eq!(out.len(), 1);
        assert_eq!(out.content, vec!["only"]);
        assert_eq!(out.titles, vec![""]);
        assert_eq!(out.file_names, vec!["f"]);
    }

    #[test]
    fn page_info_deserializes_sparse_descriptor() {
        let info: PageInfo = serde_json::from_str(r#"{"title": "Downloads"}"#).unwrap();
        assert_eq!(info.title, "Downloads");
        assert!(info.content.is_none());
        assert!(info.partials.is_none());
        assert!(info.partial_groups.is_none());
        assert!(!info.has_in_page_nav);
        assert!(!info.has_grid);
        assert!(info.promo_after.is_empty());
    }

    #[test]
    fn page_info_camel_case_fields() {
        let info: PageInfo = serde_json::from_str(
            r#"{"title": "T", "hasInPageNav": true, "hasGrid": true, "fileName": "t.md", "promoAfter": ["opensource"]}"#,
        )
        .unwrap();
        assert!(info.has_in_page_nav);
        assert!(info.has_grid);
        assert_eq!(info.file_name.as_deref(), Some("t.md"));
        assert_eq!(info.promo_after, vec!["opensource"]);
    }
}
