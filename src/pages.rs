//! Route-level page assemblers.
//!
//! Every route follows the same three-step pattern at generation time:
//! load the page's descriptor, branch on where its content lives (embedded
//! string, flat partial refs, or partial groups), then hand everything to
//! the composer. The newsletter route is the odd one out: its data is a
//! pre-generated monthly JSON snapshot and it renders its own layout
//! (hero, story grid, month/year sidebar) instead of the composed one.
//!
//! Failures here are terminal for a single route only. A missing route
//! parameter or snapshot stops that page's generation; the rest of the
//! site is unaffected.

use crate::compose::{
    self, ComposeDiagnostic, ComposeInput, base_document, render_hero,
};
use crate::content::{ContentError, ContentSource};
use crate::types::{NewsletterPath, NewsletterSnapshot, PageInfo, PromoCard};
use chrono::NaiveDate;
use maud::{Markup, html};
use thiserror::Error;

/// The month/year sidebar shows this many most-recent issues, no matter
/// how far back the archive goes.
pub const NEWSLETTER_NAV_WINDOW: usize = 12;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("missing route parameter: {0}")]
    MissingParam(&'static str),
    #[error("invalid newsletter date: {year}-{month}")]
    InvalidDate { year: String, month: String },
    #[error(transparent)]
    Content(#[from] ContentError),
}

/// One fully rendered page plus what the caller may want to report.
#[derive(Debug)]
pub struct AssembledPage {
    pub title: String,
    pub document: Markup,
    pub diagnostic: Option<ComposeDiagnostic>,
}

/// Assemble a generic content page for a page key.
///
/// Content resolution: embedded `content` wins, then flat `partials` refs,
/// then an empty bundle. Partial groups, when present in the descriptor,
/// take precedence inside the composer regardless of this branch.
pub fn content_page(
    source: &dyn ContentSource,
    key: &str,
    preview: bool,
    css: &str,
) -> Result<AssembledPage, RouteError> {
    let mut page_info = source.page_info(key, preview)?;

    let partials = if page_info.content.is_some() {
        let expanded = source.page_content(&page_info);
        // The embedded content is now the bundle's first block; clear it
        // so the composer's injection step does not prepend it twice.
        page_info.content = None;
        Some(expanded)
    } else if let Some(refs) = &page_info.partials {
        Some(source.partials_as_array(refs, preview)?)
    } else {
        None
    };

    let groups = match &page_info.partial_groups {
        Some(refs) => Some(source.partial_groups(refs, preview)?),
        None => None,
    };

    let promo_before = resolve_promos(source, &page_info.promo_before)?;
    let promo_after = resolve_promos(source, &page_info.promo_after)?;

    let composed = compose::compose(ComposeInput {
        partials: partials.as_ref(),
        partial_groups: groups.as_deref(),
        promo_before: &promo_before,
        promo_after: &promo_after,
        ..ComposeInput::new(&page_info, key)
    });

    let document = base_document(
        &page_info.title,
        &page_info.description,
        css,
        html! {
            (render_hero(&page_info))
            (composed.body)
        },
    );

    Ok(AssembledPage {
        title: page_info.title,
        document,
        diagnostic: composed.diagnostic,
    })
}

fn resolve_promos(
    source: &dyn ContentSource,
    refs: &[String],
) -> Result<Vec<PromoCard>, RouteError> {
    refs.iter()
        .map(|key| source.promo(key).map_err(RouteError::from))
        .collect()
}

// ============================================================================
// Newsletter
// ============================================================================

/// Assemble one newsletter month page.
///
/// Both route parameters are required; a missing one fails this route as
/// not-found without touching any other page.
pub fn newsletter_month(
    source: &dyn ContentSource,
    year: Option<&str>,
    month: Option<&str>,
    css: &str,
) -> Result<AssembledPage, RouteError> {
    let year = year.ok_or(RouteError::MissingParam("year"))?;
    let month = month.ok_or(RouteError::MissingParam("month"))?;

    let snapshot = source.newsletter_snapshot(year, month)?;
    let display = month_display(year, month).ok_or_else(|| RouteError::InvalidDate {
        year: year.to_string(),
        month: month.to_string(),
    })?;

    let mut paths = source.newsletter_paths()?;
    paths.truncate(NEWSLETTER_NAV_WINDOW);

    let page_info = PageInfo {
        title: newsletter_title(&display, &snapshot.title),
        description: snapshot.description.clone(),
        has_in_page_nav: false,
        ..PageInfo::default()
    };

    let document = base_document(
        &page_info.title,
        &page_info.description,
        css,
        html! {
            (render_hero(&page_info))
            div.container {
                div.content-grid {
                    (render_newsletter_nav(&paths, year, month))
                    div.content-main.col-span-3 {
                        (render_story_grid(&snapshot))
                    }
                }
            }
        },
    );

    Ok(AssembledPage {
        title: page_info.title,
        document,
        diagnostic: None,
    })
}

/// Canonical "Month Year" display for a route pair.
///
/// The day is pinned to the 3rd so a timezone shift can never roll the
/// date into the previous month. Returns `None` for unparsable pairs.
fn month_display(year: &str, month: &str) -> Option<String> {
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, 3)?;
    Some(date.format("%B %Y").to_string())
}

fn newsletter_title(display: &str, snapshot_title: &str) -> String {
    if snapshot_title.is_empty() {
        format!("Newsletter - {display}")
    } else {
        format!("{snapshot_title} - {display}")
    }
}

/// The month/year sidebar. Entries link to their issue; the current issue
/// is marked, matching the in-page nav's current-item convention.
fn render_newsletter_nav(paths: &[NewsletterPath], year: &str, month: &str) -> Markup {
    html! {
        nav.newsletter-nav {
            ul {
                @for path in paths {
                    @let is_current = path.year == year && path.month == month;
                    @let label = month_display(&path.year, &path.month)
                        .unwrap_or_else(|| format!("{}/{}", path.month, path.year));
                    li class=[is_current.then_some("current")] {
                        a href={ "/newsletter/" (path.year) "/" (path.month) "/" } { (label) }
                    }
                }
            }
        }
    }
}

fn render_story_grid(snapshot: &NewsletterSnapshot) -> Markup {
    html! {
        div.story-grid {
            @for story in &snapshot.stories {
                article.newsletter-story {
                    @if let Some(image) = &story.image {
                        img src=(image) alt=(story.title) loading="lazy";
                    }
                    h3 { a href=(story.link) { (story.title) } }
                    p { (story.summary) }
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
