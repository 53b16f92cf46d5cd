//! Content composition and page layout.
//!
//! The composer merges page metadata, markdown partials, and grouped
//! partials into one navigable layout. It is where the three content
//! shapes meet:
//!
//! - **Grouped**: named sections, each with its own heading and partial
//!   bundle. Takes precedence whenever present.
//! - **Flat**: a single ordered partial bundle.
//! - **Empty**: neither source supplied — an authoring mistake, reported
//!   as a diagnostic value rather than an error so one bad descriptor
//!   degrades to an empty page instead of failing the build.
//!
//! Embedded page content (the descriptor's `content` field) is injected as
//! the first block of the Flat shape via copy-then-prepend; the caller's
//! bundle is never mutated. Injection intentionally does not compose with
//! the Grouped shape.
//!
//! ## Layout
//!
//! Top to bottom: promos-before (image side alternating by index parity),
//! the main grid row (in-page nav when enabled, main content spanning the
//! remaining columns), promos-after, and the social-feed panel. The
//! `has_grid` background treatment wraps the main content band only.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::section_id::derive_section_id;
use crate::types::{PageInfo, PagePartialGroup, PartialData, PromoCard};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use thiserror::Error;

/// Why a composition produced an empty main region.
///
/// Deliberately not an `Err`: a missing content source is an authoring
/// mistake on one page, and the caller decides whether to log it, surface
/// it in a check run, or ignore it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeDiagnostic {
    #[error("page supplies neither partials nor partial groups")]
    MissingContentSource,
}

/// Everything the composer needs for one page render.
pub struct ComposeInput<'a> {
    pub page_info: &'a PageInfo,
    pub partials: Option<&'a PartialData>,
    pub partial_groups: Option<&'a [PagePartialGroup]>,
    /// Grid background treatment for the main band. Seeded from the
    /// descriptor's `hasGrid` flag by [`ComposeInput::new`].
    pub has_grid: bool,
    pub promo_before: &'a [PromoCard],
    pub promo_after: &'a [PromoCard],
    /// Used verbatim in place of the built-in in-page nav when supplied.
    pub custom_nav: Option<Markup>,
    /// Namespace seed for section anchor ids, normally the page key.
    pub id_seed: &'a str,
}

impl<'a> ComposeInput<'a> {
    pub fn new(page_info: &'a PageInfo, id_seed: &'a str) -> Self {
        ComposeInput {
            page_info,
            partials: None,
            partial_groups: None,
            has_grid: page_info.has_grid,
            promo_before: &[],
            promo_after: &[],
            custom_nav: None,
            id_seed,
        }
    }
}

/// A composed page body plus what the composer derived along the way.
pub struct Composed {
    pub body: Markup,
    /// Section titles in render order, empty strings preserved for
    /// untitled blocks. Feeds the in-page nav.
    pub nav_titles: Vec<String>,
    pub diagnostic: Option<ComposeDiagnostic>,
}

/// The resolved content shape. Selection happens in exactly one place
/// ([`ContentShape::resolve`]) so precedence is explicit.
enum ContentShape {
    Grouped(Vec<PagePartialGroup>),
    Flat(PartialData),
    Empty,
}

impl ContentShape {
    /// Groups win over flat partials whenever both are present; embedded
    /// page content is injected into the Flat shape only.
    fn resolve(input: &ComposeInput) -> ContentShape {
        if let Some(groups) = input.partial_groups {
            return ContentShape::Grouped(groups.to_vec());
        }
        if let Some(partials) = input.partials {
            return ContentShape::Flat(inject_page_content(input.page_info, Some(partials)));
        }
        ContentShape::Empty
    }

    fn nav_titles(&self) -> Vec<String> {
        match self {
            ContentShape::Grouped(groups) => groups.iter().map(|g| g.title.clone()).collect(),
            ContentShape::Flat(partials) => partials.titles.clone(),
            ContentShape::Empty => Vec::new(),
        }
    }
}

/// Inject a page's embedded content as the first block of a partial bundle.
///
/// Copy-then-prepend: the caller's bundle is cloned, never mutated, so a
/// cached `PartialData` reused across renders stays pristine. The injected
/// block gets an empty title (the page's own title is never repeated as a
/// section heading) and the page's `file_name` as its source id. With no
/// bundle supplied an empty one is synthesized first.
pub fn inject_page_content(page_info: &PageInfo, partials: Option<&PartialData>) -> PartialData {
    let base = partials.cloned().unwrap_or_default();
    match &page_info.content {
        Some(content) => base.prepended(
            content.clone(),
            "",
            page_info.file_name.clone().unwrap_or_default(),
        ),
        None => base,
    }
}

/// Compose one page body from its content sources.
///
/// Never fails: the missing-content case is reported through
/// [`Composed::diagnostic`] alongside an empty main region.
pub fn compose(input: ComposeInput) -> Composed {
    let shape = ContentShape::resolve(&input);
    let diagnostic = match shape {
        ContentShape::Empty => Some(ComposeDiagnostic::MissingContentSource),
        _ => None,
    };
    let nav_titles = shape.nav_titles();

    let nav = match input.custom_nav {
        Some(markup) => markup,
        None => render_in_page_nav(&nav_titles, input.id_seed),
    };

    let main = render_shape(&shape, input.id_seed);
    let show_nav = input.page_info.has_in_page_nav;

    let body = html! {
        @if !input.promo_before.is_empty() {
            div.container {
                @for (i, promo) in input.promo_before.iter().enumerate() {
                    (render_promo_card(promo, i % 2 == 0))
                }
            }
        }
        div class=(if input.has_grid { "content-band has-grid" } else { "content-band" }) {
            div.container {
                div.content-grid {
                    @if show_nav { (nav) }
                    div class=(if show_nav { "content-main col-span-3" } else { "content-main col-span-4" }) {
                        (main)
                    }
                }
            }
        }
        div.container {
            @for (i, promo) in input.promo_after.iter().enumerate() {
                (render_promo_card(promo, i % 2 == 0))
            }
            (render_social_feeds(input.page_info))
        }
    };

    Composed {
        body,
        nav_titles,
        diagnostic,
    }
}

// ============================================================================
// Content renderers
// ============================================================================

fn render_shape(shape: &ContentShape, id_seed: &str) -> Markup {
    match shape {
        ContentShape::Grouped(groups) => html! {
            div.vertical-group {
                @for group in groups {
                    (render_group(group, id_seed))
                }
            }
        },
        ContentShape::Flat(partials) => render_partial_data(partials, id_seed, 2),
        ContentShape::Empty => html! {},
    }
}

fn render_group(group: &PagePartialGroup, id_seed: &str) -> Markup {
    html! {
        section.partial-group {
            h2.section-heading id=(derive_section_id(&group.title, id_seed)) {
                (group.title)
            }
            @if let Some(description) = &group.description {
                p.section-description { (description) }
            }
            // Block headings nest one level below the group heading
            (render_partial_data(&group.partials, id_seed, 3))
        }
    }
}

/// Render a flat bundle: per-block heading (skipped for untitled blocks)
/// followed by the block's markdown.
fn render_partial_data(partials: &PartialData, id_seed: &str, heading_level: u8) -> Markup {
    html! {
        @for (i, content) in partials.content.iter().enumerate() {
            @let title = partials.titles.get(i).map(String::as_str).unwrap_or("");
            div.partial data-source=(partials.file_names.get(i).map(String::as_str).unwrap_or("")) {
                @if !title.is_empty() {
                    @let id = derive_section_id(title, id_seed);
                    @if heading_level == 2 {
                        h2.section-heading id=(id) { (title) }
                    } @else {
                        h3.section-heading id=(id) { (title) }
                    }
                }
                (render_markdown(content))
            }
        }
    }
}

/// Markdown to HTML. pulldown-cmark escapes what needs escaping; the
/// result is trusted generated markup.
pub fn render_markdown(markdown: &str) -> Markup {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    PreEscaped(out)
}

// ============================================================================
// Layout components
// ============================================================================

/// The built-in in-page navigation: one anchor link per titled section.
/// Untitled blocks keep their position in `nav_titles` but get no link.
pub fn render_in_page_nav(titles: &[String], id_seed: &str) -> Markup {
    html! {
        nav.in-page-nav {
            ul {
                @for title in titles.iter().filter(|t| !t.is_empty()) {
                    li {
                        a href={ "#" (derive_section_id(title, id_seed)) } { (title) }
                    }
                }
            }
        }
    }
}

fn render_promo_card(promo: &PromoCard, image_left: bool) -> Markup {
    let side_class = if image_left {
        "promo-card image-left"
    } else {
        "promo-card image-right"
    };
    html! {
        div class=(side_class) {
            @if let Some(image) = &promo.image {
                img.promo-image src=(image) alt=(promo.title) loading="lazy";
            }
            div.promo-body {
                h3 { (promo.title) }
                p { (promo.description) }
                a.promo-link href=(promo.link_href) { (promo.link_text) }
            }
        }
    }
}

/// Link panel for the page's social source lists. Renders nothing when all
/// lists are empty; no network fetching happens at build time.
fn render_social_feeds(page_info: &PageInfo) -> Markup {
    if page_info.youtube.is_empty()
        && page_info.twitter.is_empty()
        && page_info.stackexchange.is_empty()
    {
        return html! {};
    }
    html! {
        section.social-feeds {
            (social_feed_list("YouTube", "youtube", &page_info.youtube))
            (social_feed_list("Twitter", "twitter", &page_info.twitter))
            (social_feed_list("Stack Exchange", "stackexchange", &page_info.stackexchange))
        }
    }
}

fn social_feed_list(label: &str, class: &str, sources: &[String]) -> Markup {
    if sources.is_empty() {
        return html! {};
    }
    html! {
        div class={ "social-feed " (class) } {
            h3 { (label) }
            ul {
                @for source in sources {
                    li { a href=(source) rel="noopener" { (source) } }
                }
            }
        }
    }
}

/// Hero banner: page title, description, optional hero image and product
/// logo, matching the descriptor's metadata.
pub fn render_hero(page_info: &PageInfo) -> Markup {
    html! {
        header.hero {
            @if let Some(logo) = &page_info.product_logo {
                img.product-logo src=(logo) alt="";
            }
            h1 { (page_info.title) }
            @if !page_info.description.is_empty() {
                p.hero-description { (page_info.description) }
            }
            @if let Some(image) = &page_info.hero_image {
                img.hero-image src=(image) alt=(page_info.title);
            }
        }
    }
}

/// The base HTML document shared by all pages.
pub fn base_document(title: &str, description: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if !description.is_empty() {
                    meta name="description" content=(description);
                }
                title { (title) }
                style { (css) }
            }
            body {
                (content)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
