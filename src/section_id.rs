//! Stable anchor identifiers for in-page navigation.
//!
//! Section headings and their nav links must agree on an `id` across
//! renders, so the id is derived deterministically from the heading title
//! plus a namespace seed (the page key). Same input, same output — links
//! stay valid no matter how often the page is regenerated.

/// Derive a section anchor id from a heading title and a namespace seed.
///
/// The title is lower-cased and every character outside `[a-z0-9]` becomes
/// a hyphen; the seed is prefixed with a hyphen separator:
///
/// - `("Install Guide", "downloads")` → `"downloads-install-guide"`
/// - `("FAQ & Tips", "downloads")` → `"downloads-faq---tips"`
///
/// Collisions between similar titles are tolerated — anchors only need to
/// be stable, not unique. The normalized portion is a fixed point: feeding
/// an already-derived id back in just re-prefixes the seed.
pub fn derive_section_id(title: &str, id_seed: &str) -> String {
    let normalized: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '-' })
        .collect();
    format!("{id_seed}-{normalized}")
}
