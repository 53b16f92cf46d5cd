//! # Portalgen
//!
//! A minimal static site generator for developer-portal content sites.
//! Your filesystem is the data source: JSON descriptors define pages,
//! markdown files are the content fragments they reference, and monthly
//! JSON snapshots become the newsletter archive.
//!
//! # Architecture: Compose, Don't Template
//!
//! The interesting part of a portal is not any single page — it is how
//! pages are assembled. Every content page runs the same pipeline:
//!
//! ```text
//! 1. Load      pages/{key}.json          →  PageInfo
//! 2. Resolve   partial refs / groups     →  PartialData
//! 3. Compose   metadata + content shapes →  HTML (dist/)
//! ```
//!
//! The composer ([`compose`]) handles the three content shapes a page can
//! take — a flat partial bundle, named partial groups, or nothing at all —
//! plus embedded page content, promotional inserts, the in-page nav, and
//! the social-feed panel. Shape precedence lives in exactly one place, so
//! a page author always gets the same answer: groups win, embedded content
//! comes first, and an empty page degrades with a warning instead of
//! failing the build.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | The `ContentSource` seam — filesystem loader for descriptors, partials, promos, newsletter snapshots, with preview-mode draft resolution |
//! | [`compose`] | The content composer — shape resolution, page-content injection, and the full maud page layout |
//! | [`pages`] | Route assemblers — generic content pages and the newsletter month page |
//! | [`generate`] | Site orchestration — renders every route into `dist/`, copies assets, builds the per-site CSS |
//! | [`config`] | `config.toml` loading, validation, and color CSS generation |
//! | [`section_id`] | Stable anchor-id derivation for in-page navigation |
//! | [`types`] | Shared serialized types (`PageInfo`, `PartialData`, snapshots) |
//! | [`output`] | CLI output formatting — pure `format_*` functions with `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system, rather than Handlebars or Tera:
//!
//! - **Compile-time checking**: malformed HTML is a build error, not a runtime surprise.
//! - **Type-safe**: template variables are Rust expressions — no stringly-typed lookups.
//! - **XSS-safe by default**: all interpolation is auto-escaped.
//! - **Zero runtime files**: no template directory to ship or get out of sync.
//!
//! ## Content as Data, Not Code
//!
//! Descriptors are plain JSON and partials are plain markdown, so the
//! content directory can be produced by hand, by a CMS export, or by
//! another pipeline entirely. The generator never mutates content; every
//! build is a pure function from the content tree to the output tree.
//!
//! ## The `ContentSource` Seam
//!
//! All reads go through one trait. The composer and assemblers never touch
//! the filesystem directly, which keeps them testable against in-memory
//! fakes and keeps preview-mode draft resolution in a single place.
//!
//! ## Degrade, Don't Crash
//!
//! An authoring mistake on one page (no content sources) produces an empty
//! page and a logged warning, not a failed build. A broken newsletter
//! snapshot fails its own route only. `portalgen check` reports both
//! before anything is published.
//!
//! ## Preview Mode
//!
//! `--preview` makes the loader prefer `*.preview.json` / `*.preview.md`
//! siblings over published files. Draft content never needs a separate
//! content tree, and published builds can never pick up a draft.

pub mod compose;
pub mod config;
pub mod content;
pub mod generate;
pub mod output;
pub mod pages;
pub mod section_id;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
