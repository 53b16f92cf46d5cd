//! HTML site generation.
//!
//! Walks every generable route — content pages by key, newsletter issues
//! by year/month — renders each one through the page assemblers, and
//! writes the result under the output directory:
//!
//! ```text
//! dist/
//! ├── index.html                     # Page with key "index"
//! ├── downloads/
//! │   └── index.html                 # Every other page key
//! ├── newsletter/
//! │   └── 2024/
//! │       └── 03/
//! │           └── index.html         # One page per snapshot
//! └── favicon.svg                    # content/assets/ copied verbatim
//! ```
//!
//! Each route's generation is independent: a page whose composer result
//! carries a diagnostic still emits its (empty) page with a logged
//! warning, while a broken newsletter snapshot fails only its own route.
//!
//! CSS is assembled once per build: color custom properties generated from
//! the site config, followed by the embedded base stylesheet.

use crate::config::{self, SiteConfig};
use crate::content::{ContentError, ContentSource};
use crate::pages;
use crate::types::NewsletterPath;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Content(#[from] ContentError),
}

/// What one build produced, for CLI display.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// (page key, output path relative to the output dir), in build order.
    pub pages: Vec<(String, String)>,
    pub newsletters: Vec<NewsletterPath>,
    /// Composer diagnostics, one per degraded page.
    pub warnings: Vec<String>,
    /// Routes that failed to render and were skipped.
    pub errors: Vec<String>,
}

/// One problem found by a check run.
#[derive(Debug)]
pub struct CheckFinding {
    pub route: String,
    pub detail: String,
}

#[derive(Debug, Default)]
pub struct CheckReport {
    pub pages: usize,
    pub newsletters: usize,
    pub findings: Vec<CheckFinding>,
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// The per-build stylesheet: config-driven color properties plus the
/// embedded base styles.
pub fn site_css(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    )
}

/// Generate the full site into `output_dir`.
pub fn generate(
    source: &dyn ContentSource,
    config: &SiteConfig,
    assets_dir: Option<&Path>,
    output_dir: &Path,
    preview: bool,
) -> Result<GenerateReport, GenerateError> {
    let css = site_css(config);
    let mut report = GenerateReport::default();

    fs::create_dir_all(output_dir)?;

    for key in source.page_keys()? {
        // A route that cannot render loses only itself; the rest of the
        // build continues.
        let page = match pages::content_page(source, &key, preview, &css) {
            Ok(page) => page,
            Err(e) => {
                tracing::error!(page = %key, "{e}");
                report.errors.push(format!("{key}: {e}"));
                continue;
            }
        };
        if let Some(diagnostic) = page.diagnostic {
            tracing::warn!(page = %key, "{diagnostic}");
            report.warnings.push(format!("{key}: {diagnostic}"));
        }

        let rel = page_output_path(&key);
        let path = output_dir.join(&rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, page.document.into_string())?;
        tracing::debug!(page = %key, output = %rel, "generated");
        report.pages.push((key, rel));
    }

    for nl_path in source.newsletter_paths()? {
        let page = match pages::newsletter_month(
            source,
            Some(&nl_path.year),
            Some(&nl_path.month),
            &css,
        ) {
            Ok(page) => page,
            Err(e) => {
                tracing::error!(year = %nl_path.year, month = %nl_path.month, "{e}");
                report
                    .errors
                    .push(format!("newsletter/{}/{}: {e}", nl_path.year, nl_path.month));
                continue;
            }
        };

        let rel = format!("newsletter/{}/{}/index.html", nl_path.year, nl_path.month);
        let path = output_dir.join(&rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, page.document.into_string())?;
        tracing::debug!(year = %nl_path.year, month = %nl_path.month, "generated newsletter");
        report.newsletters.push(nl_path);
    }

    if let Some(assets) = assets_dir {
        if assets.is_dir() {
            copy_dir_recursive(assets, output_dir)?;
        }
    }

    Ok(report)
}

/// Validate every route without writing output.
///
/// A degraded page (missing content source) and a broken route (missing
/// partial, bad snapshot) both become findings; neither stops the run.
pub fn check(source: &dyn ContentSource, preview: bool) -> Result<CheckReport, GenerateError> {
    let mut report = CheckReport::default();

    let keys = source.page_keys()?;
    report.pages = keys.len();
    for key in &keys {
        match pages::content_page(source, key, preview, "") {
            Ok(page) => {
                if let Some(diagnostic) = page.diagnostic {
                    report.findings.push(CheckFinding {
                        route: key.clone(),
                        detail: diagnostic.to_string(),
                    });
                }
            }
            Err(e) => report.findings.push(CheckFinding {
                route: key.clone(),
                detail: e.to_string(),
            }),
        }
    }

    let paths = source.newsletter_paths()?;
    report.newsletters = paths.len();
    for nl_path in &paths {
        if let Err(e) =
            pages::newsletter_month(source, Some(&nl_path.year), Some(&nl_path.month), "")
        {
            report.findings.push(CheckFinding {
                route: format!("newsletter/{}/{}", nl_path.year, nl_path.month),
                detail: e.to_string(),
            });
        }
    }

    Ok(report)
}

/// Where a page key lands in the output tree. The `index` key is the site
/// root; everything else gets a pretty URL directory.
pub fn page_output_path(key: &str) -> String {
    if key == "index" {
        "index.html".to_string()
    } else {
        format!("{key}/index.html")
    }
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}
