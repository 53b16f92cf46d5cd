use clap::{Parser, Subcommand};
use portalgen::content::FsContent;
use portalgen::{config, generate, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "portalgen")]
#[command(about = "Static site generator for developer-portal content sites")]
#[command(long_about = "\
Static site generator for developer-portal content sites

Your filesystem is the data source. JSON descriptors define pages, markdown
files are the content fragments they reference, and monthly JSON snapshots
become the newsletter archive.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── assets/                      # Static assets → copied to output root
  ├── pages/
  │   ├── index.json               # Home page descriptor
  │   ├── downloads.json           # Page descriptor (partial refs, promos)
  │   └── downloads.preview.json   # Draft, used with --preview only
  ├── partials/
  │   └── downloads/
  │       └── intro.md             # Fragment addressed as \"downloads/intro\"
  ├── promos/
  │   └── opensource.json          # Promo card definition
  └── newsletter/
      └── 2024/
          └── 03.json              # Newsletter snapshot for March 2024

A descriptor resolves its content from embedded markdown, flat partial
refs, or named partial groups (groups win when both are present). A
partial's first '# heading' becomes its section title and in-page nav
entry.

Run 'portalgen gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Resolve draft (preview) content where it exists
    #[arg(long, global = true)]
    preview: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the HTML site from the content directory
    Build,
    /// Validate content without writing output
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let config = config::load_config(&cli.source)?;
            let source = FsContent::new(&cli.source);
            let assets = source.root().join("assets");

            println!(
                "==> Generating {} → {}",
                cli.source.display(),
                cli.output.display()
            );
            let report = generate::generate(
                &source,
                &config,
                Some(&assets),
                &cli.output,
                cli.preview,
            )?;
            output::print_generate_output(&report);
            if report.errors.is_empty() {
                println!("==> Build complete: {}", cli.output.display());
            } else {
                println!("==> Build finished with errors: {}", cli.output.display());
                std::process::exit(1);
            }
        }
        Command::Check => {
            // Loading validates config.toml as a side effect
            config::load_config(&cli.source)?;
            let source = FsContent::new(&cli.source);

            println!("==> Checking {}", cli.source.display());
            let report = generate::check(&source, cli.preview)?;
            output::print_check_output(&report);
            if !report.findings.is_empty() {
                std::process::exit(1);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
