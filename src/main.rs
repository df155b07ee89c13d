use about_press::resolve::{self, Overrides, ScopeContext};
use about_press::snapshot::{self, FileProvider};
use about_press::{config, content, cycle, output, revalidate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Per-invocation setting overrides.
#[derive(clap::Args, Clone)]
struct SetArgs {
    /// Override a setting for this run (e.g. --set REVALIDATE_SECONDS=120)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = resolve::parse_assignment)]
    set: Vec<(String, String)>,
}

impl SetArgs {
    fn overrides(&self) -> Overrides {
        self.set.iter().cloned().collect()
    }
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "about-press")]
#[command(about = "Build-time generator for a static site's About page")]
#[command(long_about = "\
Build-time generator for a static site's About page

Each build is one regeneration cycle: the site snapshot is fetched once,
settings are resolved, the page is composed from the content model and
published atomically together with its revalidation interval.

Content structure:

  content/
  ├── config.toml        # Page settings (optional)
  ├── content.toml       # Tags, skills, cards, prose (optional)
  ├── data/
  │   └── about.json     # Site snapshot for the 'about' scope
  └── assets/            # Copied to the output root

Setting resolution (first non-blank value wins):
  --set KEY=VALUE → snapshot config bag → compiled-in default

Revalidation interval (first positive integer wins):
  REVALIDATE_SECONDS → [revalidate] default_seconds → 60

Run 'about-press gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Scope label passed to the data provider
    #[arg(long, default_value = "about", global = true)]
    scope: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one regeneration cycle and publish the page
    Build(SetArgs),
    /// Fetch and compose without writing anything
    Check(SetArgs),
    /// Print the revalidation interval and where it came from
    Interval(SetArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let provider = FileProvider::new(cli.source.join("data"));

    match cli.command {
        Command::Build(set_args) => {
            let site = config::load_config(&cli.source)?;
            let content = content::load_content(&cli.source)?;
            let overrides = set_args.overrides();
            let request = cycle::CycleRequest {
                scope_label: &cli.scope,
                overrides: &overrides,
                site: &site,
                content: &content,
                source_dir: &cli.source,
                output_dir: &cli.output,
            };

            println!(
                "==> Fetching '{}' from {}",
                cli.scope,
                provider.dir().display()
            );
            let outcome = cycle::run_cycle(&provider, &request)?;
            output::print_cycle(&outcome);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check(set_args) => {
            let site = config::load_config(&cli.source)?;
            let content = content::load_content(&cli.source)?;
            let overrides = set_args.overrides();
            let request = cycle::CycleRequest {
                scope_label: &cli.scope,
                overrides: &overrides,
                site: &site,
                content: &content,
                source_dir: &cli.source,
                output_dir: &cli.output,
            };

            println!("==> Checking {}", cli.source.display());
            let rendered = cycle::compose_once(&provider, &request)?;
            output::print_render(&rendered);
            println!("==> Content is valid");
        }
        Command::Interval(set_args) => {
            let site = config::load_config(&cli.source)?;
            let overrides = set_args.overrides();
            let snapshot = snapshot::fetch_snapshot(&provider, &cli.scope)?;
            let scope = ScopeContext {
                overrides: &overrides,
                snapshot: &snapshot,
                site: &site,
            };
            output::print_interval_report(&revalidate::compute_interval(&scope));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
