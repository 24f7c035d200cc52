use clap::{Parser, Subcommand};
use deeplink_gal::fragment::{MemoryHistory, normalize};
use deeplink_gal::html::HtmlSurface;
use deeplink_gal::manifest::{FileManifestSource, LoadOutcome, ManifestSource};
use deeplink_gal::replay::{self, Step};
use deeplink_gal::session::Session;
use deeplink_gal::state::GalleryState;
use deeplink_gal::surface::RecordingSurface;
use deeplink_gal::{config, output};
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
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "deeplink-gal")]
#[command(about = "Photo gallery with shareable per-image links")]
#[command(long_about = "\
Photo gallery with shareable per-image links

Every image gets an 8-character alias derived from its filename. Opening
gallery.html#<alias> shows that image in the modal viewer, and the link keeps
working when the manifest is reordered.

Site structure:

  site/
  ├── config.toml              # Optional, overrides stock defaults
  └── gallery/
      ├── manifest.json        # [\"photo1.jpg\", \"sunset.webp\", ...]
      ├── photo1.jpg
      └── sunset.webp

Manifest order is display order and prev/next order. A missing or malformed
manifest shows the instructional placeholder; [] shows the empty one.

Replay steps:
  open:<file>  tile:<file>  next  prev  close  key:<escape|left|right>
  click:<x>/<width>  hash:<fragment>  back  forward  reload

Run 'deeplink-gal gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site root (holds config.toml and the gallery directory)
    #[arg(long, default_value = ".", global = true)]
    site: PathBuf,

    /// Log router transitions to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the alias of each filename
    Alias {
        #[arg(required = true)]
        filenames: Vec<String>,
    },
    /// List the gallery with a shareable link per image
    List {
        /// Page URL to prefix links with
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Print the filename an alias points to
    Resolve {
        /// Alias, with or without a leading '#'
        alias: String,
    },
    /// Render the gallery and modal markup as it looks for a fragment
    Render {
        /// Fragment the page is opened with
        #[arg(long, default_value = "")]
        fragment: String,
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Replay a sequence of viewer events and print each transition
    Replay {
        /// Fragment the page is opened with
        #[arg(long, default_value = "")]
        fragment: String,
        #[arg(required = true, value_name = "STEP")]
        steps: Vec<String>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Alias { filenames } => {
            output::print_alias_output(&filenames);
        }
        Command::List { base_url } => {
            let site_config = config::load_config(&cli.site)?;
            let source = FileManifestSource::for_site(&cli.site, &site_config);
            let manifest = source.fetch()?;
            if manifest.is_empty() {
                output::print_load_outcome(&LoadOutcome::Empty, &site_config);
            } else {
                let gallery = GalleryState::from_manifest(manifest);
                output::print_list_output(&gallery, base_url.as_deref());
            }
        }
        Command::Resolve { alias } => {
            let site_config = config::load_config(&cli.site)?;
            let source = FileManifestSource::for_site(&cli.site, &site_config);
            let gallery = GalleryState::from_manifest(source.fetch()?);
            match gallery.resolve_str(normalize(&alias)) {
                Some(filename) => println!("{filename}"),
                None => return Err(format!("no image with alias {alias:?}").into()),
            }
        }
        Command::Render { fragment, output } => {
            let site_config = config::load_config(&cli.site)?;
            let source = FileManifestSource::for_site(&cli.site, &site_config);
            let mut session = Session::new(
                site_config.clone(),
                HtmlSurface::new(site_config.clone()),
                MemoryHistory::new(&fragment),
            );
            session.start(&source);
            let html = session.surface().to_markup().into_string();
            match output {
                Some(path) => {
                    std::fs::write(&path, html)?;
                    output::print_load_outcome(session.outcome(), &site_config);
                    println!("==> Wrote {}", path.display());
                }
                None => println!("{html}"),
            }
        }
        Command::Replay { fragment, steps } => {
            let steps = steps
                .iter()
                .map(|s| s.parse::<Step>())
                .collect::<Result<Vec<_>, _>>()?;
            let site_config = config::load_config(&cli.site)?;
            let source = FileManifestSource::for_site(&cli.site, &site_config);
            let mut session = Session::new(
                site_config.clone(),
                RecordingSurface::new(),
                MemoryHistory::new(&fragment),
            );
            session.start(&source);
            output::print_load_outcome(session.outcome(), &site_config);
            output::print_replay_line(
                "start",
                session.state(),
                session.gallery(),
                &session.fragment(),
            );
            for step in &steps {
                replay::apply(&mut session, &source, step);
                output::print_replay_line(
                    &step.to_string(),
                    session.state(),
                    session.gallery(),
                    &session.fragment(),
                );
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins; otherwise warnings only, or debug with
/// `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "deeplink_gal=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
