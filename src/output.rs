//! CLI output formatting.
//!
//! Every command has a `format_*` function that returns lines (pure, no I/O)
//! and a `print_*` wrapper that writes them to stdout. Entities lead with a
//! 1-based, 3-digit positional index; secondary details go on indented lines.
//!
//! ## List
//!
//! ```text
//! Gallery (3 images)
//! 001 a.png
//!     Link: #l836h4zm
//! 002 b.png
//!     Link: #at8z2t4j
//! ```
//!
//! ## Replay
//!
//! ```text
//! start        closed             #
//! tile:b.png   open 002 b.png     #at8z2t4j
//! next         open 003 c.png     #zehore9c
//! ```

use crate::alias;
use crate::config::SiteConfig;
use crate::manifest::LoadOutcome;
use crate::router::ViewerState;
use crate::state::GalleryState;

/// Format a 0-based position as a 1-based, 3-digit zero-padded index.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos + 1)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 image`, `3 images`.
fn images(count: usize) -> String {
    match count {
        1 => "1 image".to_string(),
        n => format!("{n} images"),
    }
}

/// Shareable link for an alias, relative (`#alias`) or absolute.
pub fn share_link(base_url: Option<&str>, alias: &str) -> String {
    match base_url {
        Some(base) => format!("{}#{}", base.split('#').next().unwrap_or(base), alias),
        None => format!("#{alias}"),
    }
}

// ============================================================================
// alias
// ============================================================================

/// One `alias  filename` line per input.
pub fn format_alias_output<S: AsRef<str>>(filenames: &[S]) -> Vec<String> {
    filenames
        .iter()
        .map(|f| format!("{}  {}", alias::encode(f.as_ref()), f.as_ref()))
        .collect()
}

pub fn print_alias_output<S: AsRef<str>>(filenames: &[S]) {
    for line in format_alias_output(filenames) {
        println!("{line}");
    }
}

// ============================================================================
// list
// ============================================================================

/// Gallery contents in order, with the shareable link of each image.
pub fn format_list_output(gallery: &GalleryState, base_url: Option<&str>) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("Gallery ({})", images(gallery.len())));
    for (pos, (alias, filename)) in gallery.entries().enumerate() {
        lines.push(format!("{} {}", format_index(pos), filename));
        lines.push(format!(
            "{}Link: {}",
            indent(1),
            share_link(base_url, alias.as_str())
        ));
    }
    lines
}

pub fn print_list_output(gallery: &GalleryState, base_url: Option<&str>) {
    for line in format_list_output(gallery, base_url) {
        println!("{line}");
    }
}

// ============================================================================
// Load outcome
// ============================================================================

/// Describe a manifest load, including the placeholder text a page would show.
pub fn format_load_outcome(outcome: &LoadOutcome, config: &SiteConfig) -> Vec<String> {
    match outcome {
        LoadOutcome::NotLoaded => vec!["Manifest not loaded".to_string()],
        LoadOutcome::Loaded { count } => {
            vec![format!("Loaded {} from {}", images(*count), config.manifest_url())]
        }
        LoadOutcome::Empty => vec![
            format!("Manifest {} is empty", config.manifest_url()),
            format!("{}Placeholder: {}", indent(1), config.placeholders.empty),
        ],
        LoadOutcome::Unavailable(e) => vec![
            format!("Manifest unavailable: {e}"),
            format!(
                "{}Placeholder: {}",
                indent(1),
                config.placeholders.unavailable
            ),
        ],
    }
}

pub fn print_load_outcome(outcome: &LoadOutcome, config: &SiteConfig) {
    for line in format_load_outcome(outcome, config) {
        println!("{line}");
    }
}

// ============================================================================
// replay
// ============================================================================

/// Describe the viewer: `closed` or `open 002 b.png`.
pub fn format_viewer(state: ViewerState, gallery: &GalleryState) -> String {
    match state.current_index() {
        Some(index) => match gallery.at(index) {
            Some(filename) => format!("open {} {}", format_index(index), filename),
            None => format!("open {}", format_index(index)),
        },
        None => "closed".to_string(),
    }
}

/// One replay transcript line: step, viewer, fragment.
pub fn format_replay_line(
    step: &str,
    state: ViewerState,
    gallery: &GalleryState,
    fragment: &str,
) -> String {
    format!("{:<16} {:<28} #{}", step, format_viewer(state, gallery), fragment)
}

pub fn print_replay_line(step: &str, state: ViewerState, gallery: &GalleryState, fragment: &str) {
    println!("{}", format_replay_line(step, state, gallery, fragment));
}
