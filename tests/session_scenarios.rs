//! End-to-end viewer scenarios: a page session driven the way a visitor
//! drives it, from shared link to back button.

use deeplink_gal::alias::encode;
use deeplink_gal::config::{self, SiteConfig};
use deeplink_gal::fragment::MemoryHistory;
use deeplink_gal::html::HtmlSurface;
use deeplink_gal::input::{ClickTarget, InputEvent, Key};
use deeplink_gal::manifest::{FileManifestSource, LoadOutcome, StaticManifestSource};
use deeplink_gal::router::ViewerState;
use deeplink_gal::session::Session;
use deeplink_gal::surface::{Placeholder, RecordingSurface, SurfaceOp};
use std::fs;
use tempfile::TempDir;

fn abc() -> StaticManifestSource {
    StaticManifestSource::from_filenames(["a.png", "b.png", "c.png"])
}

fn session(initial: &str) -> Session<RecordingSurface, MemoryHistory> {
    Session::new(
        SiteConfig::default(),
        RecordingSurface::new(),
        MemoryHistory::new(initial),
    )
}

/// A site root with `gallery/manifest.json` holding `body`.
fn site_with_manifest(body: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("gallery")).unwrap();
    fs::write(tmp.path().join("gallery/manifest.json"), body).unwrap();
    tmp
}

fn file_source(root: &std::path::Path) -> FileManifestSource {
    FileManifestSource::for_site(root, &config::load_config(root).unwrap())
}

// =========================================================================
// Open, navigate, wrap
// =========================================================================

#[test]
fn open_then_next_wraps_around() {
    let mut s = session("");
    s.start(&abc());

    assert!(s.open_by_filename("b.png"));
    assert_eq!(s.fragment(), encode("b.png").as_str());
    assert_eq!(s.surface().modal().map(|m| m.src.as_str()), Some("gallery/b.png"));

    s.navigate_next();
    assert_eq!(s.current_filename(), Some("c.png"));
    assert_eq!(s.fragment(), encode("c.png").as_str());

    s.navigate_next();
    assert_eq!(s.current_filename(), Some("a.png"));
    assert_eq!(s.fragment(), encode("a.png").as_str());
}

#[test]
fn open_unknown_filename_keeps_state() {
    let mut s = session("");
    s.start(&abc());
    s.open_by_filename("a.png");

    assert!(!s.open_by_filename("zzz.png"));
    assert_eq!(s.state(), ViewerState::Open { index: 0 });
    assert_eq!(s.fragment(), encode("a.png").as_str());
}

#[test]
fn unknown_alias_in_fragment_closes_viewer() {
    let mut s = session("");
    s.start(&abc());
    s.open_by_filename("a.png");

    s.on_fragment_changed("#zzzzzzzz");
    assert_eq!(s.state(), ViewerState::Closed);
    assert!(!s.surface().is_modal_visible());
    assert_eq!(s.fragment(), "");
}

#[test]
fn shared_link_with_unknown_alias_shows_grid_only() {
    let mut s = session("#notanimg");
    s.start(&abc());
    assert_eq!(s.state(), ViewerState::Closed);
    assert!(!s.surface().is_modal_visible());
    // The dead fragment is cleared without a new history entry.
    assert_eq!(s.history().len(), 1);
    assert_eq!(s.fragment(), "");
}

// =========================================================================
// Keyboard and pointer
// =========================================================================

#[test]
fn visitor_flow_with_keys_and_clicks() {
    let mut s = session("");
    s.start(&abc());

    s.dispatch(InputEvent::TileActivated("a.png".to_string()));
    assert_eq!(s.current_filename(), Some("a.png"));

    s.dispatch(InputEvent::Key(Key::ArrowLeft));
    assert_eq!(s.current_filename(), Some("c.png"));

    // Left half of the modal goes back.
    s.dispatch(InputEvent::ModalClick {
        target: ClickTarget::Background,
        x: 50.0,
        modal_left: 0.0,
        modal_width: 900.0,
    });
    assert_eq!(s.current_filename(), Some("b.png"));

    // Clicking the image itself does nothing.
    s.dispatch(InputEvent::ModalClick {
        target: ClickTarget::Image,
        x: 50.0,
        modal_left: 0.0,
        modal_width: 900.0,
    });
    assert_eq!(s.current_filename(), Some("b.png"));

    s.dispatch(InputEvent::ModalClick {
        target: ClickTarget::CloseControl,
        x: 0.0,
        modal_left: 0.0,
        modal_width: 900.0,
    });
    assert_eq!(s.state(), ViewerState::Closed);
    assert_eq!(s.fragment(), "");
}

#[test]
fn image_context_menu_is_suppressed() {
    let mut s = session("");
    s.start(&abc());
    assert!(s.dispatch(InputEvent::ContextMenu { on_image: true }).prevent_default);
    assert!(!s.dispatch(InputEvent::ContextMenu { on_image: false }).prevent_default);
    assert!(s.dispatch(InputEvent::DragStart { on_image: true }).prevent_default);
}

#[test]
fn keys_ignored_while_closed() {
    let mut s = session("");
    s.start(&abc());
    s.dispatch(InputEvent::Key(Key::ArrowRight));
    s.dispatch(InputEvent::Key(Key::Escape));
    assert_eq!(s.state(), ViewerState::Closed);
    assert_eq!(s.history().len(), 1);
}

// =========================================================================
// History
// =========================================================================

#[test]
fn back_and_forward_walk_viewed_images() {
    let mut s = session("");
    s.start(&abc());
    s.open_by_filename("a.png");
    s.navigate_next();
    s.navigate_next();

    assert!(s.back());
    assert_eq!(s.current_filename(), Some("b.png"));
    assert!(s.back());
    assert_eq!(s.current_filename(), Some("a.png"));
    assert!(s.forward());
    assert_eq!(s.current_filename(), Some("b.png"));

    // Navigating from the middle of history drops the forward entries.
    s.navigate_prev();
    assert!(!s.forward());
}

// =========================================================================
// Manifest outcomes from disk
// =========================================================================

#[test]
fn file_manifest_loads_in_order() {
    let site = site_with_manifest(r#"["c.png", "a.png", "b.png"]"#);
    let mut s = session(&format!("#{}", encode("a.png")));
    assert!(matches!(
        s.start(&file_source(site.path())),
        LoadOutcome::Loaded { count: 3 }
    ));
    assert_eq!(s.state(), ViewerState::Open { index: 1 });

    s.navigate_next();
    assert_eq!(s.current_filename(), Some("b.png"));
}

#[test]
fn empty_and_unavailable_are_distinguishable() {
    let empty = site_with_manifest("[]");
    let mut s = session("");
    let outcome = s.start(&file_source(empty.path()));
    assert!(matches!(outcome, LoadOutcome::Empty));
    assert_eq!(
        s.surface().last_render(),
        Some(&SurfaceOp::RenderPlaceholder(Placeholder::Empty))
    );
    s.navigate_next();
    assert_eq!(s.state(), ViewerState::Closed);

    let missing = TempDir::new().unwrap();
    let mut s = session("");
    let outcome = s.start(&file_source(missing.path()));
    assert!(matches!(outcome, LoadOutcome::Unavailable(_)));
    assert_eq!(
        s.surface().last_render(),
        Some(&SurfaceOp::RenderPlaceholder(Placeholder::Unavailable))
    );
    assert!(!s.open_by_filename("a.png"));
}

#[test]
fn malformed_manifest_is_unavailable() {
    let site = site_with_manifest(r#"{"images": ["a.png"]}"#);
    let mut s = session("");
    assert!(matches!(
        s.start(&file_source(site.path())),
        LoadOutcome::Unavailable(_)
    ));
    assert!(s.gallery().is_empty());
}

#[test]
fn config_moves_the_manifest() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("photos")).unwrap();
    fs::write(tmp.path().join("photos/list.json"), r#"["x.jpg"]"#).unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "gallery_dir = \"photos\"\nmanifest_file = \"list.json\"\n",
    )
    .unwrap();

    let config = config::load_config(tmp.path()).unwrap();
    let mut s = Session::new(
        config.clone(),
        RecordingSurface::new(),
        MemoryHistory::default(),
    );
    s.start(&FileManifestSource::for_site(tmp.path(), &config));
    s.open_by_filename("x.jpg");
    assert_eq!(s.surface().modal().map(|m| m.src.as_str()), Some("photos/x.jpg"));
}

// =========================================================================
// Rendered page
// =========================================================================

#[test]
fn html_page_for_deep_link() {
    let config = SiteConfig::default();
    let mut s = Session::new(
        config.clone(),
        HtmlSurface::new(config),
        MemoryHistory::new(&format!("#{}", encode("c.png"))),
    );
    s.start(&abc());
    let html = s.surface().to_markup().into_string();
    assert!(html.contains("gallery-grid"));
    assert!(html.contains("display: block"));
    assert!(html.contains(r#"src="gallery/c.png""#));

    s.close();
    let html = s.surface().to_markup().into_string();
    assert!(html.contains("display: none"));

// =========================================================================
// Known limitation: alias collisions
// =========================================================================

/// "Aa.png" and "BB.png" share an alias. The later manifest entry owns it,
/// so opening the earlier one shows the later image.
#[test]
fn colliding_filenames_open_the_later_entry() {
    assert_eq!(encode("Aa.png"), encode("BB.png"));
    let mut s = session("");
    s.start(&StaticManifestSource::from_filenames(["Aa.png", "BB.png", "c.png"]));

    assert!(s.open_by_filename("Aa.png"));
    assert_eq!(s.state(), ViewerState::Open { index: 1 });
    assert_eq!(s.current_filename(), Some("BB.png"));
    assert_eq!(s.gallery().alias_count(), 2);
}
}
