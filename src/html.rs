//! Static HTML for the gallery grid, placeholders and modal viewer.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating, so
//! filenames from the manifest are escaped on interpolation.
//!
//! ## Markup
//!
//! ```html
//! <div class="gallery-grid gallery-fade-in">
//!   <div class="gallery-item" data-alias="l836h4zm">
//!     <a href="#l836h4zm"><img src="gallery/a.png" alt="Galerie 1" loading="lazy"></a>
//!     <div class="gallery-overlay"><a class="gallery-btn" href="#l836h4zm">Voir</a></div>
//!   </div>
//!   ...
//! </div>
//! <div id="modal" class="modal" style="display: none">
//!   <span class="close">&times;</span>
//!   <img id="modalImage" ...>
//! </div>
//! ```
//!
//! Tiles link to their alias fragment, so a click goes through the same
//! fragment-change path as a shared link. The grid layout itself is left to
//! CSS and whatever layout script the page includes.

use crate::alias;
use crate::config::SiteConfig;
use crate::surface::{ImageRef, Placeholder, PresentationSurface};
use maud::{Markup, html};

/// Render the grid. An empty list renders the "no images" placeholder.
pub fn render_grid(config: &SiteConfig, filenames: &[String]) -> Markup {
    if filenames.is_empty() {
        return render_placeholder(config, Placeholder::Empty);
    }
    html! {
        div.gallery-grid.gallery-fade-in {
            @for (idx, filename) in filenames.iter().enumerate() {
                (render_tile(config, idx, filename))
            }
        }
    }
}

fn render_tile(config: &SiteConfig, idx: usize, filename: &str) -> Markup {
    let alias = alias::encode(filename);
    let href = format!("#{alias}");
    let alt = format!("{} {}", config.viewer.tile_alt_prefix, idx + 1);
    html! {
        div.gallery-item data-alias=(alias.as_str()) {
            a href=(href) {
                img src=(config.image_src(filename)) alt=(alt) loading="lazy";
            }
            div.gallery-overlay {
                a.gallery-btn href=(href) { (config.viewer.view_label) }
            }
        }
    }
}

/// Render a placeholder paragraph in place of the grid.
pub fn render_placeholder(config: &SiteConfig, placeholder: Placeholder) -> Markup {
    let message = match placeholder {
        Placeholder::Unavailable => &config.placeholders.unavailable,
        Placeholder::Empty => &config.placeholders.empty,
    };
    html! {
        p.no-images { (message) }
    }
}

/// Render the modal, visible only when `image` is set.
pub fn render_modal(image: Option<&ImageRef>) -> Markup {
    let display = if image.is_some() {
        "display: block"
    } else {
        "display: none"
    };
    html! {
        div.modal id="modal" style=(display) {
            span.close { "×" }
            @if let Some(image) = image {
                img.modal-content id="modalImage" src=(image.src) alt=(image.alt)
                    data-index=(image.index);
            } @else {
                img.modal-content id="modalImage" alt="";
            }
        }
    }
}

/// Presentation surface that keeps the latest markup for each region.
#[derive(Debug, Clone)]
pub struct HtmlSurface {
    config: SiteConfig,
    gallery: Markup,
    modal: Option<ImageRef>,
}

impl HtmlSurface {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            gallery: html! {},
            modal: None,
        }
    }

    /// The `#gallery` container followed by the modal.
    pub fn to_markup(&self) -> Markup {
        html! {
            div id="gallery" { (self.gallery) }
            (render_modal(self.modal.as_ref()))
        }
    }

    pub fn into_string(self) -> String {
        self.to_markup().into_string()
    }
}

impl PresentationSurface for HtmlSurface {
    fn show_modal(&mut self, image: &ImageRef) {
        self.modal = Some(image.clone());
    }

    fn hide_modal(&mut self) {
        self.modal = None;
    }

    fn render_grid(&mut self, filenames: &[String]) {
        self.gallery = render_grid(&self.config, filenames);
    }

    fn render_placeholder(&mut self, placeholder: Placeholder) {
        self.gallery = render_placeholder(&self.config, placeholder);
    }
}
