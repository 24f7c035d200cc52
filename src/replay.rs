//! Scripted session steps for the `replay` command.
//!
//! Each step is one token:
//!
//! | Token | Meaning |
//! |---|---|
//! | `open:<file>` | open a filename directly |
//! | `tile:<file>` | activate the grid tile for a filename |
//! | `next`, `prev`, `close` | router operations |
//! | `key:<name>` | key press (`escape`, `left`, `right`, or any DOM key name) |
//! | `click:<x>/<width>` | click on the modal background |
//! | `hash:<fragment>` | fragment edited by hand |
//! | `back`, `forward` | history moves |
//! | `reload` | fetch the manifest again |

use crate::fragment::MemoryHistory;
use crate::input::{ClickTarget, InputEvent, Key};
use crate::manifest::ManifestSource;
use crate::session::Session;
use crate::surface::PresentationSurface;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReplayError {
    #[error("unknown step {0:?}")]
    UnknownStep(String),
    #[error("step {step:?} needs a value after ':'")]
    MissingValue { step: String },
    #[error("invalid click {0:?}, expected click:<x>/<width>")]
    InvalidClick(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Open(String),
    Tile(String),
    Next,
    Prev,
    Close,
    Key(Key),
    Click { x: f64, width: f64 },
    Hash(String),
    Back,
    Forward,
    Reload,
}

impl FromStr for Step {
    type Err = ReplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = match s.split_once(':') {
            Some((name, value)) => (name, Some(value)),
            None => (s, None),
        };
        let required = || -> Result<String, ReplayError> {
            match value {
                Some(v) if !v.is_empty() => Ok(v.to_string()),
                _ => Err(ReplayError::MissingValue {
                    step: name.to_string(),
                }),
            }
        };
        match name {
            "open" => Ok(Step::Open(required()?)),
            "tile" => Ok(Step::Tile(required()?)),
            "key" => Ok(Step::Key(parse_key(&required()?))),
            "click" => parse_click(&required()?),
            // An empty fragment is a valid edit.
            "hash" => Ok(Step::Hash(value.unwrap_or_default().to_string())),
            "next" => Ok(Step::Next),
            "prev" => Ok(Step::Prev),
            "close" => Ok(Step::Close),
            "back" => Ok(Step::Back),
            "forward" => Ok(Step::Forward),
            "reload" => Ok(Step::Reload),
            _ => Err(ReplayError::UnknownStep(s.to_string())),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Open(file) => write!(f, "open:{file}"),
            Step::Tile(file) => write!(f, "tile:{file}"),
            Step::Next => f.write_str("next"),
            Step::Prev => f.write_str("prev"),
            Step::Close => f.write_str("close"),
            Step::Key(Key::Escape) => f.write_str("key:escape"),
            Step::Key(Key::ArrowLeft) => f.write_str("key:left"),
            Step::Key(Key::ArrowRight) => f.write_str("key:right"),
            Step::Key(Key::Other(name)) => write!(f, "key:{name}"),
            Step::Click { x, width } => write!(f, "click:{x}/{width}"),
            Step::Hash(fragment) => write!(f, "hash:{fragment}"),
            Step::Back => f.write_str("back"),
            Step::Forward => f.write_str("forward"),
            Step::Reload => f.write_str("reload"),
        }
    }
}

fn parse_key(name: &str) -> Key {
    match name.to_ascii_lowercase().as_str() {
        "escape" | "esc" => Key::Escape,
        "left" | "arrowleft" => Key::ArrowLeft,
        "right" | "arrowright" => Key::ArrowRight,
        _ => Key::from_name(name),
    }
}

fn parse_click(value: &str) -> Result<Step, ReplayError> {
    let invalid = || ReplayError::InvalidClick(value.to_string());
    let (x, width) = value.split_once('/').ok_or_else(invalid)?;
    let x: f64 = x.trim().parse().map_err(|_| invalid())?;
    let width: f64 = width.trim().parse().map_err(|_| invalid())?;
    if width.is_nan() || width <= 0.0 {
        return Err(invalid());
    }
    Ok(Step::Click { x, width })
}

/// Apply one step to a headless session.
pub fn apply<S: PresentationSurface>(
    session: &mut Session<S, MemoryHistory>,
    source: &dyn ManifestSource,
    step: &Step,
) {
    match step {
        Step::Open(file) => {
            session.open_by_filename(file);
        }
        Step::Tile(file) => {
            session.dispatch(InputEvent::TileActivated(file.clone()));
        }
        Step::Next => session.navigate_next(),
        Step::Prev => session.navigate_prev(),
        Step::Close => session.close(),
        Step::Key(key) => {
            session.dispatch(InputEvent::Key(key.clone()));
        }
        Step::Click { x, width } => {
            session.dispatch(InputEvent::ModalClick {
                target: ClickTarget::Background,
                x: *x,
                modal_left: 0.0,
                modal_width: *width,
            });
        }
        Step::Hash(fragment) => session.on_fragment_changed(fragment),
        Step::Back => {
            session.back();
        }
        Step::Forward => {
            session.forward();
        }
        Step::Reload => {
            session.reload(source);
        }
    }
}
