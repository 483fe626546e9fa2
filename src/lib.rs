//! # hdrswitch
//!
//! Query and toggle the HDR (advanced color) state of Windows displays.
//!
//! Active display paths are enumerated through the DisplayConfig API, each one
//! becomes a [`Display`] with a resolved name and [`HdrStatus`], and a
//! [`Selector`] narrows the set down to the displays a command acts on.
//!
//! ## Rust usage
//!
//! ```no_run
//! use hdrswitch::{DisplayRegistry, DisplayService, Selector};
//!
//! fn enable_dell<S: DisplayService>(registry: &DisplayRegistry<S>) -> hdrswitch::Result<()> {
//!     let displays = Selector::ByName("dell u2720q".into()).apply(registry.query_all_displays()?)?;
//!     for mut display in displays {
//!         display.enable_hdr(registry)?;
//!         println!("{}: {}", display.name(), display.status());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! On Windows, `DisplayRegistry::win32()` gives a registry over the live configuration.

pub mod commands;
pub mod display;
pub mod error;
pub mod platform;
pub mod registry;
pub mod selector;

pub use display::{Display, DisplayIdentity, HdrStatus, StatusProbe};
pub use error::{ErrorKind, HdrError, Result};
pub use platform::{AdapterId, DisplayService};
pub use registry::DisplayRegistry;
pub use selector::Selector;
