//! # bitdraw-render
//!
//! Drawing backends for `bitdraw` layouts.
//!
//! - [surface::Surface] is the small drawing interface every backend
//!   implements; [svg::SvgSurface] is the one shipped here.
//! - [paint] turns a [`DiagramLayout`](bitdraw::diagram::DiagramLayout)
//!   into surface calls.
//! - [figures] holds the built-in lecture figures, [curve] plots x/y data
//!   files and [unicode] writes the UTF-8 code chart as a LaTeX document.
//!
//! ```
//! use bitdraw::presets;
//! use bitdraw_render::{SvgSurface, paint::paint_diagram};
//!
//! let diagram = presets::utf8_two_byte(0xE9).unwrap();
//! let mut svg = SvgSurface::default();
//! paint_diagram(&mut svg, &diagram.layout());
//!
//! let document = svg.finish();
//! assert!(document.starts_with("<?xml"));
//! ```

pub mod curve;
pub mod errors;
pub mod figures;
pub mod paint;
pub mod surface;
pub mod svg;
pub mod unicode;

pub use errors::RenderError;
pub use figures::Figure;
pub use svg::{RenderConfig, SvgSurface};
