//! # Restyle Core - Style State and Generators
//!
//! `restyle-core` holds the data model of the restyle visual editor and the pure
//! functions that turn it into something a renderer can use.
//!
//! ## Core Concepts
//!
//! - [`StyleState`]: every visual attribute of one edited element, fully defaulted
//! - [`Breakpoint`]: responsive prefix applied to generated utility classes
//! - [`generate_classes`]: `StyleState` to a utility-class string
//! - [`generate_styles`]: `StyleState` to an ordered [`StyleMap`] of CSS properties
//! - [`generate_markup`]: tag, classes and text content to a markup string
//! - [`patch`]: typed, path-addressed updates over the fixed state schema
//!
//! ## Quick Start
//!
//! ```rust
//! use restyle_core::{generate_classes, generate_markup, generate_styles, Breakpoint, StyleState};
//!
//! let mut state = StyleState::default();
//! state.effects.opacity = 50.0;
//! state.transforms.translate_x = 10.0;
//!
//! let styles = generate_styles(&state);
//! assert_eq!(styles.get("opacity"), Some("0.5"));
//! assert_eq!(styles.get("transform"), Some("translateX(10px)"));
//!
//! let classes = generate_classes(&state, Breakpoint::Md);
//! assert!(classes.contains("md:translate-x-[10px]"));
//!
//! let markup = generate_markup(&state, &classes);
//! assert!(markup.starts_with("<div class=\""));
//! ```
//!
//! All generators are total over a normalized state: any reachable value produces
//! well-formed output and identical input always yields byte-identical output.

mod breakpoint;
pub mod css_parser;
mod error;
mod format;
pub mod generate;
pub mod merge;
pub mod patch;
pub mod sanitize;
pub mod state;

pub use breakpoint::Breakpoint;
pub use error::{GradientError, PatchError};
pub use generate::{generate_classes, generate_markup, generate_styles, StyleMap};
pub use patch::Section;
pub use state::{
    Appearance, Border, BorderStyle, Effects, Gradient, GradientKind, GradientStop, Margin,
    Padding, Paint, Position, PositionKind, Radius, Shadow, Size, StyleState, Tag, TextAlign,
    Transforms, Transforms3D, Typography,
};
