//! Derived artifacts of a [`StyleState`](crate::StyleState).
//!
//! The three generators are pure: the same input always yields byte-identical
//! output, so callers are free to memoize them.
//!
//! - [`generate_classes`]: responsive utility-class string
//! - [`generate_styles`]: ordered CSS property map, not responsive
//! - [`generate_markup`]: a single-element markup string

mod classes;
mod markup;
mod styles;

pub use classes::generate_classes;
pub use markup::generate_markup;
pub use styles::{generate_styles, StyleMap};
