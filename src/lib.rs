//! chromakit is a color toolkit: parsing, conversion between color spaces,
//! chromatic adaptation, perceptual difference and contrast metrics, and
//! design-system palette synthesis.
//!
//! Conversions are registered as edges in a [`ConversionContext`] and routed
//! with a breadth-first search, so any registered space converts to any
//! other. Text input goes through [`parse_color`], which keeps a small LRU
//! cache of resolved colors. [`palette`] matches a seed color against the
//! Tailwind and Radix catalogs and rebuilds a full shade ramp around it.
//!
//! ```rust
//! use chromakit::{parse_color, Space};
//!
//! let oklch = parse_color("#69ae5d", Space::Oklch)?;
//! assert_eq!(oklch.space, Space::Oklch);
//! # Ok::<(), chromakit::Error>(())
//! ```

#![deny(missing_docs)]

mod adapt;
mod color;
mod contrast;
mod convert;
mod diff;
mod error;
mod gamut;
mod math;
pub mod palette;
mod parse;
mod registry;
mod serialize;
mod service;

pub use adapt::{adapt, adaptation_matrix, ConeResponseModel, Illuminant};
pub use color::{Color, Component, ComponentDetails, Components, Flags, Space};
pub use contrast::{contrast, find_contrast_color, ContrastAnchor, ContrastMethod};
pub use diff::{delta_e, DeltaEMethod};
pub use error::{Error, Result};
pub use gamut::{clamp_chroma, clip, in_srgb_gamut, map_into_gamut_limits};
pub use math::Transform;
pub use parse::parse;
pub use registry::{ConversionContext, ConversionFn};
pub use serialize::{serialize_v1, to_css_string};
pub use service::{
    cache_stats, clear_color_cache, convert_color, generate_palette, parse_color, CacheStats,
    ColorService, HOT_CACHE_SIZE,
};
