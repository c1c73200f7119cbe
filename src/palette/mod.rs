//! Design-system palette catalogs, matching and synthesis.
//!
//! The catalogs hold each family's reference shades as hex tables, resolved
//! to OKLCh once on first use. The [`matcher`] finds the family and shade
//! perceptually closest to an input color and [`generate`] rebuilds a full
//! ramp around that input.

pub mod generate;
pub mod matcher;
pub mod radix;
pub mod tailwind;

use std::sync::LazyLock;

use crate::{
    color::{Color, Space},
    parse::parse,
    registry::ConversionContext,
};

/// One reference shade, resolved to OKLCh.
#[derive(Clone, Debug)]
pub struct Shade {
    /// The shade's key within its family ("50".."950", or "1".."12").
    pub key: &'static str,
    /// The reference color in OKLCh.
    pub color: Color,
}

/// A named family of reference shades, ordered light to dark.
#[derive(Clone, Debug)]
pub struct Family {
    /// The family name as published by the design system.
    pub name: &'static str,
    /// The reference shades, in ramp order.
    pub shades: Vec<Shade>,
}

/// The context used solely to resolve the static hex tables.
static RESOLVE_CONTEXT: LazyLock<ConversionContext> = LazyLock::new(ConversionContext::standard);

/// Resolve one static hex table into a [`Family`]. Only ever called on the
/// embedded catalog data, which is known-valid hex.
fn resolve_family<const N: usize>(
    name: &'static str,
    keys: &[&'static str; N],
    hex: &[&'static str; N],
) -> Family {
    let shades = keys
        .iter()
        .zip(hex)
        .map(|(key, hex)| {
            let srgb = parse(hex).expect("catalog hex tables are valid");
            let color = RESOLVE_CONTEXT
                .convert(&srgb, Space::Oklch)
                .expect("standard context reaches oklch");
            Shade { key, color }
        })
        .collect();
    Family { name, shades }
}
