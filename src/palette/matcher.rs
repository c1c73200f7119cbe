//! Finding the catalog family and shade perceptually closest to a color.

use crate::{
    color::{Color, Component, Space},
    error::Result,
    registry::ConversionContext,
};

use super::{Family, Shade};

/// The result of a catalog match.
#[derive(Clone, Debug)]
pub struct ClosestMatch<'a> {
    /// The winning family.
    pub family: &'a Family,
    /// Position of the winning family within the catalog.
    pub family_index: usize,
    /// Position of the closest shade within the family's ramp.
    pub shade_index: usize,
    /// The closest reference shade itself.
    pub shade: &'a Shade,
    /// OKLab Euclidean distance from the input to that shade.
    pub delta: Component,
}

fn oklab_distance(a: &Color, b: &Color) -> Component {
    let d = a.components - b.components;
    (d.0 * d.0 + d.1 * d.1 + d.2 * d.2).sqrt()
}

/// Find the family containing the reference shade closest to the input,
/// by OKLab Euclidean distance. Ties go to the family declared first in
/// the catalog, so results are deterministic for a fixed catalog order.
pub fn find_closest<'a>(
    input: &Color,
    catalog: &'a [Family],
    context: &ConversionContext,
) -> Result<ClosestMatch<'a>> {
    let input_oklab = context.convert(input, Space::Oklab)?;

    let mut best: Option<ClosestMatch<'a>> = None;

    for (family_index, family) in catalog.iter().enumerate() {
        for (index, shade) in family.shades.iter().enumerate() {
            let shade_oklab = context.convert(&shade.color, Space::Oklab)?;
            let delta = oklab_distance(&input_oklab, &shade_oklab);

            // Strict comparison keeps the earliest family and shade on ties.
            if best.as_ref().map_or(true, |b| delta < b.delta) {
                best = Some(ClosestMatch {
                    family,
                    family_index,
                    shade_index: index,
                    shade,
                    delta,
                });
            }
        }
    }

    let found = best.ok_or_else(|| {
        crate::error::Error::UnknownFamily("empty catalog".to_owned())
    })?;

    tracing::debug!(
        family = found.family.name,
        shade = found.shade.key,
        delta = found.delta,
        "matched catalog family"
    );

    Ok(found)
}

/// Closest shade within a single family, used by the per-category Radix
/// synthesis passes.
pub fn closest_shade_index(
    input: &Color,
    family: &Family,
    context: &ConversionContext,
) -> Result<usize> {
    let input_oklab = context.convert(input, Space::Oklab)?;

    let mut best = (0, Component::INFINITY);
    for (index, shade) in family.shades.iter().enumerate() {
        let shade_oklab = context.convert(&shade.color, Space::Oklab)?;
        let delta = oklab_distance(&input_oklab, &shade_oklab);
        if delta < best.1 {
            best = (index, delta);
        }
    }
    Ok(best.0)
}
