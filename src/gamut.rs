//! Gamut checks and mapping into the displayable sRGB cube.
//!
//! Two strategies live here. [`clamp_chroma`] is the palette synthesizer's
//! loop: walk OKLCh chroma down in fixed steps until the color converts into
//! [0,1]^3 sRGB. [`map_into_gamut_limits`] is the CSS gamut-mapping
//! algorithm, a binary search over chroma with a delta-EOK "close enough to
//! clip" cutoff, kept as the general-purpose API.

use crate::{
    color::{Color, Component, Space},
    diff::{delta_e, DeltaEMethod},
    error::Result,
    registry::ConversionContext,
};

/// The perceptual cutoff below which clipping is considered invisible.
const JND: Component = 0.02;
/// Chroma interval width at which the binary search stops.
const EPSILON: Component = 0.0001;
/// Chroma decrement used by the palette clamp loop.
const CHROMA_STEP: Component = 0.002;

fn in_unit_cube(components: &crate::color::Components) -> bool {
    const SLACK: Component = 1.0e-6;
    let inside = |v: Component| (-SLACK..=1.0 + SLACK).contains(&v);
    inside(components.0) && inside(components.1) && inside(components.2)
}

/// Whether the color, converted to sRGB, falls inside the displayable cube.
pub fn in_srgb_gamut(color: &Color, context: &ConversionContext) -> Result<bool> {
    let srgb = context.convert(color, Space::Srgb)?;
    Ok(in_unit_cube(&srgb.components))
}

/// Clamp every component to [0, 1] in place, in the color's own space.
/// Meaningful for the RGB-like spaces only.
pub fn clip(color: &Color) -> Color {
    color.with_components(color.space, color.components.map(|v| v.clamp(0.0, 1.0)))
}

/// Walk OKLCh chroma toward zero in fixed steps until the color converts
/// into sRGB gamut. Returns the first in-gamut candidate in OKLCh; at zero
/// chroma the candidate is clipped as a last resort, so the result is always
/// displayable.
pub fn clamp_chroma(color: &Color, context: &ConversionContext) -> Result<Color> {
    let mut candidate = context.convert(color, Space::Oklch)?;

    loop {
        let srgb = context.convert(&candidate, Space::Srgb)?;
        if in_unit_cube(&srgb.components) {
            return Ok(candidate);
        }

        let chroma = candidate.components.1;
        if chroma <= 0.0 {
            return context.convert(&clip(&srgb), Space::Oklch);
        }
        candidate.components.1 = (chroma - CHROMA_STEP).max(0.0);
    }
}

/// Map a color into sRGB gamut limits following the CSS color 4 algorithm.
/// <https://drafts.csswg.org/css-color-4/#css-gamut-mapping>
pub fn map_into_gamut_limits(color: &Color, context: &ConversionContext) -> Result<Color> {
    let origin = context.convert(color, Space::Oklch)?;
    let lightness = origin.components.0;

    // Lightness out of range maps straight to the gamut boundary.
    if lightness >= 1.0 {
        return Ok(origin.with_components(Space::Srgb, crate::color::Components(1.0, 1.0, 1.0)));
    }
    if lightness <= 0.0 {
        return Ok(origin.with_components(Space::Srgb, crate::color::Components(0.0, 0.0, 0.0)));
    }

    let srgb = context.convert(&origin, Space::Srgb)?;
    if in_unit_cube(&srgb.components) {
        return Ok(srgb);
    }

    let mut min = 0.0;
    let mut max = origin.components.1;
    let mut candidate = origin.clone();

    while max - min > EPSILON {
        candidate.components.1 = (min + max) / 2.0;

        let srgb = context.convert(&candidate, Space::Srgb)?;
        if in_unit_cube(&srgb.components) {
            min = candidate.components.1;
            continue;
        }

        let clipped = clip(&srgb);
        if delta_e(&clipped, &candidate, DeltaEMethod::Ok, context)? < JND {
            return Ok(clipped);
        }
        max = candidate.components.1;
    }

    let srgb = context.convert(&candidate, Space::Srgb)?;
    Ok(clip(&srgb))
}
