//! Rebuilding a full design-system ramp around a seed color.
//!
//! The synthesizer transplants the seed's hue and chroma onto every
//! reference shade of the matched family, keeps each reference shade's
//! lightness, clamps to sRGB gamut, and optionally re-targets each shade's
//! APCA contrast to the catalog's per-position average.

use crate::{
    color::{Color, Component, Components, Space},
    contrast::{find_contrast_color, ContrastAnchor},
    error::{Error, Result},
    gamut,
    math::{normalize, normalize_hue},
    registry::ConversionContext,
    serialize::{serialize_v1, to_css_string},
};

use super::{
    matcher::{closest_shade_index, find_closest},
    radix, tailwind, Family,
};

/// The supported generator families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeneratorFamily {
    /// Tailwind CSS v4, 11 shades.
    TailwindV4,
    /// Radix UI colors, 12 steps across four sub-palettes.
    RadixUi,
}

impl GeneratorFamily {
    /// Look up a generator by the name the public API accepts.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "Tailwind v4" | "tailwind" | "tailwind-v4" => Ok(GeneratorFamily::TailwindV4),
            "Radix UI" | "radix" | "radix-ui" => Ok(GeneratorFamily::RadixUi),
            _ => Err(Error::UnknownFamily(name.to_owned())),
        }
    }
}

/// One synthesized shade with its pre-rendered string forms.
#[derive(Clone, Debug)]
pub struct GeneratedShade {
    /// Shade key within the ramp ("50".."950" or "1".."12").
    pub key: &'static str,
    /// The canonical color, in OKLCh.
    pub color: Color,
    /// sRGB CSS form (hex, or `rgba()` for the alpha variants).
    pub css_rgb: String,
    /// `oklch(...)` CSS form.
    pub css_oklch: String,
    /// Portable `ChromaKit|v1` form.
    pub serialized: String,
}

/// One ordered ramp within a generated palette.
#[derive(Clone, Debug)]
pub struct ShadeGroup {
    /// `"default"` for Tailwind; `"light"`, `"dark"`, `"lightAlpha"` or
    /// `"darkAlpha"` for Radix.
    pub category: &'static str,
    /// The shades of this ramp, in catalog order.
    pub shades: Vec<GeneratedShade>,
}

/// The generated palette: the matched family, plus one or more ramps.
#[derive(Clone, Debug)]
pub struct GeneratedPalette {
    /// Which generator produced this palette.
    pub generator: GeneratorFamily,
    /// Name of the catalog family the seed matched.
    pub matched_family: &'static str,
    /// Key of the reference shade the seed matched.
    pub matched_key: &'static str,
    /// The synthesized ramps.
    pub groups: Vec<ShadeGroup>,
}

impl GeneratedPalette {
    /// The ramp for a category, if the generator produced one.
    pub fn group(&self, category: &str) -> Option<&ShadeGroup> {
        self.groups.iter().find(|g| g.category == category)
    }

    /// A single shade by category and key.
    pub fn shade(&self, category: &str, key: &str) -> Option<&GeneratedShade> {
        self.group(category)?.shades.iter().find(|s| s.key == key)
    }
}

/// How the seed's hue and chroma transfer onto the reference ramp.
struct Transplant {
    /// `None` means replace mode: every shade keeps its own reference hue.
    delta_hue: Option<Component>,
    chroma_ratio: Component,
}

impl Transplant {
    fn from_seed(seed: &Color, reference: &Color) -> Self {
        let seed_hue = seed.components.2;
        let reference_hue = normalize(reference.components.2);

        // An achromatic seed has no hue to transplant; a seed already
        // aligned with the reference hue degenerates to the same thing.
        let delta_hue = if seed_hue.is_nan() {
            None
        } else {
            let delta = (seed_hue - reference_hue).rem_euclid(360.0);
            (delta != 0.0).then_some(delta)
        };

        let reference_chroma = reference.components.1;
        let chroma_ratio = if reference_chroma < 1e-6 {
            1.0
        } else {
            seed.components.1 / reference_chroma
        };

        Self {
            delta_hue,
            chroma_ratio,
        }
    }

    /// The OKLCh candidate for one reference shade: reference lightness,
    /// scaled chroma, shifted (or kept) hue.
    fn apply(&self, reference: &Color) -> Color {
        let reference_hue = normalize(reference.components.2);
        let hue = match self.delta_hue {
            Some(delta) => normalize_hue(reference_hue + delta),
            None => reference_hue,
        };

        Color::new(
            Space::Oklch,
            reference.components.0,
            reference.components.1 * self.chroma_ratio,
            hue,
            1.0,
        )
    }
}

/// Reference shades on the light side of the ramp get their contrast
/// measured against black; dark shades against white.
fn anchor_for(reference_lightness: Component) -> ContrastAnchor {
    if reference_lightness >= 0.6 {
        ContrastAnchor::Black
    } else {
        ContrastAnchor::White
    }
}

struct RampSpec<'a> {
    family: &'a Family,
    /// Position of the reference shade the seed matched. The transplant is
    /// always computed against this shade, whether or not the slot itself
    /// carries the seed through.
    matched_index: usize,
    preserve_seed: bool,
    contrast_white: &'a [Component],
    contrast_black: &'a [Component],
    /// Shade positions below this index are never contrast-retargeted.
    retarget_from: usize,
}

fn synthesize_ramp(
    seed: &Color,
    spec: &RampSpec<'_>,
    adjust_contrast: bool,
    context: &ConversionContext,
) -> Result<Vec<GeneratedShade>> {
    let transplant = Transplant::from_seed(seed, &spec.family.shades[spec.matched_index].color);

    let mut out = Vec::with_capacity(spec.family.shades.len());

    for (index, reference) in spec.family.shades.iter().enumerate() {
        let is_seed_slot = spec.preserve_seed && index == spec.matched_index;

        let color = if is_seed_slot {
            // The exact converted seed, not a resynthesized approximation.
            seed.clone()
        } else {
            let candidate = transplant.apply(&reference.color);
            let candidate = gamut::clamp_chroma(&candidate, context)?;

            if adjust_contrast && index >= spec.retarget_from {
                let anchor = anchor_for(reference.color.components.0);
                let target = match anchor {
                    ContrastAnchor::Black => spec.contrast_black[index],
                    ContrastAnchor::White => spec.contrast_white[index],
                };
                find_contrast_color(&candidate, anchor, target, context)?
            } else {
                candidate
            }
        };

        out.push(render_shade(reference.key, color, context)?);
    }

    Ok(out)
}

fn render_shade(
    key: &'static str,
    color: Color,
    context: &ConversionContext,
) -> Result<GeneratedShade> {
    let srgb = gamut::clip(&context.convert(&color, Space::Srgb)?);
    Ok(GeneratedShade {
        css_rgb: to_css_string(&srgb),
        css_oklch: to_css_string(&color),
        serialized: serialize_v1(&color),
        key,
        color,
    })
}

/// Derive one alpha-scale shade from its solid counterpart by alpha
/// extraction: the most transparent color that composites over the given
/// backdrop to reproduce the solid value.
fn extract_alpha(
    solid: &GeneratedShade,
    over_white: bool,
    context: &ConversionContext,
) -> Result<GeneratedShade> {
    let srgb = gamut::clip(&context.convert(&solid.color, Space::Srgb)?);
    let Components(r, g, b) = srgb.components;

    let alpha = if over_white {
        (1.0 - r).max(1.0 - g).max(1.0 - b)
    } else {
        r.max(g).max(b)
    };

    let components = if alpha <= 1e-6 {
        Components(0.0, 0.0, 0.0)
    } else {
        let unmix = |c: Component| {
            if over_white {
                (c - (1.0 - alpha)) / alpha
            } else {
                c / alpha
            }
        };
        Components(unmix(r), unmix(g), unmix(b)).map(|v| v.clamp(0.0, 1.0))
    };

    let overlay = Color::new(Space::Srgb, components.0, components.1, components.2, alpha);
    let oklch = context.convert(&overlay, Space::Oklch)?;

    Ok(GeneratedShade {
        key: solid.key,
        css_rgb: to_css_string(&overlay),
        css_oklch: to_css_string(&oklch),
        serialized: serialize_v1(&oklch),
        color: oklch,
    })
}

/// Generate a full palette around the seed color.
///
/// `family` is the public generator name (`"Tailwind v4"` or `"Radix UI"`).
/// With `ensure_seed_preserved` the matched shade slot carries the exact
/// converted seed; with `adjust_contrast` every other shade is re-targeted
/// to the catalog's per-position APCA average.
pub fn generate_palette(
    input: &Color,
    adjust_contrast: bool,
    ensure_seed_preserved: bool,
    family: &str,
    context: &ConversionContext,
) -> Result<GeneratedPalette> {
    let generator = GeneratorFamily::from_name(family)?;
    let seed = context.convert(input, Space::Oklch)?;

    match generator {
        GeneratorFamily::TailwindV4 => {
            let matched = find_closest(&seed, tailwind::catalog(), context)?;

            let shades = synthesize_ramp(
                &seed,
                &RampSpec {
                    family: matched.family,
                    matched_index: matched.shade_index,
                    preserve_seed: ensure_seed_preserved,
                    contrast_white: &tailwind::CONTRAST_WHITE,
                    contrast_black: &tailwind::CONTRAST_BLACK,
                    retarget_from: tailwind::NEAR_WHITE_BAND,
                },
                adjust_contrast,
                context,
            )?;

            Ok(GeneratedPalette {
                generator,
                matched_family: matched.family.name,
                matched_key: matched.shade.key,
                groups: vec![ShadeGroup {
                    category: "default",
                    shades,
                }],
            })
        }
        GeneratorFamily::RadixUi => {
            let matched = find_closest(&seed, radix::light_catalog(), context)?;
            let dark_family = &radix::dark_catalog()[matched.family_index];
            let dark_index = closest_shade_index(&seed, dark_family, context)?;

            let light = synthesize_ramp(
                &seed,
                &RampSpec {
                    family: matched.family,
                    matched_index: matched.shade_index,
                    preserve_seed: ensure_seed_preserved,
                    contrast_white: &radix::CONTRAST_LIGHT_WHITE,
                    contrast_black: &radix::CONTRAST_LIGHT_BLACK,
                    retarget_from: 0,
                },
                adjust_contrast,
                context,
            )?;

            let dark = synthesize_ramp(
                &seed,
                &RampSpec {
                    family: dark_family,
                    matched_index: dark_index,
                    preserve_seed: ensure_seed_preserved,
                    contrast_white: &radix::CONTRAST_DARK_WHITE,
                    contrast_black: &radix::CONTRAST_DARK_BLACK,
                    retarget_from: 0,
                },
                adjust_contrast,
                context,
            )?;

            let light_alpha = light
                .iter()
                .map(|shade| extract_alpha(shade, true, context))
                .collect::<Result<Vec<_>>>()?;
            let dark_alpha = dark
                .iter()
                .map(|shade| extract_alpha(shade, false, context))
                .collect::<Result<Vec<_>>>()?;

            Ok(GeneratedPalette {
                generator,
                matched_family: matched.family.name,
                matched_key: matched.shade.key,
                groups: vec![
                    ShadeGroup {
                        category: "light",
                        shades: light,
                    },
                    ShadeGroup {
                        category: "dark",
                        shades: dark,
                    },
                    ShadeGroup {
                        category: "lightAlpha",
                        shades: light_alpha,
                    },
                    ShadeGroup {
                        category: "darkAlpha",
                        shades: dark_alpha,
                    },
                ],
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contrast::{contrast, ContrastMethod};
    use crate::parse::parse;

    fn seed() -> Color {
        parse("#69ae5d").unwrap()
    }

    #[test]
    fn unknown_family_is_rejected() {
        let context = ConversionContext::standard();
        let err = generate_palette(&seed(), true, true, "Not A Family", &context).unwrap_err();
        assert!(err.to_string().contains("Unknown generator family"));
    }

    #[test]
    fn tailwind_ramp_has_eleven_shades() {
        let context = ConversionContext::standard();
        let palette = generate_palette(&seed(), true, true, "Tailwind v4", &context).unwrap();

        let group = palette.group("default").unwrap();
        assert_eq!(group.shades.len(), 11);
        assert_eq!(group.shades[0].key, "50");
        assert_eq!(group.shades[10].key, "950");
    }

    #[test]
    fn seed_is_preserved_bit_identical() {
        let context = ConversionContext::standard();
        let seed_oklch = context.convert(&seed(), Space::Oklch).unwrap();
        let palette = generate_palette(&seed(), true, true, "Tailwind v4", &context).unwrap();

        let slot = palette.shade("default", palette.matched_key).unwrap();
        assert_eq!(slot.color.components, seed_oklch.components);
    }

    #[test]
    fn every_solid_shade_is_in_srgb_gamut() {
        let context = ConversionContext::standard();
        for family in ["Tailwind v4", "Radix UI"] {
            let palette = generate_palette(&seed(), true, true, family, &context).unwrap();
            for group in &palette.groups {
                if group.category.ends_with("Alpha") {
                    continue;
                }
                for shade in &group.shades {
                    assert!(
                        gamut::in_srgb_gamut(&shade.color, &context).unwrap(),
                        "{} {} out of gamut",
                        group.category,
                        shade.key
                    );
                }
            }
        }
    }

    #[test]
    fn contrast_grows_toward_the_dark_end() {
        let context = ConversionContext::standard();
        let palette = generate_palette(&seed(), true, true, "Tailwind v4", &context).unwrap();
        let white = Color::new(Space::Srgb, 1.0, 1.0, 1.0, 1.0);

        let lc = |key: &str| {
            let shade = palette.shade("default", key).unwrap();
            contrast(&shade.color, &white, ContrastMethod::Apca, &context)
                .unwrap()
                .abs()
        };

        assert!(lc("950") > lc("50"));
    }

    #[test]
    fn achromatic_seed_never_leaks_nan_into_the_string_forms() {
        let context = ConversionContext::standard();
        let gray = parse("#808080").unwrap();
        let palette = generate_palette(&gray, true, true, "Tailwind v4", &context).unwrap();

        for shade in &palette.group("default").unwrap().shades {
            assert!(!shade.css_oklch.contains("NaN"), "{}", shade.css_oklch);
            assert!(!shade.serialized.contains("NaN"), "{}", shade.serialized);
            assert!(!shade.css_rgb.contains("NaN"), "{}", shade.css_rgb);
        }

        // The preserved slot has no hue to carry; it serializes as missing.
        let slot = palette.shade("default", palette.matched_key).unwrap();
        assert!(slot.serialized.ends_with("none"), "{}", slot.serialized);
    }

    #[test]
    fn radix_produces_four_parallel_groups() {
        let context = ConversionContext::standard();
        let palette = generate_palette(&seed(), true, true, "Radix UI", &context).unwrap();

        for category in ["light", "dark", "lightAlpha", "darkAlpha"] {
            let group = palette.group(category).unwrap();
            assert_eq!(group.shades.len(), 12, "{category}");
        }
    }

    #[test]
    fn alpha_shades_composite_back_to_their_solid() {
        let context = ConversionContext::standard();
        let palette = generate_palette(&seed(), false, true, "Radix UI", &context).unwrap();

        let solid = &palette.group("light").unwrap().shades[8];
        let alpha = &palette.group("lightAlpha").unwrap().shades[8];

        let solid_srgb = context.convert(&solid.color, Space::Srgb).unwrap();
        let overlay_srgb = context.convert(&alpha.color, Space::Srgb).unwrap();
        let a = alpha.color.alpha;

        // over white: result = overlay * a + 1 * (1 - a)
        let composited = overlay_srgb.components.map(|v| v * a + (1.0 - a));
        let expected = gamut::clip(&solid_srgb).components;
        crate::assert_component_eq!(composited.0, expected.0, epsilon = 0.02);
        crate::assert_component_eq!(composited.1, expected.1, epsilon = 0.02);
        crate::assert_component_eq!(composited.2, expected.2, epsilon = 0.02);
    }

    #[test]
    fn seed_preservation_only_affects_the_matched_slot() {
        let context = ConversionContext::standard();
        let preserved = generate_palette(&seed(), true, true, "Tailwind v4", &context).unwrap();
        let plain = generate_palette(&seed(), true, false, "Tailwind v4", &context).unwrap();

        // The transplant basis is the matched shade in both modes, so every
        // other slot comes out the same.
        let preserved_shades = &preserved.group("default").unwrap().shades;
        let plain_shades = &plain.group("default").unwrap().shades;
        for (a, b) in preserved_shades.iter().zip(plain_shades) {
            if a.key == preserved.matched_key {
                continue;
            }
            assert_eq!(a.color.components, b.color.components, "shade {}", a.key);
        }
    }

    #[test]
    fn without_seed_preservation_the_matched_slot_is_synthesized_too() {
        let context = ConversionContext::standard();
        let seed_oklch = context.convert(&seed(), Space::Oklch).unwrap();
        let palette = generate_palette(&seed(), false, false, "Tailwind v4", &context).unwrap();

        // The matched slot is resynthesized like any other shade: close to
        // the seed, but carrying the reference shade's lightness.
        let slot = palette.shade("default", palette.matched_key).unwrap();
        let d = slot.color.components - seed_oklch.components;
        assert!((d.0 * d.0 + d.1 * d.1).sqrt() < 0.2);
        assert!(gamut::in_srgb_gamut(&slot.color, &context).unwrap());
    }
}
