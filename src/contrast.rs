//! Text contrast metrics and the target-seeking contrast search.
//!
//! APCA follows the W3 working constants (0.0.98G-4g). Its Lc value is
//! signed: positive for dark text on a light background, negative for light
//! text on a dark background.

use num_traits::Float;

use crate::{
    color::{Color, Component, Components, Space},
    error::{Error, Result},
    gamut,
    registry::ConversionContext,
};

/// The supported contrast formulas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContrastMethod {
    /// The WCAG 2.1 relative-luminance ratio, 1..21.
    Wcag21,
    /// APCA Lc, roughly -108..106.
    #[default]
    Apca,
    /// Weber contrast, (Ymax - Ymin) / Ymin.
    Weber,
    /// Michelson contrast, (Ymax - Ymin) / (Ymax + Ymin).
    Michelson,
}

impl ContrastMethod {
    /// Look up a method by its string key, as used by the palette API.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "wcag" | "wcag21" => Ok(ContrastMethod::Wcag21),
            "apca" => Ok(ContrastMethod::Apca),
            "weber" => Ok(ContrastMethod::Weber),
            "michelson" => Ok(ContrastMethod::Michelson),
            _ => Err(Error::UnknownContrast(name.to_owned())),
        }
    }
}

/// The contrast of text against a background under the given method.
pub fn contrast(
    text: &Color,
    background: &Color,
    method: ContrastMethod,
    context: &ConversionContext,
) -> Result<Component> {
    let text = context.convert(text, Space::Srgb)?;
    let background = context.convert(background, Space::Srgb)?;

    Ok(match method {
        ContrastMethod::Wcag21 => {
            let y_text = wcag_luminance(&text, context)?;
            let y_bg = wcag_luminance(&background, context)?;
            let (lighter, darker) = if y_text > y_bg {
                (y_text, y_bg)
            } else {
                (y_bg, y_text)
            };
            (lighter + 0.05) / (darker + 0.05)
        }
        ContrastMethod::Apca => apca_lc(&text.components, &background.components),
        ContrastMethod::Weber => {
            let y_text = wcag_luminance(&text, context)?;
            let y_bg = wcag_luminance(&background, context)?;
            let (max, min) = if y_text > y_bg {
                (y_text, y_bg)
            } else {
                (y_bg, y_text)
            };
            if min <= 0.0 {
                // The convention for a pure-black side, rather than a
                // division by zero.
                50000.0
            } else {
                (max - min) / min
            }
        }
        ContrastMethod::Michelson => {
            let y_text = wcag_luminance(&text, context)?;
            let y_bg = wcag_luminance(&background, context)?;
            let (max, min) = if y_text > y_bg {
                (y_text, y_bg)
            } else {
                (y_bg, y_text)
            };
            if max + min <= 0.0 {
                0.0
            } else {
                (max - min) / (max + min)
            }
        }
    })
}

/// WCAG relative luminance, the Y row of the linear-light sRGB to XYZ
/// matrix.
fn wcag_luminance(srgb: &Color, context: &ConversionContext) -> Result<Component> {
    let xyz = context.convert(srgb, Space::XyzD65)?;
    Ok(xyz.components.1)
}

// APCA-W3 constants.
const SA98G_EXPONENT: Component = 2.4;
const BLACK_THRESHOLD: Component = 0.022;
const BLACK_CLAMP: Component = 1.414;
const DELTA_Y_MIN: Component = 0.0005;
const SCALE: Component = 1.14;
const LOW_CLIP: Component = 0.1;
const LOW_OFFSET: Component = 0.027;
const NORM_BG: Component = 0.56;
const NORM_TXT: Component = 0.57;
const REV_BG: Component = 0.65;
const REV_TXT: Component = 0.62;

fn apca_screen_luminance(components: &Components) -> Component {
    let channel = |v: Component| v.clamp(0.0, 1.0).powf(SA98G_EXPONENT);
    0.2126729 * channel(components.0)
        + 0.7151522 * channel(components.1)
        + 0.0721750 * channel(components.2)
}

fn apca_soft_clamp(luminance: Component) -> Component {
    if luminance < BLACK_THRESHOLD {
        luminance + (BLACK_THRESHOLD - luminance).powf(BLACK_CLAMP)
    } else {
        luminance
    }
}

/// APCA Lc for text over background, both as gamma-encoded sRGB components.
fn apca_lc(text: &Components, background: &Components) -> Component {
    let y_text = apca_soft_clamp(apca_screen_luminance(text));
    let y_bg = apca_soft_clamp(apca_screen_luminance(background));

    if (y_bg - y_text).abs() < DELTA_Y_MIN {
        return 0.0;
    }

    if y_bg > y_text {
        // Dark text on a light background.
        let sapc = (y_bg.powf(NORM_BG) - y_text.powf(NORM_TXT)) * SCALE;
        if sapc < LOW_CLIP {
            0.0
        } else {
            (sapc - LOW_OFFSET) * 100.0
        }
    } else {
        // Light text on a dark background.
        let sapc = (y_bg.powf(REV_BG) - y_text.powf(REV_TXT)) * SCALE;
        if sapc > -LOW_CLIP {
            0.0
        } else {
            (sapc + LOW_OFFSET) * 100.0
        }
    }
}

/// The side a shade is measured against in the contrast search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContrastAnchor {
    /// Measure against white; used for the dark side of a ramp.
    White,
    /// Measure against black; used for the light side of a ramp.
    Black,
}

impl ContrastAnchor {
    fn color(&self) -> Color {
        match self {
            ContrastAnchor::White => Color::new(Space::Srgb, 1.0, 1.0, 1.0, 1.0),
            ContrastAnchor::Black => Color::new(Space::Srgb, 0.0, 0.0, 0.0, 1.0),
        }
    }
}

fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    a + (b - a) * t
}

const SEARCH_ITERATIONS: usize = 32;

/// Find the in-gamut color closest to `seed` (hue and chroma held, OKLCh
/// lightness searched) whose APCA contrast magnitude against the anchor
/// reaches `target_lc`. Returns the result in OKLCh, gamut clamped.
pub fn find_contrast_color(
    seed: &Color,
    anchor: ContrastAnchor,
    target_lc: Component,
    context: &ConversionContext,
) -> Result<Color> {
    let oklch = context.convert(seed, Space::Oklch)?;
    let anchor_color = anchor.color();

    let mut low: Component = 0.0;
    let mut high: Component = 1.0;
    let mut best = gamut::clamp_chroma(&oklch, context)?;

    for _ in 0..SEARCH_ITERATIONS {
        let mid = lerp(low, high, 0.5);

        let candidate = oklch.with_components(
            Space::Oklch,
            Components(mid, oklch.components.1, oklch.components.2),
        );
        let candidate = gamut::clamp_chroma(&candidate, context)?;

        let lc = contrast(&candidate, &anchor_color, ContrastMethod::Apca, context)?.abs();

        match anchor {
            // Against white, contrast falls as lightness rises.
            ContrastAnchor::White => {
                if lc > target_lc {
                    low = mid;
                } else {
                    high = mid;
                }
            }
            // Against black, contrast rises with lightness.
            ContrastAnchor::Black => {
                if lc > target_lc {
                    high = mid;
                } else {
                    low = mid;
                }
            }
        }
        best = candidate;
    }

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;

    fn srgb(r: Component, g: Component, b: Component) -> Color {
        Color::new(Space::Srgb, r, g, b, 1.0)
    }

    #[test]
    fn wcag_extremes() {
        let context = ConversionContext::standard();
        let white = srgb(1.0, 1.0, 1.0);
        let black = srgb(0.0, 0.0, 0.0);

        let ratio = contrast(&black, &white, ContrastMethod::Wcag21, &context).unwrap();
        assert_component_eq!(ratio, 21.0, epsilon = 0.01);

        let ratio = contrast(&white, &white, ContrastMethod::Wcag21, &context).unwrap();
        assert_component_eq!(ratio, 1.0, epsilon = 0.001);
    }

    #[test]
    fn apca_reference_values() {
        let context = ConversionContext::standard();
        let white = srgb(1.0, 1.0, 1.0);
        let black = srgb(0.0, 0.0, 0.0);
        let gray = srgb(0.533333, 0.533333, 0.533333); // #888

        // Canonical check values from the apca-w3 reference.
        let lc = contrast(&gray, &white, ContrastMethod::Apca, &context).unwrap();
        assert_component_eq!(lc, 63.056470, epsilon = 0.1);

        let lc = contrast(&white, &black, ContrastMethod::Apca, &context).unwrap();
        assert_component_eq!(lc, -107.884073, epsilon = 0.1);

        let lc = contrast(&black, &white, ContrastMethod::Apca, &context).unwrap();
        assert_component_eq!(lc, 106.040680, epsilon = 0.1);
    }

    #[test]
    fn apca_is_signed_by_polarity() {
        let context = ConversionContext::standard();
        let light = srgb(0.9, 0.9, 0.9);
        let dark = srgb(0.1, 0.1, 0.1);

        let dark_on_light = contrast(&dark, &light, ContrastMethod::Apca, &context).unwrap();
        let light_on_dark = contrast(&light, &dark, ContrastMethod::Apca, &context).unwrap();
        assert!(dark_on_light > 0.0);
        assert!(light_on_dark < 0.0);
    }

    #[test]
    fn weber_and_michelson_basics() {
        let context = ConversionContext::standard();
        let white = srgb(1.0, 1.0, 1.0);
        let black = srgb(0.0, 0.0, 0.0);

        let weber = contrast(&white, &black, ContrastMethod::Weber, &context).unwrap();
        assert_component_eq!(weber, 50000.0);

        let michelson = contrast(&white, &black, ContrastMethod::Michelson, &context).unwrap();
        assert_component_eq!(michelson, 1.0, epsilon = 0.001);

        let michelson = contrast(&white, &white, ContrastMethod::Michelson, &context).unwrap();
        assert_component_eq!(michelson, 0.0, epsilon = 0.001);
    }

    #[test]
    fn contrast_search_hits_the_target() {
        let context = ConversionContext::standard();
        let seed = Color::new(Space::Oklch, 0.6, 0.12, 250.0, 1.0);

        let found =
            find_contrast_color(&seed, ContrastAnchor::White, 60.0, &context).unwrap();
        let lc = contrast(
            &found,
            &ContrastAnchor::White.color(),
            ContrastMethod::Apca,
            &context,
        )
        .unwrap()
        .abs();
        assert_component_eq!(lc, 60.0, epsilon = 1.0);

        // Hue survives the search.
        assert_component_eq!(found.components.2, 250.0, epsilon = 2.0);
    }

    #[test]
    fn method_lookup_by_name() {
        assert_eq!(ContrastMethod::from_name("apca"), Ok(ContrastMethod::Apca));
        assert!(matches!(
            ContrastMethod::from_name("sapc"),
            Err(Error::UnknownContrast(_))
        ));
    }
}
