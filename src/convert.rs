//! The pairwise conversion formulas between adjacent color spaces.
//!
//! Each function here is a pure edge `fn(&Color) -> Color` operating on the
//! three color components; alpha and flags pass through untouched. The
//! [`crate::registry::ConversionContext`] composes these edges into full
//! conversion paths.
//!
//! Conversions apply plain matrix/scalar arithmetic with no rounding mid
//! pipeline.
//!
//! NOTE: When a conversion yields a NaN value, the component is powerless and
//!       should be treated as missing.
//! NOTE: The reverse is not the same. Passing a value of NaN into a formula
//!       will treat the value as 0.0.

use crate::{
    adapt::Illuminant,
    color::{Color, Component, Components, Space},
    math::{almost_zero, normalize, normalize_hue, transform, transform_3x3, Transform},
};

pub(crate) fn srgb_to_srgb_linear(color: &Color) -> Color {
    let components = color.components.map(|value| {
        let abs = value.abs();
        if abs < 0.04045 {
            value / 12.92
        } else {
            value.signum() * ((abs + 0.055) / 1.055).powf(2.4)
        }
    });
    color.with_components(Space::SrgbLinear, components)
}

pub(crate) fn srgb_linear_to_srgb(color: &Color) -> Color {
    let components = color.components.map(|value| {
        let abs = value.abs();
        if abs > 0.0031308 {
            value.signum() * (1.055 * abs.powf(1.0 / 2.4) - 0.055)
        } else {
            12.92 * value
        }
    });
    color.with_components(Space::Srgb, components)
}

pub(crate) fn srgb_linear_to_xyz_d65(color: &Color) -> Color {
    #[rustfmt::skip]
    #[allow(clippy::excessive_precision)]
    const TO_XYZ: Transform = transform_3x3(
        0.4123907992659595,  0.21263900587151036, 0.01933081871559185,
        0.35758433938387796, 0.7151686787677559,  0.11919477979462599,
        0.1804807884018343,  0.07219231536073371, 0.9505321522496606,
    );

    color.with_components(Space::XyzD65, transform(&TO_XYZ, color.components))
}

pub(crate) fn xyz_d65_to_srgb_linear(color: &Color) -> Color {
    #[rustfmt::skip]
    #[allow(clippy::excessive_precision)]
    const FROM_XYZ: Transform = transform_3x3(
         3.2409699419045213, -0.9692436362808798,  0.05563007969699361,
        -1.5373831775700935,  1.8759675015077206, -0.20397695888897657,
        -0.4986107602930033,  0.04155505740717561, 1.0569715142428786,
    );

    color.with_components(Space::SrgbLinear, transform(&FROM_XYZ, color.components))
}

// Bradford-adapted transfer between the two XYZ reference whites.

pub(crate) fn xyz_d65_to_xyz_d50(color: &Color) -> Color {
    #[rustfmt::skip]
    #[allow(clippy::excessive_precision)]
    const D65_TO_D50: Transform = transform_3x3(
         1.0478112, 0.0295424, -0.0092345,
         0.0228866, 0.9904844,  0.0150436,
        -0.0501270, -0.0170491, 0.7521316,
    );

    color.with_components(Space::XyzD50, transform(&D65_TO_D50, color.components))
}

pub(crate) fn xyz_d50_to_xyz_d65(color: &Color) -> Color {
    #[rustfmt::skip]
    #[allow(clippy::excessive_precision)]
    const D50_TO_D65: Transform = transform_3x3(
         0.9555766, -0.0282895,  0.0122982,
        -0.0230393,  1.0099416, -0.0204830,
         0.0631636,  0.0210077,  1.3299098,
    );

    color.with_components(Space::XyzD65, transform(&D50_TO_D65, color.components))
}

const KAPPA: Component = 24389.0 / 27.0;
const EPSILON: Component = 216.0 / 24389.0;

pub(crate) fn xyz_d50_to_lab(color: &Color) -> Color {
    let white = Illuminant::D50.white_point();
    let adapted = Components(
        color.components.0 / white.0,
        color.components.1 / white.1,
        color.components.2 / white.2,
    );

    let Components(f0, f1, f2) = adapted.map(|v| {
        if v > EPSILON {
            v.cbrt()
        } else {
            (KAPPA * v + 16.0) / 116.0
        }
    });

    let lightness = 116.0 * f1 - 16.0;
    let a = 500.0 * (f0 - f1);
    let b = 200.0 * (f1 - f2);

    color.with_components(Space::Lab, Components(lightness, a, b))
}

pub(crate) fn lab_to_xyz_d50(color: &Color) -> Color {
    let Components(lightness, a, b) = color.components.map(normalize);

    let f1 = (lightness + 16.0) / 116.0;
    let f0 = f1 + a / 500.0;
    let f2 = f1 - b / 200.0;

    let f0_cubed = f0 * f0 * f0;
    let x = if f0_cubed > EPSILON {
        f0_cubed
    } else {
        (116.0 * f0 - 16.0) / KAPPA
    };

    let y = if lightness > KAPPA * EPSILON {
        let v = (lightness + 16.0) / 116.0;
        v * v * v
    } else {
        lightness / KAPPA
    };

    let f2_cubed = f2 * f2 * f2;
    let z = if f2_cubed > EPSILON {
        f2_cubed
    } else {
        (116.0 * f2 - 16.0) / KAPPA
    };

    let white = Illuminant::D50.white_point();
    color.with_components(
        Space::XyzD50,
        Components(x * white.0, y * white.1, z * white.2),
    )
}

pub(crate) fn xyz_d65_to_oklab(color: &Color) -> Color {
    #[rustfmt::skip]
    #[allow(clippy::excessive_precision)]
    const XYZ_TO_LMS: Transform = transform_3x3(
         0.8190224432164319,  0.0329836671980271,  0.048177199566046255,
         0.3619062562801221,  0.9292868468965546,  0.26423952494422764,
        -0.12887378261216414, 0.03614466816999844, 0.6335478258136937,
    );

    #[rustfmt::skip]
    #[allow(clippy::excessive_precision)]
    const LMS_TO_OKLAB: Transform = transform_3x3(
         0.2104542553,  1.9779984951,  0.0259040371,
         0.7936177850, -2.4285922050,  0.7827717662,
        -0.0040720468,  0.4505937099, -0.8086757660,
    );

    let lms = transform(&XYZ_TO_LMS, color.components);
    let lms = lms.map(|v| v.cbrt());
    color.with_components(Space::Oklab, transform(&LMS_TO_OKLAB, lms))
}

pub(crate) fn oklab_to_xyz_d65(color: &Color) -> Color {
    #[rustfmt::skip]
    #[allow(clippy::excessive_precision)]
    const OKLAB_TO_LMS: Transform = transform_3x3(
        0.99999999845051981432,  1.0000000088817607767,    1.0000000546724109177,
        0.39633779217376785678, -0.1055613423236563494,   -0.089484182094965759684,
        0.21580375806075880339, -0.063854174771705903402, -1.2914855378640917399,
    );

    #[rustfmt::skip]
    #[allow(clippy::excessive_precision)]
    const LMS_TO_XYZ: Transform = transform_3x3(
         1.2268798733741557,  -0.04057576262431372, -0.07637294974672142,
        -0.5578149965554813,   1.1122868293970594,  -0.4214933239627914,
         0.28139105017721583, -0.07171106666151701,  1.5869240244272418,
    );

    let lms = transform(&OKLAB_TO_LMS, color.components.map(normalize));
    let lms = lms.map(|v| v * v * v);
    color.with_components(Space::XyzD65, transform(&LMS_TO_XYZ, lms))
}

/// Rectangular to cylindrical polar, shared by Lab->LCh, Oklab->OKLCh and
/// JzAzBz->JzCzHz.
fn to_polar(color: &Color, space: Space) -> Color {
    let Components(lightness, a, b) = color.components;

    let chroma = (a * a + b * b).sqrt();
    let hue = if almost_zero(chroma) {
        Component::NAN
    } else {
        normalize_hue(b.atan2(a).to_degrees())
    };

    color.with_components(space, Components(lightness, chroma, hue))
}

/// Cylindrical polar to rectangular, the inverse of [`to_polar`].
fn to_rectangular(color: &Color, space: Space) -> Color {
    let Components(lightness, chroma, hue) = color.components.map(normalize);

    let hue = hue.to_radians();
    let a = chroma * hue.cos();
    let b = chroma * hue.sin();

    color.with_components(space, Components(lightness, a, b))
}

pub(crate) fn lab_to_lch(color: &Color) -> Color {
    to_polar(color, Space::Lch)
}

pub(crate) fn lch_to_lab(color: &Color) -> Color {
    to_rectangular(color, Space::Lab)
}

pub(crate) fn oklab_to_oklch(color: &Color) -> Color {
    to_polar(color, Space::Oklch)
}

pub(crate) fn oklch_to_oklab(color: &Color) -> Color {
    to_rectangular(color, Space::Oklab)
}

pub(crate) fn jzazbz_to_jzczhz(color: &Color) -> Color {
    to_polar(color, Space::Jzczhz)
}

pub(crate) fn jzczhz_to_jzazbz(color: &Color) -> Color {
    to_rectangular(color, Space::Jzazbz)
}

pub(crate) fn srgb_to_hsl(color: &Color) -> Color {
    color.with_components(Space::Hsl, util::rgb_to_hsl(&color.components))
}

pub(crate) fn hsl_to_srgb(color: &Color) -> Color {
    color.with_components(Space::Srgb, util::hsl_to_rgb(&color.components))
}

pub(crate) fn srgb_to_hsv(color: &Color) -> Color {
    color.with_components(Space::Hsv, util::rgb_to_hsv(&color.components))
}

pub(crate) fn hsv_to_srgb(color: &Color) -> Color {
    color.with_components(Space::Srgb, util::hsv_to_rgb(&color.components))
}

pub(crate) fn srgb_to_hwb(color: &Color) -> Color {
    color.with_components(Space::Hwb, util::rgb_to_hwb(&color.components))
}

pub(crate) fn hwb_to_srgb(color: &Color) -> Color {
    color.with_components(Space::Srgb, util::hwb_to_rgb(&color.components))
}

// display-p3 shares the sRGB transfer curve but has its own primaries; the
// linear-light step stays internal to the edge.

pub(crate) fn display_p3_to_xyz_d65(color: &Color) -> Color {
    #[rustfmt::skip]
    #[allow(clippy::excessive_precision)]
    const TO_XYZ: Transform = transform_3x3(
        0.48657094864821626, 0.22897456406974884, 0.0,
        0.26566769316909294, 0.6917385218365062,  0.045113381858902575,
        0.1982172852343625,  0.079286914093745,   1.0439443689009757,
    );

    let linear = srgb_to_srgb_linear(color).components;
    color.with_components(Space::XyzD65, transform(&TO_XYZ, linear))
}

pub(crate) fn xyz_d65_to_display_p3(color: &Color) -> Color {
    #[rustfmt::skip]
    #[allow(clippy::excessive_precision)]
    const FROM_XYZ: Transform = transform_3x3(
         2.4934969119414245,  -0.829488969561575,    0.035845830243784335,
        -0.9313836179191236,   1.7626640603183468,  -0.07617238926804171,
        -0.40271078445071684,  0.02362468584194359,  0.9568845240076873,
    );

    let linear = color.with_components(Space::SrgbLinear, transform(&FROM_XYZ, color.components));
    let gamma = srgb_linear_to_srgb(&linear);
    color.with_components(Space::DisplayP3, gamma.components)
}

// JzAzBz per Safdar et al., with the PQ transfer applied to an absolute
// luminance scale where Y = 1.0 maps to 203 cd/m^2.

const JZ_B: Component = 1.15;
const JZ_G: Component = 0.66;
const JZ_D: Component = -0.56;
#[allow(clippy::excessive_precision)]
const JZ_D0: Component = 1.6295499532821566e-11;
const ABS_LUMINANCE: Component = 203.0;

const PQ_ETA: Component = 2610.0 / 16384.0;
const PQ_RHO: Component = 1.7 * 2523.0 / 32.0;
const PQ_C1: Component = 3424.0 / 4096.0;
const PQ_C2: Component = 2413.0 / 128.0;
const PQ_C3: Component = 2392.0 / 128.0;

fn pq_encode(value: Component) -> Component {
    let v = (value.max(0.0) / 10000.0).powf(PQ_ETA);
    ((PQ_C1 + PQ_C2 * v) / (1.0 + PQ_C3 * v)).powf(PQ_RHO)
}

fn pq_decode(value: Component) -> Component {
    let v = value.max(0.0).powf(1.0 / PQ_RHO);
    10000.0 * ((PQ_C1 - v) / (PQ_C3 * v - PQ_C2)).max(0.0).powf(1.0 / PQ_ETA)
}

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const XYZP_TO_LMS: Transform = transform_3x3(
    0.41478972, -0.2015100, -0.0166008,
    0.579999,    1.120649,   0.264800,
    0.0146480,   0.0531008,  0.6684799,
);

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const LMS_TO_IZAZBZ: Transform = transform_3x3(
    0.5,  3.524000, 0.199076,
    0.5, -4.066708, 1.096799,
    0.0,  0.542708, -1.295875,
);

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const IZAZBZ_TO_LMS: Transform = transform_3x3(
    1.0,                  1.0,                  1.0,
    0.1386050432715393,  -0.1386050432715393,  -0.09601924202631895,
    0.05804731615611869, -0.05804731615611869, -0.8118918960560390,
);

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const LMS_TO_XYZP: Transform = transform_3x3(
     1.9242264357876067,   0.35031676209499907, -0.09098281098284752,
    -1.0047923125953657,   0.7264811939316552,  -0.3127282905230739,
     0.037651404030618,   -0.06538442294808501,  1.5227665613052603,
);

pub(crate) fn xyz_d65_to_jzazbz(color: &Color) -> Color {
    let Components(x, y, z) = color.components.map(|v| normalize(v) * ABS_LUMINANCE);

    let xp = JZ_B * x - (JZ_B - 1.0) * z;
    let yp = JZ_G * y - (JZ_G - 1.0) * x;

    let lms = transform(&XYZP_TO_LMS, Components(xp, yp, z));
    let lms = lms.map(pq_encode);

    let Components(iz, az, bz) = transform(&LMS_TO_IZAZBZ, lms);
    let jz = ((1.0 + JZ_D) * iz) / (1.0 + JZ_D * iz) - JZ_D0;

    color.with_components(Space::Jzazbz, Components(jz, az, bz))
}

pub(crate) fn jzazbz_to_xyz_d65(color: &Color) -> Color {
    let Components(jz, az, bz) = color.components.map(normalize);

    let jz = jz + JZ_D0;
    let iz = jz / (1.0 + JZ_D - JZ_D * jz);

    let lms = transform(&IZAZBZ_TO_LMS, Components(iz, az, bz));
    let lms = lms.map(pq_decode);

    let Components(xp, yp, zp) = transform(&LMS_TO_XYZP, lms);

    let x = (xp + (JZ_B - 1.0) * zp) / JZ_B;
    let y = (yp + (JZ_G - 1.0) * x) / JZ_G;

    color.with_components(
        Space::XyzD65,
        Components(x, y, zp).map(|v| v / ABS_LUMINANCE),
    )
}

mod util {
    use crate::{
        color::{Component, Components},
        math::{almost_zero, normalize, normalize_hue},
    };

    /// Calculate the hue from RGB components and return it along with the min
    /// and max RGB values.
    fn rgb_to_hue_with_min_max(from: &Components) -> (Component, Component, Component) {
        let Components(red, green, blue) = *from;

        let max = red.max(green).max(blue);
        let min = red.min(green).min(blue);

        let delta = max - min;

        let hue = if delta != 0.0 {
            60.0 * if max == red {
                (green - blue) / delta + if green < blue { 6.0 } else { 0.0 }
            } else if max == green {
                (blue - red) / delta + 2.0
            } else {
                (red - green) / delta + 4.0
            }
        } else {
            Component::NAN
        };

        (hue, min, max)
    }

    /// Convert from RGB notation to HSL notation.
    /// <https://drafts.csswg.org/css-color-4/#rgb-to-hsl>
    pub fn rgb_to_hsl(from: &Components) -> Components {
        let (hue, min, max) = rgb_to_hue_with_min_max(from);

        let lightness = (min + max) / 2.0;
        let delta = max - min;

        let saturation =
            if almost_zero(delta) || almost_zero(lightness) || almost_zero(1.0 - lightness) {
                0.0
            } else {
                (max - lightness) / lightness.min(1.0 - lightness)
            };

        Components(hue, saturation, lightness)
    }

    /// Convert from HSL notation to RGB notation.
    /// <https://drafts.csswg.org/css-color-4/#hsl-to-rgb>
    pub fn hsl_to_rgb(from: &Components) -> Components {
        let Components(hue, saturation, lightness) = from.map(normalize);

        if saturation <= 0.0 {
            return Components(lightness, lightness, lightness);
        }

        let hue = normalize_hue(hue);

        macro_rules! f {
            ($n:expr) => {{
                let k = ($n + hue / 30.0) % 12.0;
                let a = saturation * lightness.min(1.0 - lightness);
                lightness - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0)
            }};
        }

        Components(f!(0.0), f!(8.0), f!(4.0))
    }

    /// Convert from RGB notation to HSV notation.
    pub fn rgb_to_hsv(from: &Components) -> Components {
        let (hue, min, max) = rgb_to_hue_with_min_max(from);

        let saturation = if almost_zero(max) {
            0.0
        } else {
            (max - min) / max
        };

        Components(hue, saturation, max)
    }

    /// Convert from HSV notation to RGB notation.
    pub fn hsv_to_rgb(from: &Components) -> Components {
        let Components(hue, saturation, value) = from.map(normalize);

        if saturation <= 0.0 {
            return Components(value, value, value);
        }

        let hue = normalize_hue(hue);

        macro_rules! f {
            ($n:expr) => {{
                let k = ($n + hue / 60.0) % 6.0;
                value - value * saturation * k.min(4.0 - k).clamp(0.0, 1.0)
            }};
        }

        Components(f!(5.0), f!(3.0), f!(1.0))
    }

    /// Convert from RGB notation to HWB notation.
    /// <https://drafts.csswg.org/css-color-4/#rgb-to-hwb>
    pub fn rgb_to_hwb(from: &Components) -> Components {
        let (hue, min, max) = rgb_to_hue_with_min_max(from);

        let whiteness = min;
        let blackness = 1.0 - max;

        Components(hue, whiteness, blackness)
    }

    /// Convert from HWB notation to RGB notation.
    /// <https://drafts.csswg.org/css-color-4/#hwb-to-rgb>
    pub fn hwb_to_rgb(from: &Components) -> Components {
        let hue = from.0;
        let whiteness = normalize(from.1);
        let blackness = normalize(from.2);

        if whiteness + blackness >= 1.0 {
            let gray = whiteness / (whiteness + blackness);
            return Components(gray, gray, gray);
        }

        let rgb = hsl_to_rgb(&Components(hue, 1.0, 0.5));
        rgb.map(|v| v * (1.0 - whiteness - blackness) + whiteness)
    }
}
