//! Perceptual color difference (delta-E) metrics.

use crate::{
    color::{Color, Component, Space},
    error::{Error, Result},
    registry::ConversionContext,
};

/// The supported delta-E formulas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeltaEMethod {
    /// CIE76, plain Euclidean distance in Lab.
    E76,
    /// CIEDE2000.
    #[default]
    E2000,
    /// CMC l:c (1984) with l=2, c=1.
    Cmc,
    /// Euclidean distance in OKLab.
    Ok,
    /// Euclidean distance in JzAzBz.
    Jz,
}

impl DeltaEMethod {
    /// Look up a method by its string key, as used by the palette API.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "76" | "cie76" => Ok(DeltaEMethod::E76),
            "2000" | "ciede2000" => Ok(DeltaEMethod::E2000),
            "cmc" => Ok(DeltaEMethod::Cmc),
            "ok" | "oklab" => Ok(DeltaEMethod::Ok),
            "jz" | "jzazbz" => Ok(DeltaEMethod::Jz),
            _ => Err(Error::UnknownDeltaE(name.to_owned())),
        }
    }
}

/// The perceptual distance between two colors, in any spaces reachable from
/// the given registry.
pub fn delta_e(
    reference: &Color,
    sample: &Color,
    method: DeltaEMethod,
    context: &ConversionContext,
) -> Result<Component> {
    let in_space = |space: Space| -> Result<(Color, Color)> {
        Ok((
            context.convert(reference, space)?,
            context.convert(sample, space)?,
        ))
    };

    match method {
        DeltaEMethod::E76 => {
            let (a, b) = in_space(Space::Lab)?;
            Ok(euclidean(&a, &b))
        }
        DeltaEMethod::E2000 => {
            let (a, b) = in_space(Space::Lab)?;
            Ok(ciede2000(&a, &b))
        }
        DeltaEMethod::Cmc => {
            let (a, b) = in_space(Space::Lab)?;
            Ok(cmc_2_1(&a, &b))
        }
        DeltaEMethod::Ok => {
            let (a, b) = in_space(Space::Oklab)?;
            Ok(euclidean(&a, &b))
        }
        DeltaEMethod::Jz => {
            let (a, b) = in_space(Space::Jzazbz)?;
            Ok(euclidean(&a, &b))
        }
    }
}

fn euclidean(a: &Color, b: &Color) -> Component {
    let d = a.components - b.components;
    (d.0 * d.0 + d.1 * d.1 + d.2 * d.2).sqrt()
}

fn ciede2000(reference: &Color, sample: &Color) -> Component {
    let (l1, a1, b1) = (
        reference.components.0,
        reference.components.1,
        reference.components.2,
    );
    let (l2, a2, b2) = (sample.components.0, sample.components.1, sample.components.2);

    const POW7_25: Component = 6103515625.0; // 25^7

    let c1 = (a1 * a1 + b1 * b1).sqrt();
    let c2 = (a2 * a2 + b2 * b2).sqrt();
    let c_bar = (c1 + c2) / 2.0;

    let c_bar_7 = c_bar.powi(7);
    let g = 0.5 * (1.0 - (c_bar_7 / (c_bar_7 + POW7_25)).sqrt());

    let a1p = (1.0 + g) * a1;
    let a2p = (1.0 + g) * a2;

    let c1p = (a1p * a1p + b1 * b1).sqrt();
    let c2p = (a2p * a2p + b2 * b2).sqrt();

    let h1p = hue_angle(b1, a1p);
    let h2p = hue_angle(b2, a2p);

    let dlp = l2 - l1;
    let dcp = c2p - c1p;

    let dhp = if c1p * c2p == 0.0 {
        0.0
    } else {
        let diff = h2p - h1p;
        if diff.abs() <= 180.0 {
            diff
        } else if diff > 180.0 {
            diff - 360.0
        } else {
            diff + 360.0
        }
    };
    let dh_term = 2.0 * (c1p * c2p).sqrt() * (dhp / 2.0).to_radians().sin();

    let l_bar = (l1 + l2) / 2.0;
    let cp_bar = (c1p + c2p) / 2.0;

    let hp_bar = if c1p * c2p == 0.0 {
        h1p + h2p
    } else {
        let sum = h1p + h2p;
        if (h1p - h2p).abs() <= 180.0 {
            sum / 2.0
        } else if sum < 360.0 {
            (sum + 360.0) / 2.0
        } else {
            (sum - 360.0) / 2.0
        }
    };

    let t = 1.0 - 0.17 * (hp_bar - 30.0).to_radians().cos()
        + 0.24 * (2.0 * hp_bar).to_radians().cos()
        + 0.32 * (3.0 * hp_bar + 6.0).to_radians().cos()
        - 0.20 * (4.0 * hp_bar - 63.0).to_radians().cos();

    let d_theta = 30.0 * (-((hp_bar - 275.0) / 25.0).powi(2)).exp();
    let cp_bar_7 = cp_bar.powi(7);
    let rc = 2.0 * (cp_bar_7 / (cp_bar_7 + POW7_25)).sqrt();
    let rt = -(2.0 * d_theta).to_radians().sin() * rc;

    let l_minus_50_sq = (l_bar - 50.0) * (l_bar - 50.0);
    let sl = 1.0 + 0.015 * l_minus_50_sq / (20.0 + l_minus_50_sq).sqrt();
    let sc = 1.0 + 0.045 * cp_bar;
    let sh = 1.0 + 0.015 * cp_bar * t;

    let dl = dlp / sl;
    let dc = dcp / sc;
    let dh = dh_term / sh;

    (dl * dl + dc * dc + dh * dh + rt * dc * dh).sqrt()
}

fn hue_angle(b: Component, a: Component) -> Component {
    if a == 0.0 && b == 0.0 {
        0.0
    } else {
        b.atan2(a).to_degrees().rem_euclid(360.0)
    }
}

/// CMC l:c with the textile-standard l=2, c=1 weights. Asymmetric; the
/// first argument is the reference.
fn cmc_2_1(reference: &Color, sample: &Color) -> Component {
    const L: Component = 2.0;
    const C: Component = 1.0;

    let (l1, a1, b1) = (
        reference.components.0,
        reference.components.1,
        reference.components.2,
    );
    let (l2, a2, b2) = (sample.components.0, sample.components.1, sample.components.2);

    let c1 = (a1 * a1 + b1 * b1).sqrt();
    let c2 = (a2 * a2 + b2 * b2).sqrt();

    let dl = l1 - l2;
    let dc = c1 - c2;
    let da = a1 - a2;
    let db = b1 - b2;
    let dh_sq = (da * da + db * db - dc * dc).max(0.0);

    let h1 = hue_angle(b1, a1);

    let sl = if l1 < 16.0 {
        0.511
    } else {
        0.040975 * l1 / (1.0 + 0.01765 * l1)
    };
    let sc = 0.0638 * c1 / (1.0 + 0.0131 * c1) + 0.638;

    let c1_4 = c1.powi(4);
    let f = (c1_4 / (c1_4 + 1900.0)).sqrt();
    let t = if (164.0..=345.0).contains(&h1) {
        0.56 + (0.2 * (h1 + 168.0).to_radians().cos()).abs()
    } else {
        0.36 + (0.4 * (h1 + 35.0).to_radians().cos()).abs()
    };
    let sh = sc * (f * t + 1.0 - f);

    let dl_term = dl / (L * sl);
    let dc_term = dc / (C * sc);

    (dl_term * dl_term + dc_term * dc_term + dh_sq / (sh * sh)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;

    fn lab(l: Component, a: Component, b: Component) -> Color {
        Color::new(Space::Lab, l, a, b, 1.0)
    }

    #[test]
    fn identical_colors_have_zero_distance() {
        let context = ConversionContext::standard();
        let color = Color::new(Space::Srgb, 0.4, 0.5, 0.6, 1.0);
        for method in [
            DeltaEMethod::E76,
            DeltaEMethod::E2000,
            DeltaEMethod::Cmc,
            DeltaEMethod::Ok,
            DeltaEMethod::Jz,
        ] {
            let d = delta_e(&color, &color, method, &context).unwrap();
            assert_component_eq!(d, 0.0);
        }
    }

    #[test]
    fn e76_is_euclidean_in_lab() {
        let context = ConversionContext::standard();
        let d = delta_e(&lab(50.0, 0.0, 0.0), &lab(50.0, 3.0, 4.0), DeltaEMethod::E76, &context)
            .unwrap();
        assert_component_eq!(d, 5.0);
    }

    #[test]
    fn ciede2000_matches_the_sharma_dataset() {
        let context = ConversionContext::standard();

        // Pairs 1, 7 and 24 from the Sharma, Wu & Dalal test data.
        let cases = [
            ((50.0, 2.6772, -79.7751), (50.0, 0.0, -82.7485), 2.0425),
            ((50.0, -1.3802, -84.2814), (50.0, 0.0, -82.7485), 1.0000),
            ((50.0, 2.5, 0.0), (50.0, 3.1736, 0.5854), 0.7146),
        ];

        for ((l1, a1, b1), (l2, a2, b2), expected) in cases {
            let d = delta_e(&lab(l1, a1, b1), &lab(l2, a2, b2), DeltaEMethod::E2000, &context)
                .unwrap();
            assert_component_eq!(d, expected, epsilon = 0.001);
        }
    }

    #[test]
    fn cmc_is_asymmetric() {
        let context = ConversionContext::standard();
        let a = lab(60.0, 30.0, -20.0);
        let b = lab(40.0, 10.0, 10.0);
        let forward = delta_e(&a, &b, DeltaEMethod::Cmc, &context).unwrap();
        let backward = delta_e(&b, &a, DeltaEMethod::Cmc, &context).unwrap();
        assert!(forward > 0.0 && backward > 0.0);
        assert!((forward - backward).abs() > 1e-3);
    }

    #[test]
    fn method_lookup_by_name() {
        assert_eq!(DeltaEMethod::from_name("ciede2000"), Ok(DeltaEMethod::E2000));
        assert_eq!(DeltaEMethod::from_name("ok"), Ok(DeltaEMethod::Ok));
        assert!(matches!(
            DeltaEMethod::from_name("euclid"),
            Err(Error::UnknownDeltaE(_))
        ));
    }
}
