//! Text output: the portable `ChromaKit|v1` form and per-space CSS strings.

use std::fmt::Write;

use crate::color::{Color, Component, Space};

/// Format a component with up to six decimal places, trailing zeros
/// trimmed so round values stay short.
fn fmt_number(value: Component) -> String {
    let mut s = format!("{value:.6}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

/// A NaN component is powerless (a polar conversion at zero chroma yields a
/// NaN hue without setting a missing flag), so it serializes as `none` too.
fn fmt_component(value: Option<Component>) -> String {
    match value {
        Some(value) if !value.is_nan() => fmt_number(value),
        _ => "none".to_owned(),
    }
}

/// Serialize into the crate's portable tagged form:
/// `ChromaKit|v1 <space> <c0> <c1> <c2> [/ alpha]`. The alpha suffix is
/// only emitted when alpha is not a plain opaque 1.0. The output round
/// trips through [`crate::parse::parse`].
pub fn serialize_v1(color: &Color) -> String {
    let mut out = format!(
        "ChromaKit|v1 {} {} {} {}",
        color.space.name(),
        fmt_component(color.c0()),
        fmt_component(color.c1()),
        fmt_component(color.c2()),
    );
    if color.alpha() != Some(1.0) {
        let _ = write!(out, " / {}", fmt_component(color.alpha()));
    }
    out
}

fn alpha_suffix(color: &Color) -> String {
    if color.alpha() == Some(1.0) {
        String::new()
    } else {
        format!(" / {}", fmt_component(color.alpha()))
    }
}

fn fmt_percent(value: Option<Component>) -> String {
    match value {
        Some(value) if !value.is_nan() => format!("{}%", fmt_number(value * 100.0)),
        _ => "none".to_owned(),
    }
}

/// Render the color in its own space's CSS notation. sRGB becomes hex when
/// fully opaque with no missing channels, `rgba()` otherwise. Spaces without
/// a dedicated CSS function use the `color()` syntax, and JzAzBz/JzCzHz get
/// a matching functional form of their own.
pub fn to_css_string(color: &Color) -> String {
    match color.space {
        Space::Srgb => {
            let channels = (color.c0(), color.c1(), color.c2());
            if let (Some(red), Some(green), Some(blue)) = channels {
                let byte = |v: Component| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
                if color.alpha() == Some(1.0) {
                    return format!("#{:02x}{:02x}{:02x}", byte(red), byte(green), byte(blue));
                }
                return format!(
                    "rgba({}, {}, {}, {})",
                    byte(red),
                    byte(green),
                    byte(blue),
                    fmt_component(color.alpha()),
                );
            }
            format!(
                "color(srgb {} {} {}{})",
                fmt_component(color.c0()),
                fmt_component(color.c1()),
                fmt_component(color.c2()),
                alpha_suffix(color),
            )
        }
        Space::SrgbLinear | Space::XyzD50 | Space::XyzD65 | Space::DisplayP3 => format!(
            "color({} {} {} {}{})",
            color.space.name(),
            fmt_component(color.c0()),
            fmt_component(color.c1()),
            fmt_component(color.c2()),
            alpha_suffix(color),
        ),
        Space::Hsl => format!(
            "hsl({} {} {}{})",
            fmt_component(color.c0()),
            fmt_percent(color.c1()),
            fmt_percent(color.c2()),
            alpha_suffix(color),
        ),
        Space::Hsv => format!(
            "hsv({} {} {}{})",
            fmt_component(color.c0()),
            fmt_percent(color.c1()),
            fmt_percent(color.c2()),
            alpha_suffix(color),
        ),
        Space::Hwb => format!(
            "hwb({} {} {}{})",
            fmt_component(color.c0()),
            fmt_percent(color.c1()),
            fmt_percent(color.c2()),
            alpha_suffix(color),
        ),
        Space::Lab | Space::Lch | Space::Oklab | Space::Oklch | Space::Jzazbz | Space::Jzczhz => {
            format!(
                "{}({} {} {}{})",
                color.space.name(),
                fmt_component(color.c0()),
                fmt_component(color.c1()),
                fmt_component(color.c2()),
                alpha_suffix(color),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    #[test]
    fn v1_round_trips() {
        let color = Color::new(Space::Oklch, 0.6, 0.15, 50.0, 1.0);
        let text = serialize_v1(&color);
        assert_eq!(text, "ChromaKit|v1 oklch 0.6 0.15 50");
        assert_eq!(parse(&text).unwrap(), color);
    }

    #[test]
    fn v1_carries_alpha_and_missing_components() {
        let color = Color::new(Space::Oklch, 0.6, 0.15, None, 0.5);
        let text = serialize_v1(&color);
        assert_eq!(text, "ChromaKit|v1 oklch 0.6 0.15 none / 0.5");

        let parsed = parse(&text).unwrap();
        assert_eq!(parsed.c2(), None);
        assert_eq!(parsed.alpha(), Some(0.5));
    }

    #[test]
    fn nan_hue_serializes_as_none() {
        // The hue an achromatic color gets out of the polar conversions.
        let gray = Color::new(Space::Oklch, 0.6, 0.0, Component::NAN, 1.0);

        assert_eq!(serialize_v1(&gray), "ChromaKit|v1 oklch 0.6 0 none");
        assert_eq!(to_css_string(&gray), "oklch(0.6 0 none)");

        let hsl = Color::new(Space::Hsl, Component::NAN, 0.0, 0.5, 1.0);
        assert_eq!(to_css_string(&hsl), "hsl(none 0% 50%)");
    }

    #[test]
    fn srgb_css_forms() {
        let opaque = Color::new(Space::Srgb, 0.823529, 0.411765, 0.117647, 1.0);
        assert_eq!(to_css_string(&opaque), "#d2691e");

        let translucent = Color::new(Space::Srgb, 1.0, 0.0, 0.0, 0.5);
        assert_eq!(to_css_string(&translucent), "rgba(255, 0, 0, 0.5)");
    }

    #[test]
    fn functional_css_forms() {
        let oklch = Color::new(Space::Oklch, 0.634398, 0.154992, 50.262482, 1.0);
        assert_eq!(to_css_string(&oklch), "oklch(0.634398 0.154992 50.262482)");

        let p3 = Color::new(Space::DisplayP3, 1.0, 0.5, 0.25, 0.5);
        assert_eq!(to_css_string(&p3), "color(display-p3 1 0.5 0.25 / 0.5)");

        let jz = Color::new(Space::Jzazbz, 0.00543, -0.00132, 0.00347, 1.0);
        assert_eq!(to_css_string(&jz), "jzazbz(0.00543 -0.00132 0.00347)");
    }
}
