//! Text input parsing.
//!
//! Three families of input are recognized, dispatched by prefix:
//!
//! - hex notation: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
//! - CSS functional notation: `rgb()`, `hsl()`, `hwb()`, `lab()`, `oklch()`,
//!   `color(srgb ...)` and friends
//! - the crate's own tagged form: `ChromaKit|v1 <space> <n> <n> <n> [/ a]`
//!
//! The returned [`Color`] is in the input's native space; conversion to a
//! working space is the caller's concern (see [`crate::service`]).

use crate::{
    color::{Color, Component, Space},
    error::{Error, Result},
};

const V1_TAG: &str = "chromakit|v1";

/// Parse a color from text. Leading/trailing whitespace is ignored.
pub fn parse(input: &str) -> Result<Color> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyInput);
    }

    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex);
    }

    if let Some(head) = trimmed.get(..V1_TAG.len()) {
        if head.eq_ignore_ascii_case(V1_TAG) {
            return parse_v1(trimmed[V1_TAG.len()..].trim_start());
        }
    }

    parse_functional(trimmed)
}

fn hex_nibble(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// `digits` is the input with the leading `#` already removed.
fn parse_hex(digits: &str) -> Result<Color> {
    let bytes = digits.as_bytes();
    let invalid = || Error::InvalidHex(format!("#{digits}"));

    let mut nibbles = [0u8; 8];
    for (slot, byte) in nibbles.iter_mut().zip(bytes) {
        *slot = hex_nibble(*byte).ok_or_else(invalid)?;
    }

    let (channels, alpha) = match bytes.len() {
        3 | 4 => {
            let expand = |n: u8| (n * 16 + n) as Component / 255.0;
            let channels = [expand(nibbles[0]), expand(nibbles[1]), expand(nibbles[2])];
            let alpha = (bytes.len() == 4).then(|| expand(nibbles[3]));
            (channels, alpha)
        }
        6 | 8 => {
            let pair = |i: usize| (nibbles[i * 2] * 16 + nibbles[i * 2 + 1]) as Component / 255.0;
            let channels = [pair(0), pair(1), pair(2)];
            let alpha = (bytes.len() == 8).then(|| pair(3));
            (channels, alpha)
        }
        _ => return Err(invalid()),
    };

    Ok(Color::new(
        Space::Srgb,
        channels[0],
        channels[1],
        channels[2],
        alpha.unwrap_or(1.0),
    ))
}

/// Split functional/tagged arguments into tokens. Commas count as
/// whitespace and `/` is always its own token, so `0.1,0.2 0.3/50%`
/// tokenizes the same as `0.1 0.2 0.3 / 50%`.
fn tokenize(args: &str) -> Vec<String> {
    args.replace(',', " ")
        .replace('/', " / ")
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// A parsed argument slot: a value, or `None` for the `none` keyword.
type Slot = Option<Component>;

fn parse_number(token: &str) -> Result<Component> {
    token
        .parse::<Component>()
        .map_err(|_| Error::ParseFailed(format!("invalid number {token:?}")))
}

/// Plain number, or a percentage mapped so that `100%` equals
/// `percent_scale`.
fn parse_scaled(token: &str, percent_scale: Component) -> Result<Slot> {
    if token == "none" {
        return Ok(None);
    }
    if let Some(percent) = token.strip_suffix('%') {
        return Ok(Some(parse_number(percent)? / 100.0 * percent_scale));
    }
    parse_number(token).map(Some)
}

/// Hue in degrees; a `deg` suffix is accepted and ignored.
fn parse_hue(token: &str) -> Result<Slot> {
    if token == "none" {
        return Ok(None);
    }
    let token = token.strip_suffix("deg").unwrap_or(token);
    parse_number(token).map(Some)
}

/// An RGB channel: 0-255, or a percentage.
fn parse_rgb_channel(token: &str) -> Result<Slot> {
    if token == "none" {
        return Ok(None);
    }
    if let Some(percent) = token.strip_suffix('%') {
        return Ok(Some(parse_number(percent)? / 100.0));
    }
    parse_number(token).map(|v| Some(v / 255.0))
}

/// Split off the optional `/ alpha` suffix and parse the alpha value,
/// clamped to [0, 1].
fn split_alpha(tokens: &[String]) -> Result<(&[String], Slot)> {
    match tokens.iter().position(|t| t == "/") {
        Some(at) => {
            if tokens.len() != at + 2 {
                return Err(Error::ParseFailed(
                    "expected a single alpha value after '/'".into(),
                ));
            }
            let alpha = parse_scaled(&tokens[at + 1], 1.0)?.map(|a| a.clamp(0.0, 1.0));
            Ok((&tokens[..at], alpha))
        }
        None => Ok((tokens, Some(1.0))),
    }
}

fn parse_functional(input: &str) -> Result<Color> {
    let (name, rest) = input
        .split_once('(')
        .ok_or_else(|| Error::UnsupportedFormat(input.to_owned()))?;
    let args = rest
        .strip_suffix(')')
        .ok_or_else(|| Error::ParseFailed("missing closing parenthesis".into()))?;

    let name = name.trim().to_ascii_lowercase();
    let tokens = tokenize(args);
    let (tokens, alpha) = split_alpha(&tokens)?;

    // Percentage reference values: `100%` in a given slot maps to the scale
    // named below, following the CSS serialization grammar.
    fn fraction(t: &str) -> Result<Slot> {
        parse_scaled(t, 1.0)
    }
    fn lightness_100(t: &str) -> Result<Slot> {
        parse_scaled(t, 100.0)
    }
    fn lab_ab(t: &str) -> Result<Slot> {
        parse_scaled(t, 125.0)
    }
    fn lch_chroma(t: &str) -> Result<Slot> {
        parse_scaled(t, 150.0)
    }
    fn ok_ab(t: &str) -> Result<Slot> {
        parse_scaled(t, 0.4)
    }

    // color() carries the space name as its first argument.
    if name == "color" {
        let (space_name, components) = tokens
            .split_first()
            .ok_or_else(|| Error::ParseFailed("color() requires a color space".into()))?;
        let space = Space::from_name(space_name)
            .ok_or_else(|| Error::UnsupportedFormat(format!("color({space_name} ...)")))?;
        let slots = parse_slots(components, [fraction, fraction, fraction])?;
        return Ok(Color::new(space, slots[0], slots[1], slots[2], alpha));
    }

    type SlotParser = fn(&str) -> Result<Slot>;
    let (space, parsers): (Space, [SlotParser; 3]) = match name.as_str() {
        "rgb" | "rgba" => (
            Space::Srgb,
            [parse_rgb_channel, parse_rgb_channel, parse_rgb_channel],
        ),
        "hsl" | "hsla" => (Space::Hsl, [parse_hue, fraction, fraction]),
        "hsv" => (Space::Hsv, [parse_hue, fraction, fraction]),
        "hwb" => (Space::Hwb, [parse_hue, fraction, fraction]),
        "lab" => (Space::Lab, [lightness_100, lab_ab, lab_ab]),
        "lch" => (Space::Lch, [lightness_100, lch_chroma, parse_hue]),
        "oklab" => (Space::Oklab, [fraction, ok_ab, ok_ab]),
        "oklch" => (Space::Oklch, [fraction, ok_ab, parse_hue]),
        "jzazbz" => (Space::Jzazbz, [fraction, fraction, fraction]),
        "jzczhz" => (Space::Jzczhz, [fraction, fraction, parse_hue]),
        _ => return Err(Error::UnsupportedFormat(format!("{name}(...)"))),
    };

    let slots = parse_slots(tokens, parsers)?;
    Ok(Color::new(space, slots[0], slots[1], slots[2], alpha))
}

fn parse_slots(tokens: &[String], parsers: [fn(&str) -> Result<Slot>; 3]) -> Result<[Slot; 3]> {
    if tokens.len() != 3 {
        return Err(Error::ParseFailed(format!(
            "expected 3 components, found {}",
            tokens.len()
        )));
    }
    Ok([
        parsers[0](&tokens[0])?,
        parsers[1](&tokens[1])?,
        parsers[2](&tokens[2])?,
    ])
}

/// `args` is everything after the (case-insensitive) `ChromaKit|v1` tag.
fn parse_v1(args: &str) -> Result<Color> {
    let tokens = tokenize(args);

    let (space_name, rest) = tokens
        .split_first()
        .ok_or_else(|| Error::InvalidV1("missing color space".into()))?;
    let space = Space::from_name(space_name)
        .ok_or_else(|| Error::InvalidV1(format!("unknown color space {space_name:?}")))?;

    let (components, alpha) = match rest.iter().position(|t| t == "/") {
        Some(at) => {
            if rest.len() != at + 2 {
                return Err(Error::InvalidV1("expected a single alpha value".into()));
            }
            let alpha = rest[at + 1]
                .parse::<Component>()
                .map_err(|_| Error::InvalidV1(format!("invalid alpha {:?}", rest[at + 1])))?;
            if !(0.0..=1.0).contains(&alpha) {
                return Err(Error::InvalidV1(format!(
                    "alpha {alpha} outside the [0, 1] range"
                )));
            }
            (&rest[..at], alpha)
        }
        None => (rest, 1.0),
    };

    if components.len() != 3 {
        return Err(Error::InvalidV1(format!(
            "expected 3 components, found {}",
            components.len()
        )));
    }

    let parse = |token: &String| -> Result<Slot> {
        if token == "none" {
            return Ok(None);
        }
        token
            .parse::<Component>()
            .map(Some)
            .map_err(|_| Error::InvalidV1(format!("invalid component {token:?}")))
    };

    Ok(Color::new(
        space,
        parse(&components[0])?,
        parse(&components[1])?,
        parse(&components[2])?,
        alpha,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;

    #[test]
    fn empty_input() {
        assert_eq!(parse(""), Err(Error::EmptyInput));
        assert_eq!(parse("   "), Err(Error::EmptyInput));
    }

    #[test]
    fn hex_forms() {
        let c = parse("#d2691e").unwrap();
        assert_eq!(c.space, Space::Srgb);
        assert_component_eq!(c.components.0, 0.823529);
        assert_component_eq!(c.components.1, 0.411765);
        assert_component_eq!(c.components.2, 0.117647);
        assert_component_eq!(c.alpha, 1.0);

        let c = parse("#fff").unwrap();
        assert_eq!(c.components.0, 1.0);

        let c = parse("#ff000080").unwrap();
        assert_component_eq!(c.alpha, 0.501961);

        let c = parse("#f008").unwrap();
        assert_component_eq!(c.alpha, 0.533333);
    }

    #[test]
    fn bad_hex() {
        assert!(matches!(parse("#12345"), Err(Error::InvalidHex(_))));
        assert!(matches!(parse("#zzz"), Err(Error::InvalidHex(_))));
    }

    #[test]
    fn rgb_functional() {
        let c = parse("rgb(210, 105, 30)").unwrap();
        assert_eq!(c.space, Space::Srgb);
        assert_component_eq!(c.components.0, 0.823529);

        let c = parse("rgba(100% 0% 50% / 0.5)").unwrap();
        assert_component_eq!(c.components.2, 0.5);
        assert_component_eq!(c.alpha, 0.5);
    }

    #[test]
    fn hsl_and_hwb() {
        let c = parse("hsl(25deg, 75%, 47.0588%)").unwrap();
        assert_eq!(c.space, Space::Hsl);
        assert_component_eq!(c.components.0, 25.0);
        assert_component_eq!(c.components.1, 0.75);

        let c = parse("hwb(40 30% 40%)").unwrap();
        assert_eq!(c.space, Space::Hwb);
        assert_component_eq!(c.components.1, 0.3);
    }

    #[test]
    fn lab_percent_scales() {
        let c = parse("lab(50% 40% -40%)").unwrap();
        assert_component_eq!(c.components.0, 50.0);
        assert_component_eq!(c.components.1, 50.0);
        assert_component_eq!(c.components.2, -50.0);
    }

    #[test]
    fn oklch_with_none_hue() {
        let c = parse("oklch(0.6 0.0 none)").unwrap();
        assert_eq!(c.space, Space::Oklch);
        assert_eq!(c.c2(), None);
    }

    #[test]
    fn color_function_spaces() {
        let c = parse("color(xyz-d65 0.3186 0.2390 0.0416)").unwrap();
        assert_eq!(c.space, Space::XyzD65);

        let c = parse("color(display-p3 1 0 0.3 / 80%)").unwrap();
        assert_eq!(c.space, Space::DisplayP3);
        assert_component_eq!(c.alpha, 0.8);

        assert!(matches!(
            parse("color(rec2020 1 0 0)"),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn unsupported_prefix() {
        assert!(matches!(
            parse("cmyk(0 0 0 1)"),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(matches!(
            parse("not a color"),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn v1_tagged_format() {
        let c = parse("ChromaKit|v1 oklch 0.6 0.15 50.0").unwrap();
        assert_eq!(c.space, Space::Oklch);
        assert_component_eq!(c.components.1, 0.15);
        assert_component_eq!(c.alpha, 1.0);

        // Case-insensitive tag, comma separators, explicit alpha.
        let c = parse("chromakit|V1 srgb 0.1, 0.2, 0.3 / 0.25").unwrap();
        assert_eq!(c.space, Space::Srgb);
        assert_component_eq!(c.alpha, 0.25);
    }

    #[test]
    fn v1_validation() {
        assert!(matches!(
            parse("ChromaKit|v1 srgb 0.1 0.2"),
            Err(Error::InvalidV1(_))
        ));
        assert!(matches!(
            parse("ChromaKit|v1 srgb 0.1 0.2 0.3 / 1.5"),
            Err(Error::InvalidV1(_))
        ));
        assert!(matches!(
            parse("ChromaKit|v1 notaspace 0.1 0.2 0.3"),
            Err(Error::InvalidV1(_))
        ));
    }
}
