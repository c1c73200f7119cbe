//! A [`Color`] represents a color that was specified in any of the supported
//! color spaces, tagged with the [`Space`] its components belong to.

use std::ops::{Add, Sub};

use bitflags::bitflags;

#[cfg(not(feature = "f64"))]
/// A 32-bit floating point value that all components are stored as.
pub type Component = f32;

#[cfg(feature = "f64")]
/// A 64-bit floating point value that all components are stored as.
pub type Component = f64;

/// Represent the three components that describe any color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Components(pub Component, pub Component, pub Component);

impl Components {
    /// Return new components with each component mapped with the given
    /// function.
    pub fn map(&self, f: impl Fn(Component) -> Component) -> Self {
        Self(f(self.0), f(self.1), f(self.2))
    }
}

impl Sub for Components {
    type Output = Components;

    fn sub(self, rhs: Self) -> Self::Output {
        Components(self.0 - rhs.0, self.1 - rhs.1, self.2 - rhs.2)
    }
}

impl Add for Components {
    type Output = Components;

    fn add(self, rhs: Self) -> Self::Output {
        Components(self.0 + rhs.0, self.1 + rhs.1, self.2 + rhs.2)
    }
}

bitflags! {
    /// Flags to mark any missing components on a [`Color`]
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct Flags : u8 {
        /// Set when the first component of a [`Color`] is missing.
        const C0_IS_NONE = 1 << 0;
        /// Set when the second component of a [`Color`] is missing.
        const C1_IS_NONE = 1 << 1;
        /// Set when the third component of a [`Color`] is missing.
        const C2_IS_NONE = 1 << 2;
        /// Set when the alpha component of a [`Color`] is missing.
        const ALPHA_IS_NONE = 1 << 3;
    }
}

/// The closed set of color spaces and forms a [`Color`] can be tagged with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Space {
    /// The sRGB color space with gamma encoding.
    Srgb = 0,
    /// The sRGB color space with no gamma encoding.
    SrgbLinear = 1,
    /// The HSL (hue, saturation, lightness) notation of the sRGB color space.
    Hsl = 2,
    /// The HSV (hue, saturation, value) notation of the sRGB color space.
    Hsv = 3,
    /// The HWB (hue, whiteness, blackness) notation of the sRGB color space.
    Hwb = 4,
    /// CIE-XYZ with a D50 reference white.
    XyzD50 = 5,
    /// CIE-XYZ with a D65 reference white.
    XyzD65 = 6,
    /// CIE-Lab (D50 relative).
    Lab = 7,
    /// CIE-LCh, the cylindrical polar form of CIE-Lab.
    Lch = 8,
    /// Oklab (D65 relative).
    Oklab = 9,
    /// OKLCh, the cylindrical polar form of Oklab.
    Oklch = 10,
    /// JzAzBz (D65 relative, absolute luminance).
    Jzazbz = 11,
    /// JzCzHz, the cylindrical polar form of JzAzBz.
    Jzczhz = 12,
    /// display-p3
    DisplayP3 = 13,
}

impl Space {
    /// All supported spaces, in declaration order.
    pub const ALL: [Space; 14] = [
        Space::Srgb,
        Space::SrgbLinear,
        Space::Hsl,
        Space::Hsv,
        Space::Hwb,
        Space::XyzD50,
        Space::XyzD65,
        Space::Lab,
        Space::Lch,
        Space::Oklab,
        Space::Oklch,
        Space::Jzazbz,
        Space::Jzczhz,
        Space::DisplayP3,
    ];

    /// The canonical kebab-case name for this space, as used by the
    /// `ChromaKit|v1` text format and CSS `color()` syntax.
    pub fn name(&self) -> &'static str {
        match self {
            Space::Srgb => "srgb",
            Space::SrgbLinear => "srgb-linear",
            Space::Hsl => "hsl",
            Space::Hsv => "hsv",
            Space::Hwb => "hwb",
            Space::XyzD50 => "xyz-d50",
            Space::XyzD65 => "xyz-d65",
            Space::Lab => "lab",
            Space::Lch => "lch",
            Space::Oklab => "oklab",
            Space::Oklch => "oklch",
            Space::Jzazbz => "jzazbz",
            Space::Jzczhz => "jzczhz",
            Space::DisplayP3 => "display-p3",
        }
    }

    /// Look up a space by its canonical name. `xyz` is accepted as an alias
    /// for `xyz-d65`.
    pub fn from_name(name: &str) -> Option<Space> {
        match name {
            "srgb" => Some(Space::Srgb),
            "srgb-linear" => Some(Space::SrgbLinear),
            "hsl" => Some(Space::Hsl),
            "hsv" => Some(Space::Hsv),
            "hwb" => Some(Space::Hwb),
            "xyz-d50" => Some(Space::XyzD50),
            "xyz" | "xyz-d65" => Some(Space::XyzD65),
            "lab" => Some(Space::Lab),
            "lch" => Some(Space::Lch),
            "oklab" => Some(Space::Oklab),
            "oklch" => Some(Space::Oklch),
            "jzazbz" => Some(Space::Jzazbz),
            "jzczhz" => Some(Space::Jzczhz),
            "display-p3" => Some(Space::DisplayP3),
            _ => None,
        }
    }
}

/// Struct that can hold a color of any color space.
#[derive(Clone, Debug, PartialEq)]
pub struct Color {
    /// The three components that make up any color.
    pub components: Components,
    /// The alpha component of the color.
    pub alpha: Component,
    /// Holds any flags that might be enabled for this color.
    pub flags: Flags,
    /// The color space in which the components are set.
    pub space: Space,
}

impl Color {
    /// Create a new [`Color`]. Each color or alpha component can take values
    /// that can be converted into a [`ComponentDetails`]. This automates the
    /// process of setting values to missing. For example:
    /// ```rust
    /// use chromakit::{Color, Space};
    /// let c = Color::new(Space::Srgb, None, None, None, 1.0);
    /// ```
    /// will set all the color components to missing.
    pub fn new(
        space: Space,
        c0: impl Into<ComponentDetails>,
        c1: impl Into<ComponentDetails>,
        c2: impl Into<ComponentDetails>,
        alpha: impl Into<ComponentDetails>,
    ) -> Self {
        let mut flags = Flags::empty();

        let c0 = c0.into().value_and_flag(&mut flags, Flags::C0_IS_NONE);
        let c1 = c1.into().value_and_flag(&mut flags, Flags::C1_IS_NONE);
        let c2 = c2.into().value_and_flag(&mut flags, Flags::C2_IS_NONE);
        let alpha = alpha
            .into()
            .value_and_flag(&mut flags, Flags::ALPHA_IS_NONE);

        Self {
            components: Components(c0, c1, c2),
            alpha,
            flags,
            space,
        }
    }

    /// Return the first component of the color.
    pub fn c0(&self) -> Option<Component> {
        if self.flags.contains(Flags::C0_IS_NONE) {
            None
        } else {
            Some(self.components.0)
        }
    }

    /// Return the second component of the color.
    pub fn c1(&self) -> Option<Component> {
        if self.flags.contains(Flags::C1_IS_NONE) {
            None
        } else {
            Some(self.components.1)
        }
    }

    /// Return the third component of the color.
    pub fn c2(&self) -> Option<Component> {
        if self.flags.contains(Flags::C2_IS_NONE) {
            None
        } else {
            Some(self.components.2)
        }
    }

    /// Return the alpha component of the color.
    pub fn alpha(&self) -> Option<Component> {
        if self.flags.contains(Flags::ALPHA_IS_NONE) {
            None
        } else {
            Some(self.alpha)
        }
    }

    /// Return a copy of this color with the three components replaced and the
    /// space re-tagged. Alpha and flags are carried over untouched, which is
    /// what every pairwise conversion needs.
    pub fn with_components(&self, space: Space, components: Components) -> Self {
        Self {
            components,
            alpha: self.alpha,
            flags: self.flags,
            space,
        }
    }
}

/// A struct that holds details about a component passed to any of the `new`
/// functions for colors. Any component that can be passed implements
/// a `From<?> for ComponentDetails`.
pub struct ComponentDetails {
    value: Component,
    is_none: bool,
}

impl ComponentDetails {
    /// Extract the value and set the given flag if the component is none.
    pub fn value_and_flag(&self, flags: &mut Flags, flag: Flags) -> Component {
        if self.is_none {
            *flags |= flag;
        }
        self.value
    }
}

impl From<Component> for ComponentDetails {
    fn from(value: Component) -> Self {
        Self {
            value,
            is_none: false,
        }
    }
}

impl From<Option<Component>> for ComponentDetails {
    fn from(value: Option<Component>) -> Self {
        if let Some(value) = value {
            Self::from(value)
        } else {
            Self {
                value: 0.0,
                is_none: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_color_with_correct_components() {
        let c = Color::new(Space::Srgb, 0.1, 0.2, 0.3, 0.4);
        assert_eq!(c.components, Components(0.1, 0.2, 0.3));
        assert_eq!(c.alpha, 0.4);
        assert_eq!(c.flags, Flags::empty());
        assert_eq!(c.space, Space::Srgb);

        let c = Color::new(Space::Srgb, 0.1, 0.2, None, 0.4);
        assert_eq!(c.components.2, 0.0);
        assert_eq!(c.alpha, 0.4);
        assert_eq!(c.flags, Flags::C2_IS_NONE);
        assert_eq!(c.space, Space::Srgb);

        let c = Color::new(Space::Srgb, 0.1, 0.2, 0.3, None);
        assert_eq!(c.components, Components(0.1, 0.2, 0.3));
        assert_eq!(c.alpha, 0.0);
        assert_eq!(c.flags, Flags::ALPHA_IS_NONE);
        assert_eq!(c.space, Space::Srgb);
    }

    #[test]
    fn test_component_details() {
        let cd = ComponentDetails::from(10.0);
        assert_eq!(cd.value, 10.0);
        assert!(!cd.is_none);

        let cd = ComponentDetails::from(Component::NAN);
        assert!(cd.value.is_nan());
        assert!(!cd.is_none);

        let cd = ComponentDetails::from(Some(20.0));
        assert_eq!(cd.value, 20.0);
        assert!(!cd.is_none);

        let cd = ComponentDetails::from(None);
        assert_eq!(cd.value, 0.0);
        assert!(cd.is_none);
    }

    #[test]
    fn space_names_round_trip() {
        for space in Space::ALL {
            assert_eq!(Space::from_name(space.name()), Some(space));
        }
        assert_eq!(Space::from_name("xyz"), Some(Space::XyzD65));
        assert_eq!(Space::from_name("not-a-space"), None);
    }
}
