//! A directed graph of pairwise conversions and the router that walks it.
//!
//! Rather than a hard coded matrix of space-to-space functions, conversions
//! are registered as edges between adjacent spaces and multi-step paths are
//! found with a breadth-first search. Ties between equally short paths go to
//! the edge registered first, so path selection is deterministic.

use std::collections::{HashMap, VecDeque};

use crate::{
    color::{Color, Space},
    convert,
    error::{Error, Result},
};

/// A single conversion edge. Operates on the three color components only;
/// alpha and the missing-component flags pass through.
pub type ConversionFn = fn(&Color) -> Color;

/// The set of registered conversion edges between color spaces.
pub struct ConversionContext {
    edges: HashMap<Space, Vec<(Space, ConversionFn)>>,
}

impl ConversionContext {
    /// A context with no edges at all. Every non-identity conversion fails
    /// until edges are registered.
    pub fn empty() -> Self {
        Self {
            edges: HashMap::new(),
        }
    }

    /// The standard conversion graph covering all supported spaces.
    ///
    /// XYZ-D65 is the central hub; sRGB carries the polar/notation forms
    /// (HSL, HSV, HWB) and Lab/Oklab/JzAzBz carry their cylindrical forms.
    pub fn standard() -> Self {
        let mut context = Self::empty();

        context.register_pair(
            Space::Srgb,
            Space::SrgbLinear,
            convert::srgb_to_srgb_linear,
            convert::srgb_linear_to_srgb,
        );
        context.register_pair(
            Space::SrgbLinear,
            Space::XyzD65,
            convert::srgb_linear_to_xyz_d65,
            convert::xyz_d65_to_srgb_linear,
        );
        context.register_pair(
            Space::XyzD65,
            Space::XyzD50,
            convert::xyz_d65_to_xyz_d50,
            convert::xyz_d50_to_xyz_d65,
        );
        context.register_pair(
            Space::XyzD50,
            Space::Lab,
            convert::xyz_d50_to_lab,
            convert::lab_to_xyz_d50,
        );
        context.register_pair(
            Space::Lab,
            Space::Lch,
            convert::lab_to_lch,
            convert::lch_to_lab,
        );
        context.register_pair(
            Space::XyzD65,
            Space::Oklab,
            convert::xyz_d65_to_oklab,
            convert::oklab_to_xyz_d65,
        );
        context.register_pair(
            Space::Oklab,
            Space::Oklch,
            convert::oklab_to_oklch,
            convert::oklch_to_oklab,
        );
        context.register_pair(
            Space::Srgb,
            Space::Hsl,
            convert::srgb_to_hsl,
            convert::hsl_to_srgb,
        );
        context.register_pair(
            Space::Srgb,
            Space::Hsv,
            convert::srgb_to_hsv,
            convert::hsv_to_srgb,
        );
        context.register_pair(
            Space::Srgb,
            Space::Hwb,
            convert::srgb_to_hwb,
            convert::hwb_to_srgb,
        );
        context.register_pair(
            Space::XyzD65,
            Space::Jzazbz,
            convert::xyz_d65_to_jzazbz,
            convert::jzazbz_to_xyz_d65,
        );
        context.register_pair(
            Space::Jzazbz,
            Space::Jzczhz,
            convert::jzazbz_to_jzczhz,
            convert::jzczhz_to_jzazbz,
        );
        context.register_pair(
            Space::DisplayP3,
            Space::XyzD65,
            convert::display_p3_to_xyz_d65,
            convert::xyz_d65_to_display_p3,
        );

        context
    }

    /// Register a single directed edge. Registering the same (from, to) pair
    /// again overwrites the previous edge.
    pub fn register(&mut self, from: Space, to: Space, conversion: ConversionFn) {
        let edges = self.edges.entry(from).or_default();
        match edges.iter_mut().find(|(existing, _)| *existing == to) {
            Some(slot) => slot.1 = conversion,
            None => edges.push((to, conversion)),
        }
    }

    /// Register an edge in both directions.
    pub fn register_pair(
        &mut self,
        a: Space,
        b: Space,
        forward: ConversionFn,
        backward: ConversionFn,
    ) {
        self.register(a, b, forward);
        self.register(b, a, backward);
    }

    /// Find the shortest sequence of edges from one space to another, in
    /// application order. Returns an empty sequence when both spaces are the
    /// same and `None` when the target is unreachable.
    pub fn path(&self, from: Space, to: Space) -> Option<Vec<ConversionFn>> {
        if from == to {
            return Some(Vec::new());
        }

        let mut queue = VecDeque::from([from]);
        let mut previous: HashMap<Space, (Space, ConversionFn)> = HashMap::new();

        while let Some(current) = queue.pop_front() {
            let Some(neighbors) = self.edges.get(&current) else {
                continue;
            };

            for &(next, conversion) in neighbors {
                if next == from || previous.contains_key(&next) {
                    continue;
                }
                previous.insert(next, (current, conversion));
                if next == to {
                    queue.clear();
                    break;
                }
                queue.push_back(next);
            }
        }

        previous.contains_key(&to).then(|| {
            let mut steps = Vec::new();
            let mut current = to;
            while current != from {
                let (before, conversion) = previous[&current];
                steps.push(conversion);
                current = before;
            }
            steps.reverse();
            steps
        })
    }

    /// Convert a color to the given space, walking the shortest registered
    /// path. A color already in the target space is returned as a clone.
    pub fn convert(&self, color: &Color, to: Space) -> Result<Color> {
        let steps = self
            .path(color.space, to)
            .ok_or(Error::NoConversionPath(color.space, to))?;

        tracing::trace!(
            from = color.space.name(),
            to = to.name(),
            hops = steps.len(),
            "resolved conversion path"
        );

        let mut result = color.clone();
        for step in steps {
            result = step(&result);
        }
        Ok(result)
    }
}

impl Default for ConversionContext {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;
    use crate::color::Components;

    fn chocolate() -> Color {
        Color::new(Space::Srgb, 0.823529, 0.411765, 0.117647, 1.0)
    }

    #[test]
    fn identity_conversion_is_a_clone() {
        let context = ConversionContext::standard();
        for space in Space::ALL {
            let color = Color::new(space, 0.25, 0.5, 0.75, 1.0);
            let same = context.convert(&color, space).unwrap();
            assert_eq!(same, color);
        }
    }

    #[test]
    fn unreachable_space_is_an_error() {
        let context = ConversionContext::empty();
        let result = context.convert(&chocolate(), Space::Oklab);
        assert!(matches!(
            result,
            Err(crate::Error::NoConversionPath(Space::Srgb, Space::Oklab))
        ));
    }

    #[test]
    fn paths_are_shortest() {
        let context = ConversionContext::standard();

        assert_eq!(context.path(Space::Lab, Space::Lab).unwrap().len(), 0);
        assert_eq!(context.path(Space::Srgb, Space::Hsl).unwrap().len(), 1);
        assert_eq!(context.path(Space::Srgb, Space::Oklch).unwrap().len(), 4);
        // hsl -> srgb -> linear -> xyz-d65 -> xyz-d50 -> lab -> lch
        assert_eq!(context.path(Space::Hsl, Space::Lch).unwrap().len(), 6);
    }

    #[test]
    fn convert_matches_reference_values() {
        let context = ConversionContext::standard();
        let color = chocolate();

        let expect = |space: Space, expected: Components| {
            let converted = context.convert(&color, space).unwrap();
            assert_component_eq!(converted.components.0, expected.0, epsilon = 0.001);
            assert_component_eq!(converted.components.1, expected.1, epsilon = 0.001);
            assert_component_eq!(converted.components.2, expected.2, epsilon = 0.001);
        };

        expect(Space::Hsl, Components(25.0, 0.75, 0.470588));
        expect(Space::Hwb, Components(25.0, 0.117647, 0.176471));
        expect(Space::SrgbLinear, Components(0.644480, 0.141263, 0.012983));
        expect(Space::XyzD65, Components(0.318634, 0.239006, 0.041637));
        expect(Space::XyzD50, Components(0.337301, 0.245449, 0.031959));
        expect(Space::Lab, Components(56.629300, 39.237080, 57.553769));
        expect(Space::Lch, Components(56.629300, 69.657166, 55.715927));
        expect(Space::Oklab, Components(0.634398, 0.099074, 0.119193));
        expect(Space::Oklch, Components(0.634398, 0.154992, 50.262482));
    }

    #[test]
    fn display_p3_round_trips_through_srgb() {
        let context = ConversionContext::standard();
        let color = chocolate();

        let p3 = context.convert(&color, Space::DisplayP3).unwrap();
        let back = context.convert(&p3, Space::Srgb).unwrap();

        assert_component_eq!(back.components.0, color.components.0, epsilon = 0.001);
        assert_component_eq!(back.components.1, color.components.1, epsilon = 0.001);
        assert_component_eq!(back.components.2, color.components.2, epsilon = 0.001);
    }

    #[test]
    fn alpha_and_flags_survive_conversion() {
        let context = ConversionContext::standard();
        let color = Color::new(Space::Srgb, 0.1, 0.2, 0.3, None);
        let lab = context.convert(&color, Space::Lab).unwrap();
        assert_eq!(lab.alpha(), None);
    }
}
