//! Math utility functions.

use euclid::default::{Transform3D, Vector3D};

use crate::{Component, Components};

/// A 3x3 matrix stored in a [`Transform3D`]. The three argument groups of
/// [`transform_3x3`] are the columns of the conventional (column vector)
/// matrix.
pub type Transform = Transform3D<Component>;

type Vector = Vector3D<Component>;

/// Create a 3x3 transform embedded in a [`Transform`].
pub const fn transform_3x3(
    m11: Component,
    m12: Component,
    m13: Component,
    m21: Component,
    m22: Component,
    m23: Component,
    m31: Component,
    m32: Component,
    m33: Component,
) -> Transform {
    Transform::new(
        m11, m12, m13, 0.0, //
        m21, m22, m23, 0.0, //
        m31, m32, m33, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// A diagonal 3x3 scaling transform.
pub const fn diagonal_3x3(s0: Component, s1: Component, s2: Component) -> Transform {
    transform_3x3(s0, 0.0, 0.0, 0.0, s1, 0.0, 0.0, 0.0, s2)
}

/// Multiply the given matrix in `transform` with the 3 components.
pub fn transform(transform: &Transform, components: Components) -> Components {
    let Vector { x, y, z, .. } =
        transform.transform_vector3d(Vector::new(components.0, components.1, components.2));
    Components(x, y, z)
}

/// Check whether a value is close enough to zero to be considered zero.
pub fn almost_zero(value: Component) -> bool {
    value.abs() < 1.0e-7
}

/// NaN values are mapped to 0.0 before math that cannot carry them.
pub fn normalize(value: Component) -> Component {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Normalize a hue into the [0, 360) range.
pub fn normalize_hue(hue: Component) -> Component {
    hue.rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_applies_columns_to_components() {
        // Conventional matrix [[1, 2, 3], [4, 5, 6], [7, 8, 9]] written as
        // column triples.
        let t = transform_3x3(1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, 9.0);
        let result = transform(&t, Components(1.0, 0.0, 0.0));
        assert_eq!(result, Components(1.0, 4.0, 7.0));
        let result = transform(&t, Components(0.0, 1.0, 0.0));
        assert_eq!(result, Components(2.0, 5.0, 8.0));
    }

    #[test]
    fn hue_normalization() {
        assert_eq!(normalize_hue(540.0), 180.0);
        assert_eq!(normalize_hue(-90.0), 270.0);
    }
}
