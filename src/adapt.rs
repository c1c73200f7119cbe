//! Chromatic adaptation between reference illuminants.
//!
//! XYZ values measured under one illuminant are mapped to another by moving
//! into a cone response domain, scaling each channel by the ratio of the two
//! illuminants' cone responses, and moving back. The scale divides the source
//! response by the target response, so the returned matrix answers "what would
//! these components be if the sample were lit by the target illuminant".

use crate::{
    color::{Component, Components},
    math::{diagonal_3x3, transform, transform_3x3, Transform},
};

/// A standard illuminant with a known reference white.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Illuminant {
    /// Incandescent/tungsten.
    A,
    /// Horizon light, the print industry reference.
    D50,
    /// Noon daylight, the screen reference.
    D65,
    /// The equal-energy illuminant.
    E,
}

impl Illuminant {
    /// The XYZ reference white for this illuminant, normalized to Y = 1.
    pub fn white_point(&self) -> Components {
        #[allow(clippy::excessive_precision)]
        match self {
            Illuminant::A => Components(1.09850, 1.0, 0.35585),
            Illuminant::D50 => Components(0.9642956764295677, 1.0, 0.8251046025104602),
            Illuminant::D65 => Components(0.9504559270516716, 1.0, 1.0890577507598784),
            Illuminant::E => Components(1.0, 1.0, 1.0),
        }
    }
}

/// The cone response domain used to scale between illuminants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConeResponseModel {
    /// The Bradford transform, sharpened cones. The usual default.
    #[default]
    Bradford,
    /// The original von Kries transform, based on the HPE fundamentals.
    VonKries,
    /// Direct scaling of the XYZ axes. Crude, kept for wrong-von-Kries
    /// comparisons.
    XyzScaling,
}

#[rustfmt::skip]
const BRADFORD: Transform = transform_3x3(
     0.8951, -0.7502,  0.0389,
     0.2664,  1.7135, -0.0685,
    -0.1614,  0.0367,  1.0296,
);

#[rustfmt::skip]
const BRADFORD_INV: Transform = transform_3x3(
     0.9869929, 0.4323053, -0.0085287,
    -0.1470543, 0.5183603,  0.0400428,
     0.1599627, 0.0492912,  0.9684867,
);

#[rustfmt::skip]
const VON_KRIES: Transform = transform_3x3(
     0.40024, -0.22630, 0.0,
     0.70760,  1.16532, 0.0,
    -0.08081,  0.04570, 0.91822,
);

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const VON_KRIES_INV: Transform = transform_3x3(
     1.8599364, 0.3611914,  0.0,
    -1.1293816, 0.6388125,  0.0,
     0.2198974, -0.0000064, 1.0890636,
);

// The D50/D65 Bradford pair comes up in every Lab round trip, so the two
// matrices are baked in rather than recomposed on each call.

#[rustfmt::skip]
const BRADFORD_D50_TO_D65: Transform = transform_3x3(
     1.0478112,  0.0295424, -0.0092345,
     0.0228866,  0.9904844,  0.0150436,
    -0.0501270, -0.0170491,  0.7521316,
);

#[rustfmt::skip]
const BRADFORD_D65_TO_D50: Transform = transform_3x3(
     0.9555766, -0.0282895,  0.0122982,
    -0.0230393,  1.0099416, -0.0204830,
     0.0631636,  0.0210077,  1.3299098,
);

impl ConeResponseModel {
    fn matrices(&self) -> Option<(&'static Transform, &'static Transform)> {
        match self {
            ConeResponseModel::Bradford => Some((&BRADFORD, &BRADFORD_INV)),
            ConeResponseModel::VonKries => Some((&VON_KRIES, &VON_KRIES_INV)),
            ConeResponseModel::XyzScaling => None,
        }
    }
}

/// Build the 3x3 transform that adapts XYZ components from the source
/// illuminant to the target illuminant under the given cone response model.
pub fn adaptation_matrix(
    source: Illuminant,
    target: Illuminant,
    model: ConeResponseModel,
) -> Transform {
    if source == target {
        return Transform::identity();
    }

    match (source, target, model) {
        (Illuminant::D50, Illuminant::D65, ConeResponseModel::Bradford) => {
            return BRADFORD_D50_TO_D65
        }
        (Illuminant::D65, Illuminant::D50, ConeResponseModel::Bradford) => {
            return BRADFORD_D65_TO_D50
        }
        _ => {}
    }

    let source_white = source.white_point();
    let target_white = target.white_point();

    match model.matrices() {
        Some((cone, cone_inv)) => {
            let source_response = transform(cone, source_white);
            let target_response = transform(cone, target_white);

            let scale = diagonal_3x3(
                source_response.0 / target_response.0,
                source_response.1 / target_response.1,
                source_response.2 / target_response.2,
            );

            cone.then(&scale).then(cone_inv)
        }
        None => diagonal_3x3(
            source_white.0 / target_white.0,
            source_white.1 / target_white.1,
            source_white.2 / target_white.2,
        ),
    }
}

/// Adapt XYZ components from the source illuminant to the target illuminant.
pub fn adapt(
    components: Components,
    source: Illuminant,
    target: Illuminant,
    model: ConeResponseModel,
) -> Components {
    transform(&adaptation_matrix(source, target, model), components)
}
