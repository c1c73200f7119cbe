//! The Radix UI colors reference catalog: 12-step scales with paired light
//! and dark variants per family.
//!
//! Only the solid light/dark scales are embedded; the alpha variants are
//! derived at synthesis time by alpha extraction over white (light) or black
//! (dark), matching how the published alpha scales are produced.

use std::sync::LazyLock;

use crate::color::Component;

use super::{resolve_family, Family};

/// Step keys, 1 (app background) through 12 (high-contrast text).
pub const STEP_KEYS: [&str; 12] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12",
];

/// Catalog-average APCA Lc per step against white, light scales.
pub const CONTRAST_LIGHT_WHITE: [Component; 12] = [
    2.0, 4.0, 8.0, 12.0, 18.0, 24.0, 32.0, 42.0, 56.0, 62.0, 75.0, 95.0,
];

/// Catalog-average APCA Lc per step against black, light scales.
pub const CONTRAST_LIGHT_BLACK: [Component; 12] = [
    104.0, 102.0, 98.0, 94.0, 88.0, 82.0, 74.0, 64.0, 50.0, 44.0, 30.0, 8.0,
];

/// Catalog-average APCA Lc per step against white, dark scales.
pub const CONTRAST_DARK_WHITE: [Component; 12] = [
    100.0, 98.0, 94.0, 90.0, 86.0, 82.0, 76.0, 68.0, 56.0, 50.0, 35.0, 8.0,
];

/// Catalog-average APCA Lc per step against black, dark scales.
pub const CONTRAST_DARK_BLACK: [Component; 12] = [
    4.0, 7.0, 12.0, 17.0, 22.0, 27.0, 34.0, 44.0, 50.0, 56.0, 72.0, 96.0,
];

#[rustfmt::skip]
const FAMILIES: [(&str, [&str; 12], [&str; 12]); 5] = [
    ("gray",
        [
            "#fcfcfc", "#f9f9f9", "#f0f0f0", "#e8e8e8", "#e0e0e0", "#d9d9d9",
            "#cecece", "#bbbbbb", "#8d8d8d", "#838383", "#646464", "#202020",
        ],
        [
            "#111111", "#191919", "#222222", "#2a2a2a", "#313131", "#3a3a3a",
            "#484848", "#606060", "#6e6e6e", "#7b7b7b", "#b4b4b4", "#eeeeee",
        ],
    ),
    ("blue",
        [
            "#fbfdff", "#f4faff", "#e6f4fe", "#d5efff", "#c2e5ff", "#acd8fc",
            "#8ec8f6", "#5eb1ef", "#0090ff", "#0588f0", "#0d74ce", "#113264",
        ],
        [
            "#0d1520", "#111927", "#0d2847", "#003362", "#004074", "#104d87",
            "#205d9e", "#2870bd", "#0090ff", "#3b9eff", "#70b8ff", "#c2e6ff",
        ],
    ),
    ("red",
        [
            "#fffcfc", "#fff7f7", "#feebec", "#ffdbdc", "#ffcdce", "#fdbdbe",
            "#f4a9aa", "#eb8e90", "#e5484d", "#dc3e42", "#ce2c31", "#641723",
        ],
        [
            "#191111", "#201314", "#3b1219", "#500f1c", "#611623", "#72232d",
            "#8c333a", "#b54548", "#e5484d", "#ec5d5e", "#ff9592", "#ffd1d9",
        ],
    ),
    ("green",
        [
            "#fbfefc", "#f4fbf6", "#e6f6eb", "#d6f1df", "#c4e8d1", "#adddc0",
            "#8eceaa", "#5bb98b", "#30a46c", "#2b9a66", "#218358", "#193b2d",
        ],
        [
            "#0e1512", "#121b17", "#132d21", "#113b29", "#174933", "#20573e",
            "#28684a", "#2f7c57", "#30a46c", "#33b074", "#3dd68c", "#b1f1cb",
        ],
    ),
    ("amber",
        [
            "#fefdfb", "#fefbe9", "#fff7c2", "#ffee9c", "#fbe577", "#f3d673",
            "#e9c162", "#e2a336", "#ffc53d", "#ffba18", "#ab6400", "#4f3422",
        ],
        [
            "#16120c", "#1d180f", "#302008", "#3f2700", "#4d3000", "#5c3d05",
            "#714f19", "#8f6424", "#ffc53d", "#ffd60a", "#ffca16", "#ffe7b3",
        ],
    ),
];

static LIGHT: LazyLock<Vec<Family>> = LazyLock::new(|| {
    FAMILIES
        .iter()
        .map(|(name, light, _)| resolve_family(name, &STEP_KEYS, light))
        .collect()
});

static DARK: LazyLock<Vec<Family>> = LazyLock::new(|| {
    FAMILIES
        .iter()
        .map(|(name, _, dark)| resolve_family(name, &STEP_KEYS, dark))
        .collect()
});

/// The resolved light scales. Family matching runs against these.
pub fn light_catalog() -> &'static [Family] {
    &LIGHT
}

/// The resolved dark scales, in the same family order as
/// [`light_catalog`].
pub fn dark_catalog() -> &'static [Family] {
    &DARK
}
