//! The Tailwind CSS v4 reference catalog: 22 families, 11 shades each.
//!
//! Hex tables are the published palette values. The contrast tables are
//! catalog-wide APCA Lc averages per shade position, measured offline
//! against white and black; the synthesizer uses them as retarget goals.

use std::sync::LazyLock;

use crate::color::Component;

use super::{resolve_family, Family};

/// Shade keys in ramp order, light to dark.
pub const SHADE_KEYS: [&str; 11] = [
    "50", "100", "200", "300", "400", "500", "600", "700", "800", "900", "950",
];

/// The number of near-white shades at the top of the ramp that the
/// synthesizer leaves out of contrast retargeting.
pub const NEAR_WHITE_BAND: usize = 2;

/// Catalog-average APCA Lc per shade position, measured against white.
pub const CONTRAST_WHITE: [Component; 11] =
    [4.0, 8.0, 15.0, 25.0, 38.0, 52.0, 62.0, 72.0, 82.0, 90.0, 98.0];

/// Catalog-average APCA Lc per shade position, measured against black.
pub const CONTRAST_BLACK: [Component; 11] =
    [102.0, 99.0, 94.0, 86.0, 74.0, 60.0, 48.0, 36.0, 24.0, 14.0, 7.0];

#[rustfmt::skip]
const FAMILIES: [(&str, [&str; 11]); 22] = [
    ("slate", [
        "#f8fafc", "#f1f5f9", "#e2e8f0", "#cbd5e1", "#94a3b8", "#64748b",
        "#475569", "#334155", "#1e293b", "#0f172a", "#020617",
    ]),
    ("gray", [
        "#f9fafb", "#f3f4f6", "#e5e7eb", "#d1d5db", "#9ca3af", "#6b7280",
        "#4b5563", "#374151", "#1f2937", "#111827", "#030712",
    ]),
    ("zinc", [
        "#fafafa", "#f4f4f5", "#e4e4e7", "#d4d4d8", "#a1a1aa", "#71717a",
        "#52525b", "#3f3f46", "#27272a", "#18181b", "#09090b",
    ]),
    ("neutral", [
        "#fafafa", "#f5f5f5", "#e5e5e5", "#d4d4d4", "#a3a3a3", "#737373",
        "#525252", "#404040", "#262626", "#171717", "#0a0a0a",
    ]),
    ("stone", [
        "#fafaf9", "#f5f5f4", "#e7e5e4", "#d6d3d1", "#a8a29e", "#78716c",
        "#57534e", "#44403c", "#292524", "#1c1917", "#0c0a09",
    ]),
    ("red", [
        "#fef2f2", "#fee2e2", "#fecaca", "#fca5a5", "#f87171", "#ef4444",
        "#dc2626", "#b91c1c", "#991b1b", "#7f1d1d", "#450a0a",
    ]),
    ("orange", [
        "#fff7ed", "#ffedd5", "#fed7aa", "#fdba74", "#fb923c", "#f97316",
        "#ea580c", "#c2410c", "#9a3412", "#7c2d12", "#431407",
    ]),
    ("amber", [
        "#fffbeb", "#fef3c7", "#fde68a", "#fcd34d", "#fbbf24", "#f59e0b",
        "#d97706", "#b45309", "#92400e", "#78350f", "#451a03",
    ]),
    ("yellow", [
        "#fefce8", "#fef9c3", "#fef08a", "#fde047", "#facc15", "#eab308",
        "#ca8a04", "#a16207", "#854d0e", "#713f12", "#422006",
    ]),
    ("lime", [
        "#f7fee7", "#ecfccb", "#d9f99d", "#bef264", "#a3e635", "#84cc16",
        "#65a30d", "#4d7c0f", "#3f6212", "#365314", "#1a2e05",
    ]),
    ("green", [
        "#f0fdf4", "#dcfce7", "#bbf7d0", "#86efac", "#4ade80", "#22c55e",
        "#16a34a", "#15803d", "#166534", "#14532d", "#052e16",
    ]),
    ("emerald", [
        "#ecfdf5", "#d1fae5", "#a7f3d0", "#6ee7b7", "#34d399", "#10b981",
        "#059669", "#047857", "#065f46", "#064e3b", "#022c22",
    ]),
    ("teal", [
        "#f0fdfa", "#ccfbf1", "#99f6e4", "#5eead4", "#2dd4bf", "#14b8a6",
        "#0d9488", "#0f766e", "#115e59", "#134e4a", "#042f2e",
    ]),
    ("cyan", [
        "#ecfeff", "#cffafe", "#a5f3fc", "#67e8f9", "#22d3ee", "#06b6d4",
        "#0891b2", "#0e7490", "#155e75", "#164e63", "#083344",
    ]),
    ("sky", [
        "#f0f9ff", "#e0f2fe", "#bae6fd", "#7dd3fc", "#38bdf8", "#0ea5e9",
        "#0284c7", "#0369a1", "#075985", "#0c4a6e", "#082f49",
    ]),
    ("blue", [
        "#eff6ff", "#dbeafe", "#bfdbfe", "#93c5fd", "#60a5fa", "#3b82f6",
        "#2563eb", "#1d4ed8", "#1e40af", "#1e3a8a", "#172554",
    ]),
    ("indigo", [
        "#eef2ff", "#e0e7ff", "#c7d2fe", "#a5b4fc", "#818cf8", "#6366f1",
        "#4f46e5", "#4338ca", "#3730a3", "#312e81", "#1e1b4b",
    ]),
    ("violet", [
        "#f5f3ff", "#ede9fe", "#ddd6fe", "#c4b5fd", "#a78bfa", "#8b5cf6",
        "#7c3aed", "#6d28d9", "#5b21b6", "#4c1d95", "#2e1065",
    ]),
    ("purple", [
        "#faf5ff", "#f3e8ff", "#e9d5ff", "#d8b4fe", "#c084fc", "#a855f7",
        "#9333ea", "#7e22ce", "#6b21a8", "#581c87", "#3b0764",
    ]),
    ("fuchsia", [
        "#fdf4ff", "#fae8ff", "#f5d0fe", "#f0abfc", "#e879f9", "#d946ef",
        "#c026d3", "#a21caf", "#86198f", "#701a75", "#4a044e",
    ]),
    ("pink", [
        "#fdf2f8", "#fce7f3", "#fbcfe8", "#f9a8d4", "#f472b6", "#ec4899",
        "#db2777", "#be185d", "#9d174d", "#831843", "#500724",
    ]),
    ("rose", [
        "#fff1f2", "#ffe4e6", "#fecdd3", "#fda4af", "#fb7185", "#f43f5e",
        "#e11d48", "#be123c", "#9f1239", "#881337", "#4c0519",
    ]),
];

static CATALOG: LazyLock<Vec<Family>> = LazyLock::new(|| {
    FAMILIES
        .iter()
        .map(|(name, hex)| resolve_family(name, &SHADE_KEYS, hex))
        .collect()
});

/// The resolved catalog, built on first use.
pub fn catalog() -> &'static [Family] {
    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_shape() {
        let families = catalog();
        assert_eq!(families.len(), 22);
        assert!(families.iter().all(|f| f.shades.len() == 11));
        assert_eq!(families[0].name, "slate");
        assert_eq!(families[21].name, "rose");
    }

    #[test]
    fn ramps_run_light_to_dark() {
        for family in catalog() {
            let first = family.shades.first().unwrap().color.components.0;
            let last = family.shades.last().unwrap().color.components.0;
            assert!(
                first > last,
                "{} ramp should start lighter than it ends",
                family.name
            );
        }
    }

    #[test]
    fn contrast_tables_cover_every_shade() {
        assert_eq!(CONTRAST_WHITE.len(), SHADE_KEYS.len());
        assert_eq!(CONTRAST_BLACK.len(), SHADE_KEYS.len());
        // Contrast against white grows toward the dark end of the ramp;
        // against black it shrinks.
        assert!(CONTRAST_WHITE.windows(2).all(|w| w[0] < w[1]));
        assert!(CONTRAST_BLACK.windows(2).all(|w| w[0] > w[1]));
    }
}
