//! The parse front door: text in, converted [`Color`] out, with a hot cache.
//!
//! [`ColorService`] owns the conversion registry and a fixed-capacity LRU
//! cache keyed by `"{input}:{target}"`. Structured [`Color`] values never
//! touch the cache; they go straight to the router via [`ColorService::convert`].
//!
//! A process-wide service is available behind the [`parse_color`],
//! [`convert_color`], [`cache_stats`] and [`clear_color_cache`] free
//! functions. Access is serialized by a mutex; the core itself has no other
//! internal synchronization.

use std::num::NonZeroUsize;
use std::sync::{LazyLock, Mutex, MutexGuard};

use lru::LruCache;

use crate::{
    color::{Color, Space},
    error::Result,
    palette::generate::{self, GeneratedPalette},
    parse::parse,
    registry::ConversionContext,
};

/// The number of parsed colors kept hot.
pub const HOT_CACHE_SIZE: usize = 64;

/// A snapshot of the parse cache occupancy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheStats {
    /// Entries currently held.
    pub size: usize,
    /// The fixed capacity.
    pub max_size: usize,
}

/// Owns the conversion registry and the parse cache.
pub struct ColorService {
    context: ConversionContext,
    cache: LruCache<String, Color>,
}

impl ColorService {
    /// A service over the standard conversion graph with the default cache
    /// capacity.
    pub fn new() -> Self {
        Self::with_capacity(HOT_CACHE_SIZE)
    }

    /// A service with a custom cache capacity. A capacity of zero is bumped
    /// to one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            context: ConversionContext::standard(),
            cache: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
        }
    }

    /// The conversion registry, for registering additional edges.
    pub fn context_mut(&mut self) -> &mut ConversionContext {
        &mut self.context
    }

    /// Parse text and convert the result to the target space. Results are
    /// cached; a hit bumps the entry to most-recently-used.
    pub fn parse_color(&mut self, input: &str, target: Space) -> Result<Color> {
        let key = format!("{}:{}", input, target.name());

        if let Some(hit) = self.cache.get(&key) {
            tracing::trace!(input, target = target.name(), "parse cache hit");
            return Ok(hit.clone());
        }

        tracing::trace!(input, target = target.name(), "parse cache miss");
        let parsed = parse(input)?;
        let converted = self.context.convert(&parsed, target)?;
        self.cache.put(key, converted.clone());
        Ok(converted)
    }

    /// Convert an already-structured color. Bypasses the cache entirely.
    pub fn convert(&self, color: &Color, target: Space) -> Result<Color> {
        self.context.convert(color, target)
    }

    /// Current cache occupancy and capacity.
    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            size: self.cache.len(),
            max_size: self.cache.cap().get(),
        }
    }

    /// Drop every cached entry.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Parse a seed from text and synthesize a design-system palette around
    /// it. See [`crate::palette::generate::generate_palette`].
    pub fn generate_palette(
        &mut self,
        input: &str,
        adjust_contrast: bool,
        ensure_seed_preserved: bool,
        family: &str,
    ) -> Result<GeneratedPalette> {
        let seed = self.parse_color(input, Space::Oklch)?;
        generate::generate_palette(
            &seed,
            adjust_contrast,
            ensure_seed_preserved,
            family,
            &self.context,
        )
    }
}

impl Default for ColorService {
    fn default() -> Self {
        Self::new()
    }
}

static SERVICE: LazyLock<Mutex<ColorService>> = LazyLock::new(|| Mutex::new(ColorService::new()));

fn service() -> MutexGuard<'static, ColorService> {
    SERVICE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Parse text into the target space using the process-wide service.
pub fn parse_color(input: &str, target: Space) -> Result<Color> {
    service().parse_color(input, target)
}

/// Convert a structured color using the process-wide service. No caching.
pub fn convert_color(color: &Color, target: Space) -> Result<Color> {
    service().convert(color, target)
}

/// Occupancy of the process-wide parse cache.
pub fn cache_stats() -> CacheStats {
    service().cache_stats()
}

/// Clear the process-wide parse cache.
pub fn clear_color_cache() {
    service().clear_cache()
}

/// Synthesize a palette from a text seed using the process-wide service.
pub fn generate_palette(
    input: &str,
    adjust_contrast: bool,
    ensure_seed_preserved: bool,
    family: &str,
) -> Result<GeneratedPalette> {
    service().generate_palette(input, adjust_contrast, ensure_seed_preserved, family)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;

    #[test]
    fn parse_and_convert() {
        let mut service = ColorService::new();
        let color = service.parse_color("#d2691e", Space::Oklch).unwrap();
        assert_eq!(color.space, Space::Oklch);
        assert_component_eq!(color.components.0, 0.634398, epsilon = 0.001);
    }

    #[test]
    fn hits_return_the_cached_color() {
        let mut service = ColorService::new();
        let first = service.parse_color("rgb(210 105 30)", Space::Lab).unwrap();
        assert_eq!(service.cache_stats().size, 1);

        let second = service.parse_color("rgb(210 105 30)", Space::Lab).unwrap();
        assert_eq!(first, second);
        assert_eq!(service.cache_stats().size, 1);
    }

    #[test]
    fn same_text_different_targets_are_distinct_entries() {
        let mut service = ColorService::new();
        service.parse_color("#ff0000", Space::Oklch).unwrap();
        service.parse_color("#ff0000", Space::Lab).unwrap();
        assert_eq!(service.cache_stats().size, 2);
    }

    #[test]
    fn least_recently_used_entry_is_evicted() {
        let mut service = ColorService::with_capacity(3);
        service.parse_color("#111111", Space::Srgb).unwrap();
        service.parse_color("#222222", Space::Srgb).unwrap();
        service.parse_color("#333333", Space::Srgb).unwrap();
        assert_eq!(service.cache_stats().size, 3);

        // Bump the oldest entry, then overflow; the second entry is now the
        // least recently used and must be the one evicted.
        service.parse_color("#111111", Space::Srgb).unwrap();
        service.parse_color("#444444", Space::Srgb).unwrap();

        assert_eq!(service.cache_stats().size, 3);
        assert!(service.cache.peek("#111111:srgb").is_some());
        assert!(service.cache.peek("#222222:srgb").is_none());
        assert!(service.cache.peek("#444444:srgb").is_some());
    }

    #[test]
    fn failed_parses_leave_the_cache_untouched() {
        let mut service = ColorService::new();
        assert!(service.parse_color("#zz", Space::Srgb).is_err());
        assert_eq!(service.cache_stats().size, 0);
    }

    #[test]
    fn clear_empties_the_cache() {
        let mut service = ColorService::new();
        service.parse_color("#abcdef", Space::Srgb).unwrap();
        service.clear_cache();
        assert_eq!(service.cache_stats().size, 0);
    }

    #[test]
    fn palette_generation_from_text() {
        let mut service = ColorService::new();
        let palette = service
            .generate_palette("#69ae5d", true, true, "Tailwind v4")
            .unwrap();
        assert_eq!(palette.groups[0].shades.len(), 11);
        // The parsed seed landed in the cache on the way through.
        assert_eq!(service.cache_stats().size, 1);
    }

    #[test]
    fn default_capacity_is_the_hot_cache_size() {
        let service = ColorService::new();
        assert_eq!(service.cache_stats().max_size, HOT_CACHE_SIZE);
    }
}
