//! Frame-to-frame reuse of per-storm rays
//!
//! Storms that have not moved and whose land mask has not changed trace the
//! same rays every frame. The cache keys rays by storm name and replays them
//! when the snapshot (position, wind, radius) matches. A change in mask size
//! or [`LandMask::revision`] drops everything, and a mask without a revision
//! is never trusted. Unnamed storms and repeated names are always traced fresh.

use super::field::{SwellField, SwellFieldBuilder, SwellRay};
use crate::core_types::Storm;
use crate::grid::LandMask;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

/// Hit/miss counters since creation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Clone)]
struct CachedStorm {
    snapshot: Storm,
    /// `None` when the storm produced no rays (inactive or unusable position)
    rays: Option<Vec<SwellRay>>,
}

impl CachedStorm {
    fn matches(&self, storm: &Storm) -> bool {
        self.snapshot.position == storm.position
            && self.snapshot.wind == storm.wind
            && self.snapshot.radius == storm.radius
    }
}

/// Wraps a [`SwellFieldBuilder`] and reuses rays of unchanged storms
#[derive(Debug, Clone)]
pub struct SwellFieldCache {
    builder: SwellFieldBuilder,
    entries: FxHashMap<String, CachedStorm>,
    mask_key: Option<(usize, usize, u64)>,
    stats: CacheStats,
}

impl SwellFieldCache {
    pub fn new(builder: SwellFieldBuilder) -> Self {
        Self {
            builder,
            entries: FxHashMap::default(),
            mask_key: None,
            stats: CacheStats::default(),
        }
    }

    pub fn builder(&self) -> &SwellFieldBuilder {
        &self.builder
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Number of storms with cached rays
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached storm
    pub fn invalidate(&mut self) {
        self.entries.clear();
        self.mask_key = None;
    }

    /// Build a field, identical to [`SwellFieldBuilder::build`] on the same input
    pub fn build<M: LandMask + ?Sized>(&mut self, storms: &[Storm], mask: &M) -> SwellField {
        let key = mask.revision().map(|revision| (mask.width(), mask.height(), revision));
        if key.is_none() || self.mask_key != key {
            if !self.entries.is_empty() {
                debug!("Land mask changed, dropping {} cached storms", self.entries.len());
            }
            self.entries.clear();
            self.mask_key = key;
        }
        let reusable = key.is_some();

        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut duplicated: FxHashSet<&str> = FxHashSet::default();
        for name in storms.iter().filter_map(|s| s.name.as_deref()) {
            if !seen.insert(name) {
                duplicated.insert(name);
            }
        }

        let mut rays = Vec::new();
        let mut storms_active = 0;
        for (index, storm) in storms.iter().enumerate() {
            let storm_rays = match storm.name.as_deref() {
                Some(name) if reusable && !duplicated.contains(name) => {
                    self.lookup_or_trace(index, name, storm, mask)
                }
                _ => {
                    self.stats.misses += 1;
                    self.builder.build_storm(index, storm, mask)
                }
            };
            if let Some(storm_rays) = storm_rays {
                storms_active += 1;
                rays.extend(storm_rays);
            }
        }

        self.entries.retain(|name, _| seen.contains(name.as_str()));

        debug!(
            "Swell cache: {} hits, {} misses, {} storms cached",
            self.stats.hits,
            self.stats.misses,
            self.entries.len()
        );

        SwellField {
            rays,
            storms_considered: storms.len(),
            storms_active,
        }
    }

    fn lookup_or_trace<M: LandMask + ?Sized>(
        &mut self,
        index: usize,
        name: &str,
        storm: &Storm,
        mask: &M,
    ) -> Option<Vec<SwellRay>> {
        if let Some(entry) = self.entries.get(name) {
            if entry.matches(storm) {
                self.stats.hits += 1;
                return entry.rays.as_ref().map(|cached| {
                    cached
                        .iter()
                        .cloned()
                        .map(|mut ray| {
                            ray.storm_index = index;
                            ray
                        })
                        .collect()
                });
            }
        }

        self.stats.misses += 1;
        let traced = self.builder.build_storm(index, storm, mask);
        self.entries.insert(
            name.to_owned(),
            CachedStorm {
                snapshot: storm.clone(),
                rays: traced.clone(),
            },
        );
        traced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::units::{Knots, NauticalMiles};
    use crate::core_types::GeoPoint;
    use crate::grid::LandGrid;
    use crate::swell::SwellConfig;

    fn named(name: &str, lat: f32, lon: f32, wind: f32) -> Storm {
        Storm::new(GeoPoint::new(lat, lon), Knots::new(wind), NauticalMiles::new(250.0)).with_name(name)
    }

    fn builder() -> SwellFieldBuilder {
        SwellFieldBuilder::new(SwellConfig::default()).unwrap()
    }

    #[test]
    fn test_second_frame_hits() {
        let grid = LandGrid::new(200, 160).unwrap();
        let mut cache = SwellFieldCache::new(builder());
        let storms = vec![named("Ana", 25.0, 170.0, 35.0), named("Bo", 40.0, 200.0, 50.0)];

        let first = cache.build(&storms, &grid);
        assert_eq!(cache.stats(), CacheStats { hits: 0, misses: 2 });
        let second = cache.build(&storms, &grid);
        assert_eq!(cache.stats(), CacheStats { hits: 2, misses: 2 });
        assert_eq!(first, second);
        assert_eq!(first, builder().build(&storms, &grid));
    }

    #[test]
    fn test_moved_storm_retraced() {
        let grid = LandGrid::new(200, 160).unwrap();
        let mut cache = SwellFieldCache::new(builder());

        cache.build(&[named("Ana", 25.0, 170.0, 35.0)], &grid);
        let moved = [named("Ana", 26.0, 171.0, 35.0)];
        let field = cache.build(&moved, &grid);
        assert_eq!(cache.stats().hits, 0);
        assert_eq!(field, builder().build(&moved, &grid));
    }

    #[test]
    fn test_reordered_storms_get_new_indices() {
        let grid = LandGrid::new(200, 160).unwrap();
        let mut cache = SwellFieldCache::new(builder());
        let a = named("Ana", 25.0, 170.0, 35.0);
        let b = named("Bo", 40.0, 200.0, 50.0);

        cache.build(&[a.clone(), b.clone()], &grid);
        let swapped = [b, a];
        let field = cache.build(&swapped, &grid);
        assert_eq!(cache.stats().hits, 2);
        assert_eq!(field, builder().build(&swapped, &grid));
    }

    #[test]
    fn test_land_edit_invalidates() {
        let mut grid = LandGrid::new(200, 160).unwrap();
        let mut cache = SwellFieldCache::new(builder());
        let storms = [named("Bo", 37.5, 190.0, 50.0)];

        cache.build(&storms, &grid);
        grid.fill_land_rect(110, 70, 115, 90);
        let field = cache.build(&storms, &grid);
        assert_eq!(cache.stats().hits, 0);
        assert_eq!(field, builder().build(&storms, &grid));
    }

    /// Host grid that does not track edits
    struct UntrackedMask {
        land_from_col: i64,
    }

    impl LandMask for UntrackedMask {
        fn width(&self) -> usize {
            200
        }

        fn height(&self) -> usize {
            160
        }

        fn is_land(&self, col: i64, row: i64) -> bool {
            !self.in_bounds(col, row) || col >= self.land_from_col
        }
    }

    #[test]
    fn test_mask_without_revision_always_retraces() {
        let mut mask = UntrackedMask { land_from_col: 200 };
        let mut cache = SwellFieldCache::new(builder());
        let storms = [named("Bo", 37.5, 190.0, 50.0)];

        let open = cache.build(&storms, &mask);
        assert_eq!(open, builder().build(&storms, &mask));

        mask.land_from_col = 110;
        let cached = cache.build(&storms, &mask);
        let fresh = builder().build(&storms, &mask);
        assert_eq!(cached, fresh);
        assert_ne!(cached, open);
        assert_eq!(cache.stats(), CacheStats { hits: 0, misses: 2 });
        assert!(cache.is_empty());
    }

    #[test]
    fn test_unnamed_and_duplicate_names_not_cached() {
        let grid = LandGrid::new(200, 160).unwrap();
        let mut cache = SwellFieldCache::new(builder());
        let unnamed = Storm::new(GeoPoint::new(30.0, 180.0), Knots::new(30.0), NauticalMiles::new(100.0));
        let storms = vec![
            unnamed,
            named("Twin", 25.0, 170.0, 35.0),
            named("Twin", 40.0, 200.0, 50.0),
        ];

        cache.build(&storms, &grid);
        let field = cache.build(&storms, &grid);
        assert_eq!(cache.stats().hits, 0);
        assert!(cache.is_empty());
        assert_eq!(field, builder().build(&storms, &grid));
    }

    #[test]
    fn test_departed_storms_evicted() {
        let grid = LandGrid::new(200, 160).unwrap();
        let mut cache = SwellFieldCache::new(builder());

        cache.build(&[named("Ana", 25.0, 170.0, 35.0), named("Weak", 30.0, 180.0, 5.0)], &grid);
        assert_eq!(cache.len(), 2);
        cache.build(&[named("Ana", 25.0, 170.0, 35.0)], &grid);
        assert_eq!(cache.len(), 1);

        cache.invalidate();
        assert!(cache.is_empty());
    }
}
