//! End-to-end swell field scenarios
//!
//! Run with logs: RUST_LOG=swell_sim_core=debug cargo test --test `swell_propagation` -- --nocapture

use approx::assert_relative_eq;
use swell_sim_core::{
    GeoPoint, Knots, LandGrid, LandPolygon, MapProjection, NauticalMiles, RayTermination, Storm,
    SwellConfig, SwellFieldBuilder, SwellFieldCache,
};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Map center; lands on cell (200, 200) of a 400×400 grid
fn center_storm(wind: f32, radius: f32) -> Storm {
    Storm::new(GeoPoint::new(37.5, 190.0), Knots::new(wind), NauticalMiles::new(radius))
}

fn pacific_storms() -> Vec<Storm> {
    vec![
        Storm::new(GeoPoint::new(18.0, 160.0), Knots::new(65.0), NauticalMiles::new(300.0)).with_name("Akoni"),
        Storm::new(GeoPoint::new(28.0, 205.0), Knots::new(40.0), NauticalMiles::new(180.0)).with_name("Lana"),
        Storm::new(GeoPoint::new(48.0, 175.0), Knots::new(55.0), NauticalMiles::new(400.0)).with_name("Mele"),
        Storm::new(GeoPoint::new(35.0, 145.0), Knots::new(12.0), NauticalMiles::new(90.0)).with_name("Calm"),
        Storm::new(GeoPoint::new(22.0, 235.0), Knots::new(30.0), NauticalMiles::new(120.0)),
    ]
}

fn pacific_grid() -> LandGrid {
    LandGrid::from_polygons(&MapProjection::default(), &LandPolygon::pacific_defaults()).unwrap()
}

#[test]
fn test_open_ocean_scenario() {
    let grid = LandGrid::new(400, 400).unwrap();
    let builder = SwellFieldBuilder::new(SwellConfig::default()).unwrap();

    let field = builder.build(&[center_storm(40.0, 300.0)], &grid);

    assert_eq!(field.storms_active, 1);
    assert_eq!(field.ray_count(), 24);

    let expected_height = (0.0016 * (300.0_f32 * 1852.0).sqrt() * (40.0 * 0.514444)).min(20.0);
    for ray in &field.rays {
        assert_eq!(ray.points.len(), 100);
        assert_eq!(ray.outcome, RayTermination::Exhausted);
        assert_relative_eq!(*ray.wave.height, expected_height);
        assert_relative_eq!(*ray.wave.period, 10.28888, epsilon = 1e-4);

        // Straight line at the emission heading
        let last = ray.points.last().unwrap();
        assert_relative_eq!(last.position.x, 200.0 + 148.5 * ray.heading.cos(), epsilon = 1e-2);
        assert_relative_eq!(last.position.y, 200.0 + 148.5 * ray.heading.sin(), epsilon = 1e-2);
    }
}

#[test]
fn test_sub_threshold_storms_contribute_nothing() {
    let grid = pacific_grid();
    let builder = SwellFieldBuilder::new(SwellConfig::default()).unwrap();
    let storms = pacific_storms();

    let field = builder.build(&storms, &grid);
    assert_eq!(field.storms_considered, 5);
    assert_eq!(field.storms_active, 4);
    assert_eq!(field.rays_for_storm(3).count(), 0);
}

#[test]
fn test_energy_bounded_and_decaying_over_pacific() {
    let grid = pacific_grid();
    let config = SwellConfig::default();
    let builder = SwellFieldBuilder::new(config.clone()).unwrap();

    let field = builder.build(&pacific_storms(), &grid);
    assert!(field.ray_count() > 0);

    for ray in &field.rays {
        assert!(ray.points.len() >= config.min_points);
        for p in &ray.points {
            assert!(p.energy > 0.0 && p.energy <= 1.0);
            assert!(p.position.x.is_finite() && p.position.y.is_finite());
        }
        for pair in ray.points.windows(2) {
            let ratio = pair[1].energy / pair[0].energy;
            assert!(ratio <= config.spreading_decay + 1e-6, "energy rose: {ratio}");
        }
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let grid = pacific_grid();
    let storms = pacific_storms();

    let sequential = SwellFieldBuilder::new(SwellConfig::default()).unwrap();
    let parallel = SwellFieldBuilder::new(SwellConfig {
        parallel: true,
        ..Default::default()
    })
    .unwrap();

    assert_eq!(sequential.build(&storms, &grid), parallel.build(&storms, &grid));
}

#[test]
fn test_cache_matches_uncached_across_frames() {
    let mut grid = pacific_grid();
    let builder = SwellFieldBuilder::new(SwellConfig::default()).unwrap();
    let mut cache = SwellFieldCache::new(builder.clone());
    let mut storms = pacific_storms();

    for frame in 0..4 {
        if frame == 2 {
            // Drift one storm east
            storms[1].position.lon += 1.5;
        }
        if frame == 3 {
            grid.fill_land_rect(100, 40, 104, 44);
        }
        assert_eq!(cache.build(&storms, &grid), builder.build(&storms, &grid), "frame {frame}");
    }
    assert!(cache.stats().hits > 0);
}

#[test]
fn test_repeated_builds_are_bit_identical() {
    let grid = pacific_grid();
    let builder = SwellFieldBuilder::new(SwellConfig::default()).unwrap();
    let storms = pacific_storms();

    let a = builder.build(&storms, &grid);
    let b = builder.build(&storms, &grid);
    for (ra, rb) in a.rays.iter().zip(&b.rays) {
        for (pa, pb) in ra.points.iter().zip(&rb.points) {
            assert_eq!(pa.position.x.to_bits(), pb.position.x.to_bits());
            assert_eq!(pa.position.y.to_bits(), pb.position.y.to_bits());
            assert_eq!(pa.energy.to_bits(), pb.energy.to_bits());
        }
    }
}
