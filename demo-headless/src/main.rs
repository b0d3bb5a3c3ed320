use clap::Parser;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_6, PI};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use swell_sim_core::{
    GeoPoint, Knots, LandGrid, LandMask, LandPolygon, MapProjection, NauticalMiles, RayStroke,
    RayTermination, Storm, SwellConfig, SwellField, SwellFieldBuilder, SwellFieldCache,
    SwellRenderer, SwellStyle, WaveEstimate,
};
use swell_sim_core::geometry::{
    bearing, bilerp, bilerp_angle, distance_km, move_lat_lon, normalize_angle, rad_to_bearing,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Swell propagation demo with configurable storms
#[derive(Parser, Debug)]
#[command(name = "swell-sim-demo")]
#[command(about = "Pacific swell ray propagation demo", long_about = None)]
struct Args {
    /// Number of random storms to place
    #[arg(short, long, default_value_t = 4)]
    storms: usize,

    /// RNG seed for storm placement
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Weakest storm wind in knots
    #[arg(long, default_value_t = 10.0)]
    min_wind: f32,

    /// Strongest storm wind in knots
    #[arg(long, default_value_t = 90.0)]
    max_wind: f32,

    /// Grid width in cells
    #[arg(long, default_value_t = 200)]
    grid_width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 160)]
    grid_height: usize,

    /// Angle between rays in degrees
    #[arg(short, long, default_value_t = 15.0)]
    angle_step: f32,

    /// Trace rays in parallel
    #[arg(short, long)]
    parallel: bool,

    /// Open ocean only, no coastlines
    #[arg(long)]
    no_land: bool,

    /// Frames to simulate; the first storm drifts each frame
    #[arg(short, long, default_value_t = 3)]
    frames: u32,

    /// Distance the first storm drifts along the steering flow per frame (km)
    #[arg(long, default_value_t = 150.0)]
    drift_km: f32,

    /// ASCII map width in characters (0 = no map)
    #[arg(long, default_value_t = 100)]
    map_width: usize,
}

/// Plots strokes onto a character grid, denser glyphs for bigger swell
struct AsciiRenderer {
    cols: usize,
    rows: usize,
    scale_x: f32,
    scale_y: f32,
    cells: Vec<char>,
}

impl AsciiRenderer {
    fn new(cols: usize, rows: usize, land: &LandGrid) -> Self {
        let scale_x = cols as f32 / land.width() as f32;
        let scale_y = rows as f32 / land.height() as f32;
        let (w, h) = (land.width(), land.height());
        let occupancy: Vec<f32> = land.cells().iter().map(|&c| f32::from(c)).collect();
        let mut cells = vec![' '; cols * rows];
        for row in 0..rows {
            for col in 0..cols {
                let i = col as f32 / scale_x;
                let j = row as f32 / scale_y;
                // Land coverage in [0, 1]; -1 where the stencil runs off the grid edge
                let coverage = bilerp(&occupancy, i, j, w, h, -1.0, None);
                let is_land = if coverage < 0.0 {
                    land.is_land(i as i64, j as i64)
                } else {
                    coverage >= 0.5
                };
                if is_land {
                    cells[row * cols + col] = '#';
                }
            }
        }
        Self {
            cols,
            rows,
            scale_x,
            scale_y,
            cells,
        }
    }

    fn plot(&mut self, x: f32, y: f32, glyph: char) {
        let col = (x * self.scale_x).floor();
        let row = (y * self.scale_y).floor();
        if col < 0.0 || row < 0.0 {
            return;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.cols || row >= self.rows {
            return;
        }
        let cell = &mut self.cells[row * self.cols + col];
        if *cell != '#' && *cell != 'O' {
            *cell = glyph;
        }
    }

    fn print(&self) {
        let border: String = "-".repeat(self.cols);
        println!("+{border}+");
        for row in self.cells.chunks(self.cols) {
            println!("|{}|", row.iter().collect::<String>());
        }
        println!("+{border}+");
    }
}

impl SwellRenderer for AsciiRenderer {
    fn stroke_ray(&mut self, stroke: &RayStroke) {
        let glyph = match stroke.line_width {
            w if w >= 3.0 => '@',
            w if w >= 2.0 => '*',
            w if w >= 1.0 => ':',
            _ => '.',
        };
        for p in &stroke.points {
            self.plot(p.x, p.y, glyph);
        }
    }
}

/// Honolulu, used as the reference point for storm distances
const HONOLULU: GeoPoint = GeoPoint::new(21.3, 202.2);

/// Coarse 2x3 steering flow (radians, 0 = east, π/2 = poleward), west column
/// first, rows from the southern edge: trades, recurvature, westerlies
const STEERING: [f32; 6] = [PI, 5.0 * PI / 6.0, FRAC_PI_2 + 0.4, FRAC_PI_2, FRAC_PI_6, 0.0];

fn steering_heading(projection: &MapProjection, position: GeoPoint) -> f32 {
    let cell = projection.lat_lon_to_cell(position);
    let i = (cell.x / projection.grid_width as f32).clamp(0.0, 1.0) * 0.999;
    let j = (cell.y / projection.grid_height as f32).clamp(0.0, 1.0) * 1.999;
    normalize_angle(bilerp_angle(&STEERING, i, j, 2, 3))
}

fn random_storms(args: &Args) -> Vec<Storm> {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let (lo, hi) = if args.min_wind < args.max_wind {
        (args.min_wind, args.max_wind)
    } else {
        (args.max_wind, args.min_wind + 1.0)
    };
    (0..args.storms)
        .map(|i| {
            let position = GeoPoint::new(rng.random_range(12.0..50.0), rng.random_range(140.0..230.0));
            Storm::new(
                position,
                Knots::new(rng.random_range(lo..hi)),
                NauticalMiles::new(rng.random_range(80.0..400.0)),
            )
            .with_name(format!("Storm-{}", i + 1))
        })
        .collect()
}

fn print_field(field: &SwellField, storms: &[Storm]) {
    for (index, storm) in storms.iter().enumerate() {
        let wave = WaveEstimate::for_storm(storm);
        let rays: Vec<_> = field.rays_for_storm(index).collect();
        let mut outcomes = [0usize; 4];
        for ray in &rays {
            let slot = match ray.outcome {
                RayTermination::Exhausted => 0,
                RayTermination::OutOfBounds => 1,
                RayTermination::Blocked => 2,
                RayTermination::Depleted => 3,
            };
            outcomes[slot] += 1;
        }
        let to_honolulu = distance_km(storm.position.lat, storm.position.lon, HONOLULU.lat, HONOLULU.lon);
        let heading_to = bearing(storm.position.lat, storm.position.lon, HONOLULU.lat, HONOLULU.lon);
        println!(
            "  {:<9} ({:>5.1}°N {:>5.1}°E, {} at {:.0}° to Honolulu) wind {} radius {} -> Hs {} Tp {} | {:>2} rays [full {} / edge {} / blocked {} / depleted {}]",
            storm.label(),
            storm.position.lat,
            storm.position.lon,
            to_honolulu,
            heading_to,
            storm.wind,
            storm.radius,
            wave.height,
            wave.period,
            rays.len(),
            outcomes[0],
            outcomes[1],
            outcomes[2],
            outcomes[3]
        );
    }
    println!(
        "  Total: {} rays, {} points from {}/{} storms",
        field.ray_count(),
        field.point_count(),
        field.storms_active,
        field.storms_considered
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    println!("=== Swell Propagation Demo ===\n");

    let projection = MapProjection::default().with_grid(args.grid_width, args.grid_height);
    let land = if args.no_land {
        LandGrid::new(args.grid_width, args.grid_height)?
    } else {
        LandGrid::from_polygons(&projection, &LandPolygon::pacific_defaults())?
    };
    println!(
        "Grid: {}x{} cells ({} land), map {:.0}°N-{:.0}°N, {:.0}°E-{:.0}°E",
        land.width(),
        land.height(),
        land.land_count(),
        projection.lat_min,
        projection.lat_max,
        projection.lon_east_edge,
        projection.lon_west_edge
    );

    let config = SwellConfig {
        angle_step: args.angle_step.into(),
        parallel: args.parallel,
        ..Default::default()
    };
    let builder = SwellFieldBuilder::new(config)?.with_projection(projection);
    println!(
        "Rays: {} per storm, {} steps max, threshold {}\n",
        builder.config().rays_per_storm(),
        builder.config().max_steps(),
        builder.config().min_wind
    );

    let mut storms = random_storms(&args);
    let mut cache = SwellFieldCache::new(builder);
    let mut field = SwellField::default();

    for frame in 0..args.frames.max(1) {
        if frame > 0 {
            if let Some(first) = storms.first_mut() {
                let heading = steering_heading(&projection, first.position);
                let (lat, lon) = move_lat_lon(first.position.lat, first.position.lon, heading, args.drift_km);
                first.position = GeoPoint::new(lat, lon);
                info!("{} steered toward {:.0}°", first.label(), rad_to_bearing(heading));
            }
        }
        field = cache.build(&storms, &land);
        let stats = cache.stats();
        println!("Frame {frame}: cache {} hits / {} misses", stats.hits, stats.misses);
        print_field(&field, &storms);
        println!();
    }

    if args.map_width > 0 {
        // Characters are roughly twice as tall as wide
        let rows = (args.map_width * land.height() / land.width() / 2).max(1);
        let mut renderer = AsciiRenderer::new(args.map_width, rows, &land);
        for storm in &storms {
            let cell = projection.lat_lon_to_cell(storm.position);
            let col = (cell.x * renderer.scale_x) as usize;
            let row = (cell.y * renderer.scale_y) as usize;
            if col < renderer.cols && row < renderer.rows {
                renderer.cells[row * renderer.cols + col] = 'O';
            }
        }
        let strokes = field.render(&SwellStyle::default(), &mut renderer);
        info!("Rendered {} strokes", strokes);
        println!("Swell map (row 0 = {:.0}°N, '#' land, 'O' storm, '.:*@' swell height):", projection.lat_min);
        renderer.print();
    }

    Ok(())
}
