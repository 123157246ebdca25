//! Beispiel: Thiessen-Polygone für einen Block mit Gebäudegrundrissen
//!
//! Logging über `RUST_LOG`, z.B. `RUST_LOG=polygon_voronoi=debug`.

use geo::{LineString, Polygon};
use polygon_voronoi::{InputPolygon, PartitionBuilder, PartitionConfig, Spacing};
use tracing_subscriber::EnvFilter;

fn footprint(x: f64, y: f64, width: f64, depth: f64) -> Polygon<f64> {
    Polygon::new(
        LineString::from(vec![
            (x, y),
            (x + width, y),
            (x + width, y + depth),
            (x, y + depth),
            (x, y),
        ]),
        vec![],
    )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("Polygon Voronoi Partition Example");
    println!("=================================\n");

    let block = footprint(0.0, 0.0, 120.0, 60.0);

    // Zwei Häuserzeilen, die obere leicht versetzt
    let mut houses = Vec::new();
    for i in 0..6 {
        let x = 5.0 + i as f64 * 19.0;
        houses.push(InputPolygon::with_attributes(
            houses.len(),
            footprint(x, 6.0, 12.0, 10.0),
            format!("south-{}", i),
        ));
        houses.push(InputPolygon::with_attributes(
            houses.len(),
            footprint(x + 4.0, 42.0, 10.0, 12.0),
            format!("north-{}", i),
        ));
    }

    let config = PartitionConfig::new().with_densify(Spacing::Auto);
    let result = PartitionBuilder::new(config)
        .and_then(|builder| builder.build(&houses, &block))
        .expect("Failed to build partition");

    println!("Regions:");
    for region in result.iter() {
        println!(
            "  {:>2} {:<8} area={:>8.2} parts={}",
            region.id,
            region.attributes,
            region.area(),
            region.geometry.0.len()
        );
    }
    println!(
        "\nTotal area {:.2} of {:.2}, {} warnings",
        result.total_area(),
        7200.0,
        result.warnings.len()
    );
    for warning in &result.warnings {
        println!("  {}", warning);
    }
}
