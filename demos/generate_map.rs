//! Example: Generate a region map
//!
//! Demonstrates the basic usage of the generation pipeline.

use voronoi_regions::*;

fn main() {
    println!("Voronoi Region Map Example");
    println!("==========================\n");

    // Create a configuration for a small map
    let config = MapConfigBuilder::new()
        .seed(42)
        .map_size(MapSize::Tiny) // Use Tiny for faster generation in example
        .weight_range(0.75, 1.5)
        .unwrap()
        .growth_range(2, 13)
        .unwrap()
        .build();

    println!("Configuration:");
    println!("  Seed: {}", config.seed);
    println!("  Dimensions: {}x{}", config.width, config.height);
    println!("  Centres: {}", config.centre_count);
    println!("  Distance: {}", config.distance_function);
    println!("  Tiling: {}", config.tiling.enabled);
    println!();

    println!("Generating map...");
    let map = RegionMap::generate(config).expect("Failed to generate map");
    let summary = map.summary();
    println!(
        "Grew {} regions into {} over {} rounds\n",
        summary.regions_before, summary.regions_after, summary.rounds
    );

    let adjacency = map.adjacency().expect("Failed to build adjacency");
    let distinct = map.distinct_labels();
    let total_neighbors: usize = distinct.iter().map(|&l| adjacency.degree(l)).sum();
    let avg_neighbors = total_neighbors as f32 / distinct.len() as f32;
    let avg_area = map.labels().len() as f32 / distinct.len() as f32;

    println!("Statistics:");
    println!("  Average neighbors per region: {:.2}", avg_neighbors);
    println!("  Average cells per region: {:.2}", avg_area);
    println!("  Ghost sites: {}", map.voronoi().ghost_count());
    println!();

    // Show details for first few regions
    println!("Sample regions:");
    for &label in distinct.iter().take(5) {
        let centre = &map.centres()[label];
        println!(
            "  Region {}: centre=({:.2}, {:.2}), weight={:.2}, cells={}, neighbors={}",
            label,
            centre.position.x,
            centre.position.y,
            centre.weight,
            map.region_area(label),
            adjacency.degree(label)
        );
    }

    let pixels = to_rgba_pixels(map.labels(), &SquaredIndexColorMapper);
    println!("\nRendered {} bytes of RGBA pixels", pixels.len());
    println!("Generation complete!");
}
