//! Analyzes a gable roof over a four-wall box and prints the connections.
//!
//! Run with `RUST_LOG=roofline=debug` to see the analysis log.

use roofline::integration::ClimateConditions;
use roofline::math::Point2;
use roofline::{Roof2D, RoofWallIntegrationSystem2D, Wall2D};

fn main() {
    // Default: WARN for everything, INFO for roofline.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("roofline=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let walls = vec![
        Wall2D::new("south", Point2::new(0.0, 0.0), Point2::new(10.0, 0.0), 3.0),
        Wall2D::new("east", Point2::new(10.0, 0.0), Point2::new(10.0, 10.0), 3.0),
        Wall2D::new("north", Point2::new(10.0, 10.0), Point2::new(0.0, 10.0), 3.0),
        Wall2D::new("west", Point2::new(0.0, 10.0), Point2::new(0.0, 0.0), 3.0),
    ];
    let roofs = vec![
        Roof2D::new("main", Point2::new(5.0, 5.0), 10.0, 10.0),
        Roof2D::new("porch", Point2::new(5.0, -2.0), 4.0, 4.0).with_heights(2.5, 1.0),
    ];

    let mut system = RoofWallIntegrationSystem2D::default();
    let result = system.analyze_roof_wall_integration(&roofs, &walls);

    println!("{} connection(s)", result.connections.len());
    for c in &result.connections {
        println!(
            "  {:<28} {:<8} points={} overhang={:.2} ridge={:.2}",
            c.id,
            c.connection_type,
            c.connection_points.len(),
            c.overhang,
            c.ridge_height
        );
    }
    for warning in &result.warnings {
        println!("  warning: {warning}");
    }

    if system.update_connection_pitch("connection-main-south", 33.69) {
        if let Some(c) = system.get_connection("connection-main-south") {
            let ratio = c.pitch_data.as_ref().map_or("-", |p| p.pitch_ratio.as_str());
            println!("re-pitched main/south to {ratio}, ridge {:.2}", c.ridge_height);
        }
    }

    let rec = system.get_pitch_recommendations(
        "saltbox",
        Some(&ClimateConditions {
            heavy_snow: true,
            high_wind: false,
        }),
    );
    println!(
        "saltbox: {} to {}, optimal {}",
        rec.min.pitch_ratio, rec.max.pitch_ratio, rec.optimal.pitch_ratio
    );
    if let Some(check) = rec.code_check {
        for warning in check.warnings {
            println!("  code: {warning}");
        }
    }
}
