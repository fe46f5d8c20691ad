//! Tensile Sim Demo - pulls every catalog material to rupture

use tensile_sim::prelude::*;
use tensile_sim::results::{format_number, specimen_width_percent};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== Tensile Test Simulation ===\n");

    let catalog = match std::env::args().nth(1) {
        Some(path) => MaterialCatalog::from_json_file(path)?,
        None => MaterialCatalog::builtin(),
    };

    for material in catalog.iter() {
        println!("=== {} ===", material.name);
        println!(
            "  E = {} GPa, yield = {} MPa, ultimate = {} MPa, rupture at {}%",
            material.elastic_modulus,
            material.yield_strength,
            material.ultimate_strength,
            format_number(material.rupture_strain * 100.0, 0)
        );

        let options = SimulationOptions::default().with_logging();
        let mut test = TensileTest::with_options(material.clone(), options)?;
        println!("  Step size: {}\n", format_number(test.step_size(), 4));

        println!("  {:>4}  {:>8}  {:>10}  {:>8}  Phase", "Step", "Strain", "Stress", "Width");
        while !test.is_ruptured() {
            let point = match test.increment()?.last_point() {
                Some(point) => *point,
                None => break,
            };
            let width = specimen_width_percent(test.material(), test.state());
            println!(
                "  {:>4}  {:>7}%  {:>6} MPa  {:>7}%  {}",
                test.state().steps(),
                format_number(point.strain * 100.0, 2),
                format_number(point.stress, 1),
                format_number(width, 0),
                point.phase
            );
        }

        let report = test.report();
        println!("\n  Performance: {}", report.performance);
        println!("  {}", report.result_message());
        println!("  {}", report.conclusion(&material.name));
        println!("  {}\n", report.behavior());
    }

    println!("=== Simulation Complete ===");
    Ok(())
}
