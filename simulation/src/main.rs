//! Lifesim headless driver
//!
//! Usage: `lifesim [config.json]`. Plays the configured number of
//! generations and prints each life as it goes.

use lifesim::{commentary, SimConfig, SimulationWorld, YearReport};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::from_file(&path)?,
        None => SimConfig::default(),
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.tracing_level()?)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Lifesim starting...");

    let generations = config.generations;
    let mut world = match config.resume_slot {
        Some(slot) => match lifesim::persistence::load_slot(&config.save_dir, slot) {
            Ok(character) => SimulationWorld::from_character(config, character),
            Err(e) => {
                warn!(slot, error = %e, "could not resume, starting a new life");
                SimulationWorld::with_random_character(config)
            }
        },
        None => SimulationWorld::with_random_character(config),
    };

    for played in 1..=generations {
        if played > 1 {
            world.next_generation();
        }
        print_opening(&world);

        while world.is_alive() {
            let report = world.tick();
            print_year(&world, &report);
        }

        let evaluation = lifesim::systems::evaluate(&world.character);
        println!("\n{}", evaluation.narrative);
        if !world.character.milestones.is_empty() {
            println!("\nMilestones:");
            for milestone in &world.character.milestones {
                println!("  - {}", milestone);
            }
        }
    }

    info!("Lifesim finished");
    Ok(())
}

fn print_opening(world: &SimulationWorld) {
    let c = &world.character;
    let a = &c.attributes;
    let s = &c.skills;
    println!("\n=== Generation {} ===", c.generation);
    println!(
        "Strength {} | Intelligence {} | Charisma {}",
        a.strength, a.intelligence, a.charisma
    );
    println!(
        "Programming {} | Art {} | Sports {} | Leadership {} | Investment {}",
        s.programming, s.art, s.sports, s.leadership, s.investment
    );
    println!(
        "Wealth {} | Hereditary disease: {}",
        c.wealth,
        if c.has_hereditary_disease { "yes" } else { "no" }
    );
}

fn print_year(world: &SimulationWorld, report: &YearReport) {
    if world.config.show_age_commentary {
        println!("{}", commentary::for_age(report.age));
    }
    if world.config.show_detailed_events {
        println!("  [{:>3}] {}", report.roll, report.narrative);
    }
    if report.retired {
        println!("  Retired at {}", report.age);
    }
    if !report.alive {
        println!(
            "  Died at {} | health {} | wealth {} | career {}",
            report.age, world.character.health, world.character.wealth, world.character.career
        );
    }
}
