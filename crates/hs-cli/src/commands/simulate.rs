use std::collections::BTreeMap;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;
use tracing::{debug, warn};

use hs_core::constants::tile_coords;
use hs_core::{BodyType, MapObjectType, TileReport, WorldGrid};
use hs_simulation::{MovableCharacter, Outcome, SimConfig, Simulation};

use crate::generator::MeadowGenerator;
use crate::input::{self, ScriptedInput};
use crate::render::render_map;

const ACTORS: usize = 3;

pub struct SimulateArgs {
    pub ticks: u64,
    pub seed: u64,
    pub dt: f64,
    pub width: usize,
    pub height: usize,
    pub inputs: Vec<ScriptedInput>,
    pub map: bool,
    pub json: bool,
    pub verbose: bool,
}

#[derive(Serialize)]
struct CharacterSummary {
    id: u32,
    player: bool,
    position: Option<[f64; 2]>,
    inventory: Vec<BodyType>,
    equipped: Option<BodyType>,
}

#[derive(Serialize)]
struct Summary {
    ticks: u64,
    seed: u64,
    elapsed_seconds: f64,
    paused: bool,
    show_stats: bool,
    tiles: TileReport,
    census: BTreeMap<&'static str, usize>,
    free_bodies: usize,
    outcomes: usize,
    characters: Vec<CharacterSummary>,
}

pub fn run(args: &SimulateArgs) -> Result<(), String> {
    if !(args.dt.is_finite() && args.dt >= 0.0) {
        return Err(format!("--dt must be a non-negative number, got {}", args.dt));
    }

    let mut generator = MeadowGenerator::new(args.seed);
    let mut grid = WorldGrid::generate(args.width, args.height, &mut generator)
        .map_err(|e| format!("map generation failed: {e}"))?;
    let sites = generator.camp_sites(&grid, ACTORS);
    MeadowGenerator::scatter_buckets(&mut grid, &sites);

    let config = SimConfig::default()
        .with_seed(args.seed)
        .with_max_log_entries(500);
    let mut sim =
        Simulation::new(grid, config).map_err(|e| format!("simulation setup failed: {e}"))?;
    for &(x, y) in &sites {
        let id = sim.spawn_character(x, y);
        debug!(character = %id, x, y, "spawned character");
    }

    let mut script = args.inputs.clone();
    script.sort_by_key(|i| i.tick);
    let mut pending = script.into_iter().peekable();
    for _ in 0..args.ticks {
        let next_tick = sim.clock().tick() + 1;
        while let Some(scripted) = pending.next_if(|i| i.tick <= next_tick) {
            input::apply(scripted.action, &mut sim);
        }
        sim.update(args.dt);
    }
    let skipped = pending.count();
    if skipped > 0 {
        warn!(skipped, ticks = args.ticks, "scripted inputs after the last tick were ignored");
    }

    if args.json {
        let json = serde_json::to_string_pretty(&summarize(&sim, args))
            .map_err(|e| format!("JSON serialization failed: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    print_header(&sim, args, skipped);
    if args.verbose {
        print_log(&sim);
    }
    print_census(&sim);
    print_characters(&sim);
    if args.map {
        println!("  {}", "Map".bold().underline());
        println!();
        for line in render_map(sim.grid()).lines() {
            println!("  {line}");
        }
        println!();
    }
    Ok(())
}

fn print_header(sim: &Simulation, args: &SimulateArgs, skipped: usize) {
    let report = sim.tile_report();
    println!(
        "  {} {}",
        "Simulation".bold(),
        format!(
            "({}x{} tiles, {} ticks, seed={}, dt={}s)",
            args.width, args.height, args.ticks, args.seed, args.dt
        )
        .dimmed()
    );
    println!(
        "  {:.1}s simulated, {} decayed, {} evolved, {} spread",
        sim.clock().elapsed_seconds(),
        report.decayed,
        report.evolved,
        report.spread
    );
    println!(
        "  {} characters, {} loose bodies, {} outcomes logged",
        sim.characters().len(),
        sim.grid().bodies().len(),
        sim.events().len()
    );
    if sim.is_paused() {
        println!("  {}", "PAUSED".yellow().bold());
    }
    if skipped > 0 {
        println!(
            "  {}",
            format!("{skipped} scripted inputs fell after the last tick").dimmed()
        );
    }
    println!();
}

fn print_log(sim: &Simulation) {
    println!("  {}", "Outcome Log".bold().underline());
    println!();
    for entry in sim.events().entries() {
        let tick_label = format!("[tick {:>3}]", entry.tick).dimmed();
        let desc = match entry.outcome {
            Outcome::PickedUp { .. } | Outcome::Equipped { .. } => entry.description.green(),
            Outcome::Dropped { .. } | Outcome::Unequipped { .. } => entry.description.yellow(),
            Outcome::Interacted { .. } => entry.description.cyan(),
            Outcome::TileSet { .. } => entry.description.magenta(),
            _ => entry.description.normal(),
        };
        println!("  {tick_label} {desc}");
    }
    if sim.events().is_empty() {
        println!("  {}", "(no outcomes)".dimmed());
    }
    println!();
}

fn print_census(sim: &Simulation) {
    println!("  {}", "Tile Census".bold().underline());
    println!();
    let census = sim.grid().census();
    let total = census.iter().sum::<usize>().max(1);

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Tile", "Glyph", "Count", "Share"]);
    for kind in MapObjectType::ALL {
        let count = census[kind.index()];
        if count == 0 {
            continue;
        }
        table.add_row(vec![
            kind.to_string(),
            kind.glyph().to_string(),
            count.to_string(),
            format!("{:.0}%", 100.0 * count as f64 / total as f64),
        ]);
    }
    println!("{table}");
    println!();
}

fn print_characters(sim: &Simulation) {
    println!("  {}", "Characters".bold().underline());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Character",
        "Position",
        "Tile",
        "Velocity",
        "Inventory",
        "Equipped",
    ]);
    for actor in sim.characters().iter() {
        let name = if sim.player() == Some(actor.id()) {
            format!("{} *", actor.id())
        } else {
            actor.id().to_string()
        };
        let (position, tile) = match sim.grid().body(actor.body()) {
            Some(body) => {
                let (u, v) = tile_coords(body.position);
                let tile = sim
                    .grid()
                    .tile_at(u, v)
                    .map(|c| c.kind.to_string())
                    .unwrap_or_else(|_| "off map".to_string());
                (
                    format!("({:.1}, {:.1})", body.position.x, body.position.y),
                    tile,
                )
            }
            None => ("carried".to_string(), "-".to_string()),
        };
        table.add_row(vec![
            name,
            position,
            tile,
            format!("({:.1}, {:.1})", actor.velocity().x, actor.velocity().y),
            describe_inventory(actor),
            actor
                .equipped()
                .map(|b| b.kind.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("{table}");
    println!();
}

fn describe_inventory(actor: &MovableCharacter) -> String {
    if actor.inventory().is_empty() {
        return "-".to_string();
    }
    let items: Vec<String> = actor
        .inventory()
        .iter()
        .map(|b| b.kind.to_string())
        .collect();
    format!("{} ({}/{})", items.join(", "), items.len(), actor.capacity())
}

fn summarize(sim: &Simulation, args: &SimulateArgs) -> Summary {
    let census = sim.grid().census();
    Summary {
        ticks: sim.clock().tick(),
        seed: args.seed,
        elapsed_seconds: sim.clock().elapsed_seconds(),
        paused: sim.is_paused(),
        show_stats: sim.show_stats(),
        tiles: sim.tile_report(),
        census: MapObjectType::ALL
            .into_iter()
            .map(|k| (k.name(), census[k.index()]))
            .collect(),
        free_bodies: sim.grid().bodies().len(),
        outcomes: sim.events().len(),
        characters: sim
            .characters()
            .iter()
            .map(|actor| CharacterSummary {
                id: actor.id().0,
                player: sim.player() == Some(actor.id()),
                position: sim
                    .grid()
                    .body(actor.body())
                    .map(|b| [b.position.x, b.position.y]),
                inventory: actor.inventory().iter().map(|b| b.kind).collect(),
                equipped: actor.equipped().map(|b| b.kind),
            })
            .collect(),
    }
}
