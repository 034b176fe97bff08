use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use hs_core::{MapObjectType, TileRules, WetnessCurve};

pub fn run() -> Result<(), String> {
    let rules = TileRules::standard();

    println!("  {}", "Tile Transitions".bold().underline());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Tile",
        "Glyph",
        "Decays to",
        "Dwell (s)",
        "Evolves to",
        "Age (s)",
        "Spreads",
        "Wetness",
        "Resists spread",
    ]);

    for kind in MapObjectType::ALL {
        let rule = rules.rule(kind);
        let (decay_to, dwell) = match rule.decay {
            Some(decay) => (decay.target.to_string(), format!("{:.0}", 1.0 / decay.rate)),
            None => ("-".to_string(), "-".to_string()),
        };
        let (evolve_to, age) = match rule.evolve {
            Some(evolve) => (evolve.target.to_string(), format!("{:.0}", evolve.age)),
            None => ("-".to_string(), "-".to_string()),
        };
        let spreads = rule
            .spread
            .map(|k| k.to_string())
            .unwrap_or_else(|| "-".to_string());
        let wetness = rule
            .wetness
            .map(describe_curve)
            .unwrap_or_else(|| "-".to_string());
        let resists = if rule.spread_resistant { "yes" } else { "-" };
        table.add_row(vec![
            kind.to_string(),
            kind.glyph().to_string(),
            decay_to,
            dwell,
            evolve_to,
            age,
            spreads,
            wetness,
            resists.to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}

fn describe_curve(curve: WetnessCurve) -> String {
    match curve {
        WetnessCurve::Linear {
            zero_value,
            one_value,
        } => format!("linear({zero_value}, {one_value})"),
        WetnessCurve::Bowl {
            scale,
            x_offset,
            y_offset,
        } => format!("bowl({scale}, {x_offset}, {y_offset})"),
    }
}
