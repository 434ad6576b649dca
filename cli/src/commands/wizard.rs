use anyhow::Result;

use hydro_core::GardenService;
use hydro_core::models::Selection;

use super::helpers::print_json;

pub(crate) fn cmd_recommend(
    svc: &mut GardenService,
    selection: Selection,
    save_plan: bool,
    add_plant: bool,
    json: bool,
) -> Result<()> {
    let rec = svc.recommend(&selection);
    let plan = if save_plan {
        Some(svc.save_plan(&selection)?)
    } else {
        None
    };
    let plant = if add_plant {
        Some(svc.add_plant_from_selection(&selection)?)
    } else {
        None
    };

    if json {
        return print_json(&serde_json::json!({
            "recommendation": rec,
            "saved_plan": plan,
            "added_plant": plant,
        }));
    }

    let p = &rec.plan.plant;
    println!("=== {} ===\n", p.display_name);
    println!("  System:     {}", p.system);
    println!("  Difficulty: {}", p.difficulty);
    println!("  Harvest:    {}", p.harvest);
    println!("  Location:   {}", rec.plan.location);
    println!("  Budget:     {}", rec.plan.budget);
    println!("\n  Tip: {}", p.tip);
    println!("\nYou will need:");
    for item in &rec.materials {
        println!("  • {item}");
    }

    if let Some(plan) = plan {
        println!("\nPlan saved ({})", plan.id);
    }
    if let Some(plant) = plant {
        println!("Added '{}' to your garden ({})", plant.name, plant.id);
    }
    Ok(())
}
