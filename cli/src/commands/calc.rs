use anyhow::Result;

use hydro_core::GardenService;
use hydro_core::models::{LightNeed, Orientation, PlantCategory};

use super::helpers::print_json;

pub(crate) fn cmd_nutrients(
    svc: &mut GardenService,
    volume: f64,
    plant: PlantCategory,
    json: bool,
) -> Result<()> {
    let dosage = svc.calculate_nutrients(volume, plant)?;

    if json {
        return print_json(&dosage);
    }

    println!("{}\n", dosage.note);
    println!("For {} L of water:", dosage.volume_liters);
    println!("  • Fertilizer A: {} ml", dosage.fertilizer_a_ml);
    println!("  • Fertilizer B: {} ml", dosage.fertilizer_b_ml);
    println!("  • pH Down:      {:.1} ml", dosage.ph_down_ml);
    println!("\n{}", dosage.mixing);
    Ok(())
}

pub(crate) fn cmd_light(
    svc: &GardenService,
    orientation: Orientation,
    need: LightNeed,
    json: bool,
) -> Result<()> {
    let text = svc.light_recommendation(orientation, need);

    if json {
        return print_json(&serde_json::json!({
            "orientation": orientation,
            "need": need,
            "recommendation": text,
        }));
    }

    println!("{text}");
    Ok(())
}
