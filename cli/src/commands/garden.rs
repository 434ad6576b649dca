use anyhow::Result;
use chrono::Local;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use hydro_core::GardenService;
use hydro_core::models::{NewPlant, PlantCategory};
use hydro_core::recommend::{budget_phrase, location_phrase, plant_profile};

use super::helpers::{parse_date, print_json, truncate};

pub(crate) fn cmd_plant_add(
    svc: &mut GardenService,
    name: &str,
    category: PlantCategory,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let planting_date = parse_date(date)?;
    let plant = svc.add_plant(NewPlant {
        name: name.to_string(),
        planting_date,
        category,
    })?;

    if json {
        return print_json(&plant);
    }
    println!(
        "Added '{}' ({}) planted {}",
        plant.name,
        plant.category.code(),
        plant.planting_date.format("%Y-%m-%d")
    );
    println!("  ID: {}", plant.id);
    if svc.current_user().is_none() {
        eprintln!("Not logged in: the plant is kept locally and moves to your profile on login.");
    }
    Ok(())
}

pub(crate) fn cmd_plant_list(svc: &GardenService, json: bool) -> Result<()> {
    let plants = svc.plants();

    if json {
        return print_json(plants);
    }
    if plants.is_empty() {
        eprintln!("No plants yet. Use `hydro plant add` to start your garden.");
        return Ok(());
    }

    #[derive(Tabled)]
    struct PlantRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Category")]
        category: &'static str,
        #[tabled(rename = "Planted")]
        planted: String,
        #[tabled(rename = "Days")]
        days: i64,
        #[tabled(rename = "Growth")]
        growth: String,
        #[tabled(rename = "Photos")]
        photos: usize,
        #[tabled(rename = "Last photo")]
        last_photo: String,
    }

    let today = Local::now().date_naive();
    let rows: Vec<PlantRow> = plants
        .iter()
        .map(|p| PlantRow {
            id: p.id.clone(),
            name: truncate(&p.name, 30),
            category: p.category.code(),
            planted: p.planting_date.format("%Y-%m-%d").to_string(),
            days: p.days_since_planting(today),
            growth: format!("{:.0}%", p.growth_progress(today)),
            photos: p.photos.len(),
            last_photo: p
                .last_photo()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(4..7)).with(Alignment::right()))
        .to_string();
    println!("{table}");
    Ok(())
}

pub(crate) fn cmd_plant_photo(
    svc: &mut GardenService,
    id: &str,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    svc.add_photo(id, date)?;

    if json {
        println!("{}", serde_json::json!({ "plant_id": id, "photo": date }));
    } else {
        println!("Recorded photo for {id} on {}", date.format("%Y-%m-%d"));
    }
    Ok(())
}

/// Removing an unknown id is not an error: nothing changes and the exit code is 0.
pub(crate) fn cmd_plant_remove(svc: &mut GardenService, id: &str, json: bool) -> Result<()> {
    let removed = svc.remove_plant(id)?;

    if json {
        println!("{}", serde_json::json!({ "id": id, "removed": removed }));
    } else if removed {
        println!("Removed plant {id}");
    } else {
        eprintln!("No plant with id '{id}', nothing removed");
    }
    Ok(())
}

pub(crate) fn cmd_plan_list(svc: &GardenService, json: bool) -> Result<()> {
    let plans = svc.saved_plans()?;

    if json {
        return print_json(plans);
    }
    if plans.is_empty() {
        eprintln!("No saved plans. Use `hydro recommend --save-plan` to keep one.");
        return Ok(());
    }

    #[derive(Tabled)]
    struct PlanRow {
        #[tabled(rename = "Saved")]
        saved: String,
        #[tabled(rename = "Plant")]
        plant: &'static str,
        #[tabled(rename = "System")]
        system: &'static str,
        #[tabled(rename = "Location")]
        location: &'static str,
        #[tabled(rename = "Budget")]
        budget: &'static str,
    }

    let rows: Vec<PlanRow> = plans
        .iter()
        .map(|p| {
            let profile = plant_profile(p.plant);
            PlanRow {
                saved: p.created_at.format("%Y-%m-%d").to_string(),
                plant: profile.display_name,
                system: profile.system,
                location: location_phrase(p.location),
                budget: budget_phrase(p.budget),
            }
        })
        .collect();

    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{table}");
    Ok(())
}
