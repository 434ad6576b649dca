use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;

use hydro_core::GardenService;

use super::helpers::print_json;

pub(crate) fn cmd_register(
    svc: &mut GardenService,
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
    json: bool,
) -> Result<()> {
    let user = svc.register(name, email, password, confirm)?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "id": user.id, "name": user.name, "email": user.email })
        );
    } else {
        println!("Welcome, {}! You are now logged in.", user.name);
    }
    Ok(())
}

pub(crate) fn cmd_login(svc: &mut GardenService, email: &str, password: &str, json: bool) -> Result<()> {
    let outcome = svc.login(email, password)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "id": outcome.user.id,
                "name": outcome.user.name,
                "migrated_plants": outcome.migrated_plants,
            })
        );
    } else {
        println!("Welcome back, {}!", outcome.user.name);
        if outcome.migrated_plants > 0 {
            println!(
                "Moved {} plant(s) from this device into your profile.",
                outcome.migrated_plants
            );
        }
    }
    Ok(())
}

pub(crate) fn cmd_logout(svc: &mut GardenService, json: bool) -> Result<()> {
    let was_signed_in = svc.logout()?;

    if json {
        println!("{}", serde_json::json!({ "logged_out": was_signed_in }));
    } else if was_signed_in {
        println!("Logged out");
    } else {
        eprintln!("Nobody is logged in");
    }
    Ok(())
}

pub(crate) fn cmd_rename(svc: &mut GardenService, name: &str, json: bool) -> Result<()> {
    let user = svc.rename(name)?;

    if json {
        println!("{}", serde_json::json!({ "id": user.id, "name": user.name }));
    } else {
        println!("Name changed to {}", user.name);
    }
    Ok(())
}

pub(crate) fn cmd_profile(svc: &mut GardenService, json: bool) -> Result<()> {
    let summary = svc.profile_summary(Utc::now())?;

    if json {
        return print_json(&summary);
    }

    println!("=== {} ===", summary.name);
    println!("  {}\n", summary.email);
    println!("  Level:             {}", summary.level);
    println!("  Plants:            {}", summary.plant_count);
    println!("  Successful plants: {}", summary.successful_plants);
    println!("  Days with us:      {}", summary.days_active);
    println!("  Photos taken:      {}", summary.total_photos);
    println!("  Avg. growth days:  {}", summary.avg_growth_days);
    println!("  Saved plans:       {}", summary.saved_plans);
    println!("  Saved diagnoses:   {}", summary.diagnostics_saved);

    println!("\nAchievements:");
    for (label, achieved) in summary.achievements.entries() {
        let mark = if achieved { "[x]" } else { "[ ]" };
        println!("  {mark} {label}");
    }
    Ok(())
}

pub(crate) fn cmd_export(svc: &mut GardenService, output: Option<&Path>) -> Result<()> {
    let data = svc.export_profile(Utc::now())?;
    let pretty = serde_json::to_string_pretty(&data)?;

    match output {
        Some(path) => {
            std::fs::write(path, pretty)
                .with_context(|| format!("Failed to write export: {}", path.display()))?;
            eprintln!("Exported profile to {}", path.display());
        }
        None => println!("{pretty}"),
    }
    Ok(())
}

pub(crate) fn cmd_stats(svc: &GardenService, json: bool) -> Result<()> {
    let stats = svc.global_stats();

    if json {
        return print_json(&stats);
    }
    println!("Diagnoses run:      {}", stats.diagnostic_count);
    println!("Calculations made:  {}", stats.calculator_count);
    println!("Plans saved:        {}", stats.plans_saved);
    Ok(())
}
