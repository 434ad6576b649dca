use anyhow::Result;
use tabled::{Table, Tabled, settings::Style};

use hydro_core::GardenService;
use hydro_core::models::ChecklistView;

use super::helpers::print_json;

fn print_view(view: &ChecklistView) {
    println!("Weekly maintenance ({}/{}, {}%)\n", view.completed, view.total, view.percent);
    for item in &view.items {
        let mark = if item.done { "[x]" } else { "[ ]" };
        println!("  {mark} {:<16} {}", item.id, item.label);
    }
}

pub(crate) fn cmd_checklist_show(svc: &GardenService, json: bool) -> Result<()> {
    let view = svc.checklist();
    if json {
        return print_json(&view);
    }
    print_view(&view);
    Ok(())
}

pub(crate) fn cmd_checklist_set(
    svc: &mut GardenService,
    task: &str,
    done: bool,
    json: bool,
) -> Result<()> {
    let view = svc.set_task(task, done)?;
    if json {
        return print_json(&view);
    }
    print_view(&view);
    Ok(())
}

pub(crate) fn cmd_checklist_reset(svc: &mut GardenService, json: bool) -> Result<()> {
    svc.reset_checklist()?;
    if json {
        println!("{}", serde_json::json!({ "reset": true }));
    } else {
        println!("Checklist cleared");
    }
    Ok(())
}

pub(crate) fn cmd_checklist_save(svc: &mut GardenService, json: bool) -> Result<()> {
    let record = svc.save_checklist()?;
    if json {
        return print_json(&record);
    }
    println!(
        "Saved checklist: {} of {} tasks done",
        record.completed_tasks.len(),
        record.total_tasks
    );
    Ok(())
}

pub(crate) fn cmd_checklist_history(svc: &GardenService, json: bool) -> Result<()> {
    let history = svc.checklist_history();
    if json {
        return print_json(history);
    }
    if history.is_empty() {
        eprintln!("No saved checklists yet.");
        return Ok(());
    }

    #[derive(Tabled)]
    struct HistoryRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Done")]
        done: String,
        #[tabled(rename = "Tasks")]
        tasks: String,
    }

    let rows: Vec<HistoryRow> = history
        .iter()
        .map(|r| HistoryRow {
            date: r.date.format("%Y-%m-%d %H:%M").to_string(),
            done: format!("{}/{}", r.completed_tasks.len(), r.total_tasks),
            tasks: r.completed_tasks.join(", "),
        })
        .collect();

    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{table}");
    Ok(())
}
