mod commands;
mod config;
mod server;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process;

use crate::commands::{
    TriageAnswers, cmd_checklist_history, cmd_checklist_reset, cmd_checklist_save,
    cmd_checklist_set, cmd_checklist_show, cmd_diagnose, cmd_export, cmd_guide, cmd_history,
    cmd_light, cmd_login, cmd_logout, cmd_nutrients, cmd_plan_list, cmd_plant_add,
    cmd_plant_list, cmd_plant_photo, cmd_plant_remove, cmd_profile, cmd_recommend, cmd_register,
    cmd_rename, cmd_stats,
};
use crate::config::Config;
use hydro_core::GardenService;
use hydro_core::db::Database;
use hydro_core::models::{
    Budget, Cause, Duration, LightNeed, Location, Orientation, PlantCategory, Problem, Selection,
};

#[derive(Parser)]
#[command(
    name = "hydro",
    version,
    about = "A hydroponic gardening assistant",
    long_about = "\n\n  ██╗  ██╗██╗   ██╗██████╗ ██████╗  ██████╗
  ██║  ██║╚██╗ ██╔╝██╔══██╗██╔══██╗██╔═══██╗
  ███████║ ╚████╔╝ ██║  ██║██████╔╝██║   ██║
  ██╔══██║  ╚██╔╝  ██║  ██║██╔══██╗██║   ██║
  ██║  ██║   ██║   ██████╔╝██║  ██║╚██████╔╝
  ╚═╝  ╚═╝   ╚═╝   ╚═════╝ ╚═╝  ╚═╝ ╚═════╝
        grow it in water.
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend a growing system and shopping list
    Recommend {
        /// Plant: lettuce, herbs, tomato, strawberry, other
        plant: PlantCategory,
        /// Location: windowsill, balcony, garage, room
        #[arg(short, long, default_value = "windowsill")]
        location: Location,
        /// Budget: minimal, medium, unlimited
        #[arg(short, long, default_value = "minimal")]
        budget: Budget,
        /// Save the plan to your profile (requires login)
        #[arg(long)]
        save_plan: bool,
        /// Add the plant to your garden, planted today
        #[arg(long)]
        add_plant: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Calculate fertilizer and pH-down doses for a tank
    Nutrients {
        /// Water volume in litres
        volume: f64,
        /// Plant: lettuce, herbs, tomato, strawberry, other
        #[arg(short, long, default_value = "lettuce")]
        plant: PlantCategory,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Lighting advice for a window orientation
    Light {
        /// Window orientation: north, northeast, east, southeast, south, ...
        orientation: Orientation,
        /// Light need of the plants: low, medium, high
        #[arg(short, long, default_value = "medium")]
        need: LightNeed,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Diagnose a sick plant (asks step by step unless all answers are given)
    Diagnose {
        /// Problem: yellowing, wilting, spotting, no-growth
        #[arg(long)]
        problem: Option<Problem>,
        /// Cause, e.g. nitrogen-deficiency, low-water, high-humidity, ph-imbalance
        #[arg(long)]
        cause: Option<Cause>,
        /// Duration: recent, medium, long
        #[arg(long)]
        duration: Option<Duration>,
        /// Save the result to your history (requires login)
        #[arg(long)]
        save: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show saved diagnoses
    History {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage the plants in your garden
    Plant {
        #[command(subcommand)]
        command: PlantCommands,
    },
    /// Show saved plans
    Plans {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Weekly maintenance checklist
    Checklist {
        #[command(subcommand)]
        command: ChecklistCommands,
    },
    /// Read the growing guide (lists topics when none is given)
    Guide {
        /// Topic: ph, light, mistakes
        topic: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create an account and log in
    Register {
        /// Display name
        name: String,
        /// Email address
        email: String,
        /// Password
        #[arg(long)]
        password: String,
        /// Password again
        #[arg(long)]
        confirm: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Log in (plants added while logged out move to your profile)
    Login {
        /// Email address
        email: String,
        /// Password
        #[arg(long)]
        password: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Log out
    Logout {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show your profile, level and achievements
    Profile {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change your display name
    Rename {
        /// New name
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export your profile as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<std::path::PathBuf>,
    },
    /// Show usage counters for this installation
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Start the REST API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
        /// Address to bind to (default: 127.0.0.1, use 0.0.0.0 to expose to network)
        #[arg(short, long, default_value = "127.0.0.1")]
        bind: String,
        /// Disable API key authentication (for development/testing)
        #[arg(long)]
        no_auth: bool,
    },
}

#[derive(Subcommand)]
enum PlantCommands {
    /// Add a plant
    Add {
        /// Plant name
        name: String,
        /// Category: lettuce, herbs, tomato, strawberry, other
        #[arg(short, long, default_value = "other")]
        category: PlantCategory,
        /// Planting date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List plants
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Record a progress photo
    Photo {
        /// Plant ID
        id: String,
        /// Photo date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a plant
    Remove {
        /// Plant ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ChecklistCommands {
    /// Show this week's checklist
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a task as done
    Check {
        /// Task ID, e.g. check-ph, top-up, clean-pump
        task: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a task as not done
    Uncheck {
        /// Task ID
        task: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Clear all ticks
    Reset {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Archive the ticked tasks and start over
    Save {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show archived checklists
    History {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_env("HYDRO_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

#[allow(clippy::too_many_lines)]
async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&config.db_path)?;
    let mut svc = GardenService::with_store(db)?;

    match cli.command {
        Commands::Recommend {
            plant,
            location,
            budget,
            save_plan,
            add_plant,
            json,
        } => {
            let selection = Selection {
                plant,
                location,
                budget,
            };
            cmd_recommend(&mut svc, selection, save_plan, add_plant, json)
        }
        Commands::Nutrients {
            volume,
            plant,
            json,
        } => cmd_nutrients(&mut svc, volume, plant, json),
        Commands::Light {
            orientation,
            need,
            json,
        } => cmd_light(&svc, orientation, need, json),
        Commands::Diagnose {
            problem,
            cause,
            duration,
            save,
            json,
        } => {
            let answers = TriageAnswers {
                problem,
                cause,
                duration,
            };
            cmd_diagnose(&mut svc, answers, save, json)
        }
        Commands::History { json } => cmd_history(&svc, json),
        Commands::Plant { command } => match command {
            PlantCommands::Add {
                name,
                category,
                date,
                json,
            } => cmd_plant_add(&mut svc, &name, category, date, json),
            PlantCommands::List { json } => cmd_plant_list(&svc, json),
            PlantCommands::Photo { id, date, json } => cmd_plant_photo(&mut svc, &id, date, json),
            PlantCommands::Remove { id, json } => cmd_plant_remove(&mut svc, &id, json),
        },
        Commands::Plans { json } => cmd_plan_list(&svc, json),
        Commands::Checklist { command } => match command {
            ChecklistCommands::Show { json } => cmd_checklist_show(&svc, json),
            ChecklistCommands::Check { task, json } => {
                cmd_checklist_set(&mut svc, &task, true, json)
            }
            ChecklistCommands::Uncheck { task, json } => {
                cmd_checklist_set(&mut svc, &task, false, json)
            }
            ChecklistCommands::Reset { json } => cmd_checklist_reset(&mut svc, json),
            ChecklistCommands::Save { json } => cmd_checklist_save(&mut svc, json),
            ChecklistCommands::History { json } => cmd_checklist_history(&svc, json),
        },
        Commands::Guide { topic, json } => cmd_guide(topic.as_deref(), json),
        Commands::Register {
            name,
            email,
            password,
            confirm,
            json,
        } => cmd_register(&mut svc, &name, &email, &password, &confirm, json),
        Commands::Login {
            email,
            password,
            json,
        } => cmd_login(&mut svc, &email, &password, json),
        Commands::Logout { json } => cmd_logout(&mut svc, json),
        Commands::Profile { json } => cmd_profile(&mut svc, json),
        Commands::Rename { name, json } => cmd_rename(&mut svc, &name, json),
        Commands::Export { output } => cmd_export(&mut svc, output.as_deref()),
        Commands::Stats { json } => cmd_stats(&svc, json),
        Commands::Serve {
            port,
            bind,
            no_auth,
        } => {
            let api_key = if no_auth {
                None
            } else {
                Some(config.load_or_create_api_key()?)
            };
            server::start_server(svc, port, &bind, api_key).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_recommend_defaults() {
        let cli = Cli::try_parse_from(["hydro", "recommend", "tomato"]).unwrap();
        match cli.command {
            Commands::Recommend {
                plant,
                location,
                budget,
                save_plan,
                ..
            } => {
                assert_eq!(plant, PlantCategory::Tomato);
                assert_eq!(location, Location::Windowsill);
                assert_eq!(budget, Budget::Minimal);
                assert!(!save_plan);
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_codes() {
        assert!(Cli::try_parse_from(["hydro", "recommend", "cactus"]).is_err());
        assert!(Cli::try_parse_from(["hydro", "light", "sideways"]).is_err());
        assert!(Cli::try_parse_from(["hydro", "diagnose", "--problem", "rust"]).is_err());
    }

    #[test]
    fn test_parse_diagnose_flags() {
        let cli = Cli::try_parse_from([
            "hydro",
            "diagnose",
            "--problem",
            "no-growth",
            "--cause",
            "ph-imbalance",
            "--duration",
            "long",
            "--save",
        ])
        .unwrap();
        match cli.command {
            Commands::Diagnose {
                problem,
                cause,
                duration,
                save,
                ..
            } => {
                assert_eq!(problem, Some(Problem::NoGrowth));
                assert_eq!(cause, Some(Cause::PhImbalance));
                assert_eq!(duration, Some(Duration::Long));
                assert!(save);
            }
            _ => panic!("expected diagnose"),
        }
    }

    #[test]
    fn test_parse_guide_topic_optional() {
        let cli = Cli::try_parse_from(["hydro", "guide"]).unwrap();
        assert!(matches!(cli.command, Commands::Guide { topic: None, .. }));
        let cli = Cli::try_parse_from(["hydro", "guide", "ph", "--json"]).unwrap();
        match cli.command {
            Commands::Guide { topic, json } => {
                assert_eq!(topic.as_deref(), Some("ph"));
                assert!(json);
            }
            _ => panic!("expected guide"),
        }
    }

    #[test]
    fn test_parse_orientation_abbreviation() {
        let cli = Cli::try_parse_from(["hydro", "light", "se", "--need", "high"]).unwrap();
        match cli.command {
            Commands::Light {
                orientation, need, ..
            } => {
                assert_eq!(orientation, Orientation::Southeast);
                assert_eq!(need, LightNeed::High);
            }
            _ => panic!("expected light"),
        }
    }
}
