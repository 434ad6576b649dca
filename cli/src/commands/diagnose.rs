use anyhow::{Result, bail};
use std::io::{self, BufRead};
use tabled::{Table, Tabled, settings::Style};

use hydro_core::GardenService;
use hydro_core::diagnostic::{Diagnosis, TriageState};
use hydro_core::models::{Cause, Duration, Problem};

use super::helpers::{Choice, print_json, print_options, read_choice, truncate};

/// Answers given on the command line. All three set means no prompting.
pub(crate) struct TriageAnswers {
    pub problem: Option<Problem>,
    pub cause: Option<Cause>,
    pub duration: Option<Duration>,
}

pub(crate) fn cmd_diagnose(
    svc: &mut GardenService,
    answers: TriageAnswers,
    save: bool,
    json: bool,
) -> Result<()> {
    let diagnosis = match answers {
        TriageAnswers {
            problem: Some(problem),
            cause: Some(cause),
            duration: Some(duration),
        } => svc.diagnose(problem, cause, duration)?,
        TriageAnswers {
            problem: None,
            cause: None,
            duration: None,
        } => {
            let stdin = io::stdin();
            match run_interactive(svc, &mut stdin.lock())? {
                Some(d) => d,
                None => {
                    eprintln!("Diagnosis cancelled");
                    return Ok(());
                }
            }
        }
        _ => bail!("Give all of --problem, --cause and --duration, or none to be asked"),
    };

    let record = if save {
        Some(svc.save_diagnosis()?)
    } else {
        None
    };

    if json {
        return print_json(&serde_json::json!({
            "diagnosis": diagnosis,
            "saved": record,
        }));
    }

    println!("\n=== Diagnosis ===\n");
    println!("  Problem:  {}", diagnosis.problem.label());
    println!("  Cause:    {}", diagnosis.cause.label());
    println!("  Duration: {}", diagnosis.duration.label());
    println!("\n{}", diagnosis.solution);
    if let Some(record) = record {
        println!("\nSaved to your history ({})", record.id);
    }
    Ok(())
}

/// Walk the triage one question at a time. Returns `None` when the user quits.
fn run_interactive<R: BufRead>(svc: &mut GardenService, input: &mut R) -> Result<Option<Diagnosis>> {
    svc.triage_restart();
    loop {
        let state = svc.triage_state().clone();
        let step = state.step();
        let count = match &state {
            TriageState::SelectProblem => {
                print_options(
                    &format!("Step {step}/3: What is wrong with the plant?"),
                    Problem::ALL.iter().map(|p| p.label()),
                );
                Problem::ALL.len()
            }
            TriageState::SelectCause { .. } => {
                let causes = svc.triage_cause_options();
                print_options(
                    &format!("Step {step}/3: What is the likely cause?"),
                    causes.iter().map(|c| c.label()),
                );
                causes.len()
            }
            TriageState::SelectDuration { .. } => {
                print_options(
                    &format!("Step {step}/3: How long has this been going on?"),
                    Duration::ALL.iter().map(|d| d.label()),
                );
                Duration::ALL.len()
            }
            TriageState::Resolved(d) => return Ok(Some(d.clone())),
        };

        let choice = match read_choice(input, count, step > 1) {
            Ok(choice) => choice,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        match (choice, &state) {
            (Choice::Quit, _) => return Ok(None),
            (Choice::Back, _) => svc.triage_back()?,
            (Choice::Pick(i), TriageState::SelectProblem) => {
                svc.triage_select_problem(Problem::ALL[i])?;
            }
            (Choice::Pick(i), TriageState::SelectCause { .. }) => {
                svc.triage_select_cause(svc.triage_cause_options()[i])?;
            }
            (Choice::Pick(i), TriageState::SelectDuration { .. }) => {
                svc.triage_select_duration(Duration::ALL[i])?;
            }
            (Choice::Pick(_), TriageState::Resolved(_)) => {}
        }
    }
}

pub(crate) fn cmd_history(svc: &GardenService, json: bool) -> Result<()> {
    let history = svc.diagnostic_history()?;

    if json {
        return print_json(history);
    }
    if history.is_empty() {
        eprintln!("No saved diagnoses. Use `hydro diagnose --save` to keep one.");
        return Ok(());
    }

    #[derive(Tabled)]
    struct HistoryRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Problem")]
        problem: &'static str,
        #[tabled(rename = "Cause")]
        cause: &'static str,
        #[tabled(rename = "Duration")]
        duration: &'static str,
        #[tabled(rename = "Advice")]
        advice: String,
    }

    let rows: Vec<HistoryRow> = history
        .iter()
        .map(|r| HistoryRow {
            date: r.created_at.format("%Y-%m-%d").to_string(),
            problem: r.problem.code(),
            cause: r.cause.code(),
            duration: r.duration.code(),
            advice: truncate(&r.solution, 50),
        })
        .collect();

    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{table}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_interactive_walkthrough() {
        let mut svc = GardenService::new_in_memory().unwrap();
        // wilting -> poor aeration -> long
        let mut input = Cursor::new("2\n2\n3\n");
        let d = run_interactive(&mut svc, &mut input).unwrap().unwrap();
        assert_eq!(d.problem, Problem::Wilting);
        assert_eq!(d.cause, Cause::PoorAeration);
        assert_eq!(d.duration, Duration::Long);
        assert_eq!(svc.global_stats().diagnostic_count, 1);
    }

    #[test]
    fn test_interactive_back_and_bad_input() {
        let mut svc = GardenService::new_in_memory().unwrap();
        // yellowing, back, spotting, junk, high humidity, recent
        let mut input = Cursor::new("1\nb\n3\nxyz\n1\n1\n");
        let d = run_interactive(&mut svc, &mut input).unwrap().unwrap();
        assert_eq!(d.problem, Problem::Spotting);
        assert_eq!(d.cause, Cause::HighHumidity);
        assert_eq!(d.duration, Duration::Recent);
    }

    #[test]
    fn test_interactive_quit() {
        let mut svc = GardenService::new_in_memory().unwrap();
        let mut input = Cursor::new("1\nq\n");
        assert!(run_interactive(&mut svc, &mut input).unwrap().is_none());
        assert_eq!(svc.global_stats().diagnostic_count, 0);
    }
}
