//! Three-question symptom triage.
//!
//! The triage walks `SelectProblem -> SelectCause -> SelectDuration -> Resolved`.
//! Each state carries exactly the answers given so far, so an answer for a
//! later step can never exist without the earlier ones. Rejected transitions
//! return an error and leave the state untouched.

use serde::Serialize;

use crate::error::GardenError;
use crate::models::{Cause, Duration, Problem};

/// Paragraph used for a problem/cause pair without a dedicated entry.
pub const GENERIC_DIAGNOSIS: &str = "Check the basics: solution temperature (18-24°C), pH (5.5-6.5), nutrient concentration and 12-14 hours of light a day. Correct whichever is off and watch the plant for a few days.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnosis {
    pub problem: Problem,
    pub cause: Cause,
    pub duration: Duration,
    pub solution: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TriageState {
    SelectProblem,
    SelectCause { problem: Problem },
    SelectDuration { problem: Problem, cause: Cause },
    Resolved(Diagnosis),
}

impl TriageState {
    /// 1-based step number; `Resolved` reports 4.
    #[must_use]
    pub fn step(&self) -> u8 {
        match self {
            Self::SelectProblem => 1,
            Self::SelectCause { .. } => 2,
            Self::SelectDuration { .. } => 3,
            Self::Resolved(_) => 4,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::SelectProblem => "select-problem",
            Self::SelectCause { .. } => "select-cause",
            Self::SelectDuration { .. } => "select-duration",
            Self::Resolved(_) => "resolved",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEngine {
    state: TriageState,
}

impl Default for DiagnosticEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: TriageState::SelectProblem,
        }
    }

    #[must_use]
    pub fn state(&self) -> &TriageState {
        &self.state
    }

    #[must_use]
    pub fn diagnosis(&self) -> Option<&Diagnosis> {
        match &self.state {
            TriageState::Resolved(d) => Some(d),
            _ => None,
        }
    }

    /// Causes valid in the current state, empty outside `SelectCause`.
    #[must_use]
    pub fn cause_options(&self) -> &'static [Cause] {
        match self.state {
            TriageState::SelectCause { problem } => problem.causes(),
            _ => &[],
        }
    }

    fn reject(&self, action: &str) -> GardenError {
        GardenError::state(format!(
            "Cannot {action} while the triage is at step '{}'",
            self.state.name()
        ))
    }

    pub fn select_problem(&mut self, problem: Problem) -> Result<(), GardenError> {
        if self.state != TriageState::SelectProblem {
            return Err(self.reject("select a problem"));
        }
        tracing::debug!(problem = problem.code(), "triage: problem selected");
        self.state = TriageState::SelectCause { problem };
        Ok(())
    }

    pub fn select_cause(&mut self, cause: Cause) -> Result<(), GardenError> {
        let TriageState::SelectCause { problem } = self.state else {
            return Err(self.reject("select a cause"));
        };
        if !problem.causes().contains(&cause) {
            let valid: Vec<&str> = problem.causes().iter().map(|c| c.code()).collect();
            return Err(GardenError::validation(format!(
                "Cause '{}' does not apply to '{}'. Must be one of: {}",
                cause.code(),
                problem.code(),
                valid.join(", ")
            )));
        }
        tracing::debug!(cause = cause.code(), "triage: cause selected");
        self.state = TriageState::SelectDuration { problem, cause };
        Ok(())
    }

    /// Final answer. Returns a copy of the diagnosis held by `Resolved`.
    pub fn select_duration(&mut self, duration: Duration) -> Result<Diagnosis, GardenError> {
        let TriageState::SelectDuration { problem, cause } = self.state else {
            return Err(self.reject("select a duration"));
        };
        let diagnosis = Diagnosis {
            problem,
            cause,
            duration,
            solution: solution(problem, cause, duration),
        };
        tracing::debug!(duration = duration.code(), "triage: resolved");
        self.state = TriageState::Resolved(diagnosis.clone());
        Ok(diagnosis)
    }

    /// Step back one question, discarding the answer to the step returned to.
    pub fn back(&mut self) -> Result<(), GardenError> {
        self.state = match self.state {
            TriageState::SelectCause { .. } => TriageState::SelectProblem,
            TriageState::SelectDuration { problem, .. } => TriageState::SelectCause { problem },
            TriageState::SelectProblem | TriageState::Resolved(_) => {
                return Err(self.reject("go back"));
            }
        };
        Ok(())
    }

    pub fn restart(&mut self) {
        self.state = TriageState::SelectProblem;
    }
}

/// Base diagnosis paragraph for a problem and its cause.
#[must_use]
pub fn base_diagnosis(problem: Problem, cause: Cause) -> &'static str {
    match (problem, cause) {
        (Problem::Yellowing, Cause::NitrogenDeficiency) => {
            "Most likely a nitrogen shortage. Add a nitrogen-rich fertilizer to the solution. Check the pH: it should stay between 5.5 and 6.5 for nutrients to be absorbed."
        }
        (Problem::Yellowing, Cause::LightIssue) => {
            "The plant gets too little or too much light. Extend the light period to 12-14 hours or move it somewhere brighter, avoiding direct midday sun."
        }
        (Problem::Yellowing, Cause::OverFertilized) => {
            "Likely excess fertilizer or a wrong pH. Rinse the roots in clean water, then add fresh solution at the correct concentration."
        }
        (Problem::Wilting, Cause::LowWater) => {
            "The plant is short of water. Check the water level in the system and make sure the pump is working properly."
        }
        (Problem::Wilting, Cause::PoorAeration) => {
            "The roots are short of oxygen. Increase aeration of the solution and check that the air pump and air stone are working."
        }
        (Problem::Spotting, Cause::HighHumidity) => {
            "Possibly a fungal disease. Lower the humidity and remove affected leaves. A Bacillus subtilis based biofungicide can help."
        }
        (Problem::Spotting, Cause::PoorVentilation) => {
            "Possibly a fungal disease encouraged by stagnant air. Improve ventilation around the plants and remove affected leaves."
        }
        (Problem::NoGrowth, Cause::Temperature) => {
            "Check the temperature: 18-24°C is optimal. Move the system away from cold windows or heaters."
        }
        (Problem::NoGrowth, Cause::PhImbalance) => {
            "Check the pH (5.5-6.5) and the solution concentration. Correct the pH with pH Down or pH Up and refresh the solution if needed."
        }
        (Problem::NoGrowth, Cause::LowLight) => {
            "Make sure the plant gets enough light: 12-14 hours a day. Add a grow lamp if natural light is insufficient."
        }
        _ => GENERIC_DIAGNOSIS,
    }
}

#[must_use]
pub fn prognosis(duration: Duration) -> &'static str {
    match duration {
        Duration::Recent => {
            "The problem appeared recently, so following the advice above should fix it quickly."
        }
        Duration::Medium => {
            "The problem has lasted a few days. Recovery may take longer, be patient."
        }
        Duration::Long => {
            "The problem has lasted a long time. Consider replacing the plant if it does not recover within a week of treatment."
        }
    }
}

#[must_use]
pub fn solution(problem: Problem, cause: Cause, duration: Duration) -> String {
    format!("{}\n\n{}", base_diagnosis(problem, cause), prognosis(duration))
}
