use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::db::Database;
use crate::diagnostic::{DiagnosticEngine, Diagnosis, TriageState};
use crate::error::GardenError;
use crate::light;
use crate::models::{
    AchievementSet, Cause, ChecklistItem, ChecklistRecord, ChecklistView, DiagnosticRecord,
    Duration, ExportData, GlobalStats, LightNeed, NewPlant, Orientation, Plan, Plant,
    PlantCategory, Problem, ProfileSummary, Selection, UsageKind, UsageStats, UserProfile,
    WEEKLY_TASKS, validate_task,
};
use crate::nutrients::{self, Dosage};
use crate::recommend::{self, Recommendation};
use crate::store::{ProfileStore, keys};
use crate::{ledger, progression};

#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    pub user: UserProfile,
    pub migrated_plants: usize,
}

/// Application context: the store handle plus everything loaded from it.
///
/// Created once at startup and passed to every front-end call. Each mutation
/// writes the affected keys back before returning.
pub struct GardenService<S: ProfileStore = Database> {
    store: S,
    users: Vec<UserProfile>,
    current_user_id: Option<String>,
    anonymous_plants: Vec<Plant>,
    global: GlobalStats,
    checklist: BTreeSet<String>,
    checklist_history: Vec<ChecklistRecord>,
    triage: DiagnosticEngine,
}

impl GardenService<Database> {
    pub fn new(db_path: &str) -> Result<Self> {
        let db = Database::open(Path::new(db_path))?;
        Self::with_store(db)
    }

    pub fn new_in_memory() -> Result<Self> {
        let db = Database::open_in_memory()?;
        Self::with_store(db)
    }
}

impl<S: ProfileStore> GardenService<S> {
    pub fn with_store(store: S) -> Result<Self> {
        let users: Vec<UserProfile> = store.load(keys::USERS)?.unwrap_or_default();
        let mut current_user_id: Option<String> = store.load(keys::CURRENT_USER_ID)?;
        if let Some(id) = &current_user_id {
            if !users.iter().any(|u| &u.id == id) {
                tracing::warn!(user = %id, "current user no longer exists, signing out");
                current_user_id = None;
            }
        }

        let checklist: Vec<String> = store.load(keys::CHECKLIST_STATE)?.unwrap_or_default();
        let svc = Self {
            anonymous_plants: store.load(keys::ANONYMOUS_PLANTS)?.unwrap_or_default(),
            global: store.load(keys::GLOBAL_STATS)?.unwrap_or_default(),
            checklist: checklist.into_iter().collect(),
            checklist_history: store.load(keys::CHECKLIST_HISTORY)?.unwrap_or_default(),
            triage: DiagnosticEngine::new(),
            users,
            current_user_id,
            store,
        };
        tracing::debug!(
            users = svc.users.len(),
            signed_in = svc.current_user_id.is_some(),
            "garden state loaded"
        );
        Ok(svc)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // --- Persistence ---

    fn persist_users(&self) -> Result<()> {
        self.store.save(keys::USERS, &self.users)
    }

    fn persist_session(&self) -> Result<()> {
        match &self.current_user_id {
            Some(id) => self.store.save(keys::CURRENT_USER_ID, id),
            None => self.store.remove(keys::CURRENT_USER_ID).map(|_| ()),
        }
    }

    fn persist_anonymous(&self) -> Result<()> {
        self.store.save(keys::ANONYMOUS_PLANTS, &self.anonymous_plants)
    }

    fn persist_checklist(&self) -> Result<()> {
        let done: Vec<&String> = self.checklist.iter().collect();
        self.store.save(keys::CHECKLIST_STATE, &done)
    }

    // --- Session ---

    fn current_index(&self) -> Option<usize> {
        let id = self.current_user_id.as_deref()?;
        self.users.iter().position(|u| u.id == id)
    }

    fn require_current(&self) -> Result<usize> {
        match self.current_index() {
            Some(idx) => Ok(idx),
            None => bail!(GardenError::not_found("No user is logged in")),
        }
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.current_index().map(|idx| &self.users[idx])
    }

    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<UserProfile> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            bail!(GardenError::validation("Name must not be empty"));
        }
        if email.is_empty() {
            bail!(GardenError::validation("Email must not be empty"));
        }
        if password != confirm {
            bail!(GardenError::validation("Passwords do not match"));
        }
        if self.users.iter().any(|u| u.email == email) {
            bail!(GardenError::validation(format!(
                "A user with email '{email}' already exists"
            )));
        }

        let user = UserProfile {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            join_date: Utc::now(),
            plants: Vec::new(),
            saved_plans: Vec::new(),
            diagnostic_history: Vec::new(),
            stats: UsageStats::default(),
            achievements: AchievementSet::default(),
        };
        self.current_user_id = Some(user.id.clone());
        self.users.push(user.clone());
        self.persist_users()?;
        self.persist_session()?;
        tracing::info!(user = %user.id, "registered");
        Ok(user)
    }

    /// Sign in and move any anonymous plants onto the profile.
    pub fn login(&mut self, email: &str, password: &str) -> Result<LoginOutcome> {
        let email = email.trim();
        let Some(idx) = self
            .users
            .iter()
            .position(|u| u.email == email && u.password == password)
        else {
            bail!(GardenError::validation("Invalid email or password"));
        };

        self.current_user_id = Some(self.users[idx].id.clone());
        let user = &mut self.users[idx];
        let migrated = ledger::migrate_anonymous(&mut user.plants, &mut self.anonymous_plants);
        ledger::settle(user, Utc::now());
        let user = user.clone();

        self.persist_users()?;
        self.persist_session()?;
        if migrated > 0 {
            self.persist_anonymous()?;
            tracing::info!(user = %user.id, migrated, "moved anonymous plants to profile");
        }
        tracing::info!(user = %user.id, "logged in");
        Ok(LoginOutcome {
            user,
            migrated_plants: migrated,
        })
    }

    /// Returns whether someone was signed in.
    pub fn logout(&mut self) -> Result<bool> {
        let was_signed_in = self.current_user_id.take().is_some();
        self.persist_session()?;
        Ok(was_signed_in)
    }

    pub fn rename(&mut self, name: &str) -> Result<UserProfile> {
        let name = name.trim();
        if name.is_empty() {
            bail!(GardenError::validation("Name must not be empty"));
        }
        let idx = self.require_current()?;
        self.users[idx].name = name.to_string();
        self.persist_users()?;
        Ok(self.users[idx].clone())
    }

    // --- Usage counters ---

    /// Bump the counters for one completed action.
    ///
    /// Global counters always move. A calculator use also counts toward the
    /// signed-in user's progression.
    pub fn record_usage(&mut self, kind: UsageKind) -> Result<()> {
        match kind {
            UsageKind::Calculator => self.global.calculator_count += 1,
            UsageKind::Diagnostic => self.global.diagnostic_count += 1,
            UsageKind::PlanSaved => self.global.plans_saved += 1,
        }
        self.store.save(keys::GLOBAL_STATS, &self.global)?;

        if kind != UsageKind::Calculator {
            return Ok(());
        }
        if let Some(idx) = self.current_index() {
            let user = &mut self.users[idx];
            user.stats.calculator_uses += 1;
            progression::apply(user, Utc::now());
            self.persist_users()?;
        }
        Ok(())
    }

    pub fn global_stats(&self) -> GlobalStats {
        self.global
    }

    // --- Wizard ---

    pub fn recommend(&self, selection: &Selection) -> Recommendation {
        recommend::recommend(selection)
    }

    pub fn save_plan(&mut self, selection: &Selection) -> Result<Plan> {
        let idx = self.require_current()?;
        let plan = Plan {
            id: Uuid::new_v4().to_string(),
            plant: selection.plant,
            location: selection.location,
            budget: selection.budget,
            created_at: Utc::now(),
        };
        self.users[idx].saved_plans.push(plan.clone());
        self.persist_users()?;
        self.record_usage(UsageKind::PlanSaved)?;
        tracing::info!(plan = %plan.id, "plan saved");
        Ok(plan)
    }

    pub fn saved_plans(&self) -> Result<&[Plan]> {
        let idx = self.require_current()?;
        Ok(&self.users[idx].saved_plans)
    }

    /// Add a plant named after the wizard's plant choice, planted today.
    pub fn add_plant_from_selection(&mut self, selection: &Selection) -> Result<Plant> {
        self.add_plant(NewPlant {
            name: selection.plant.default_plant_name().to_string(),
            planting_date: Utc::now().date_naive(),
            category: selection.plant,
        })
    }

    // --- Calculators ---

    pub fn calculate_nutrients(
        &mut self,
        volume_liters: f64,
        category: PlantCategory,
    ) -> Result<Dosage> {
        if !volume_liters.is_finite() || volume_liters <= 0.0 {
            bail!(GardenError::validation(format!(
                "Invalid water volume '{volume_liters}'. Must be greater than 0"
            )));
        }
        let dosage = nutrients::calculate(volume_liters, category);
        self.record_usage(UsageKind::Calculator)?;
        Ok(dosage)
    }

    pub fn light_recommendation(&self, orientation: Orientation, need: LightNeed) -> String {
        light::recommend(orientation, need)
    }

    // --- Triage ---

    pub fn triage_state(&self) -> &TriageState {
        self.triage.state()
    }

    pub fn triage_cause_options(&self) -> &'static [Cause] {
        self.triage.cause_options()
    }

    pub fn triage_select_problem(&mut self, problem: Problem) -> Result<()> {
        self.triage.select_problem(problem)?;
        Ok(())
    }

    pub fn triage_select_cause(&mut self, cause: Cause) -> Result<()> {
        self.triage.select_cause(cause)?;
        Ok(())
    }

    pub fn triage_select_duration(&mut self, duration: Duration) -> Result<Diagnosis> {
        let diagnosis = self.triage.select_duration(duration)?;
        self.record_usage(UsageKind::Diagnostic)?;
        Ok(diagnosis)
    }

    pub fn triage_back(&mut self) -> Result<()> {
        self.triage.back()?;
        Ok(())
    }

    pub fn triage_restart(&mut self) {
        self.triage.restart();
    }

    /// Run a whole triage in one go, starting from a fresh session.
    pub fn diagnose(
        &mut self,
        problem: Problem,
        cause: Cause,
        duration: Duration,
    ) -> Result<Diagnosis> {
        self.triage.restart();
        self.triage_select_problem(problem)?;
        if let Err(e) = self.triage_select_cause(cause) {
            self.triage.restart();
            return Err(e);
        }
        self.triage_select_duration(duration)
    }

    /// Append the resolved triage to the signed-in user's history and start a
    /// fresh triage, so one session is saved at most once.
    pub fn save_diagnosis(&mut self) -> Result<DiagnosticRecord> {
        let Some(diagnosis) = self.triage.diagnosis() else {
            bail!(GardenError::state(
                "Cannot save a diagnosis before the triage is finished"
            ));
        };
        let idx = self.require_current()?;

        let record = DiagnosticRecord {
            id: Uuid::new_v4().to_string(),
            problem: diagnosis.problem,
            cause: diagnosis.cause,
            duration: diagnosis.duration,
            solution: diagnosis.solution.clone(),
            created_at: Utc::now(),
        };
        let user = &mut self.users[idx];
        user.diagnostic_history.push(record.clone());
        user.stats.diagnostic_uses = u32::try_from(user.diagnostic_history.len()).unwrap_or(u32::MAX);
        progression::apply(user, Utc::now());
        self.persist_users()?;
        self.triage.restart();
        tracing::info!(record = %record.id, "diagnosis saved");
        Ok(record)
    }

    pub fn diagnostic_history(&self) -> Result<&[DiagnosticRecord]> {
        let idx = self.require_current()?;
        Ok(&self.users[idx].diagnostic_history)
    }

    // --- Garden ledger ---

    /// The signed-in user's plants, or the anonymous bucket.
    pub fn plants(&self) -> &[Plant] {
        match self.current_index() {
            Some(idx) => &self.users[idx].plants,
            None => &self.anonymous_plants,
        }
    }

    fn after_plant_change(&mut self, idx: Option<usize>) -> Result<()> {
        match idx {
            Some(idx) => {
                ledger::settle(&mut self.users[idx], Utc::now());
                self.persist_users()
            }
            None => self.persist_anonymous(),
        }
    }

    pub fn add_plant(&mut self, new: NewPlant) -> Result<Plant> {
        if new.name.trim().is_empty() {
            bail!(GardenError::validation("Plant name must not be empty"));
        }
        let new = NewPlant {
            name: new.name.trim().to_string(),
            ..new
        };
        let idx = self.current_index();
        let list = match idx {
            Some(idx) => &mut self.users[idx].plants,
            None => &mut self.anonymous_plants,
        };
        let plant = ledger::add_plant(list, new, Utc::now());
        self.after_plant_change(idx)?;
        tracing::info!(plant = %plant.id, anonymous = idx.is_none(), "plant added");
        Ok(plant)
    }

    pub fn add_photo(&mut self, plant_id: &str, date: NaiveDate) -> Result<()> {
        let idx = self.current_index();
        let list = match idx {
            Some(idx) => &mut self.users[idx].plants,
            None => &mut self.anonymous_plants,
        };
        ledger::add_photo(list, plant_id, date)?;
        match idx {
            Some(_) => self.persist_users(),
            None => self.persist_anonymous(),
        }
    }

    /// Returns whether a plant was removed. Unknown ids are a no-op.
    pub fn remove_plant(&mut self, plant_id: &str) -> Result<bool> {
        let idx = self.current_index();
        let list = match idx {
            Some(idx) => &mut self.users[idx].plants,
            None => &mut self.anonymous_plants,
        };
        if !ledger::remove_plant(list, plant_id) {
            tracing::debug!(plant = plant_id, "remove ignored, no such plant");
            return Ok(false);
        }
        self.after_plant_change(idx)?;
        tracing::info!(plant = plant_id, "plant removed");
        Ok(true)
    }

    // --- Profile ---

    pub fn profile_summary(&mut self, now: DateTime<Utc>) -> Result<ProfileSummary> {
        let idx = self.require_current()?;
        let user = &mut self.users[idx];
        ledger::settle(user, now);
        let summary = build_summary(user, now);
        self.persist_users()?;
        Ok(summary)
    }

    pub fn export_profile(&mut self, now: DateTime<Utc>) -> Result<ExportData> {
        let idx = self.require_current()?;
        ledger::settle(&mut self.users[idx], now);
        self.persist_users()?;
        Ok(ExportData {
            user: self.users[idx].clone(),
            exported_at: now,
        })
    }

    // --- Weekly checklist ---

    pub fn checklist(&self) -> ChecklistView {
        let items: Vec<ChecklistItem> = WEEKLY_TASKS
            .iter()
            .map(|&(id, label)| ChecklistItem {
                id,
                label,
                done: self.checklist.contains(id),
            })
            .collect();
        let completed = items.iter().filter(|i| i.done).count();
        let total = items.len();
        ChecklistView {
            items,
            completed,
            total,
            percent: percent(completed, total),
        }
    }

    pub fn set_task(&mut self, task: &str, done: bool) -> Result<ChecklistView> {
        let id = validate_task(task)?;
        if done {
            self.checklist.insert(id.to_string());
        } else {
            self.checklist.remove(id);
        }
        self.persist_checklist()?;
        Ok(self.checklist())
    }

    pub fn reset_checklist(&mut self) -> Result<()> {
        self.checklist.clear();
        self.persist_checklist()
    }

    /// Archive the ticked tasks and start a fresh checklist.
    pub fn save_checklist(&mut self) -> Result<ChecklistRecord> {
        if self.checklist.is_empty() {
            bail!(GardenError::validation(
                "Tick at least one task before saving the checklist"
            ));
        }
        let record = ChecklistRecord {
            id: Uuid::new_v4().to_string(),
            date: Utc::now(),
            completed_tasks: WEEKLY_TASKS
                .iter()
                .filter(|(id, _)| self.checklist.contains(*id))
                .map(|(id, _)| (*id).to_string())
                .collect(),
            total_tasks: WEEKLY_TASKS.len(),
        };
        self.checklist_history.push(record.clone());
        self.store.save(keys::CHECKLIST_HISTORY, &self.checklist_history)?;
        self.reset_checklist()?;
        tracing::info!(record = %record.id, done = record.completed_tasks.len(), "checklist saved");
        Ok(record)
    }

    pub fn checklist_history(&self) -> &[ChecklistRecord] {
        &self.checklist_history
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn percent(done: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (done as f64 / total as f64 * 100.0).round() as u32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn build_summary(user: &UserProfile, now: DateTime<Utc>) -> ProfileSummary {
    let today = now.date_naive();
    let avg_growth_days = if user.plants.is_empty() {
        0
    } else {
        let total: i64 = user
            .plants
            .iter()
            .map(|p| p.days_since_planting(today))
            .sum();
        total / user.plants.len() as i64
    };

    ProfileSummary {
        name: user.name.clone(),
        email: user.email.clone(),
        plant_count: user.plants.len(),
        days_active: (now - user.join_date).num_days().max(1),
        level: user.stats.level,
        successful_plants: user.stats.successful_plants,
        total_photos: user.plants.iter().map(|p| p.photos.len()).sum(),
        avg_growth_days,
        saved_plans: user.saved_plans.len(),
        diagnostics_saved: user.diagnostic_history.len(),
        achievements: user.achievements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind_of;
    use crate::models::{Budget, Level, Location};

    fn svc() -> GardenService {
        GardenService::new_in_memory().unwrap()
    }

    fn signed_in() -> GardenService {
        let mut svc = svc();
        svc.register("Ada", "ada@example.com", "pw", "pw").unwrap();
        svc
    }

    fn new_plant(name: &str) -> NewPlant {
        NewPlant {
            name: name.to_string(),
            planting_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            category: PlantCategory::Lettuce,
        }
    }

    fn selection() -> Selection {
        Selection {
            plant: PlantCategory::Tomato,
            location: Location::Balcony,
            budget: Budget::Medium,
        }
    }

    fn is_validation(err: &anyhow::Error) -> bool {
        matches!(kind_of(err), Some(GardenError::Validation(_)))
    }

    #[test]
    fn test_register_and_current_user() {
        let svc = signed_in();
        let user = svc.current_user().unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.stats.level, Level::Novice);
        assert_eq!(user.stats.total_plants, 0);
    }

    #[test]
    fn test_register_validation() {
        let mut svc = svc();
        assert!(is_validation(
            &svc.register("Ada", "a@x", "one", "two").unwrap_err()
        ));
        assert!(is_validation(&svc.register("  ", "a@x", "pw", "pw").unwrap_err()));
        svc.register("Ada", "a@x", "pw", "pw").unwrap();
        assert!(is_validation(&svc.register("Bob", "a@x", "pw", "pw").unwrap_err()));
    }

    #[test]
    fn test_login_requires_exact_credentials() {
        let mut svc = signed_in();
        svc.logout().unwrap();
        assert!(is_validation(&svc.login("ada@example.com", "PW").unwrap_err()));
        assert!(svc.current_user().is_none());
        svc.login("ada@example.com", "pw").unwrap();
        assert!(svc.current_user().is_some());
    }

    #[test]
    fn test_login_migrates_anonymous_plants() {
        let mut svc = signed_in();
        svc.add_plant(new_plant("Kept")).unwrap();
        svc.logout().unwrap();

        svc.add_plant(new_plant("Anon 1")).unwrap();
        svc.add_plant(new_plant("Anon 2")).unwrap();
        assert_eq!(svc.plants().len(), 2);

        let outcome = svc.login("ada@example.com", "pw").unwrap();
        assert_eq!(outcome.migrated_plants, 2);
        assert_eq!(outcome.user.plants.len(), 3);
        assert_eq!(outcome.user.stats.total_plants, 3);
        assert_eq!(svc.plants().len(), 3);

        svc.logout().unwrap();
        assert!(svc.plants().is_empty());
    }

    #[test]
    fn test_register_does_not_migrate() {
        let mut svc = svc();
        svc.add_plant(new_plant("Anon")).unwrap();
        svc.register("Ada", "ada@example.com", "pw", "pw").unwrap();
        assert!(svc.plants().is_empty());
        svc.logout().unwrap();
        assert_eq!(svc.plants().len(), 1);
    }

    #[test]
    fn test_anonymous_plants_evaluated_on_login() {
        let mut svc = signed_in();
        svc.logout().unwrap();
        for i in 0..6 {
            svc.add_plant(new_plant(&format!("P{i}"))).unwrap();
        }
        assert_eq!(svc.plants().len(), 6);
        let stored: Vec<UserProfile> = svc.store().load(keys::USERS).unwrap().unwrap();
        assert_eq!(stored[0].stats.level, Level::Novice);
        assert!(!stored[0].achievements.first_plant);

        let outcome = svc.login("ada@example.com", "pw").unwrap();
        assert_eq!(outcome.user.stats.level, Level::Experienced);
        assert_eq!(outcome.user.stats.total_plants, 6);
        assert!(outcome.user.achievements.five_plants);
    }

    #[test]
    fn test_add_plant_updates_progression() {
        let mut svc = signed_in();
        for i in 0..5 {
            svc.add_plant(new_plant(&format!("P{i}"))).unwrap();
        }
        let user = svc.current_user().unwrap();
        assert_eq!(user.stats.total_plants, 5);
        assert_eq!(user.stats.level, Level::Experienced);
        assert!(user.achievements.five_plants);
    }

    #[test]
    fn test_add_plant_rejects_blank_name() {
        let mut svc = signed_in();
        assert!(is_validation(&svc.add_plant(new_plant("   ")).unwrap_err()));
    }

    #[test]
    fn test_remove_unknown_plant_is_noop() {
        let mut svc = signed_in();
        svc.add_plant(new_plant("Basil")).unwrap();
        let before = svc.current_user().unwrap().clone();
        assert!(!svc.remove_plant("does-not-exist").unwrap());
        assert_eq!(svc.current_user().unwrap(), &before);
    }

    #[test]
    fn test_remove_plant_drops_level_keeps_flag() {
        let mut svc = signed_in();
        let plant = svc.add_plant(new_plant("Basil")).unwrap();
        assert!(svc.remove_plant(&plant.id).unwrap());
        let user = svc.current_user().unwrap();
        assert_eq!(user.stats.total_plants, 0);
        assert_eq!(user.stats.level, Level::Novice);
        assert!(user.achievements.first_plant);
    }

    #[test]
    fn test_add_photo_unknown_plant() {
        let mut svc = signed_in();
        let err = svc
            .add_photo("nope", NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
            .unwrap_err();
        assert!(matches!(kind_of(&err), Some(GardenError::NotFound(_))));
    }

    #[test]
    fn test_add_plant_from_selection() {
        let mut svc = svc();
        let plant = svc.add_plant_from_selection(&selection()).unwrap();
        assert_eq!(plant.name, "Tomatoes and peppers");
        assert_eq!(plant.category, PlantCategory::Tomato);
        assert_eq!(plant.planting_date, Utc::now().date_naive());
    }

    #[test]
    fn test_save_plan_requires_login() {
        let mut svc = svc();
        let err = svc.save_plan(&selection()).unwrap_err();
        assert!(matches!(kind_of(&err), Some(GardenError::NotFound(_))));
        assert_eq!(svc.global_stats().plans_saved, 0);
    }

    #[test]
    fn test_save_plan() {
        let mut svc = signed_in();
        let plan = svc.save_plan(&selection()).unwrap();
        assert_eq!(plan.plant, PlantCategory::Tomato);
        assert_eq!(svc.saved_plans().unwrap().len(), 1);
        assert_eq!(svc.global_stats().plans_saved, 1);
    }

    #[test]
    fn test_nutrients_count_usage() {
        let mut svc = signed_in();
        let dosage = svc.calculate_nutrients(10.0, PlantCategory::Tomato).unwrap();
        assert_eq!(dosage.fertilizer_a_ml, 15);
        assert_eq!(svc.global_stats().calculator_count, 1);
        assert_eq!(svc.current_user().unwrap().stats.calculator_uses, 1);
    }

    #[test]
    fn test_nutrients_reject_non_positive_volume() {
        let mut svc = signed_in();
        assert!(is_validation(
            &svc.calculate_nutrients(0.0, PlantCategory::Lettuce).unwrap_err()
        ));
        assert!(is_validation(
            &svc.calculate_nutrients(-3.0, PlantCategory::Lettuce).unwrap_err()
        ));
        assert_eq!(svc.global_stats().calculator_count, 0);
    }

    #[test]
    fn test_ten_calculations_achievement() {
        let mut svc = signed_in();
        for _ in 0..10 {
            svc.calculate_nutrients(5.0, PlantCategory::Herbs).unwrap();
        }
        assert!(svc.current_user().unwrap().achievements.ten_calculations);
    }

    #[test]
    fn test_anonymous_calculator_counts_globally() {
        let mut svc = svc();
        svc.calculate_nutrients(5.0, PlantCategory::Herbs).unwrap();
        assert_eq!(svc.global_stats().calculator_count, 1);
    }

    #[test]
    fn test_triage_counter_increments_once() {
        let mut svc = svc();
        svc.triage_select_problem(Problem::Wilting).unwrap();
        svc.triage_select_cause(Cause::LowWater).unwrap();
        let diagnosis = svc.triage_select_duration(Duration::Recent).unwrap();
        assert!(diagnosis.solution.contains("\n\n"));
        assert_eq!(svc.global_stats().diagnostic_count, 1);

        // Resolved is terminal: further answers are rejected and not counted
        let err = svc.triage_select_duration(Duration::Long).unwrap_err();
        assert!(matches!(kind_of(&err), Some(GardenError::State(_))));
        assert_eq!(svc.global_stats().diagnostic_count, 1);
    }

    #[test]
    fn test_duration_rejected_in_first_step() {
        let mut svc = svc();
        let err = svc.triage_select_duration(Duration::Recent).unwrap_err();
        assert!(matches!(kind_of(&err), Some(GardenError::State(_))));
        assert_eq!(svc.triage_state(), &TriageState::SelectProblem);
        assert_eq!(svc.global_stats().diagnostic_count, 0);
    }

    #[test]
    fn test_diagnose_invalid_cause_resets() {
        let mut svc = svc();
        let err = svc
            .diagnose(Problem::Spotting, Cause::LowWater, Duration::Recent)
            .unwrap_err();
        assert!(is_validation(&err));
        assert_eq!(svc.triage_state(), &TriageState::SelectProblem);
        assert_eq!(svc.global_stats().diagnostic_count, 0);
    }

    #[test]
    fn test_save_diagnosis() {
        let mut svc = signed_in();
        let err = svc.save_diagnosis().unwrap_err();
        assert!(matches!(kind_of(&err), Some(GardenError::State(_))));

        svc.diagnose(Problem::Yellowing, Cause::NitrogenDeficiency, Duration::Medium)
            .unwrap();
        let record = svc.save_diagnosis().unwrap();
        assert_eq!(record.problem, Problem::Yellowing);
        let user = svc.current_user().unwrap();
        assert_eq!(user.stats.diagnostic_uses, 1);
        assert!(user.achievements.first_diagnostic);
        assert_eq!(svc.diagnostic_history().unwrap().len(), 1);
    }

    #[test]
    fn test_diagnosis_saved_once_per_triage() {
        let mut svc = signed_in();
        svc.diagnose(Problem::Wilting, Cause::LowWater, Duration::Recent)
            .unwrap();
        svc.save_diagnosis().unwrap();
        assert_eq!(svc.triage_state(), &TriageState::SelectProblem);

        let err = svc.save_diagnosis().unwrap_err();
        assert!(matches!(kind_of(&err), Some(GardenError::State(_))));
        let user = svc.current_user().unwrap();
        assert_eq!(user.diagnostic_history.len(), 1);
        assert_eq!(user.stats.diagnostic_uses, 1);
        assert_eq!(svc.global_stats().diagnostic_count, 1);
    }

    #[test]
    fn test_save_diagnosis_requires_login() {
        let mut svc = svc();
        svc.diagnose(Problem::NoGrowth, Cause::LowLight, Duration::Long)
            .unwrap();
        let err = svc.save_diagnosis().unwrap_err();
        assert!(matches!(kind_of(&err), Some(GardenError::NotFound(_))));
    }

    #[test]
    fn test_profile_summary() {
        let mut svc = signed_in();
        let today = Utc::now().date_naive();
        let plant = svc
            .add_plant(NewPlant {
                name: "Basil".to_string(),
                planting_date: today - chrono::Duration::days(10),
                category: PlantCategory::Herbs,
            })
            .unwrap();
        svc.add_plant(NewPlant {
            name: "Mint".to_string(),
            planting_date: today - chrono::Duration::days(5),
            category: PlantCategory::Herbs,
        })
        .unwrap();
        svc.add_photo(&plant.id, today).unwrap();

        let summary = svc.profile_summary(Utc::now()).unwrap();
        assert_eq!(summary.plant_count, 2);
        assert_eq!(summary.days_active, 1);
        assert_eq!(summary.total_photos, 1);
        assert_eq!(summary.avg_growth_days, 7);
        assert_eq!(summary.level, Level::Beginner);
    }

    #[test]
    fn test_export_profile() {
        let mut svc = signed_in();
        svc.add_plant(new_plant("Basil")).unwrap();
        let now = Utc::now();
        let export = svc.export_profile(now).unwrap();
        assert_eq!(export.user.plants.len(), 1);
        assert_eq!(export.exported_at, now);
        let json = serde_json::to_value(&export).unwrap();
        assert!(json.get("user").is_some());
        assert!(json.get("exported_at").is_some());
    }

    #[test]
    fn test_rename() {
        let mut svc = signed_in();
        assert_eq!(svc.rename("  Ada L. ").unwrap().name, "Ada L.");
        assert!(is_validation(&svc.rename(" ").unwrap_err()));
    }

    #[test]
    fn test_checklist_flow() {
        let mut svc = svc();
        assert!(is_validation(&svc.save_checklist().unwrap_err()));

        svc.set_task("check-ph", true).unwrap();
        let view = svc.set_task("clean-pump", true).unwrap();
        assert_eq!(view.completed, 2);
        assert_eq!(view.total, 7);
        assert_eq!(view.percent, 29);

        let view = svc.set_task("check-ph", false).unwrap();
        assert_eq!(view.completed, 1);
        assert!(is_validation(&svc.set_task("feed-cat", true).unwrap_err()));

        svc.set_task("check-ph", true).unwrap();
        let record = svc.save_checklist().unwrap();
        assert_eq!(record.completed_tasks, vec!["check-ph", "clean-pump"]);
        assert_eq!(record.total_tasks, 7);
        assert_eq!(svc.checklist().completed, 0);
        assert_eq!(svc.checklist_history().len(), 1);
    }

    #[test]
    fn test_state_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hydro.db");
        let path = path.to_str().unwrap();
        {
            let mut svc = GardenService::new(path).unwrap();
            svc.register("Ada", "ada@example.com", "pw", "pw").unwrap();
            svc.add_plant(new_plant("Basil")).unwrap();
            svc.calculate_nutrients(10.0, PlantCategory::Lettuce).unwrap();
            svc.set_task("top-up", true).unwrap();
        }
        let svc = GardenService::new(path).unwrap();
        assert_eq!(svc.current_user().unwrap().name, "Ada");
        assert_eq!(svc.plants().len(), 1);
        assert_eq!(svc.global_stats().calculator_count, 1);
        assert_eq!(svc.checklist().completed, 1);
    }

    #[test]
    fn test_full_session_writes_every_key() {
        let mut svc = svc();
        svc.add_plant(new_plant("Basil")).unwrap();
        svc.register("Ada", "ada@example.com", "pw", "pw").unwrap();
        svc.calculate_nutrients(5.0, PlantCategory::Herbs).unwrap();
        svc.set_task("check-roots", true).unwrap();
        svc.save_checklist().unwrap();

        let stored: Vec<String> = svc
            .store()
            .list_keys()
            .unwrap()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        let mut expected = keys::ALL.to_vec();
        expected.sort_unstable();
        assert_eq!(stored, expected);
    }
}
