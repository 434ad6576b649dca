use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GardenError;

/// Days after which a plant's growth progress is reported as complete.
pub const GROWTH_CYCLE_DAYS: i64 = 90;

fn unknown_code(kind: &str, input: &str, valid: &[&str]) -> GardenError {
    GardenError::validation(format!(
        "Invalid {kind} '{input}'. Must be one of: {}",
        valid.join(", ")
    ))
}

// --- Wizard selections ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantCategory {
    Lettuce,
    Herbs,
    Tomato,
    Strawberry,
    #[serde(other)]
    Other,
}

impl PlantCategory {
    pub const ALL: [PlantCategory; 5] = [
        Self::Lettuce,
        Self::Herbs,
        Self::Tomato,
        Self::Strawberry,
        Self::Other,
    ];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Lettuce => "lettuce",
            Self::Herbs => "herbs",
            Self::Tomato => "tomato",
            Self::Strawberry => "strawberry",
            Self::Other => "other",
        }
    }

    /// Name given to a plant added straight from the wizard.
    #[must_use]
    pub fn default_plant_name(self) -> &'static str {
        match self {
            Self::Lettuce => "Lettuce",
            Self::Herbs => "Herbs",
            Self::Tomato => "Tomatoes and peppers",
            Self::Strawberry => "Strawberry",
            Self::Other => "My plant",
        }
    }

    /// Lenient lookup: unknown codes map to `Other`.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        code.parse().unwrap_or(Self::Other)
    }
}

impl FromStr for PlantCategory {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lettuce" | "greens" => Ok(Self::Lettuce),
            "herbs" | "herb" => Ok(Self::Herbs),
            "tomato" | "tomatoes" | "pepper" | "peppers" => Ok(Self::Tomato),
            "strawberry" | "strawberries" => Ok(Self::Strawberry),
            "other" => Ok(Self::Other),
            _ => Err(unknown_code(
                "plant category",
                s,
                &Self::ALL.map(Self::code),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Balcony,
    Garage,
    Room,
    #[serde(other)]
    Windowsill,
}

impl Location {
    pub const ALL: [Location; 4] = [Self::Windowsill, Self::Balcony, Self::Garage, Self::Room];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Windowsill => "windowsill",
            Self::Balcony => "balcony",
            Self::Garage => "garage",
            Self::Room => "room",
        }
    }

    /// Lenient lookup: unknown codes map to `Windowsill`.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        code.parse().unwrap_or(Self::Windowsill)
    }
}

impl FromStr for Location {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "windowsill" | "window" => Ok(Self::Windowsill),
            "balcony" => Ok(Self::Balcony),
            "garage" | "basement" => Ok(Self::Garage),
            "room" => Ok(Self::Room),
            _ => Err(unknown_code("location", s, &Self::ALL.map(Self::code))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    Medium,
    Unlimited,
    #[serde(other)]
    Minimal,
}

impl Budget {
    pub const ALL: [Budget; 3] = [Self::Minimal, Self::Medium, Self::Unlimited];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Medium => "medium",
            Self::Unlimited => "unlimited",
        }
    }

    /// Lenient lookup: unknown codes map to the minimal tier.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        code.parse().unwrap_or(Self::Minimal)
    }
}

impl FromStr for Budget {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minimal" | "low" => Ok(Self::Minimal),
            "medium" => Ok(Self::Medium),
            "unlimited" | "high" => Ok(Self::Unlimited),
            _ => Err(unknown_code("budget", s, &Self::ALL.map(Self::code))),
        }
    }
}

/// A completed wizard selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub plant: PlantCategory,
    pub location: Location,
    pub budget: Budget,
}

// --- Light calculator inputs ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
    #[serde(other)]
    North,
}

impl Orientation {
    pub const ALL: [Orientation; 8] = [
        Self::North,
        Self::Northeast,
        Self::East,
        Self::Southeast,
        Self::South,
        Self::Southwest,
        Self::West,
        Self::Northwest,
    ];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::Northeast => "northeast",
            Self::East => "east",
            Self::Southeast => "southeast",
            Self::South => "south",
            Self::Southwest => "southwest",
            Self::West => "west",
            Self::Northwest => "northwest",
        }
    }

    /// Lenient lookup: unknown codes map to `North`, the least-lit bucket.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        code.parse().unwrap_or(Self::North)
    }
}

impl FromStr for Orientation {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "north" | "n" => Ok(Self::North),
            "northeast" | "ne" => Ok(Self::Northeast),
            "east" | "e" => Ok(Self::East),
            "southeast" | "se" => Ok(Self::Southeast),
            "south" | "s" => Ok(Self::South),
            "southwest" | "sw" => Ok(Self::Southwest),
            "west" | "w" => Ok(Self::West),
            "northwest" | "nw" => Ok(Self::Northwest),
            _ => Err(unknown_code(
                "window orientation",
                s,
                &Self::ALL.map(Self::code),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightNeed {
    Low,
    High,
    #[serde(other)]
    Medium,
}

impl LightNeed {
    pub const ALL: [LightNeed; 3] = [Self::Low, Self::Medium, Self::High];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Lenient lookup: unknown codes map to `Medium`.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        code.parse().unwrap_or(Self::Medium)
    }
}

impl FromStr for LightNeed {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "shade" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" | "sun" => Ok(Self::High),
            _ => Err(unknown_code("light need", s, &Self::ALL.map(Self::code))),
        }
    }
}

// --- Triage answers ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Problem {
    #[serde(alias = "yellow")]
    Yellowing,
    #[serde(alias = "wilted")]
    Wilting,
    #[serde(alias = "spots")]
    Spotting,
    #[serde(alias = "nogrowth")]
    NoGrowth,
}

impl Problem {
    pub const ALL: [Problem; 4] = [
        Self::Yellowing,
        Self::Wilting,
        Self::Spotting,
        Self::NoGrowth,
    ];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Yellowing => "yellowing",
            Self::Wilting => "wilting",
            Self::Spotting => "spotting",
            Self::NoGrowth => "no-growth",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Yellowing => "Leaves are turning yellow",
            Self::Wilting => "Plant is wilting",
            Self::Spotting => "Spots on the leaves",
            Self::NoGrowth => "Plant is not growing",
        }
    }

    /// Causes offered for this problem in the second triage step.
    #[must_use]
    pub fn causes(self) -> &'static [Cause] {
        match self {
            Self::Yellowing => &[
                Cause::NitrogenDeficiency,
                Cause::LightIssue,
                Cause::OverFertilized,
            ],
            Self::Wilting => &[Cause::LowWater, Cause::PoorAeration],
            Self::Spotting => &[Cause::HighHumidity, Cause::PoorVentilation],
            Self::NoGrowth => &[Cause::Temperature, Cause::PhImbalance, Cause::LowLight],
        }
    }
}

impl FromStr for Problem {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "yellowing" | "yellow" => Ok(Self::Yellowing),
            "wilting" | "wilted" => Ok(Self::Wilting),
            "spotting" | "spots" => Ok(Self::Spotting),
            "no-growth" | "nogrowth" => Ok(Self::NoGrowth),
            _ => Err(unknown_code("problem", s, &Self::ALL.map(Self::code))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cause {
    #[serde(alias = "nitrogen")]
    NitrogenDeficiency,
    #[serde(alias = "light")]
    LightIssue,
    OverFertilized,
    LowWater,
    PoorAeration,
    HighHumidity,
    PoorVentilation,
    Temperature,
    PhImbalance,
    LowLight,
}

impl Cause {
    pub const ALL: [Cause; 10] = [
        Self::NitrogenDeficiency,
        Self::LightIssue,
        Self::OverFertilized,
        Self::LowWater,
        Self::PoorAeration,
        Self::HighHumidity,
        Self::PoorVentilation,
        Self::Temperature,
        Self::PhImbalance,
        Self::LowLight,
    ];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::NitrogenDeficiency => "nitrogen-deficiency",
            Self::LightIssue => "light-issue",
            Self::OverFertilized => "over-fertilized",
            Self::LowWater => "low-water",
            Self::PoorAeration => "poor-aeration",
            Self::HighHumidity => "high-humidity",
            Self::PoorVentilation => "poor-ventilation",
            Self::Temperature => "temperature",
            Self::PhImbalance => "ph-imbalance",
            Self::LowLight => "low-light",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NitrogenDeficiency => "Nitrogen deficiency",
            Self::LightIssue => "Too much or too little light",
            Self::OverFertilized => "Too much fertilizer",
            Self::LowWater => "Low solution level",
            Self::PoorAeration => "Poor root aeration",
            Self::HighHumidity => "High humidity",
            Self::PoorVentilation => "Poor ventilation",
            Self::Temperature => "Wrong temperature",
            Self::PhImbalance => "pH out of range",
            Self::LowLight => "Not enough light",
        }
    }
}

impl FromStr for Cause {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        if normalized == "nitrogen" {
            return Ok(Self::NitrogenDeficiency);
        }
        if normalized == "light" {
            return Ok(Self::LightIssue);
        }
        Self::ALL
            .into_iter()
            .find(|c| c.code() == normalized)
            .ok_or_else(|| unknown_code("cause", s, &Self::ALL.map(Self::code)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Duration {
    Recent,
    Medium,
    Long,
}

impl Duration {
    pub const ALL: [Duration; 3] = [Self::Recent, Self::Medium, Self::Long];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Recent => "Started in the last day or two",
            Self::Medium => "Going on for several days",
            Self::Long => "More than a week",
        }
    }
}

impl FromStr for Duration {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recent" => Ok(Self::Recent),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            _ => Err(unknown_code("duration", s, &Self::ALL.map(Self::code))),
        }
    }
}

// --- Garden records ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id: String,
    pub name: String,
    pub category: PlantCategory,
    pub planting_date: NaiveDate,
    #[serde(default)]
    pub photos: Vec<NaiveDate>,
    pub added_at: DateTime<Utc>,
}

impl Plant {
    /// Whole days since planting, clamped at zero for future dates.
    #[must_use]
    pub fn days_since_planting(&self, today: NaiveDate) -> i64 {
        (today - self.planting_date).num_days().max(0)
    }

    /// Percentage of a full growth cycle elapsed, capped at 100.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn growth_progress(&self, today: NaiveDate) -> f64 {
        let days = self.days_since_planting(today) as f64;
        (days / GROWTH_CYCLE_DAYS as f64 * 100.0).min(100.0)
    }

    #[must_use]
    pub fn last_photo(&self) -> Option<NaiveDate> {
        self.photos.last().copied()
    }
}

#[derive(Debug, Clone)]
pub struct NewPlant {
    pub name: String,
    pub planting_date: NaiveDate,
    pub category: PlantCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub plant: PlantCategory,
    pub location: Location,
    pub budget: Budget,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    pub id: String,
    pub problem: Problem,
    pub cause: Cause,
    pub duration: Duration,
    pub solution: String,
    pub created_at: DateTime<Utc>,
}

// --- Progression ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Novice,
    Beginner,
    Experienced,
    Expert,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Novice => "Novice",
            Self::Beginner => "Beginner",
            Self::Experienced => "Experienced",
            Self::Expert => "Expert",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    pub total_plants: usize,
    pub successful_plants: usize,
    pub calculator_uses: u32,
    pub diagnostic_uses: u32,
    pub level: Level,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct AchievementSet {
    pub first_plant: bool,
    pub five_plants: bool,
    pub one_month: bool,
    pub ten_calculations: bool,
    pub first_diagnostic: bool,
}

impl AchievementSet {
    /// `(label, achieved)` pairs in display order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, bool); 5] {
        [
            ("First plant", self.first_plant),
            ("5 plants", self.five_plants),
            ("One month with us", self.one_month),
            ("10 calculations", self.ten_calculations),
            ("Diagnostics", self.first_diagnostic),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub join_date: DateTime<Utc>,
    #[serde(default)]
    pub plants: Vec<Plant>,
    #[serde(default)]
    pub saved_plans: Vec<Plan>,
    #[serde(default)]
    pub diagnostic_history: Vec<DiagnosticRecord>,
    #[serde(default)]
    pub stats: UsageStats,
    #[serde(default)]
    pub achievements: AchievementSet,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_field_names)]
pub struct GlobalStats {
    pub diagnostic_count: u64,
    pub calculator_count: u64,
    pub plans_saved: u64,
}

/// Completed engine actions that feed the usage counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageKind {
    Calculator,
    Diagnostic,
    PlanSaved,
}

/// Read model rendered on the profile page.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub name: String,
    pub email: String,
    pub plant_count: usize,
    pub days_active: i64,
    pub level: Level,
    pub successful_plants: usize,
    pub total_photos: usize,
    pub avg_growth_days: i64,
    pub saved_plans: usize,
    pub diagnostics_saved: usize,
    pub achievements: AchievementSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportData {
    pub user: UserProfile,
    pub exported_at: DateTime<Utc>,
}

// --- Weekly checklist ---

/// Weekly maintenance tasks as `(id, label)`.
pub const WEEKLY_TASKS: &[(&str, &str)] = &[
    ("check-ph", "Measure solution pH"),
    ("check-level", "Check solution level"),
    ("top-up", "Top up solution"),
    ("check-roots", "Check roots for rot"),
    ("inspect-leaves", "Inspect leaves for pests and spots"),
    ("clean-pump", "Clean pump and filters"),
    ("change-solution", "Change nutrient solution"),
];

pub fn validate_task(task: &str) -> anyhow::Result<&'static str> {
    let lower = task.trim().to_lowercase();
    WEEKLY_TASKS
        .iter()
        .find(|(id, _)| *id == lower)
        .map(|(id, _)| *id)
        .ok_or_else(|| {
            let ids: Vec<&str> = WEEKLY_TASKS.iter().map(|(id, _)| *id).collect();
            unknown_code("checklist task", task, &ids).into()
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistRecord {
    pub id: String,
    pub date: DateTime<Utc>,
    pub completed_tasks: Vec<String>,
    pub total_tasks: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChecklistItem {
    pub id: &'static str,
    pub label: &'static str,
    pub done: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChecklistView {
    pub items: Vec<ChecklistItem>,
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plant_on(date: NaiveDate) -> Plant {
        Plant {
            id: "p1".to_string(),
            name: "Basil".to_string(),
            category: PlantCategory::Herbs,
            planting_date: date,
            photos: Vec::new(),
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_plant_category_parse_strict() {
        assert_eq!("lettuce".parse::<PlantCategory>().unwrap(), PlantCategory::Lettuce);
        assert_eq!("Tomato".parse::<PlantCategory>().unwrap(), PlantCategory::Tomato);
        assert_eq!(
            "strawberries".parse::<PlantCategory>().unwrap(),
            PlantCategory::Strawberry
        );
        assert!("cactus".parse::<PlantCategory>().is_err());
    }

    #[test]
    fn test_lenient_codes_fall_back_to_defaults() {
        assert_eq!(PlantCategory::from_code("cactus"), PlantCategory::Other);
        assert_eq!(Location::from_code("moon"), Location::Windowsill);
        assert_eq!(Budget::from_code("lavish"), Budget::Minimal);
        assert_eq!(Orientation::from_code("up"), Orientation::North);
        assert_eq!(LightNeed::from_code("blinding"), LightNeed::Medium);
    }

    #[test]
    fn test_serde_unknown_codes_fall_back() {
        let budget: Budget = serde_json::from_str("\"gold-plated\"").unwrap();
        assert_eq!(budget, Budget::Minimal);
        let plant: PlantCategory = serde_json::from_str("\"cactus\"").unwrap();
        assert_eq!(plant, PlantCategory::Other);
        let medium: Budget = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(medium, Budget::Medium);
        let location: Location = serde_json::from_str("\"moon\"").unwrap();
        assert_eq!(location, Location::Windowsill);
        let orientation: Orientation = serde_json::from_str("\"up\"").unwrap();
        assert_eq!(orientation, Orientation::North);
        let need: LightNeed = serde_json::from_str("\"blinding\"").unwrap();
        assert_eq!(need, LightNeed::Medium);
        let south: Orientation = serde_json::from_str("\"south\"").unwrap();
        assert_eq!(south, Orientation::South);
    }

    #[test]
    fn test_triage_codes_are_strict() {
        assert!(serde_json::from_str::<Problem>("\"rust\"").is_err());
        assert_eq!("wilted".parse::<Problem>().unwrap(), Problem::Wilting);
        assert_eq!("no_growth".parse::<Problem>().unwrap(), Problem::NoGrowth);
        assert_eq!("nitrogen".parse::<Cause>().unwrap(), Cause::NitrogenDeficiency);
        assert_eq!("ph-imbalance".parse::<Cause>().unwrap(), Cause::PhImbalance);
        assert!("gremlins".parse::<Cause>().is_err());
        assert!("forever".parse::<Duration>().is_err());
    }

    #[test]
    fn test_orientation_abbreviations() {
        assert_eq!("SE".parse::<Orientation>().unwrap(), Orientation::Southeast);
        assert_eq!("south-west".parse::<Orientation>().unwrap(), Orientation::Southwest);
    }

    #[test]
    fn test_every_problem_has_causes() {
        for problem in Problem::ALL {
            assert!(!problem.causes().is_empty());
        }
    }

    #[test]
    fn test_days_since_planting_clamped() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let planted = plant_on(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(planted.days_since_planting(today), 14);

        let future = plant_on(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        assert_eq!(future.days_since_planting(today), 0);
    }

    #[test]
    fn test_growth_progress_capped() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let half = plant_on(today - chrono::Duration::days(45));
        assert!((half.growth_progress(today) - 50.0).abs() < f64::EPSILON);

        let old = plant_on(today - chrono::Duration::days(400));
        assert!((old.growth_progress(today) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_task() {
        assert_eq!(validate_task("check-ph").unwrap(), "check-ph");
        assert_eq!(validate_task(" Top-Up ").unwrap(), "top-up");
        assert!(validate_task("water-the-cat").is_err());
    }

    #[test]
    fn test_level_display() {
        assert_eq!(Level::Novice.to_string(), "Novice");
        assert_eq!(Level::Expert.to_string(), "Expert");
        assert!(Level::Expert > Level::Experienced);
    }
}
