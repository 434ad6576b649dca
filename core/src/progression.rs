use chrono::{DateTime, Utc};

use crate::models::{Level, UserProfile};

pub const ONE_MONTH_DAYS: i64 = 30;

#[must_use]
pub fn level_for(plant_count: usize) -> Level {
    match plant_count {
        10.. => Level::Expert,
        5..=9 => Level::Experienced,
        1..=4 => Level::Beginner,
        0 => Level::Novice,
    }
}

/// Recompute achievements and level in place.
///
/// Achievement flags are OR-ed with their previous values and never clear.
/// The level follows the current plant count and can go down.
pub fn apply(profile: &mut UserProfile, now: DateTime<Utc>) {
    let plant_count = profile.plants.len();
    let stats = &profile.stats;
    let a = &mut profile.achievements;

    a.first_plant |= plant_count >= 1;
    a.five_plants |= plant_count >= 5;
    a.one_month |= (now - profile.join_date).num_days() >= ONE_MONTH_DAYS;
    a.ten_calculations |= stats.calculator_uses >= 10;
    a.first_diagnostic |= stats.diagnostic_uses > 0;

    let level = level_for(plant_count);
    if level != profile.stats.level {
        tracing::debug!(user = %profile.id, from = %profile.stats.level, to = %level, "level changed");
    }
    profile.stats.level = level;
}

/// Pure form of [`apply`].
#[must_use]
pub fn recompute(mut profile: UserProfile, now: DateTime<Utc>) -> UserProfile {
    apply(&mut profile, now);
    profile
}
