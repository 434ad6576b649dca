//! Plant list mutations. Works on a bare `Vec<Plant>` so the same code serves
//! a signed-in profile and the anonymous bucket.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::GardenError;
use crate::models::{NewPlant, Plant, UserProfile};
use crate::progression;

pub fn add_plant(plants: &mut Vec<Plant>, new: NewPlant, now: DateTime<Utc>) -> Plant {
    let plant = Plant {
        id: Uuid::new_v4().to_string(),
        name: new.name,
        category: new.category,
        planting_date: new.planting_date,
        photos: Vec::new(),
        added_at: now,
    };
    plants.push(plant.clone());
    plant
}

pub fn add_photo(plants: &mut [Plant], plant_id: &str, date: NaiveDate) -> Result<(), GardenError> {
    let plant = plants
        .iter_mut()
        .find(|p| p.id == plant_id)
        .ok_or_else(|| GardenError::not_found(format!("Plant '{plant_id}' not found")))?;
    plant.photos.push(date);
    Ok(())
}

/// Returns whether a plant was removed. Unknown ids are ignored.
pub fn remove_plant(plants: &mut Vec<Plant>, plant_id: &str) -> bool {
    let before = plants.len();
    plants.retain(|p| p.id != plant_id);
    plants.len() != before
}

/// Move every plant from the anonymous bucket onto `plants`, leaving the bucket empty.
pub fn migrate_anonymous(plants: &mut Vec<Plant>, anonymous: &mut Vec<Plant>) -> usize {
    let moved = anonymous.len();
    plants.append(anonymous);
    moved
}

/// Bring a profile's derived fields in line with its plant list.
pub fn settle(profile: &mut UserProfile, now: DateTime<Utc>) {
    profile.stats.total_plants = profile.plants.len();
    progression::apply(profile, now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AchievementSet, Level, PlantCategory, UsageStats};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_plant(name: &str) -> NewPlant {
        NewPlant {
            name: name.to_string(),
            planting_date: date(2024, 4, 1),
            category: PlantCategory::Herbs,
        }
    }

    #[test]
    fn test_add_plant_assigns_unique_ids() {
        let mut plants = Vec::new();
        let a = add_plant(&mut plants, new_plant("Basil"), Utc::now());
        let b = add_plant(&mut plants, new_plant("Basil"), Utc::now());
        assert_ne!(a.id, b.id);
        assert_eq!(plants.len(), 2);
        assert_eq!(plants[1], b);
        assert!(b.photos.is_empty());
    }

    #[test]
    fn test_add_photo() {
        let mut plants = Vec::new();
        let p = add_plant(&mut plants, new_plant("Mint"), Utc::now());
        add_photo(&mut plants, &p.id, date(2024, 4, 10)).unwrap();
        add_photo(&mut plants, &p.id, date(2024, 4, 17)).unwrap();
        assert_eq!(plants[0].photos.len(), 2);
        assert_eq!(plants[0].last_photo(), Some(date(2024, 4, 17)));
    }

    #[test]
    fn test_add_photo_unknown_id() {
        let mut plants = Vec::new();
        let err = add_photo(&mut plants, "nope", date(2024, 4, 10)).unwrap_err();
        assert!(matches!(err, GardenError::NotFound(_)));
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut plants = Vec::new();
        add_plant(&mut plants, new_plant("Dill"), Utc::now());
        let snapshot = plants.clone();
        assert!(!remove_plant(&mut plants, "missing"));
        assert_eq!(plants, snapshot);
    }

    #[test]
    fn test_remove_plant() {
        let mut plants = Vec::new();
        let keep = add_plant(&mut plants, new_plant("Dill"), Utc::now());
        let gone = add_plant(&mut plants, new_plant("Chive"), Utc::now());
        assert!(remove_plant(&mut plants, &gone.id));
        assert_eq!(plants, vec![keep]);
    }

    #[test]
    fn test_migrate_anonymous() {
        let mut owned = Vec::new();
        add_plant(&mut owned, new_plant("Owned"), Utc::now());
        let mut bucket = Vec::new();
        add_plant(&mut bucket, new_plant("A"), Utc::now());
        add_plant(&mut bucket, new_plant("B"), Utc::now());

        assert_eq!(migrate_anonymous(&mut owned, &mut bucket), 2);
        assert_eq!(owned.len(), 3);
        assert!(bucket.is_empty());
        assert_eq!(owned[2].name, "B");
    }

    #[test]
    fn test_settle_updates_total_and_level() {
        let now = Utc::now();
        let mut profile = UserProfile {
            id: "u".to_string(),
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            password: "pw".to_string(),
            join_date: now,
            plants: Vec::new(),
            saved_plans: Vec::new(),
            diagnostic_history: Vec::new(),
            stats: UsageStats::default(),
            achievements: AchievementSet::default(),
        };
        add_plant(&mut profile.plants, new_plant("Basil"), now);
        settle(&mut profile, now);
        assert_eq!(profile.stats.total_plants, 1);
        assert_eq!(profile.stats.level, Level::Beginner);
        assert!(profile.achievements.first_plant);
    }
}
