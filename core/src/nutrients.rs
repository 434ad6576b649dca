use serde::Serialize;

use crate::models::PlantCategory;

pub const MIXING_NOTE: &str = "Dilute each fertilizer separately in a little water before adding it to the tank.";

/// Per-10-litre baseline dosing for one crop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recipe {
    pub fertilizer_a_ml: f64,
    pub fertilizer_b_ml: f64,
    pub ph_down_ml: f64,
    pub note: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dosage {
    pub volume_liters: f64,
    pub fertilizer_a_ml: i64,
    pub fertilizer_b_ml: i64,
    pub ph_down_ml: f64,
    pub note: &'static str,
    pub mixing: &'static str,
}

#[must_use]
pub fn recipe_for(category: PlantCategory) -> Recipe {
    match category {
        PlantCategory::Herbs => Recipe {
            fertilizer_a_ml: 8.0,
            fertilizer_b_ml: 8.0,
            ph_down_ml: 1.0,
            note: "Herbs are sensitive to concentration, err on the weak side",
        },
        PlantCategory::Tomato => Recipe {
            fertilizer_a_ml: 15.0,
            fertilizer_b_ml: 15.0,
            ph_down_ml: 2.0,
            note: "Tomatoes and peppers need a stronger feed",
        },
        PlantCategory::Strawberry => Recipe {
            fertilizer_a_ml: 12.0,
            fertilizer_b_ml: 12.0,
            ph_down_ml: 1.5,
            note: "Strawberries like a medium concentration",
        },
        PlantCategory::Lettuce | PlantCategory::Other => Recipe {
            fertilizer_a_ml: 10.0,
            fertilizer_b_ml: 10.0,
            ph_down_ml: 1.0,
            note: "Use a weak concentration for lettuce and greens",
        },
    }
}

/// Scale the category's recipe to `volume_liters`.
///
/// A and B round to whole millilitres, pH-down to one decimal place. The volume
/// must be positive; callers validate it before getting here.
#[must_use]
pub fn calculate(volume_liters: f64, category: PlantCategory) -> Dosage {
    let recipe = recipe_for(category);
    let multiplier = volume_liters / 10.0;

    Dosage {
        volume_liters,
        fertilizer_a_ml: (recipe.fertilizer_a_ml * multiplier).round() as i64,
        fertilizer_b_ml: (recipe.fertilizer_b_ml * multiplier).round() as i64,
        ph_down_ml: (recipe.ph_down_ml * multiplier * 10.0).round() / 10.0,
        note: recipe.note,
        mixing: MIXING_NOTE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tomato_ten_liters() {
        let d = calculate(10.0, PlantCategory::Tomato);
        assert_eq!(d.fertilizer_a_ml, 15);
        assert_eq!(d.fertilizer_b_ml, 15);
        assert!((d.ph_down_ml - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_linear_scaling_matches_rounded_baseline() {
        for category in PlantCategory::ALL {
            let base = recipe_for(category);
            for volume in [1.0, 3.0, 7.0, 10.0, 25.0, 40.0, 100.0] {
                let d = calculate(volume, category);
                let expected = (base.fertilizer_a_ml * volume / 10.0).round() as i64;
                assert_eq!(d.fertilizer_a_ml, expected, "{category:?} at {volume} L");
                assert_eq!(d.fertilizer_a_ml, d.fertilizer_b_ml);
            }
        }
    }

    #[test]
    fn test_half_unit_rounds_up() {
        // 15 L strawberry: A = 18, pH-down = 2.25 -> 2.3
        let d = calculate(15.0, PlantCategory::Strawberry);
        assert_eq!(d.fertilizer_a_ml, 18);
        assert!((d.ph_down_ml - 2.3).abs() < 1e-9);

        // 5 L herbs: A = 4, pH-down = 0.5
        let d = calculate(5.0, PlantCategory::Herbs);
        assert_eq!(d.fertilizer_a_ml, 4);
        assert!((d.ph_down_ml - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_other_uses_lettuce_recipe() {
        assert_eq!(
            calculate(20.0, PlantCategory::Other),
            calculate(20.0, PlantCategory::Lettuce)
        );
        assert_eq!(calculate(20.0, PlantCategory::Other).fertilizer_a_ml, 20);
    }
}
