//! Wizard recommendation: maps a completed plant/location/budget selection to a
//! growing plan and a shopping list.

use serde::Serialize;

use crate::models::{Budget, Location, PlantCategory, Selection};

/// Static description of how a plant category is best grown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlantProfile {
    pub display_name: &'static str,
    pub system: &'static str,
    pub difficulty: &'static str,
    pub harvest: &'static str,
    pub tip: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct GrowPlan {
    pub plant: PlantProfile,
    pub location: &'static str,
    pub budget: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub plan: GrowPlan,
    pub materials: Vec<&'static str>,
}

const LETTUCE: PlantProfile = PlantProfile {
    display_name: "Lettuce and greens",
    system: "Deep water culture (DWC)",
    difficulty: "Low",
    harvest: "3 to 4 weeks after sprouting",
    tip: "Ideal for beginners. Grows fast and needs little attention.",
};

const HERBS: PlantProfile = PlantProfile {
    display_name: "Culinary herbs",
    system: "Drip system",
    difficulty: "Medium",
    harvest: "7 to 10 weeks after sprouting",
    tip: "No pump required. Just add water mixed with nutrient solution.",
};

const TOMATO: PlantProfile = PlantProfile {
    display_name: "Tomatoes and peppers",
    system: "Ebb and flow (flood and drain)",
    difficulty: "Hard",
    harvest: "8 to 12 weeks from flowering",
    tip: "Needs more light and space. Requires staking.",
};

const STRAWBERRY: PlantProfile = PlantProfile {
    display_name: "Strawberry",
    system: "Nutrient film technique (NFT)",
    difficulty: "Hard",
    harvest: "10 to 14 weeks from flowering",
    tip: "Prefers cool air. Needs pollination (a soft brush works).",
};

pub const BASE_MATERIALS: [&str; 5] = [
    "Solution container (10-20 L)",
    "Substrate (coco fibre or expanded clay)",
    "Two-part hydroponic fertilizer (A+B)",
    "Seeds of varieties suited to hydroponics",
    "Water pH test (drops or strips)",
];

const MINIMAL_MATERIALS: [&str; 3] = [
    "Plastic cups with drainage holes",
    "Coco seed-starting discs",
    "Aquarium air pump (for DWC)",
];

const MEDIUM_MATERIALS: [&str; 3] = [
    "Mesh net pots",
    "Pump and timer (for ebb and flow)",
    "Grow lamp (if natural light is scarce)",
];

const UNLIMITED_MATERIALS: [&str; 5] = [
    "Complete hydroponic kit",
    "Digital pH meter",
    "EC meter (nutrient concentration)",
    "Professional full-spectrum grow lamp",
    "Automatic nutrient doser",
];

/// Unknown and `Other` categories get the lettuce entry, the most forgiving crop.
#[must_use]
pub fn plant_profile(plant: PlantCategory) -> PlantProfile {
    match plant {
        PlantCategory::Herbs => HERBS,
        PlantCategory::Tomato => TOMATO,
        PlantCategory::Strawberry => STRAWBERRY,
        PlantCategory::Lettuce | PlantCategory::Other => LETTUCE,
    }
}

#[must_use]
pub fn location_phrase(location: Location) -> &'static str {
    match location {
        Location::Windowsill => "on a windowsill",
        Location::Balcony => "on a balcony",
        Location::Garage => "in a garage or basement",
        Location::Room => "in a room",
    }
}

#[must_use]
pub fn budget_phrase(budget: Budget) -> &'static str {
    match budget {
        Budget::Minimal => "Minimal (up to 5000 RUB)",
        Budget::Medium => "Medium (5000-15000 RUB)",
        Budget::Unlimited => "Unlimited (15000 RUB and up)",
    }
}

#[must_use]
pub fn tier_materials(budget: Budget) -> &'static [&'static str] {
    match budget {
        Budget::Minimal => &MINIMAL_MATERIALS,
        Budget::Medium => &MEDIUM_MATERIALS,
        Budget::Unlimited => &UNLIMITED_MATERIALS,
    }
}

/// Build the plan and materials list for a completed selection.
///
/// Materials are the base set followed by the budget tier's supplements, both
/// in fixed order.
#[must_use]
pub fn recommend(selection: &Selection) -> Recommendation {
    let plant = plant_profile(selection.plant);
    if selection.plant == PlantCategory::Other {
        tracing::warn!("no plan for plant category 'other', using lettuce");
    }

    let tier = tier_materials(selection.budget);
    let mut materials = Vec::with_capacity(BASE_MATERIALS.len() + tier.len());
    materials.extend_from_slice(&BASE_MATERIALS);
    materials.extend_from_slice(tier);

    Recommendation {
        plan: GrowPlan {
            plant,
            location: location_phrase(selection.location),
            budget: budget_phrase(selection.budget),
        },
        materials,
    }
}
