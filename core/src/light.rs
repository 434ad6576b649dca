use crate::models::{LightNeed, Orientation};

pub const GENERAL_ADVICE: &str = "General advice:\n\
• Day length: at least 12-14 hours\n\
• Lamp distance: 20-40 cm\n\
• Use a timer to automate the schedule\n\
• Rotate plants regularly";

/// Pick the canned advice for a window orientation and light requirement.
#[must_use]
pub fn assessment(orientation: Orientation, need: LightNeed) -> &'static str {
    use Orientation::{East, South, Southeast, West};

    match (need, orientation) {
        (LightNeed::Low, South | Southeast) => {
            "Excellent conditions! Your shade-tolerant plants will get enough light. Shade them from direct midday sun."
        }
        (LightNeed::Low, East | West) => {
            "Good conditions. Plants will get enough diffused light. No supplemental lighting needed."
        }
        (LightNeed::Low, _) => {
            "Little natural light. Add a grow lamp for 4-6 hours a day and keep plants as close to the window as possible."
        }
        (LightNeed::Medium, South) => {
            "Ideal conditions! Plants will get enough light. Light shading may be needed in summer."
        }
        (LightNeed::Medium, Southeast | East) => {
            "Good conditions. For optimal growth add a grow lamp for 2-4 hours a day."
        }
        (LightNeed::Medium, _) => {
            "Not enough light. Add a grow lamp for 6-8 hours a day and choose full-spectrum lamps."
        }
        (LightNeed::High, South) => {
            "Excellent conditions for light-loving plants! Provide maximum exposure."
        }
        (LightNeed::High, _) => {
            "Intensive supplemental lighting required. Use powerful grow lamps for 10-12 hours a day and move plants to a south window if possible."
        }
    }
}

/// Full recommendation text: the assessment followed by the general advice block.
#[must_use]
pub fn recommend(orientation: Orientation, need: LightNeed) -> String {
    format!("{}\n\n{GENERAL_ADVICE}", assessment(orientation, need))
}
