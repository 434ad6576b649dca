//! Static growing guide: short articles on the topics new growers ask about most.

use serde::Serialize;

use crate::error::GardenError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Article {
    pub id: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

pub static ARTICLES: [Article; 3] = [
    Article {
        id: "ph",
        title: "What is water pH and how do you measure it?",
        body: "pH measures how acidic or alkaline a solution is, on a scale from 0 to 14. \
For hydroponic plants the best range is 5.5-6.5.\n\
\n\
How to measure:\n\
1. Drop tests: the simplest and cheapest option\n\
2. pH strips: give an approximate reading\n\
3. Digital pH meter: the most accurate, needs calibration\n\
\n\
How to correct pH:\n\
• pH Down (phosphoric acid) to lower it\n\
• pH Up (potassium hydroxide) to raise it\n\
\n\
Measure the solution pH regularly, at least once a week!",
    },
    Article {
        id: "light",
        title: "How much light do plants need?",
        body: "Lighting is a key factor in hydroponics.\n\
\n\
Guidelines:\n\
• Day length: at least 12-16 hours\n\
• Dark period: 8-12 hours (plants need rest too)\n\
• Intensity: 100-300 W/m² for most plants\n\
\n\
Lamp types:\n\
1. Fluorescent tubes: for seedlings and greens\n\
2. LED grow lights: efficient and long-lasting\n\
3. HPS/MH lamps: powerful, for flowering and fruiting\n\
\n\
Signs of too little light:\n\
• Stretched stems\n\
• Small leaves\n\
• Pale colour\n\
• Slow growth",
    },
    Article {
        id: "mistakes",
        title: "The 5 most common beginner mistakes",
        body: "1. TOO MUCH FERTILIZER\n   • Signs: leaf burn, slowed growth\n   • Fix: use 50-70% of the recommended dose\n\n\
2. NOT ENOUGH OXYGEN IN THE WATER\n   • Signs: root rot, poor growth\n   • Fix: use an air pump, change the solution every 1-2 weeks\n\n\
3. WRONG pH\n   • Signs: nutrient deficiencies\n   • Fix: measure and correct pH regularly\n\n\
4. PLANTS TOO CLOSE TOGETHER\n   • Signs: competition for light and nutrients\n   • Fix: keep 20-30 cm between plants\n\n\
5. NEVER CHANGING THE SOLUTION\n   • Signs: salt build-up, unbalanced feeding\n   • Fix: replace the solution completely every 2-3 weeks",
    },
];

/// Look up an article by id, ignoring case and surrounding whitespace.
pub fn article(topic: &str) -> Result<&'static Article, GardenError> {
    let wanted = topic.trim().to_lowercase();
    ARTICLES.iter().find(|a| a.id == wanted).ok_or_else(|| {
        let ids: Vec<&str> = ARTICLES.iter().map(|a| a.id).collect();
        GardenError::not_found(format!(
            "No guide article '{topic}'. Available: {}",
            ids.join(", ")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_lookup() {
        let a = article("ph").unwrap();
        assert!(a.body.contains("5.5-6.5"));
        assert_eq!(article(" Light ").unwrap().id, "light");
    }

    #[test]
    fn test_mistakes_keep_bullet_indent() {
        let a = article("mistakes").unwrap();
        assert!(a.body.contains("\n   • Fix: keep 20-30 cm between plants\n\n5."));
    }

    #[test]
    fn test_unknown_article_lists_topics() {
        let err = article("compost").unwrap_err();
        assert!(matches!(err, GardenError::NotFound(_)));
        assert!(err.to_string().contains("ph, light, mistakes"));
    }

    #[test]
    fn test_ids_are_unique() {
        for (i, a) in ARTICLES.iter().enumerate() {
            assert!(ARTICLES[i + 1..].iter().all(|b| b.id != a.id));
            assert!(!a.title.is_empty());
        }
    }
}
