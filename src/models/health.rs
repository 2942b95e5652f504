use super::Severity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthTipCategory {
    General,
    Digestive,
    Injury,
    Cardiac,
}

impl HealthTipCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthTipCategory::General => "general",
            HealthTipCategory::Digestive => "digestive",
            HealthTipCategory::Injury => "injury",
            HealthTipCategory::Cardiac => "cardiac",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "general" => Some(HealthTipCategory::General),
            "digestive" => Some(HealthTipCategory::Digestive),
            "injury" => Some(HealthTipCategory::Injury),
            "cardiac" | "heart" => Some(HealthTipCategory::Cardiac),
            _ => None,
        }
    }
}

impl std::fmt::Display for HealthTipCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthTip {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: HealthTipCategory,
    pub urgency: Severity,
}

const HEALTH_TIPS: [HealthTip; 4] = [
    HealthTip {
        id: "fever-care",
        title: "Fever Management",
        description: "Keep hydrated, rest well, use cold compress on forehead. Seek medical help if fever exceeds 102°F or persists for more than 3 days.",
        category: HealthTipCategory::General,
        urgency: Severity::Medium,
    },
    HealthTip {
        id: "diarrhea-care",
        title: "Diarrhea Treatment",
        description: "Drink ORS solution, avoid dairy and spicy foods. Seek immediate medical attention if blood in stool or severe dehydration.",
        category: HealthTipCategory::Digestive,
        urgency: Severity::High,
    },
    HealthTip {
        id: "wound-care",
        title: "Wound Care",
        description: "Clean with clean water, apply antiseptic, cover with clean bandage. Change dressing daily and watch for signs of infection.",
        category: HealthTipCategory::Injury,
        urgency: Severity::Medium,
    },
    HealthTip {
        id: "chest-pain",
        title: "Chest Pain",
        description: "Seek immediate medical attention. Do not ignore chest pain.",
        category: HealthTipCategory::Cardiac,
        urgency: Severity::High,
    },
];

/// Read-only first-aid guidance shown next to the symptom checker.
pub struct HealthTipCatalog {
    tips: &'static [HealthTip],
}

impl HealthTipCatalog {
    pub fn new() -> Self {
        Self { tips: &HEALTH_TIPS }
    }

    pub fn all(&self) -> &[HealthTip] {
        self.tips
    }

    pub fn by_category(&self, category: HealthTipCategory) -> Vec<&HealthTip> {
        self.tips.iter().filter(|t| t.category == category).collect()
    }
}

impl Default for HealthTipCatalog {
    fn default() -> Self {
        Self::new()
    }
}
