use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    Clay,
    Sandy,
    Loamy,
    Black,
}

impl SoilType {
    pub const ALL: [SoilType; 4] = [
        SoilType::Clay,
        SoilType::Sandy,
        SoilType::Loamy,
        SoilType::Black,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SoilType::Clay => "clay",
            SoilType::Sandy => "sandy",
            SoilType::Loamy => "loamy",
            SoilType::Black => "black",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Clay => "Clay Soil (चिकनी मिट्टी)",
            SoilType::Sandy => "Sandy Soil (रेतीली मिट्टी)",
            SoilType::Loamy => "Loamy Soil (दोमट मिट्टी)",
            SoilType::Black => "Black Soil (काली मिट्टी)",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "clay" => Some(SoilType::Clay),
            "sandy" => Some(SoilType::Sandy),
            "loamy" => Some(SoilType::Loamy),
            "black" => Some(SoilType::Black),
            _ => None,
        }
    }

    pub fn profile(&self) -> SoilProfile {
        match self {
            SoilType::Clay => SoilProfile {
                soil_type: *self,
                description: "Heavy soil with good water retention but poor drainage",
                characteristics: &[
                    "High water retention",
                    "Poor drainage",
                    "Rich in nutrients",
                    "Hard when dry",
                ],
            },
            SoilType::Sandy => SoilProfile {
                soil_type: *self,
                description: "Light soil with good drainage but low water retention",
                characteristics: &[
                    "Good drainage",
                    "Low water retention",
                    "Easy to work",
                    "Low nutrient retention",
                ],
            },
            SoilType::Loamy => SoilProfile {
                soil_type: *self,
                description: "Ideal soil with balanced properties",
                characteristics: &[
                    "Balanced drainage",
                    "Good water retention",
                    "Rich in nutrients",
                    "Easy to work",
                ],
            },
            SoilType::Black => SoilProfile {
                soil_type: *self,
                description: "Cotton soil with high clay content",
                characteristics: &[
                    "High clay content",
                    "Rich in lime",
                    "Good for cotton",
                    "Swells when wet",
                ],
            },
        }
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static description of a soil type, shown next to the advisory outcome.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SoilProfile {
    pub soil_type: SoilType,
    pub description: &'static str,
    pub characteristics: &'static [&'static str],
}
