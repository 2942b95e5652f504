use serde::{Deserialize, Serialize};

/// Fixed symptom vocabulary offered by the symptom checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symptom {
    Fever,
    Headache,
    Cough,
    SoreThroat,
    BodyAche,
    Nausea,
    Diarrhea,
    ChestPain,
    DifficultyBreathing,
    Fatigue,
}

impl Symptom {
    pub const ALL: [Symptom; 10] = [
        Symptom::Fever,
        Symptom::Headache,
        Symptom::Cough,
        Symptom::SoreThroat,
        Symptom::BodyAche,
        Symptom::Nausea,
        Symptom::Diarrhea,
        Symptom::ChestPain,
        Symptom::DifficultyBreathing,
        Symptom::Fatigue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Symptom::Fever => "Fever",
            Symptom::Headache => "Headache",
            Symptom::Cough => "Cough",
            Symptom::SoreThroat => "Sore Throat",
            Symptom::BodyAche => "Body Ache",
            Symptom::Nausea => "Nausea",
            Symptom::Diarrhea => "Diarrhea",
            Symptom::ChestPain => "Chest Pain",
            Symptom::DifficultyBreathing => "Difficulty Breathing",
            Symptom::Fatigue => "Fatigue",
        }
    }

    /// Accepts display labels ("Chest Pain"), table keys ("chest_pain") and
    /// the joined form ("ChestPain"), case-insensitively.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fever" => Some(Symptom::Fever),
            "headache" => Some(Symptom::Headache),
            "cough" => Some(Symptom::Cough),
            "sore throat" | "sore_throat" | "sorethroat" => Some(Symptom::SoreThroat),
            "body ache" | "body_ache" | "bodyache" => Some(Symptom::BodyAche),
            "nausea" => Some(Symptom::Nausea),
            "diarrhea" => Some(Symptom::Diarrhea),
            "chest pain" | "chest_pain" | "chestpain" => Some(Symptom::ChestPain),
            "difficulty breathing" | "difficulty_breathing" | "difficultybreathing" => {
                Some(Symptom::DifficultyBreathing)
            }
            "fatigue" => Some(Symptom::Fatigue),
            _ => None,
        }
    }
}

impl std::fmt::Display for Symptom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EmergencyContact {
    pub service: &'static str,
    pub number: &'static str,
}

pub const EMERGENCY_CONTACTS: [EmergencyContact; 7] = [
    EmergencyContact {
        service: "Ambulance",
        number: "108",
    },
    EmergencyContact {
        service: "Police",
        number: "100",
    },
    EmergencyContact {
        service: "Fire",
        number: "101",
    },
    EmergencyContact {
        service: "Women Helpline",
        number: "1091",
    },
    EmergencyContact {
        service: "Child Helpline",
        number: "1098",
    },
    EmergencyContact {
        service: "Disaster Management",
        number: "108",
    },
    EmergencyContact {
        service: "Poison Control",
        number: "1066",
    },
];
