use serde::{Deserialize, Serialize};

/// Advisory domain. Each rule set, predicate, context and outcome belongs to
/// exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Symptom,
    Soil,
    Scheme,
}

impl Domain {
    pub const ALL: [Domain; 3] = [Domain::Symptom, Domain::Soil, Domain::Scheme];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Symptom => "symptom",
            Domain::Soil => "soil",
            Domain::Scheme => "scheme",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "symptom" | "symptoms" | "triage" => Some(Domain::Symptom),
            "soil" => Some(Domain::Soil),
            "scheme" | "schemes" | "chat" => Some(Domain::Scheme),
            _ => None,
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Low => "ℹ",
            Severity::Medium => "⚠",
            Severity::High => "!",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageAdvice {
    pub condition: String,
    pub severity: Severity,
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub emergency: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRecommendation {
    pub name: String,
    pub suitability: u8,
    pub season: String,
    pub expected_yield: String,
    #[serde(default)]
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FertilizerRecommendation {
    pub fertilizer_type: String,
    pub quantity: String,
    pub timing: String,
    pub method: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoilAdvice {
    #[serde(default)]
    pub crops: Vec<CropRecommendation>,
    #[serde(default)]
    pub fertilizers: Vec<FertilizerRecommendation>,
    #[serde(default)]
    pub general_tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeReply {
    pub text: String,
    /// Scheme ids resolved against the scheme catalog by the caller.
    #[serde(default)]
    pub schemes: Vec<String>,
}

/// Payload attached to a rule or to a rule set's default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Triage(TriageAdvice),
    Soil(SoilAdvice),
    Scheme(SchemeReply),
}

impl Outcome {
    pub fn domain(&self) -> Domain {
        match self {
            Outcome::Triage(_) => Domain::Symptom,
            Outcome::Soil(_) => Domain::Soil,
            Outcome::Scheme(_) => Domain::Scheme,
        }
    }

    /// Checks that every field a consumer renders is present.
    pub fn validate(&self) -> std::result::Result<(), String> {
        match self {
            Outcome::Triage(advice) => {
                if advice.condition.trim().is_empty() {
                    return Err("triage condition is empty".into());
                }
                if advice.recommendations.is_empty() {
                    return Err("triage outcome has no recommendations".into());
                }
                if advice.recommendations.iter().any(|r| r.trim().is_empty()) {
                    return Err("triage recommendation is blank".into());
                }
                if advice.emergency && advice.severity != Severity::High {
                    return Err("emergency outcomes must have High severity".into());
                }
            }
            Outcome::Soil(advice) => {
                if advice.crops.is_empty() && advice.fertilizers.is_empty() {
                    return Err("soil outcome has neither crops nor fertilizers".into());
                }
                for crop in &advice.crops {
                    if crop.name.trim().is_empty() {
                        return Err("crop name is empty".into());
                    }
                    if crop.suitability > 100 {
                        return Err(format!(
                            "crop '{}' suitability {} exceeds 100",
                            crop.name, crop.suitability
                        ));
                    }
                }
                if advice
                    .fertilizers
                    .iter()
                    .any(|f| f.fertilizer_type.trim().is_empty())
                {
                    return Err("fertilizer type is empty".into());
                }
            }
            Outcome::Scheme(reply) => {
                if reply.text.trim().is_empty() {
                    return Err("scheme reply text is empty".into());
                }
                if reply.schemes.iter().any(|id| id.trim().is_empty()) {
                    return Err("scheme reference is blank".into());
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triage(condition: &str, severity: Severity, emergency: bool) -> Outcome {
        Outcome::Triage(TriageAdvice {
            condition: condition.into(),
            severity,
            recommendations: vec!["Rest well".into()],
            emergency,
        })
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn domain_from_str() {
        assert_eq!(Domain::from_str("Soil"), Some(Domain::Soil));
        assert_eq!(Domain::from_str("triage"), Some(Domain::Symptom));
        assert_eq!(Domain::from_str("chat"), Some(Domain::Scheme));
        assert_eq!(Domain::from_str("weather"), None);
    }

    #[test]
    fn outcome_domain() {
        assert_eq!(triage("x", Severity::Low, false).domain(), Domain::Symptom);
        let reply = Outcome::Scheme(SchemeReply {
            text: "hi".into(),
            schemes: vec![],
        });
        assert_eq!(reply.domain(), Domain::Scheme);
    }

    #[test]
    fn valid_triage_passes() {
        assert!(triage("Flu", Severity::Medium, false).validate().is_ok());
        assert!(triage("Cardiac", Severity::High, true).validate().is_ok());
    }

    #[test]
    fn blank_condition_rejected() {
        assert!(triage("  ", Severity::Low, false).validate().is_err());
    }

    #[test]
    fn low_severity_emergency_rejected() {
        let err = triage("Odd", Severity::Low, true).validate().unwrap_err();
        assert!(err.contains("High"));
    }

    #[test]
    fn soil_needs_crops_or_fertilizers() {
        let empty = Outcome::Soil(SoilAdvice {
            crops: vec![],
            fertilizers: vec![],
            general_tips: vec!["Test soil".into()],
        });
        assert!(empty.validate().is_err());
    }

    #[test]
    fn suitability_over_100_rejected() {
        let advice = Outcome::Soil(SoilAdvice {
            crops: vec![CropRecommendation {
                name: "Rice".into(),
                suitability: 120,
                season: "Kharif".into(),
                expected_yield: "4 t/ha".into(),
                tips: vec![],
            }],
            fertilizers: vec![],
            general_tips: vec![],
        });
        assert!(advice.validate().unwrap_err().contains("exceeds 100"));
    }

    #[test]
    fn scheme_reply_without_references_is_valid() {
        let reply = Outcome::Scheme(SchemeReply {
            text: "Ask about farmer schemes".into(),
            schemes: vec![],
        });
        assert!(reply.validate().is_ok());
    }

    #[test]
    fn outcome_yaml_is_tagged_by_kind() {
        let yaml = "kind: scheme\ntext: hello\nschemes: [pm-kisan]\n";
        let outcome: Outcome = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            outcome,
            Outcome::Scheme(SchemeReply {
                text: "hello".into(),
                schemes: vec!["pm-kisan".into()],
            })
        );
    }
}
