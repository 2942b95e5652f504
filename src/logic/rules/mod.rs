pub mod engine;
pub mod loader;
pub mod tables;

pub use engine::{MatchResult, RulesEngine};

use super::context::{tokenize, Context};
use crate::error::{GramSathiError, Result};
use crate::models::{Domain, Outcome, SoilType, Symptom};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Declarative rule condition. Each variant belongs to one domain and is
/// total over every [`Context`]: a context of another domain never matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    AnySymptom(Vec<Symptom>),
    AllSymptoms(Vec<Symptom>),
    Soil(SoilType),
    AnyKeyword(Vec<String>),
    AllKeywords(Vec<String>),
}

impl Predicate {
    pub fn domain(&self) -> Domain {
        match self {
            Predicate::AnySymptom(_) | Predicate::AllSymptoms(_) => Domain::Symptom,
            Predicate::Soil(_) => Domain::Soil,
            Predicate::AnyKeyword(_) | Predicate::AllKeywords(_) => Domain::Scheme,
        }
    }

    pub fn matches(&self, context: &Context) -> bool {
        match self {
            Predicate::AnySymptom(symptoms) => symptoms.iter().any(|s| context.has_symptom(*s)),
            Predicate::AllSymptoms(symptoms) => {
                symptoms.iter().all(|s| context.has_symptom(*s))
            }
            Predicate::Soil(soil) => matches!(context, Context::Soil(key) if key == soil),
            Predicate::AnyKeyword(keywords) => keywords.iter().any(|k| context.has_keyword(k)),
            Predicate::AllKeywords(keywords) => keywords.iter().all(|k| context.has_keyword(k)),
        }
    }

    /// Rejects conditions that could never match or would match everything.
    pub fn validate(&self) -> std::result::Result<(), String> {
        match self {
            Predicate::AnySymptom(symptoms) | Predicate::AllSymptoms(symptoms) => {
                if symptoms.is_empty() {
                    return Err("symptom list is empty".into());
                }
            }
            Predicate::Soil(_) => {}
            Predicate::AnyKeyword(keywords) | Predicate::AllKeywords(keywords) => {
                if keywords.is_empty() {
                    return Err("keyword list is empty".into());
                }
                for keyword in keywords {
                    if keyword.is_empty() {
                        return Err("keyword is empty".into());
                    }
                    if keyword.chars().any(char::is_whitespace) {
                        return Err(format!("keyword '{}' contains whitespace", keyword));
                    }
                    // Context tokens are lower-cased, so anything else is dead.
                    if keyword.to_lowercase() != *keyword {
                        return Err(format!("keyword '{}' is not lower-case", keyword));
                    }
                    // Query tokens never span a separator, so neither may a keyword.
                    let tokens = tokenize(keyword);
                    if tokens.len() != 1 || !tokens.contains(keyword) {
                        return Err(format!(
                            "keyword '{}' contains a separator and can never match",
                            keyword
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub id: String,
    pub description: String,
    pub priority: i64,
    #[serde(serialize_with = "serde_yaml::with::singleton_map::serialize")]
    pub predicate: Predicate,
    pub outcome: Outcome,
}

impl Rule {
    pub fn new(
        id: impl Into<String>,
        priority: i64,
        predicate: Predicate,
        outcome: Outcome,
    ) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            priority,
            predicate,
            outcome,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Immutable, priority-ordered rules for one domain plus its default outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSet {
    domain: Domain,
    rules: Vec<Rule>,
    default: Outcome,
}

impl RuleSet {
    /// Checks structure (unique ids, one domain throughout, satisfiable
    /// predicates, well-formed default) and fixes evaluation order. Rule payloads are checked by the
    /// table loader and again by the engine when a rule fires.
    pub fn new(domain: Domain, mut rules: Vec<Rule>, default: Outcome) -> Result<Self> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if rule.id.trim().is_empty() {
                return Err(GramSathiError::InvalidRuleTable(
                    "rule id must not be empty".into(),
                ));
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(GramSathiError::InvalidRuleTable(format!(
                    "duplicate rule id '{}'",
                    rule.id
                )));
            }
            if rule.predicate.domain() != domain {
                return Err(GramSathiError::InvalidRuleTable(format!(
                    "rule '{}' tests a {} context in a {} rule set",
                    rule.id,
                    rule.predicate.domain(),
                    domain
                )));
            }
            rule.predicate.validate().map_err(|reason| {
                GramSathiError::InvalidRuleTable(format!("rule '{}': {}", rule.id, reason))
            })?;
            if rule.outcome.domain() != domain {
                return Err(GramSathiError::InvalidRuleTable(format!(
                    "rule '{}' yields a {} outcome in a {} rule set",
                    rule.id,
                    rule.outcome.domain(),
                    domain
                )));
            }
        }

        if default.domain() != domain {
            return Err(GramSathiError::InvalidRuleTable(format!(
                "default outcome is {} but rule set is {}",
                default.domain(),
                domain
            )));
        }
        default.validate().map_err(|reason| {
            GramSathiError::InvalidRuleTable(format!("default outcome: {}", reason))
        })?;

        // Stable: equal priorities keep declaration order.
        rules.sort_by_key(|r| r.priority);

        Ok(Self {
            domain,
            rules,
            default,
        })
    }

    #[cfg(test)]
    pub fn empty(domain: Domain, default: Outcome) -> Result<Self> {
        Self::new(domain, Vec::new(), default)
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn default_outcome(&self) -> &Outcome {
        &self.default
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::models::{CropRecommendation, SchemeReply, Severity, SoilAdvice, TriageAdvice};

    pub fn triage(condition: &str, severity: Severity) -> Outcome {
        Outcome::Triage(TriageAdvice {
            condition: condition.into(),
            severity,
            recommendations: vec!["Rest well".into()],
            emergency: false,
        })
    }

    pub fn soil_advice(crop: &str) -> Outcome {
        Outcome::Soil(SoilAdvice {
            crops: vec![CropRecommendation {
                name: crop.into(),
                suitability: 80,
                season: "Kharif (June-October)".into(),
                expected_yield: "2-3 tons per hectare".into(),
                tips: vec![],
            }],
            fertilizers: vec![],
            general_tips: vec![],
        })
    }

    pub fn reply(text: &str) -> Outcome {
        Outcome::Scheme(SchemeReply {
            text: text.into(),
            schemes: vec![],
        })
    }
}
