use super::{loader, RuleSet};
use crate::error::Result;
use crate::models::{Domain, SchemeCatalog};
use std::path::{Path, PathBuf};

const SYMPTOM_TABLE: &str = include_str!("../../../data/rules/symptom.yaml");
const SOIL_TABLE: &str = include_str!("../../../data/rules/soil.yaml");
const SCHEME_TABLE: &str = include_str!("../../../data/rules/scheme.yaml");

pub fn embedded_table(domain: Domain) -> &'static str {
    match domain {
        Domain::Symptom => SYMPTOM_TABLE,
        Domain::Soil => SOIL_TABLE,
        Domain::Scheme => SCHEME_TABLE,
    }
}

pub fn table_file_name(domain: Domain) -> String {
    format!("{}.yaml", domain.as_str())
}

/// Path of the override file for `domain` under `rules_dir`, if one exists.
pub fn override_path(domain: Domain, rules_dir: Option<&Path>) -> Option<PathBuf> {
    let path = rules_dir?.join(table_file_name(domain));
    path.is_file().then_some(path)
}

pub fn load_rule_set(
    domain: Domain,
    rules_dir: Option<&Path>,
    catalog: &SchemeCatalog,
) -> Result<RuleSet> {
    match override_path(domain, rules_dir) {
        Some(path) => {
            tracing::info!("Loading {} rules from {}", domain, path.display());
            loader::load_rule_set_file(&path, domain, catalog)
        }
        None => {
            if let Some(dir) = rules_dir {
                tracing::debug!(
                    "No {} in {}, using built-in {} rules",
                    table_file_name(domain),
                    dir.display(),
                    domain
                );
            }
            loader::load_rule_set(embedded_table(domain), domain, catalog)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GramSathiError;
    use crate::logic::rules::RulesEngine;
    use crate::models::{Outcome, Severity};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gramsathi-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn embedded_tables_are_valid() {
        let catalog = SchemeCatalog::new();
        for domain in Domain::ALL {
            let set = load_rule_set(domain, None, &catalog).unwrap();
            assert_eq!(set.domain(), domain);
            assert!(!set.is_empty());
        }
    }

    #[test]
    fn cardio_rule_precedes_viral_rule() {
        let set = load_rule_set(Domain::Symptom, None, &SchemeCatalog::new()).unwrap();
        let cardio = set.get("cardio-respiratory").unwrap();
        let viral = set.get("viral-infection").unwrap();
        assert!(cardio.priority < viral.priority);
        assert_eq!(set.rules()[0].id, "cardio-respiratory");
    }

    #[test]
    fn override_file_replaces_embedded_table() {
        let dir = scratch_dir("override");
        std::fs::write(
            dir.join("symptom.yaml"),
            "domain: symptom\n\
             default:\n  kind: triage\n  condition: Overridden\n  severity: Low\n  recommendations: [Call the clinic]\n",
        )
        .unwrap();

        let engine = RulesEngine::load(Some(dir.as_path())).unwrap();
        let result = engine.triage(&["Chest Pain".to_string()]).unwrap();
        assert!(!result.matched);
        match result.outcome {
            Outcome::Triage(advice) => {
                assert_eq!(advice.condition, "Overridden");
                assert_eq!(advice.severity, Severity::Low);
            }
            other => panic!("unexpected outcome {:?}", other),
        }

        // Domains without an override keep the built-in table.
        assert!(engine.advise_soil("sandy").unwrap().matched);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn override_with_wrong_domain_fails_at_startup() {
        let dir = scratch_dir("wrong-domain");
        std::fs::write(dir.join("soil.yaml"), SCHEME_TABLE).unwrap();

        let err = RulesEngine::load(Some(dir.as_path())).err().unwrap();
        assert!(matches!(err, GramSathiError::InvalidRuleTable(msg) if msg.contains("expected a soil table")));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_override_dir_uses_embedded_tables() {
        let dir = std::env::temp_dir().join("gramsathi-does-not-exist");
        assert!(override_path(Domain::Soil, Some(dir.as_path())).is_none());
        assert!(RulesEngine::load(Some(dir.as_path())).is_ok());
    }

    fn engine() -> RulesEngine {
        RulesEngine::new().unwrap()
    }

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn chest_pain_is_a_high_severity_emergency() {
        let result = engine().triage(&labels(&["Chest Pain"])).unwrap();
        assert_eq!(result.matched_rule_id.as_deref(), Some("cardio-respiratory"));
        match result.outcome {
            Outcome::Triage(advice) => {
                assert_eq!(advice.severity, Severity::High);
                assert!(advice.emergency);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn chest_pain_outranks_fever_and_headache() {
        let result = engine()
            .triage(&labels(&["Fever", "Headache", "Chest Pain"]))
            .unwrap();
        assert_eq!(result.matched_rule_id.as_deref(), Some("cardio-respiratory"));
    }

    #[test]
    fn fever_and_headache_is_viral_infection() {
        let result = engine().triage(&labels(&["Fever", "Headache"])).unwrap();
        match result.outcome {
            Outcome::Triage(advice) => {
                assert_eq!(advice.condition, "Possible Viral Infection");
                assert_eq!(advice.severity, Severity::Medium);
                assert!(!advice.emergency);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn fever_alone_is_a_general_concern() {
        let result = engine().triage(&labels(&["Fever"])).unwrap();
        assert!(!result.matched);
        match result.outcome {
            Outcome::Triage(advice) => {
                assert_eq!(advice.condition, "General Health Concern");
                assert_eq!(advice.severity, Severity::Low);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn unknown_symptom_is_rejected() {
        let err = engine().triage(&labels(&["Rash"])).unwrap_err();
        assert!(matches!(err, GramSathiError::UnknownSymptom(label) if label == "Rash"));
    }

    #[test]
    fn sandy_soil_recommends_groundnut_and_compost() {
        let result = engine().advise_soil("sandy").unwrap();
        assert_eq!(result.matched_rule_id.as_deref(), Some("sandy"));
        match result.outcome {
            Outcome::Soil(advice) => {
                let groundnut = advice
                    .crops
                    .iter()
                    .find(|c| c.name.starts_with("Groundnut"))
                    .unwrap();
                assert_eq!(groundnut.suitability, 90);
                assert!(advice
                    .fertilizers
                    .iter()
                    .any(|f| f.fertilizer_type == "Organic Compost"));
                assert_eq!(advice.general_tips.len(), 4);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn every_soil_type_has_a_rule() {
        let engine = engine();
        for soil in crate::models::SoilType::ALL {
            let result = engine.advise_soil(soil.key()).unwrap();
            assert!(result.matched, "no rule for {}", soil.key());
        }
    }

    #[test]
    fn unknown_soil_is_rejected() {
        let err = engine().advise_soil("laterite").unwrap_err();
        assert!(matches!(err, GramSathiError::UnknownSoilType(_)));
    }

    fn referenced_schemes(result: &crate::logic::rules::MatchResult) -> Vec<String> {
        match &result.outcome {
            Outcome::Scheme(reply) => reply.schemes.clone(),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn hindi_farmer_query_points_to_pm_kisan() {
        let result = engine().ask("किसान योजना").unwrap();
        assert_eq!(referenced_schemes(&result), vec!["pm-kisan".to_string()]);
    }

    #[test]
    fn english_queries_match_by_token_containment() {
        let engine = engine();
        assert_eq!(
            referenced_schemes(&engine.ask("Schemes for FARMERS?").unwrap()),
            vec!["pm-kisan".to_string()]
        );
        assert_eq!(
            referenced_schemes(&engine.ask("I need a business loan").unwrap()),
            vec!["mudra-yojana".to_string()]
        );
        assert_eq!(
            referenced_schemes(&engine.ask("बीमा").unwrap()),
            vec!["ayushman-bharat".to_string()]
        );
    }

    #[test]
    fn agriculture_outranks_health_in_mixed_query() {
        let result = engine().ask("health insurance for farmer families").unwrap();
        assert_eq!(result.matched_rule_id.as_deref(), Some("agriculture"));
    }

    #[test]
    fn unrelated_query_gets_help_reply() {
        let result = engine().ask("weather tomorrow").unwrap();
        assert!(!result.matched);
        assert!(referenced_schemes(&result).is_empty());
    }
}
