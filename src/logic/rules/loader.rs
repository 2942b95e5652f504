use super::{Predicate, Rule, RuleSet};
use crate::error::{GramSathiError, Result};
use crate::models::{Domain, Outcome, SchemeCatalog};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// On-disk shape of a rule table.
///
/// ```yaml
/// domain: symptom
/// default:
///   kind: triage
///   condition: General Health Concern
///   severity: Low
///   recommendations: [Monitor symptoms]
/// rules:
///   - id: viral-infection
///     priority: 20
///     when:
///       all_symptoms: [fever, headache]
///     outcome: { kind: triage, ... }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleTable {
    pub domain: Domain,
    pub default: Outcome,
    #[serde(default)]
    pub rules: Vec<RuleEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleEntry {
    pub id: String,
    #[serde(default)]
    pub description: String,
    /// Kept as a raw number so floats and out-of-range values are reported
    /// as table errors instead of parse errors.
    pub priority: serde_yaml::Number,
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub when: Predicate,
    pub outcome: Outcome,
}

impl RuleTable {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| GramSathiError::InvalidRuleTable(format!("failed to parse table: {}", e)))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            GramSathiError::InvalidRuleTable(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&yaml).map_err(|e| with_path(path, e))
    }

    /// Fails unless the table declares `expected` as its domain.
    pub fn expect_domain(&self, expected: Domain) -> Result<()> {
        if self.domain != expected {
            return Err(invalid(format!(
                "expected a {} table, found {}",
                expected, self.domain
            )));
        }
        Ok(())
    }

    /// Validates every entry and freezes the table. Any violation rejects
    /// the whole table.
    pub fn into_rule_set(self, catalog: &SchemeCatalog) -> Result<RuleSet> {
        let domain = self.domain;
        let mut seen = HashSet::new();
        let mut rules = Vec::with_capacity(self.rules.len());

        check_outcome("default", &self.default, domain, catalog)?;

        for entry in self.rules {
            let id = entry.id.trim().to_string();
            if id.is_empty() {
                return Err(invalid("rule id must not be empty"));
            }
            if !seen.insert(id.clone()) {
                return Err(invalid(format!("duplicate rule id '{}'", id)));
            }

            let priority = entry.priority.as_i64().ok_or_else(|| {
                invalid(format!(
                    "rule '{}' priority {} is not a finite integer",
                    id, entry.priority
                ))
            })?;

            if entry.when.domain() != domain {
                return Err(invalid(format!(
                    "rule '{}' tests a {} context in a {} table",
                    id,
                    entry.when.domain(),
                    domain
                )));
            }
            entry
                .when
                .validate()
                .map_err(|reason| invalid(format!("rule '{}': {}", id, reason)))?;

            check_outcome(&id, &entry.outcome, domain, catalog)?;

            rules.push(
                Rule::new(id, priority, entry.when, entry.outcome)
                    .with_description(entry.description),
            );
        }

        let rule_set = RuleSet::new(domain, rules, self.default)?;
        if rule_set.is_empty() {
            tracing::warn!(domain = %domain, "rule table has no rules, every request gets the default");
        }
        tracing::info!(domain = %domain, rules = rule_set.len(), "rule table loaded");
        Ok(rule_set)
    }
}

/// Parses and validates `yaml`, requiring it to declare `expected` as its
/// domain.
pub fn load_rule_set(yaml: &str, expected: Domain, catalog: &SchemeCatalog) -> Result<RuleSet> {
    let table = RuleTable::from_yaml(yaml)?;
    table.expect_domain(expected)?;
    table.into_rule_set(catalog)
}

/// Same as [`load_rule_set`] for a table on disk; errors name the file.
pub fn load_rule_set_file(path: &Path, expected: Domain, catalog: &SchemeCatalog) -> Result<RuleSet> {
    let table = RuleTable::from_path(path)?;
    table
        .expect_domain(expected)
        .and_then(|()| table.into_rule_set(catalog))
        .map_err(|e| with_path(path, e))
}

fn check_outcome(
    owner: &str,
    outcome: &Outcome,
    domain: Domain,
    catalog: &SchemeCatalog,
) -> Result<()> {
    if outcome.domain() != domain {
        return Err(invalid(format!(
            "{} outcome is {} in a {} table",
            owner,
            outcome.domain(),
            domain
        )));
    }
    outcome
        .validate()
        .map_err(|reason| invalid(format!("{} outcome: {}", owner, reason)))?;

    if let Outcome::Scheme(reply) = outcome {
        if let Some(missing) = reply.schemes.iter().find(|id| !catalog.contains(id)) {
            return Err(invalid(format!(
                "{} outcome references unknown scheme '{}'",
                owner, missing
            )));
        }
    }
    Ok(())
}

fn with_path(path: &Path, err: GramSathiError) -> GramSathiError {
    match err {
        GramSathiError::InvalidRuleTable(msg) => {
            GramSathiError::InvalidRuleTable(format!("{}: {}", path.display(), msg))
        }
        other => other,
    }
}

fn invalid(msg: impl Into<String>) -> GramSathiError {
    GramSathiError::InvalidRuleTable(msg.into())
}
