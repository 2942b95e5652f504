use super::{tables, Rule, RuleSet};
use crate::error::{GramSathiError, Result};
use crate::logic::context::{
    Context, ContextBuilder, KeywordContextBuilder, SoilContextBuilder, SymptomContextBuilder,
};
use crate::models::{Domain, Outcome, SchemeCatalog};
use serde::Serialize;
use std::path::Path;

/// Answer for one evaluation. `matched == false` means no rule fired and
/// `outcome` is the rule set's default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub matched_rule_id: Option<String>,
    pub outcome: Outcome,
    pub matched: bool,
}

impl MatchResult {
    fn fired(rule: &Rule) -> Self {
        Self {
            matched_rule_id: Some(rule.id.clone()),
            outcome: rule.outcome.clone(),
            matched: true,
        }
    }

    fn fallback(rule_set: &RuleSet) -> Self {
        Self {
            matched_rule_id: None,
            outcome: rule_set.default_outcome().clone(),
            matched: false,
        }
    }
}

/// Returns the outcome of the first rule, in priority then declaration
/// order, whose predicate holds for `context`.
pub fn evaluate(rule_set: &RuleSet, context: &Context) -> Result<MatchResult> {
    if context.domain() != rule_set.domain() {
        return Err(GramSathiError::ContextTypeMismatch {
            expected: rule_set.domain(),
            found: context.domain(),
        });
    }

    let Some(rule) = rule_set.rules().iter().find(|r| r.predicate.matches(context)) else {
        tracing::debug!(domain = %rule_set.domain(), "no rule matched, using default");
        return Ok(MatchResult::fallback(rule_set));
    };

    rule.outcome
        .validate()
        .map_err(|reason| GramSathiError::EmptyOutcome {
            rule_id: rule.id.clone(),
            reason,
        })?;

    tracing::debug!(domain = %rule_set.domain(), rule = %rule.id, "rule matched");
    Ok(MatchResult::fired(rule))
}

/// The three advisory rule sets, loaded once at startup.
pub struct RulesEngine {
    symptom: RuleSet,
    soil: RuleSet,
    scheme: RuleSet,
}

impl RulesEngine {
    /// Builds the engine from the tables compiled into the binary.
    #[cfg(test)]
    pub fn new() -> Result<Self> {
        Self::load(None)
    }

    /// Builds the engine, preferring `<rules_dir>/<domain>.yaml` over the
    /// compiled-in table for each domain where such a file exists.
    pub fn load(rules_dir: Option<&Path>) -> Result<Self> {
        let catalog = SchemeCatalog::new();
        Self::from_rule_sets(
            tables::load_rule_set(Domain::Symptom, rules_dir, &catalog)?,
            tables::load_rule_set(Domain::Soil, rules_dir, &catalog)?,
            tables::load_rule_set(Domain::Scheme, rules_dir, &catalog)?,
        )
    }

    pub fn from_rule_sets(symptom: RuleSet, soil: RuleSet, scheme: RuleSet) -> Result<Self> {
        for (expected, set) in [
            (Domain::Symptom, &symptom),
            (Domain::Soil, &soil),
            (Domain::Scheme, &scheme),
        ] {
            if set.domain() != expected {
                return Err(GramSathiError::InvalidRuleTable(format!(
                    "expected a {} rule set, got {}",
                    expected,
                    set.domain()
                )));
            }
        }

        Ok(Self {
            symptom,
            soil,
            scheme,
        })
    }

    pub fn rule_set(&self, domain: Domain) -> &RuleSet {
        match domain {
            Domain::Symptom => &self.symptom,
            Domain::Soil => &self.soil,
            Domain::Scheme => &self.scheme,
        }
    }

    /// Dispatches to the rule set of the context's own domain.
    pub fn evaluate(&self, context: &Context) -> Result<MatchResult> {
        evaluate(self.rule_set(context.domain()), context)
    }

    /// Every rule whose predicate holds, in evaluation order. Only the first
    /// one decides the outcome.
    pub fn explain(&self, context: &Context) -> Vec<&Rule> {
        self.rule_set(context.domain())
            .rules()
            .iter()
            .filter(|r| r.predicate.matches(context))
            .collect()
    }

    /// Builds a context with `builder` and evaluates it against that
    /// builder's rule set.
    pub fn advise<B: ContextBuilder>(&self, builder: &B, input: &B::Input) -> Result<MatchResult> {
        let context = builder.build(input)?;
        tracing::trace!(domain = %builder.domain(), ?context, "context built");
        self.evaluate(&context)
    }

    pub fn triage(&self, labels: &[String]) -> Result<MatchResult> {
        self.advise(&SymptomContextBuilder, labels)
    }

    pub fn advise_soil(&self, key: &str) -> Result<MatchResult> {
        self.advise(&SoilContextBuilder, key)
    }

    pub fn ask(&self, query: &str) -> Result<MatchResult> {
        self.advise(&KeywordContextBuilder, query)
    }

    pub fn list_rules(&self, domain: Domain) -> Vec<(&str, i64, &str)> {
        self.rule_set(domain)
            .rules()
            .iter()
            .map(|r| (r.id.as_str(), r.priority, r.description.as_str()))
            .collect()
    }
}
