use crate::error::{GramSathiError, Result};
use crate::models::{Domain, SoilType, Symptom};
use serde::Serialize;
use std::collections::BTreeSet;

/// Normalized input a rule predicate is evaluated against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Context {
    Symptoms(BTreeSet<Symptom>),
    Soil(SoilType),
    Keywords(BTreeSet<String>),
}

impl Context {
    pub fn domain(&self) -> Domain {
        match self {
            Context::Symptoms(_) => Domain::Symptom,
            Context::Soil(_) => Domain::Soil,
            Context::Keywords(_) => Domain::Scheme,
        }
    }

    pub fn has_symptom(&self, symptom: Symptom) -> bool {
        matches!(self, Context::Symptoms(set) if set.contains(&symptom))
    }

    /// A keyword is present when some token equals it or contains it.
    pub fn has_keyword(&self, keyword: &str) -> bool {
        match self {
            Context::Keywords(tokens) => tokens.iter().any(|t| t.contains(keyword)),
            _ => false,
        }
    }
}

/// Turns raw presentation-layer input into a [`Context`].
pub trait ContextBuilder {
    type Input: ?Sized;

    fn domain(&self) -> Domain;

    fn build(&self, input: &Self::Input) -> Result<Context>;
}

pub struct SymptomContextBuilder;

impl ContextBuilder for SymptomContextBuilder {
    type Input = [String];

    fn domain(&self) -> Domain {
        Domain::Symptom
    }

    fn build(&self, labels: &[String]) -> Result<Context> {
        if labels.is_empty() {
            return Err(GramSathiError::EmptyInput(
                "select at least one symptom".into(),
            ));
        }

        let symptoms = labels
            .iter()
            .map(|label| {
                Symptom::from_str(label)
                    .ok_or_else(|| GramSathiError::UnknownSymptom(label.clone()))
            })
            .collect::<Result<BTreeSet<_>>>()?;

        Ok(Context::Symptoms(symptoms))
    }
}

pub struct SoilContextBuilder;

impl ContextBuilder for SoilContextBuilder {
    type Input = str;

    fn domain(&self) -> Domain {
        Domain::Soil
    }

    fn build(&self, key: &str) -> Result<Context> {
        SoilType::from_str(key)
            .map(Context::Soil)
            .ok_or_else(|| GramSathiError::UnknownSoilType(key.to_string()))
    }
}

pub struct KeywordContextBuilder;

impl ContextBuilder for KeywordContextBuilder {
    type Input = str;

    fn domain(&self) -> Domain {
        Domain::Scheme
    }

    fn build(&self, text: &str) -> Result<Context> {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Err(GramSathiError::EmptyInput("query is blank".into()));
        }
        Ok(Context::Keywords(tokens))
    }
}

/// Lower-cases and splits on whitespace and punctuation. Devanagari vowel
/// signs are marks, not letters, so splitting must not key off
/// `char::is_alphanumeric`.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || is_separator_punctuation(c))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_separator_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '।' | '॥' | '‘' | '’' | '“' | '”' | '…' | '–' | '—' | '¿' | '¡' | '«' | '»'
        )
}
