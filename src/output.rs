//! Plain-text and JSON rendering of engine results for the terminal.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::logic::calendar::CalendarEntry;
use crate::logic::rules::{MatchResult, Rule};
use crate::models::{
    EmergencyContact, HealthTip, Outcome, Scheme, SchemeCatalog, SchemeReply, SoilAdvice,
    SoilProfile, SoilType, TriageAdvice, EMERGENCY_CONTACTS,
};
use serde::Serialize;
use std::fmt::Write as _;

/// Advisory answer plus the reference data the presentation resolves for it.
#[derive(Debug, Serialize)]
pub struct AdvisoryReport<'a> {
    #[serde(flatten)]
    pub result: &'a MatchResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil: Option<SoilProfile>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<&'a Scheme>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matching_rules: Vec<&'a str>,
    /// Filled for emergency triage outcomes only.
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub emergency_contacts: &'static [EmergencyContact],
}

impl<'a> AdvisoryReport<'a> {
    pub fn new(result: &'a MatchResult) -> Self {
        let emergency_contacts: &'static [EmergencyContact] = match &result.outcome {
            Outcome::Triage(advice) if advice.emergency => &EMERGENCY_CONTACTS,
            _ => &[],
        };
        Self {
            result,
            soil: None,
            schemes: Vec::new(),
            matching_rules: Vec::new(),
            emergency_contacts,
        }
    }

    pub fn with_soil(mut self, soil: SoilType) -> Self {
        self.soil = Some(soil.profile());
        self
    }

    /// Resolves scheme ids carried by a chat reply. Unknown ids are skipped;
    /// the table loader already rejects them.
    pub fn with_schemes(mut self, catalog: &'a SchemeCatalog) -> Self {
        let result = self.result;
        if let Outcome::Scheme(reply) = &result.outcome {
            self.schemes = reply
                .schemes
                .iter()
                .filter_map(|id| catalog.get(id).ok())
                .collect();
        }
        self
    }

    pub fn with_matching_rules(mut self, rules: &[&'a Rule]) -> Self {
        self.matching_rules = rules.iter().map(|r| r.id.as_str()).collect();
        self
    }
}

pub fn emit<T: Serialize>(format: OutputFormat, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => print!("{}", text()),
    }
    Ok(())
}

pub fn advisory_text(report: &AdvisoryReport<'_>) -> String {
    let mut out = String::new();

    if let Some(profile) = &report.soil {
        let _ = writeln!(out, "{}", profile.soil_type);
        let _ = writeln!(out, "  {}", profile.description);
        let _ = writeln!(out, "  {}", profile.characteristics.join(" · "));
        out.push('\n');
    }

    match &report.result.outcome {
        Outcome::Triage(advice) => triage_text(&mut out, advice, report.emergency_contacts),
        Outcome::Soil(advice) => soil_text(&mut out, advice),
        Outcome::Scheme(reply) => scheme_reply_text(&mut out, reply, &report.schemes),
    }

    match &report.result.matched_rule_id {
        Some(id) => {
            let _ = writeln!(out, "\n[rule: {}]", id);
        }
        None => {
            let _ = writeln!(out, "\n[no rule matched, default advice]");
        }
    }
    if !report.matching_rules.is_empty() {
        let _ = writeln!(out, "[matching rules: {}]", report.matching_rules.join(", "));
    }
    out
}

fn triage_text(out: &mut String, advice: &TriageAdvice, contacts: &[EmergencyContact]) {
    let _ = writeln!(out, "{} {}", advice.severity.symbol(), advice.condition);
    let _ = writeln!(out, "Severity: {}", advice.severity);
    let _ = writeln!(out, "Recommendations:");
    for rec in &advice.recommendations {
        let _ = writeln!(out, "  - {}", rec);
    }
    if advice.emergency {
        let _ = writeln!(out, "\nThis requires immediate medical attention!");
        for contact in contacts {
            let _ = writeln!(out, "  {:<20} {}", contact.service, contact.number);
        }
    }
}

fn soil_text(out: &mut String, advice: &SoilAdvice) {
    if !advice.crops.is_empty() {
        let _ = writeln!(out, "Recommended crops:");
        for crop in &advice.crops {
            let _ = writeln!(out, "  {} ({}% suitable)", crop.name, crop.suitability);
            let _ = writeln!(out, "    Season: {}", crop.season);
            let _ = writeln!(out, "    Expected yield: {}", crop.expected_yield);
            for tip in &crop.tips {
                let _ = writeln!(out, "    - {}", tip);
            }
        }
    }
    if !advice.fertilizers.is_empty() {
        let _ = writeln!(out, "Fertilizers:");
        for f in &advice.fertilizers {
            let _ = writeln!(
                out,
                "  {}: {}, {}, {}",
                f.fertilizer_type, f.quantity, f.timing, f.method
            );
        }
    }
    if !advice.general_tips.is_empty() {
        let _ = writeln!(out, "General tips:");
        for tip in &advice.general_tips {
            let _ = writeln!(out, "  - {}", tip);
        }
    }
}

fn scheme_reply_text(out: &mut String, reply: &SchemeReply, schemes: &[&Scheme]) {
    let _ = writeln!(out, "{}", reply.text);
    for scheme in schemes {
        out.push('\n');
        scheme_text(out, scheme);
    }
}

pub fn scheme_text(out: &mut String, scheme: &Scheme) {
    let _ = writeln!(out, "{} [{}] ({})", scheme.name, scheme.id, scheme.category);
    let _ = writeln!(out, "  {}", scheme.description);
    let _ = writeln!(out, "  Benefits:    {}", scheme.benefits);
    let _ = writeln!(out, "  Eligibility: {}", scheme.eligibility);
    let _ = writeln!(out, "  Documents:   {}", scheme.documents.join(", "));
    let _ = writeln!(out, "  Apply:       {}", scheme.application_process);
}

pub fn schemes_text(schemes: &[&Scheme]) -> String {
    if schemes.is_empty() {
        return "No schemes found.\n".to_string();
    }
    let mut out = String::new();
    for (i, scheme) in schemes.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        scheme_text(&mut out, scheme);
    }
    out
}

pub fn tips_text(tips: &[&HealthTip]) -> String {
    if tips.is_empty() {
        return "No health tips found.\n".to_string();
    }
    let mut out = String::new();
    for (i, tip) in tips.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(
            out,
            "{} {} [{}] ({})",
            tip.urgency.symbol(),
            tip.title,
            tip.category,
            tip.urgency
        );
        let _ = writeln!(out, "  {}", tip.description);
    }
    out
}

pub fn contacts_text(contacts: &[EmergencyContact]) -> String {
    let mut out = String::new();
    for contact in contacts {
        let _ = writeln!(out, "{:<20} {}", contact.service, contact.number);
    }
    out
}

pub fn calendar_text(entry: &CalendarEntry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "From {}:", entry.month.name());
    let _ = writeln!(out, "Activities:");
    for activity in entry.activities {
        let _ = writeln!(out, "  - {}", activity);
    }
    let _ = writeln!(out, "Crops: {}", entry.crops.join(", "));
    out
}

pub fn rules_text(rules: &[(&str, i64, &str)]) -> String {
    let mut out = String::new();
    for (id, priority, description) in rules {
        let _ = writeln!(out, "{:>5}  {:<22} {}", priority, id, description);
    }
    out
}
