mod cli;
mod config;
mod error;
mod logic;
mod models;
mod output;

use anyhow::{bail, Context as _};
use clap::Parser;
use cli::{Cli, Commands, Query};
use config::{Config, OutputFormat};
use dialoguer::MultiSelect;
use logic::calendar;
use logic::context::{ContextBuilder, KeywordContextBuilder, SymptomContextBuilder};
use logic::rules::tables;
use logic::RulesEngine;
use models::{
    Domain, HealthTipCatalog, HealthTipCategory, SchemeCatalog, SchemeCategory, SoilType,
    Symptom, EMERGENCY_CONTACTS,
};
use output::AdvisoryReport;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let query = match cli.command {
        // Setup must work even when the existing config is broken.
        Commands::Init => {
            Config::setup_interactive().context("interactive setup failed")?;
            return Ok(());
        }
        Commands::Query(query) => query,
    };

    let config = Config::load(cli.config.clone()).context("failed to load configuration")?;
    let format = cli.format.unwrap_or(config.output.format);

    // Rule tables are validated once here; a bad table stops the process
    // before any request is served.
    let engine = RulesEngine::load(config.rules.dir.as_deref())
        .context("failed to load rule tables")?;

    run(query, &engine, &config, format)
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(
    query: Query,
    engine: &RulesEngine,
    config: &Config,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let catalog = SchemeCatalog::new();

    match query {
        Query::Triage { symptoms, explain } => {
            let labels = if symptoms.is_empty() {
                prompt_symptoms()?
            } else {
                symptoms
            };
            let result = engine.triage(&labels)?;
            let mut report = AdvisoryReport::new(&result);
            if explain {
                let context = SymptomContextBuilder.build(&labels)?;
                report = report.with_matching_rules(&engine.explain(&context));
            }
            output::emit(format, &report, || output::advisory_text(&report))?;
        }
        Query::Soil { soil_type } => {
            let result = engine.advise_soil(&soil_type)?;
            let mut report = AdvisoryReport::new(&result);
            if let Some(soil) = SoilType::from_str(&soil_type) {
                report = report.with_soil(soil);
            }
            output::emit(format, &report, || output::advisory_text(&report))?;
        }
        Query::Ask { query, explain } => {
            let query = query.join(" ");
            let result = engine.ask(&query)?;
            let mut report = AdvisoryReport::new(&result).with_schemes(&catalog);
            if explain {
                let context = KeywordContextBuilder.build(&query)?;
                report = report.with_matching_rules(&engine.explain(&context));
            }
            output::emit(format, &report, || output::advisory_text(&report))?;
        }
        Query::Schemes {
            id,
            category,
            search,
        } => {
            let schemes = if let Some(id) = id {
                vec![catalog.get(&id)?]
            } else if let Some(category) = category {
                let Some(category) = SchemeCategory::from_str(&category) else {
                    bail!(
                        "unknown scheme category '{}' (expected agriculture, health or business)",
                        category
                    );
                };
                catalog.by_category(category)
            } else if let Some(query) = search {
                catalog.search(&query)
            } else {
                catalog.all().iter().collect()
            };
            output::emit(format, &schemes, || output::schemes_text(&schemes))?;
        }
        Query::Tips { category } => {
            let catalog = HealthTipCatalog::new();
            let tips = match category {
                Some(category) => {
                    let Some(category) = HealthTipCategory::from_str(&category) else {
                        bail!(
                            "unknown tip category '{}' (expected general, digestive, injury or cardiac)",
                            category
                        );
                    };
                    catalog.by_category(category)
                }
                None => catalog.all().iter().collect(),
            };
            output::emit(format, &tips, || output::tips_text(&tips))?;
        }
        Query::Contacts => {
            output::emit(format, &EMERGENCY_CONTACTS, || {
                output::contacts_text(&EMERGENCY_CONTACTS)
            })?;
        }
        Query::Soils => {
            let profiles: Vec<_> = SoilType::ALL.iter().map(|s| s.profile()).collect();
            output::emit(format, &profiles, || {
                profiles
                    .iter()
                    .map(|p| format!("{:<7} {}\n        {}\n", p.soil_type.key(), p.soil_type, p.description))
                    .collect()
            })?;
        }
        Query::Calendar { all: true, .. } => {
            let entries = calendar::entries();
            output::emit(format, &entries, || {
                entries
                    .iter()
                    .map(output::calendar_text)
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        Query::Calendar { month, .. } => {
            let month = match month {
                Some(m) => match calendar::parse_month(&m) {
                    Some(month) => month,
                    None => bail!("unrecognized month '{}'", m),
                },
                None => calendar::current_month(),
            };
            let entry = calendar::entry_for(month);
            output::emit(format, entry, || output::calendar_text(entry))?;
        }
        Query::Rules { domain, id } => {
            let Some(domain) = Domain::from_str(&domain) else {
                bail!("unknown domain '{}' (expected symptom, soil or scheme)", domain);
            };
            let rule_set = engine.rule_set(domain);
            match id {
                Some(id) => {
                    let Some(rule) = rule_set.get(&id) else {
                        bail!("no {} rule with id '{}'", domain, id);
                    };
                    let yaml = serde_yaml::to_string(rule)?;
                    output::emit(format, rule, || yaml)?;
                }
                None => {
                    let rules = engine.list_rules(domain);
                    output::emit(format, rule_set, || output::rules_text(&rules))?;
                }
            }
        }
        Query::Check => {
            let report = check_report(engine, config);
            output::emit(format, &report, || {
                report
                    .iter()
                    .map(|t| format!("✓ {:<8} {} rules  ({})\n", t.domain.as_str(), t.rules, t.source))
                    .collect()
            })?;
        }
    }

    Ok(())
}

fn prompt_symptoms() -> anyhow::Result<Vec<String>> {
    let labels: Vec<&str> = Symptom::ALL.iter().map(|s| s.as_str()).collect();
    let chosen = MultiSelect::new()
        .with_prompt("Select your symptoms (space to toggle, enter to confirm)")
        .items(&labels)
        .interact()
        .context("symptom selection failed")?;
    Ok(chosen.into_iter().map(|i| labels[i].to_string()).collect())
}

#[derive(Serialize)]
struct TableStatus {
    domain: Domain,
    rules: usize,
    source: String,
}

fn check_report(engine: &RulesEngine, config: &Config) -> Vec<TableStatus> {
    Domain::ALL
        .iter()
        .map(|&domain| TableStatus {
            domain,
            rules: engine.rule_set(domain).len(),
            source: tables::override_path(domain, config.rules.dir.as_deref())
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in".to_string()),
        })
        .collect()
}
