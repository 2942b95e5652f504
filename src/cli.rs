use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gramsathi",
    version,
    about = "Rural advisory engine: symptom triage, soil advice and scheme chat"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (overrides config)
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Query(Query),
    /// Interactive setup
    Init,
}

/// Commands answered from the loaded config and rule tables.
#[derive(Subcommand)]
pub enum Query {
    /// Check selected symptoms (prompts when none are given)
    Triage {
        /// Symptom label, e.g. "Chest Pain"; repeatable
        #[arg(short, long = "symptom")]
        symptoms: Vec<String>,

        /// Also list every rule that matched, in evaluation order
        #[arg(long)]
        explain: bool,
    },
    /// Crop and fertilizer advice for a soil type
    Soil {
        /// clay, sandy, loamy or black
        soil_type: String,
    },
    /// Ask the scheme assistant a question
    Ask {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Also list every rule that matched, in evaluation order
        #[arg(long)]
        explain: bool,
    },
    /// Browse the government scheme catalog
    Schemes {
        /// Show one scheme by id
        #[arg(long, conflicts_with_all = ["category", "search"])]
        id: Option<String>,

        /// agriculture, health or business
        #[arg(long, conflicts_with = "search")]
        category: Option<String>,

        /// Case-insensitive search over name, description and category
        #[arg(long)]
        search: Option<String>,
    },
    /// First-aid health tips
    Tips {
        /// general, digestive, injury or cardiac
        #[arg(long)]
        category: Option<String>,
    },
    /// Emergency and helpline numbers
    Contacts,
    /// Supported soil types
    Soils,
    /// Sowing and harvest calendar
    Calendar {
        /// Month number or name (defaults to the current month)
        #[arg(short, long, conflicts_with = "all")]
        month: Option<String>,

        /// Show the whole year
        #[arg(long)]
        all: bool,
    },
    /// List rules of one domain in evaluation order
    Rules {
        /// symptom, soil or scheme
        domain: String,

        /// Show one rule in full
        #[arg(long)]
        id: Option<String>,
    },
    /// Validate config and rule tables
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_repeated_symptoms() {
        let cli = Cli::parse_from([
            "gramsathi",
            "triage",
            "-s",
            "Fever",
            "--symptom",
            "Headache",
        ]);
        match cli.command {
            Commands::Query(Query::Triage { symptoms, explain }) => {
                assert_eq!(symptoms, vec!["Fever", "Headache"]);
                assert!(!explain);
            }
            _ => panic!("expected triage"),
        }
    }

    #[test]
    fn parses_multi_word_query_and_global_flags() {
        let cli = Cli::parse_from(["gramsathi", "ask", "किसान", "योजना", "--format", "json", "-vv"]);
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Query(Query::Ask { query, .. }) => assert_eq!(query.join(" "), "किसान योजना"),
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn scheme_category_conflicts_with_search() {
        let result = Cli::try_parse_from([
            "gramsathi", "schemes", "--category", "health", "--search", "loan",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn init_is_not_a_query() {
        let cli = Cli::parse_from(["gramsathi", "init"]);
        assert!(matches!(cli.command, Commands::Init));
        let cli = Cli::parse_from(["gramsathi", "tips", "--category", "injury"]);
        assert!(matches!(cli.command, Commands::Query(Query::Tips { .. })));
    }

    #[test]
    fn scheme_id_conflicts_with_search() {
        let result = Cli::try_parse_from(["gramsathi", "schemes", "--id", "pm-kisan", "--search", "loan"]);
        assert!(result.is_err());
    }
}
