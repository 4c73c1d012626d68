pub mod all;
pub mod demo;
pub mod init;
pub mod sales;
pub mod statements;
pub mod status;

use clap::{Parser, Subcommand};

use crate::error::{CloseoutError, Result};
use crate::settings::Settings;
use crate::taxonomy::MatchPolicy;

/// Resolve the match policy: an explicit CLI flag wins over settings.
pub(crate) fn resolve_policy(settings: &Settings, flag: Option<&str>) -> Result<MatchPolicy> {
    match flag {
        Some(s) => MatchPolicy::parse(s).ok_or_else(|| {
            CloseoutError::Other(format!(
                "unknown match policy '{s}' (expected sum-per-keyword or first-match-wins)"
            ))
        }),
        None => Ok(settings.match_policy),
    }
}

#[derive(Parser)]
#[command(
    name = "closeout",
    about = "Month-end close automation: trial balance to financial statements, ratios, and sales dashboards."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up closeout: write settings and create the data directories.
    Init {
        /// ERP company code
        #[arg(long = "company-code")]
        company_code: Option<String>,
        /// Fiscal period being closed: YYYY.MM
        #[arg(long)]
        period: Option<String>,
        /// Path for closeout data (default: ~/Documents/closeout)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Derive financial statements and ratios from a trial balance.
    Statements {
        /// Trial balance file (CSV/XLSX); default: the extracted export for
        /// the configured period
        #[arg(long)]
        ledger: Option<String>,
        /// Output directory for the CSV reports
        #[arg(long)]
        output: Option<String>,
        /// Period override: YYYY.MM
        #[arg(long)]
        period: Option<String>,
        /// Keyword match policy: sum-per-keyword, first-match-wins
        #[arg(long = "match-policy")]
        match_policy: Option<String>,
    },
    /// Analyze sales trends across the input folder and build the dashboard.
    Sales {
        /// Folder of monthly spreadsheet exports
        #[arg(long)]
        input: Option<String>,
        /// Output directory for the dashboard
        #[arg(long)]
        output: Option<String>,
        /// Period override: YYYY.MM
        #[arg(long)]
        period: Option<String>,
    },
    /// Run sales analysis and statement generation back to back.
    All {
        /// Trial balance file (CSV/XLSX)
        #[arg(long)]
        ledger: Option<String>,
        /// Period override: YYYY.MM
        #[arg(long)]
        period: Option<String>,
    },
    /// Extract a sample trial balance through a scripted terminal session
    /// and run the statements pipeline on it.
    Demo {
        /// Data directory to run the demo in (default: configured data dir)
        #[arg(long)]
        dir: Option<String>,
    },
    /// Show current settings and data directory checks.
    Status,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_policy_flag_wins() {
        let settings = Settings::default();
        let policy = resolve_policy(&settings, Some("first-match-wins")).unwrap();
        assert_eq!(policy, MatchPolicy::FirstMatchWins);
    }

    #[test]
    fn test_resolve_policy_defaults_to_settings() {
        let settings = Settings {
            match_policy: MatchPolicy::FirstMatchWins,
            ..Settings::default()
        };
        assert_eq!(
            resolve_policy(&settings, None).unwrap(),
            MatchPolicy::FirstMatchWins
        );
    }

    #[test]
    fn test_resolve_policy_rejects_unknown() {
        let settings = Settings::default();
        assert!(resolve_policy(&settings, Some("fuzzy")).is_err());
    }
}
