//! Command line configuration.

use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Parser)]
#[command(name = "pslf-stats")]
#[command(about = "Analyze PSLF borrower and balance CSV files and chart the balances")]
pub struct Config {
    #[arg(long, default_value = "pslf_borrowers.csv", help = "Borrower counts per region")]
    pub borrowers: PathBuf,

    #[arg(long, default_value = "pslf_balance.csv", help = "Balances per region, in millions")]
    pub balance: PathBuf,

    #[arg(long, default_value = "histogram.png")]
    pub histogram_out: PathBuf,

    #[arg(long, default_value = "line_chart.png")]
    pub line_chart_out: PathBuf,

    #[arg(long, help = "Also write every computed answer to this JSON file")]
    pub report_json: Option<PathBuf>,

    #[arg(long, help = "Save the charts without opening them")]
    pub no_display: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::parse_from(["pslf-stats"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_flagless_run() {
        let config = Config::default();
        assert_eq!(config.borrowers, PathBuf::from("pslf_borrowers.csv"));
        assert_eq!(config.balance, PathBuf::from("pslf_balance.csv"));
        assert_eq!(config.histogram_out, PathBuf::from("histogram.png"));
        assert_eq!(config.line_chart_out, PathBuf::from("line_chart.png"));
        assert!(config.report_json.is_none());
        assert!(!config.no_display);
        assert!(!config.verbose);
    }

    #[test]
    fn flags_override_paths() {
        let config = Config::parse_from([
            "pslf-stats",
            "--borrowers",
            "data/b.csv",
            "--balance",
            "data/m.csv",
            "--report-json",
            "out.json",
            "--no-display",
            "-v",
        ]);
        assert_eq!(config.borrowers, PathBuf::from("data/b.csv"));
        assert_eq!(config.balance, PathBuf::from("data/m.csv"));
        assert_eq!(config.report_json, Some(PathBuf::from("out.json")));
        assert!(config.no_display);
        assert!(config.verbose);
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
