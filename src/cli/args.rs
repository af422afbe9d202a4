use clap::Parser;
use std::path::PathBuf;

/// Environment variable that overrides the default data directory
pub const DATA_DIR_ENV: &str = "LENDING_POOL_DATA_DIR";

/// Lend and borrow items within a community
#[derive(Parser, Debug)]
#[command(name = "lending-pool")]
#[command(about = "Lend and borrow items within a community", long_about = None)]
pub struct CliArgs {
    /// Directory holding users.txt, items.txt and transactions.txt
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        env = DATA_DIR_ENV,
        default_value = "data",
        help = "Directory of the data files (created on first save)"
    )]
    pub data_dir: PathBuf,

    /// Log filter used when RUST_LOG is not set
    #[arg(
        long = "log-level",
        value_name = "FILTER",
        default_value = "warn",
        help = "Log filter, e.g. 'info' or 'lending_pool=debug' (RUST_LOG takes precedence)"
    )]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::explicit_dir(&["program", "--data-dir", "/tmp/pool"], "/tmp/pool")]
    #[case::relative_dir(&["program", "--data-dir", "pool-data"], "pool-data")]
    fn test_data_dir_parsing(#[case] args: &[&str], #[case] expected: &str) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.data_dir, PathBuf::from(expected));
    }

    #[rstest]
    #[case::default_level(&["program"], "warn")]
    #[case::explicit_level(&["program", "--log-level", "debug"], "debug")]
    #[case::directive(&["program", "--log-level", "lending_pool=trace"], "lending_pool=trace")]
    fn test_log_level_parsing(#[case] args: &[&str], #[case] expected: &str) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.log_level, expected);
    }

    #[rstest]
    #[case::unknown_flag(&["program", "--verbose"])]
    #[case::missing_dir_value(&["program", "--data-dir"])]
    #[case::positional(&["program", "input.csv"])]
    fn test_invalid_arguments(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
