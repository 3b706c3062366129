//! CLI argument definitions for the populator.

use clap::Args;

/// Populate arguments. Unset values fall back to the settings file.
#[derive(Args, Clone, Debug, Default)]
pub struct PopulateArgs {
    /// Seed both collections with random data, then exit
    #[arg(short = 'p', long)]
    pub populate: bool,

    /// Number of documents to insert per collection
    #[arg(long, env = "RANDO_POPULATE_COUNT")]
    pub populate_count: Option<u64>,

    /// Batch size for database inserts
    #[arg(long, env = "RANDO_POPULATE_BATCH_SIZE")]
    pub batch_size: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        populate: PopulateArgs,
    }

    #[test]
    fn test_short_flag() {
        let cli = TestCli::parse_from(["test", "-p", "--populate-count", "500"]);
        assert!(cli.populate.populate);
        assert_eq!(cli.populate.populate_count, Some(500));
    }

    #[test]
    fn test_defaults() {
        let cli = TestCli::parse_from(["test"]);
        assert!(!cli.populate.populate);
        assert_eq!(cli.populate.batch_size, None);
    }
}
