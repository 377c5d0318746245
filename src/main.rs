//! futstats CLI
//!
//! Reports over soccer-club CSV exports: microcycle performance,
//! all-team season tables, home/away splits and per-coach summaries.

use clap::{Parser, Subcommand};
use futstats::report::OutputFormat;
use futstats::{Config, Result};

#[derive(Parser)]
#[command(name = "futstats")]
#[command(about = "Match-record aggregation for soccer-club CSV exports", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Data management commands
    Data {
        #[command(subcommand)]
        action: DataCommands,
    },
    /// Performance grouped by rest interval between matches
    Microcycles {
        /// Results CSV (defaults to the configured path)
        #[arg(long)]
        input: Option<String>,
        /// Reference club (defaults to the configured club)
        #[arg(long)]
        club: Option<String>,
        /// Exclude rest gaps of this many days or more
        #[arg(long)]
        cutoff: Option<i64>,
        /// Split each rest-interval bucket by home/away
        #[arg(long)]
        venue_split: bool,
        /// Also print the chronological match schedule
        #[arg(long)]
        schedule: bool,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
        /// Write the report to a file instead of stdout
        #[arg(long)]
        output: Option<String>,
    },
    /// Season statistics for every club in the results export
    Teams {
        /// Results CSV (defaults to the configured path)
        #[arg(long)]
        input: Option<String>,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
        /// Write the report to a file instead of stdout
        #[arg(long)]
        output: Option<String>,
    },
    /// Home vs away summary over GPS match days
    Venue {
        /// Match-day CSV (defaults to the configured path)
        #[arg(long)]
        input: Option<String>,
    },
    /// Per-coach performance over GPS match days
    Coaches {
        /// Match-day CSV (defaults to the configured path)
        #[arg(long)]
        input: Option<String>,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
        /// Write the report to a file instead of stdout
        #[arg(long)]
        output: Option<String>,
    },
    /// Initialize a new project with default config
    Init,
}

#[derive(Subcommand)]
enum DataCommands {
    /// Show import summaries for the configured CSV exports
    Inspect,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    // Run command
    let result = match cli.command {
        Commands::Data { action } => match action {
            DataCommands::Inspect => commands::data_inspect(&config),
        },
        Commands::Microcycles {
            input,
            club,
            cutoff,
            venue_split,
            schedule,
            format,
            output,
        } => commands::microcycles(
            &config,
            input,
            club,
            cutoff,
            venue_split,
            schedule,
            format,
            output,
        ),
        Commands::Teams {
            input,
            format,
            output,
        } => commands::teams(&config, input, format, output),
        Commands::Venue { input } => commands::venue(&config, input),
        Commands::Coaches {
            input,
            format,
            output,
        } => commands::coaches(&config, input, format, output),
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use futstats::analysis::{aggregate, coach, derive_rest_days, league, venue as venue_analysis};
    use futstats::data::{club_view, read_fixtures_file, read_match_days_file};
    use futstats::report;
    use futstats::FutError;
    use std::io::Write;

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        std::fs::create_dir_all("data")?;
        println!("Created data/ directory");

        println!("\nNext steps:");
        println!("  1. Edit {} to set your club and data paths", config_path);
        println!("  2. Drop the results export at {}", config.data.results_path);
        println!("  3. Run 'futstats microcycles' for the rest-interval report");

        Ok(())
    }

    pub fn data_inspect(config: &Config) -> Result<()> {
        let import = read_fixtures_file(&config.data.results_path, config.analysis.score_policy)?;

        println!("Results Export");
        println!("───────────────────────────────");
        println!("  Path:        {}", config.data.results_path);
        println!("  Fixtures:    {}", import.fixtures.len());
        println!("  Skipped:     {}", import.skipped.len());
        println!("  Zero-filled: {}", import.zero_filled);
        if let (Some(first), Some(last)) = (
            import.fixtures.iter().map(|f| f.date).min(),
            import.fixtures.iter().map(|f| f.date).max(),
        ) {
            println!("  Range:       {} to {}", first, last);
        }
        for row in &import.skipped {
            println!("  line {}: {}", row.line, row.reason);
        }

        if std::path::Path::new(&config.data.sessions_path).exists() {
            let sessions = read_match_days_file(&config.data.sessions_path)?;
            println!("\nMatch-Day Export");
            println!("───────────────────────────────");
            println!("  Path:          {}", config.data.sessions_path);
            println!("  Match days:    {}", sessions.matches.len());
            println!("  Training rows: {}", sessions.training_rows);
            println!("  Skipped:       {}", sessions.skipped.len());
            for row in &sessions.skipped {
                println!("  line {}: {}", row.line, row.reason);
            }
        }

        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn microcycles(
        config: &Config,
        input: Option<String>,
        club: Option<String>,
        cutoff: Option<i64>,
        venue_split: bool,
        schedule: bool,
        format: OutputFormat,
        output: Option<String>,
    ) -> Result<()> {
        let path = input.unwrap_or_else(|| config.data.results_path.clone());
        let club = club.unwrap_or_else(|| config.analysis.club.clone());
        let cutoff = cutoff.unwrap_or(config.analysis.rest_cutoff_days);

        let import = read_fixtures_file(&path, config.analysis.score_policy)?;

        let view = club_view(&import.fixtures, &club);
        if view.is_empty() {
            return Err(FutError::EmptyInput(club));
        }
        log::info!("{}: {} matches in view", club, view.len());

        let rested = derive_rest_days(&view);
        let buckets = aggregate(&rested, cutoff, venue_split);

        let mut out = open_output(output.as_deref())?;
        report::write_buckets(&mut out, &buckets, format)?;
        if schedule && format == OutputFormat::Table {
            writeln!(out)?;
            report::write_schedule(&mut out, &rested)?;
        }

        Ok(())
    }

    pub fn teams(
        config: &Config,
        input: Option<String>,
        format: OutputFormat,
        output: Option<String>,
    ) -> Result<()> {
        let path = input.unwrap_or_else(|| config.data.results_path.clone());

        let import = read_fixtures_file(&path, config.analysis.score_policy)?;

        let table = league::league_table(&import.fixtures);
        if table.is_empty() {
            return Err(FutError::EmptyInput("all clubs".to_string()));
        }

        let mut out = open_output(output.as_deref())?;
        report::write_league(&mut out, &table, format)
    }

    pub fn venue(config: &Config, input: Option<String>) -> Result<()> {
        let path = input.unwrap_or_else(|| config.data.sessions_path.clone());

        let import = read_match_days_file(&path)?;
        if import.matches.is_empty() {
            return Err(FutError::EmptyInput(config.analysis.club.clone()));
        }

        let splits = venue_analysis::split_by_venue(&import.matches);
        let mut out = std::io::stdout();
        report::write_venue_splits(&mut out, &splits)
    }

    pub fn coaches(
        config: &Config,
        input: Option<String>,
        format: OutputFormat,
        output: Option<String>,
    ) -> Result<()> {
        let path = input.unwrap_or_else(|| config.data.sessions_path.clone());

        let import = read_match_days_file(&path)?;
        let summaries = coach::summarize(&import.matches, &config.coaches);
        if summaries.is_empty() {
            return Err(FutError::EmptyInput(config.analysis.club.clone()));
        }

        let mut out = open_output(output.as_deref())?;
        report::write_coaches(&mut out, &summaries, format)
    }

    fn open_output(path: Option<&str>) -> Result<Box<dyn Write>> {
        match path {
            Some(p) => {
                let file = std::fs::File::create(p)?;
                Ok(Box::new(file))
            }
            None => Ok(Box::new(std::io::stdout())),
        }
    }
}
