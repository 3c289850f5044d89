//! `slots` CLI: preview slots against exclusions, expand weekday ranges and build
//! exclusion batches from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Slots for a morning, marked against saved exclusions
//! slots preview --date 2024-06-10 --from 09:00 --to 12:00 --length 20 --exclusions ex.json
//!
//! # Weekdays in a range (Mon-Fri unless --weekdays is given)
//! slots days --from 2024-06-10 --to 2024-06-23 --weekdays mon,wed
//!
//! # Wrap a JSON array of exclusions into a submission body
//! slots batch -i pending.json -o batch.json --collapse-duplicates
//! ```

use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use slot_engine::clock::ClockTime;
use slot_engine::{
    build_batch, expand_weekdays, generate_slots, mark_slots, parse_calendar_date, Exclusion,
    ExclusionBatch, WeekdayFlags,
};
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Slot preview and exclusion batch tool for schedule admins"
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the slots of one day and mark those hit by exclusions
    Preview {
        /// Day to preview (yyyy-MM-dd)
        #[arg(long, value_parser = parse_calendar_date)]
        date: NaiveDate,
        /// Range start (HH:mm)
        #[arg(long)]
        from: ClockTime,
        /// Range end (HH:mm), exclusive
        #[arg(long)]
        to: ClockTime,
        /// Slot length in minutes
        #[arg(long)]
        length: u32,
        /// JSON file with an exclusion array or a `{exclusions: [...]}` body
        #[arg(long)]
        exclusions: Option<String>,
        /// Print the marked slots as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the dates in a range that fall on the chosen weekdays
    Days {
        /// First day (yyyy-MM-dd)
        #[arg(long, value_parser = parse_calendar_date)]
        from: NaiveDate,
        /// Last day (yyyy-MM-dd), inclusive
        #[arg(long, value_parser = parse_calendar_date)]
        to: NaiveDate,
        /// Comma-separated weekday names; Monday to Friday if omitted
        #[arg(long)]
        weekdays: Option<WeekdayFlags>,
        /// Print the dates as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Build a submission body from a JSON array of exclusions
    Batch {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Drop exact duplicate entries, keeping the first
        #[arg(long)]
        collapse_duplicates: bool,
    },
}

/// Exclusions as accepted on input: a bare array or a submission body.
#[derive(Deserialize)]
#[serde(untagged)]
enum ExclusionInput {
    List(Vec<Exclusion>),
    Batch(ExclusionBatch),
}

impl ExclusionInput {
    fn into_vec(self) -> Vec<Exclusion> {
        match self {
            ExclusionInput::List(list) => list,
            ExclusionInput::Batch(batch) => batch.exclusions,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Preview {
            date,
            from,
            to,
            length,
            exclusions,
            json,
        } => {
            if length == 0 {
                bail!("Slot length must be at least one minute");
            }
            if from >= to {
                bail!("Range start {} must be before range end {}", from, to);
            }

            let exclusions = match exclusions.as_deref() {
                Some(path) => read_exclusions(&read_input(Some(path))?)?,
                None => Vec::new(),
            };
            let slots: Vec<_> = generate_slots(date, from, to, length).iter().collect();
            debug!(slots = slots.len(), exclusions = exclusions.len(), "previewing");
            let marked = mark_slots(&slots, &exclusions);

            if json {
                println!("{}", serde_json::to_string_pretty(&marked)?);
            } else {
                for slot in &marked {
                    let state = if slot.available { "available" } else { "excluded" };
                    println!("{}  {}", slot.label(), state);
                }
            }
        }
        Commands::Days {
            from,
            to,
            weekdays,
            json,
        } => {
            let flags = weekdays.unwrap_or_default();
            let dates = expand_weekdays(from, to, &flags).context("Failed to expand weekdays")?;

            if json {
                println!("{}", serde_json::to_string(&dates)?);
            } else {
                for date in &dates {
                    println!("{} {}", date, date.weekday());
                }
            }
        }
        Commands::Batch {
            input,
            output,
            collapse_duplicates,
        } => {
            let entries = read_exclusions(&read_input(input.as_deref())?)?;
            for (i, entry) in entries.iter().enumerate() {
                entry
                    .validate()
                    .with_context(|| format!("Invalid exclusion at index {}", i))?;
            }

            let mut batch = build_batch(&entries);
            if collapse_duplicates {
                batch = batch.collapse_duplicates();
            }
            let body = serde_json::to_string_pretty(&batch)?;
            write_output(output.as_deref(), &format!("{}\n", body))?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A second init (e.g. from a test harness) is harmless.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

fn read_exclusions(json: &str) -> Result<Vec<Exclusion>> {
    let parsed: ExclusionInput =
        serde_json::from_str(json).context("Failed to parse exclusions JSON")?;
    Ok(parsed.into_vec())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
