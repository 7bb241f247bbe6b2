//! Show command - list recorded keys

use crate::cli::args::{OutputFormat, ShowArgs};
use crate::cli::commands::open_tracker;
use crate::config::Config;
use crate::error::KeystampResult;
use crate::keys::{KeyState, Timestamp, MIN_VALID_KEY};
use chrono::DateTime;
use console::style;

/// Execute the show command
pub async fn execute(args: ShowArgs, config: &Config) -> KeystampResult<()> {
    let tracker = open_tracker(config)?;
    let state = tracker.current_state()?;

    if state.is_empty() {
        match args.format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Plain => {}
            OutputFormat::Table => println!("No keys recorded."),
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_table(&state),
        OutputFormat::Json => print_json(&state)?,
        OutputFormat::Plain => print_plain(&state),
    }

    Ok(())
}

fn written_at(time: Timestamp) -> String {
    if time < MIN_VALID_KEY {
        return "-".to_string();
    }
    DateTime::from_timestamp_millis(time)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S%.3f").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn print_table(state: &KeyState) {
    println!(
        "{:<40} {:<16} {:<25} {:<12}",
        style("KEY").bold(),
        style("TIME").bold(),
        style("WRITTEN").bold(),
        style("STATE").bold()
    );
    println!("{}", "-".repeat(93));

    for (key, _) in state.entries() {
        let time = state.key_time(key);
        let state_styled = if time >= MIN_VALID_KEY {
            style("set").green()
        } else {
            style("invalidated").dim()
        };

        println!(
            "{:<40} {:<16} {:<25} {:<12}",
            key,
            time,
            written_at(time),
            state_styled
        );
    }

    println!();
    println!("{} key(s)", state.len());
}

fn print_json(state: &KeyState) -> KeystampResult<()> {
    #[derive(serde::Serialize)]
    struct KeyJson<'a> {
        key: &'a str,
        key_time: Timestamp,
        set: bool,
    }

    let keys: Vec<KeyJson<'_>> = state
        .entries()
        .map(|(key, _)| {
            let key_time = state.key_time(key);
            KeyJson {
                key,
                key_time,
                set: key_time >= MIN_VALID_KEY,
            }
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&keys)?);
    Ok(())
}

fn print_plain(state: &KeyState) {
    for (key, _) in state.entries() {
        println!("{}", key);
    }
}
