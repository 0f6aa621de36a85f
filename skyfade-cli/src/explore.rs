//! Interactive mode: every line read is a new selection.
//!
//! Lookups run in the background; only the result for the latest selection
//! is shown.

use anyhow::Context;
use skyfade_core::{
    Config, Coordinate, FetchError, Session, SunData, SunFetcher, Ticket,
    present::sun_position_label,
};
use std::{io::Write, sync::Arc};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};

use crate::render;

type Completion = (Ticket, Result<SunData, FetchError>);

pub async fn run(config: &Config, zoom: u8) -> anyhow::Result<()> {
    let fetcher = Arc::new(SunFetcher::from_config(config));
    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut session = Session::new();

    println!("Enter a coordinate as 'lat,lng' (q to quit).");
    prompt();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };

                match Command::parse(&line) {
                    Command::Quit => break,
                    Command::Skip => prompt(),
                    Command::Invalid(message) => {
                        eprintln!("{message}");
                        prompt();
                    }
                    Command::Select(coordinate) => {
                        let ticket = session.select(coordinate);
                        tracing::debug!(%coordinate, "dispatching lookup");
                        println!(
                            "Fetching sunset data for {coordinate} (sun toward {})...",
                            sun_position_label(ticket.azimuth())
                        );

                        let fetcher = Arc::clone(&fetcher);
                        let tx = tx.clone();
                        tokio::spawn(async move {
                            let result = fetcher.fetch(&ticket.coordinate()).await;
                            // receiver is gone once the loop has exited
                            let _ = tx.send((ticket, result));
                        });
                    }
                }
            }
            Some((ticket, result)) = rx.recv() => {
                let coordinate = ticket.coordinate();
                if !session.complete(ticket, result) {
                    tracing::debug!(%coordinate, "superseded lookup finished");
                } else {
                    println!();
                    render::print_state(session.state(), &config.tiles, zoom, false)?;
                    prompt();
                }
            }
        }
    }

    Ok(())
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

#[derive(Debug, PartialEq)]
enum Command {
    Select(Coordinate),
    Quit,
    Skip,
    Invalid(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" => Self::Skip,
            "q" | "quit" | "exit" => Self::Quit,
            _ => match Coordinate::parse(line) {
                Ok(coordinate) => Self::Select(coordinate),
                Err(err) => {
                    tracing::debug!(line, error = %err, "rejected input line");
                    Self::Invalid(err.to_string())
                }
            },
        }
    }
}
