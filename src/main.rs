use anyhow::{Context, Result};
use clap::Parser;
use dungeon_explorer::{Command, GameConfig, GameSession, Progress};
use error::handle_error;
use hero::HeroError;
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = GameConfig::parse();
    let mut session = match config.load.clone() {
        Some(path) => GameSession::resume(config, &path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => GameSession::new(config).context("Failed to create the dungeon")?,
    };

    println!(
        "A dungeon of {} rooms awaits (seed {}). Type 'help' for commands.",
        session.graph().len(),
        session.seed()
    );
    if let Ok(text) = session.describe() {
        println!("{}", text);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match session.execute(command) {
            Ok(reply) => println!("{}", reply),
            Err(HeroError::Game(e)) => println!("{}", handle_error(&e)),
            Err(e) => println!("{}", e),
        }

        if command == Command::Quit || session.progress() != Progress::Playing {
            break;
        }
    }

    Ok(())
}
