use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use tictac::{init_logging, ClientConfig, ConsoleSink, GameClient, FIELD_SIZE};

#[derive(Parser)]
#[command(author, version, about = "WebSocket client for a multiplayer tic-tac-toe server", long_about = None)]
struct Cli {
    /// Game server to join, as host:port.
    #[arg(long, default_value = "127.0.0.1:7777")]
    host: String,
    /// Field side length; must match the server's board.
    #[arg(long, default_value_t = FIELD_SIZE)]
    field_size: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = ClientConfig::new(cli.host).with_field_size(cli.field_size);

    println!("Connecting to {}...", config.url());
    let mut client = match GameClient::connect(&config, ConsoleSink).await {
        Ok(client) => client,
        Err(err) => {
            // No transport means no session; report and stop.
            println!("Sorry, the game server is not reachable over WebSocket.");
            log::error!("connect failed: {}", err);
            return Ok(());
        }
    };
    println!("Enter moves as: <row> <column>");

    let (click_tx, click_rx) = mpsc::channel(8);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            match parse_click(&line) {
                Some(click) => {
                    if click_tx.send(click).await.is_err() {
                        break;
                    }
                }
                None => println!("Could not read that as a move; use: <row> <column>"),
            }
        }
    });

    client.run(click_rx).await;
    Ok(())
}

fn parse_click(line: &str) -> Option<(usize, usize)> {
    let mut parts = line.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let column = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((row, column))
}
