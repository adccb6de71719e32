//! Interactive concierge REPL against the live Gemini API.
//! Requires `GEMINI_API_KEY` in your environment; set `LIT_GUIDE_LAT` /
//! `LIT_GUIDE_LON` to bias maps grounding toward a position.
//!
//! Run with: `cargo run --example concierge`

use std::io::{self, Write};

use lit_guide::location::EnvLocation;
use lit_guide::{render, ChatSession, GuideCtx};

#[tokio::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lit_guide=info".into()),
        )
        .init();

    let ctx = GuideCtx::from_env();
    let mut session = ChatSession::new();
    session.acquire_location(&EnvLocation).await;

    if let Some(loc) = session.location() {
        println!("(grounding biased toward {:.2}, {:.2})", loc.latitude, loc.longitude);
    }
    println!("{}\n", lit_guide::WELCOME_TEXT);

    let stdin = io::stdin();
    loop {
        print!("You> ");
        io::stdout().flush().ok();

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }
        let text = input.trim();
        if matches!(text, ":exit" | ":quit") {
            break;
        }

        let before = session.messages().len();
        session.submit(&ctx, text).await;
        if session.messages().len() == before {
            continue; // blank input was dropped
        }

        if let Some(reply) = session.messages().last() {
            println!("Guide>");
            for line in render::message_lines(reply) {
                println!("{}", line);
            }
            println!();
        }
    }

    println!("Happy reading!");
    Ok(())
}
