// Terminal front end for the Intelligent Enterprise Assistant.
//
// Reads commands from stdin, dispatches each one to the assistant on its own
// task, and prints the render events the assistant emits.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use assistant_client::{
    Assistant, AssistantError, ClientOptions, Credential, DocumentFile, render,
};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Environment variable carrying a `name=value` session cookie to resume
const ENV_SESSION_COOKIE: &str = "ASSISTANT_SESSION_COOKIE";

/// Canned queries offered as quick actions
const QUICK_ACTIONS: &[&str] = &[
    "What is the leave policy?",
    "How do I reset my password?",
    "Who do I contact for IT support?",
    "How do I submit an expense report?",
];

const HELP: &str = "\
Commands:
  /email <address>   request a verification code
  /code <code>       verify the code
  /back              return to the email step
  /logout            sign out
  /upload <path>     analyse a PDF, DOCX, or TXT file (max 10MB)
  /quick <n>         send quick action n
  /clear             clear the conversation
  /stats             show chat statistics
  /status            show connection status
  /help              show this help
  /quit              exit
Anything else is sent as a chat message.";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Email(String),
    Code(String),
    Back,
    Logout,
    Upload(PathBuf),
    Quick(usize),
    Clear,
    Stats,
    Status,
    Help,
    Quit,
    Chat(String),
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Some(Command::Chat(line.to_string()));
    };
    let (name, arg) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(name, arg)| (name, arg.trim()));
    let command = match name {
        "email" => Command::Email(arg.to_string()),
        "code" => Command::Code(arg.to_string()),
        "back" => Command::Back,
        "logout" => Command::Logout,
        "upload" => Command::Upload(PathBuf::from(arg)),
        "quick" => Command::Quick(arg.parse().unwrap_or(0)),
        "clear" => Command::Clear,
        "stats" => Command::Stats,
        "status" => Command::Status,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return None,
    };
    Some(command)
}

async fn dispatch(assistant: &Assistant, command: Command) -> assistant_client::Result<()> {
    match command {
        Command::Email(email) => assistant.submit_email(&email).await,
        Command::Code(code) => assistant.submit_code(&code).await,
        Command::Back => {
            assistant.go_back();
            Ok(())
        }
        Command::Logout => {
            assistant.logout().await;
            Ok(())
        }
        Command::Upload(path) => {
            let file = DocumentFile::from_path(&path).await?;
            assistant.select_file(file).await.map(|_| ())
        }
        Command::Quick(n) => match n.checked_sub(1).and_then(|i| QUICK_ACTIONS.get(i)) {
            Some(query) => assistant.send(query).await.map(|_| ()),
            None => {
                println!("Quick actions:");
                for (i, query) in QUICK_ACTIONS.iter().enumerate() {
                    println!("  {}. {query}", i + 1);
                }
                Ok(())
            }
        },
        Command::Clear => {
            assistant.clear_chat();
            Ok(())
        }
        Command::Stats => {
            println!("{}", render::format_statistics(&assistant.statistics()));
            Ok(())
        }
        Command::Chat(text) => assistant.send(&text).await.map(|_| ()),
        Command::Status | Command::Help | Command::Quit => Ok(()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let options = ClientOptions::from_env().context("loading configuration")?;
    let credential = match std::env::var(ENV_SESSION_COOKIE) {
        Ok(cookie) => Credential::with_session_cookie(&options.base_url, &cookie)?,
        Err(_) => Credential::new(),
    };
    log::info!("Using backend {}", options.base_url);

    let mut assistant = Assistant::connect(options, credential)?;
    let mut events = assistant
        .take_event_receiver()
        .context("event receiver already taken")?;
    let assistant = Arc::new(assistant);

    let renderer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            if let Some(line) = render::render_event(&event) {
                println!("{line}");
            }
        }
    });

    let mut monitor = assistant.start_monitor();
    assistant.restore_session().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("reading stdin")?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else { break };
        let Some(command) = parse_command(&line) else {
            if !line.trim().is_empty() {
                println!("Unknown command. Type /help for a list.");
            }
            continue;
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Status => println!("Connection: {}", monitor.status()),
            command => {
                let assistant = Arc::clone(&assistant);
                tokio::spawn(async move {
                    match dispatch(&assistant, command).await {
                        Err(e @ (AssistantError::Busy(_) | AssistantError::InvalidState(_))) => {
                            println!("✗ {e}");
                        }
                        Err(AssistantError::Io(e)) => println!("✗ Cannot read file: {e}"),
                        Err(e) => log::debug!("Command failed: {e}"),
                        Ok(()) => {}
                    }
                });
            }
        }
    }

    monitor.shutdown();
    renderer.abort();
    log::info!("Shutting down");
    Ok(())
}
