//! Application run modes: logger init, format, single question, interactive chat.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::Args;
use crate::core;
use crate::core::api::ApiClient;
use crate::core::chat::{self, ChatError};
use crate::core::message::Message;
use crate::core::session::Session;
use crate::format;

/// Chat subcommand options.
pub struct ChatArgs {
    pub dataset: PathBuf,
    pub prompt: Option<String>,
    pub html: bool,
    pub width: usize,
    pub transcript: Option<PathBuf>,
}

/// Initialize env_logger. In interactive chat, writes to file to keep the terminal clean.
pub fn init_logger(args: &Args) {
    let log_level = args.log_level();
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level));

    if args.is_interactive() {
        if let Some(path) = core::paths::log_file()
            && let Ok(file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
        {
            logger.target(env_logger::Target::Pipe(Box::new(file)));
        }
    }
    let _ = logger.try_init();
}

/// Run the `format` command: print the HTML fragment for a file or stdin.
pub fn run_format(input: &str) -> Result<(), Box<dyn std::error::Error>> {
    let text = if input == "-" {
        io::read_to_string(io::stdin())?
    } else {
        std::fs::read_to_string(input)?
    };
    println!("{}", format::format(&text));
    Ok(())
}

fn print_reply(message: &Message, opts: &ChatArgs) {
    if opts.html {
        println!("{}", format::format(&message.content));
    } else {
        for line in format::wrap_message(&message.content, opts.width) {
            println!("{}", line);
        }
    }
}

fn announce_dataset(session: &Session) {
    if let Some(active) = session.dataset() {
        eprintln!(
            "Loaded {} (id {})",
            active.file.name,
            active.file_id.as_deref().unwrap_or("-")
        );
    }
}

fn save_transcript(session: &Session, path: Option<&Path>) {
    match core::transcript::save(session, path) {
        Ok(p) => eprintln!("Transcript saved to {}", p.display()),
        Err(e) => eprintln!("Error saving transcript: {}", e),
    }
}

/// Run the `chat` command: upload the dataset, then answer one question or loop on stdin.
pub async fn run_chat(
    server: Option<&str>,
    opts: ChatArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = core::cli::load_config(server);
    let client = core::cli::client(&config);
    let mut session = Session::new();

    if let Err(e) = chat::open_dataset(&mut session, &client, &opts.dataset).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    announce_dataset(&session);

    match opts.prompt.as_deref() {
        Some(prompt) => {
            let question = if prompt == "-" {
                io::read_to_string(io::stdin())?
            } else {
                prompt.to_string()
            };
            match chat::ask(&mut session, &client, &question).await {
                Ok(Some(reply)) => print_reply(reply, &opts),
                Ok(None) => {
                    eprintln!("Error: empty prompt");
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        None => interactive(&mut session, &client, &opts).await?,
    }

    if let Some(path) = opts.transcript.as_deref() {
        save_transcript(&session, Some(path));
    }
    Ok(())
}

fn prompt_marker() -> io::Result<()> {
    let mut out = io::stdout();
    write!(out, "> ")?;
    out.flush()
}

async fn interactive(
    session: &mut Session,
    client: &ApiClient,
    opts: &ChatArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(welcome) = session.transcript().last() {
        print_reply(welcome, opts);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt_marker()?;
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        match command {
            "/quit" | "/exit" => break,
            "/reset" => {
                session.reset();
                println!("Session cleared. Use /open <path> to upload a dataset.");
            }
            "/open" if rest.is_empty() => eprintln!("Usage: /open <path>"),
            "/open" => match chat::open_dataset(session, client, Path::new(rest)).await {
                Ok(()) => {
                    announce_dataset(session);
                    if let Some(welcome) = session.transcript().last() {
                        print_reply(welcome, opts);
                    }
                }
                Err(e) => eprintln!("{}", e),
            },
            "/save" => {
                let path = (!rest.is_empty()).then(|| Path::new(rest));
                save_transcript(session, path);
            }
            _ => match chat::ask(session, client, line).await {
                Ok(Some(reply)) => print_reply(reply, opts),
                Ok(None) => {}
                Err(e @ ChatError::NoDataset) => println!("{}", e),
                Err(e) => eprintln!("Error: {}", e),
            },
        }
        prompt_marker()?;
    }
    Ok(())
}
