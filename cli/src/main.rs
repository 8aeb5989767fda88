use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use contract::{FileKind, GenerationReply, ReplyError, TOPIC_FIELD};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("topic must not be empty")]
    EmptyTopic,
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("{0}")]
    Reply(ReplyError),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read input: {0}")]
    Input(#[source] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl From<ReplyError> for CliError {
    fn from(err: ReplyError) -> Self {
        match err {
            ReplyError::Server { status, body } => Self::Server { status, message: contract::server_error_message(&body) },
            other => Self::Reply(other),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "deckgen", about = "Generate presentations from the command line")]
struct Cli {
    #[arg(long, env = "DECKGEN_BACKEND_URL", default_value = "http://127.0.0.1:8000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a presentation for a topic in a single request.
    Generate {
        topic: String,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Answer follow-up questions until the backend produces a file.
    Chat {
        topic: Option<String>,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Print the backend's conversation history for a session.
    History {
        #[arg(long, default_value_t = 1)]
        session_id: u64,
    },
}

/// What a single reply amounted to once handled.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Saved { path: PathBuf, kind: FileKind },
    Links { pdf_url: Option<String>, ppt_url: Option<String> },
    FollowUp(String),
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Command::Generate { topic, out_dir } => run_generate(&client, &cli.base_url, &topic, &out_dir).await,
        Command::Chat { topic, out_dir } => run_chat(&client, &cli.base_url, topic, &out_dir).await,
        Command::History { session_id } => run_history(&client, &cli.base_url, session_id).await,
    }
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{path}", base_url.trim_end_matches('/'))
}

fn validate_topic(raw: &str) -> Result<String, CliError> {
    let topic = raw.trim();
    if topic.is_empty() {
        return Err(CliError::EmptyTopic);
    }
    Ok(topic.to_owned())
}

async fn post_topic(client: &reqwest::Client, base_url: &str, topic: &str) -> Result<GenerationReply, CliError> {
    let form = reqwest::multipart::Form::new().text(TOPIC_FIELD, topic.to_owned());
    let response = client.post(endpoint(base_url, "generate")).multipart(form).send().await?;

    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    let body = response.bytes().await?.to_vec();
    Ok(contract::decode_reply(status, &content_type, body)?)
}

async fn write_file(out_dir: &Path, kind: FileKind, bytes: &[u8], millis: u64) -> Result<PathBuf, CliError> {
    let path = out_dir.join(contract::download_filename(kind, millis));
    let to_write_error = |source| CliError::Write { path: path.clone(), source };
    tokio::fs::create_dir_all(out_dir).await.map_err(to_write_error)?;
    tokio::fs::write(&path, bytes).await.map_err(to_write_error)?;
    Ok(path)
}

async fn handle_reply(reply: GenerationReply, out_dir: &Path, millis: u64) -> Result<Outcome, CliError> {
    match reply {
        GenerationReply::File { kind, bytes } => {
            let path = write_file(out_dir, kind, &bytes, millis).await?;
            Ok(Outcome::Saved { path, kind })
        }
        GenerationReply::Links { pdf_url, ppt_url } => Ok(Outcome::Links { pdf_url, ppt_url }),
        GenerationReply::FollowUp(content) => Ok(Outcome::FollowUp(content)),
    }
}

fn describe_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Saved { path, kind: FileKind::Binary } => {
            format!("Received unknown file type. Saved to {}", path.display())
        }
        Outcome::Saved { path, .. } => format!("Saved {}", path.display()),
        Outcome::Links { pdf_url, ppt_url } => {
            let mut lines = Vec::new();
            if let Some(url) = pdf_url {
                lines.push(format!("PDF: {url}"));
            }
            if let Some(url) = ppt_url {
                lines.push(format!("PPTX: {url}"));
            }
            lines.join("\n")
        }
        Outcome::FollowUp(content) => format!("assistant: {content}"),
    }
}

async fn run_generate(client: &reqwest::Client, base_url: &str, topic: &str, out_dir: &Path) -> Result<(), CliError> {
    let topic = validate_topic(topic)?;
    let reply = post_topic(client, base_url, &topic).await?;
    let outcome = handle_reply(reply, out_dir, contract::now_millis()).await?;
    println!("{}", describe_outcome(&outcome));
    Ok(())
}

async fn run_chat(
    client: &reqwest::Client,
    base_url: &str,
    topic: Option<String>,
    out_dir: &Path,
) -> Result<(), CliError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    chat_loop(client, base_url, &mut lines, topic, out_dir).await.map(drop)
}

/// Post turns until the backend sends a file or links, or input runs out.
///
/// A failed request is reported and the next line is read; only input and
/// file-write failures end the conversation.
async fn chat_loop<R>(
    client: &reqwest::Client,
    base_url: &str,
    lines: &mut tokio::io::Lines<R>,
    topic: Option<String>,
    out_dir: &Path,
) -> Result<Option<Outcome>, CliError>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    let mut next = match topic {
        Some(topic) => Some(topic),
        None => prompt_line(lines, "topic> ").await?,
    };

    while let Some(raw) = next {
        if let Ok(utterance) = validate_topic(&raw) {
            match post_topic(client, base_url, &utterance).await {
                Ok(reply) => {
                    let outcome = handle_reply(reply, out_dir, contract::now_millis()).await?;
                    println!("{}", describe_outcome(&outcome));
                    if !matches!(outcome, Outcome::FollowUp(_)) {
                        return Ok(Some(outcome));
                    }
                }
                Err(err) => eprintln!("error: {err}"),
            }
        }
        next = prompt_line(lines, "you> ").await?;
    }
    Ok(None)
}

async fn prompt_line<R>(lines: &mut tokio::io::Lines<R>, prompt: &str) -> Result<Option<String>, CliError>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    let mut stdout = tokio::io::stdout();
    stdout.write_all(prompt.as_bytes()).await.map_err(CliError::Input)?;
    stdout.flush().await.map_err(CliError::Input)?;
    lines.next_line().await.map_err(CliError::Input)
}

async fn run_history(client: &reqwest::Client, base_url: &str, session_id: u64) -> Result<(), CliError> {
    let response = client
        .get(endpoint(base_url, "session_history"))
        .query(&[("session_id", session_id)])
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        return Err(CliError::Server { status: status.as_u16(), message: contract::server_error_message(&text) });
    }
    let json: serde_json::Value = serde_json::from_str(&text)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
