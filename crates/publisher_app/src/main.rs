//! Command-line shell around the publisher core and engine.

mod config;
mod effects;
mod logging;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use publisher_core::{update, AppState, Msg, PublishState, StatusLevel};

use crate::effects::EffectRunner;

const RESULT_TIMEOUT: Duration = Duration::from_secs(120);

const USAGE: &str = "usage:
  publisher_app [--config <path>] configure <token> <repo-url> [--no-date-prefix]
  publisher_app [--config <path>] test
  publisher_app [--config <path>] publish <file|-> [--title <title>]";

enum Command {
    Configure {
        token: String,
        repo_url: String,
        date_prefix: bool,
    },
    Test,
    Publish {
        file: String,
        title: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    logging::initialize(logging::LogDestination::File);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (command, config_path) = parse_args(&args)?;

    match command {
        Command::Configure {
            token,
            repo_url,
            date_prefix,
        } => run_configure(&config_path, token, repo_url, date_prefix),
        Command::Test => run_session(&config_path, SessionRequest::Test),
        Command::Publish { file, title } => {
            let content = read_content(&file)?;
            run_session(&config_path, SessionRequest::Publish { content, title })
        }
    }
}

fn parse_args(args: &[String]) -> anyhow::Result<(Command, PathBuf)> {
    let mut config_path = PathBuf::from(config::CONFIG_FILENAME);
    let mut title = None;
    let mut date_prefix = true;
    let mut positional = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                config_path = PathBuf::from(iter.next().context("--config needs a path")?);
            }
            "--title" => {
                title = Some(iter.next().context("--title needs a value")?.to_string());
            }
            "--no-date-prefix" => date_prefix = false,
            flag if flag.starts_with('-') && flag != "-" => {
                bail!("unknown flag {flag}\n{USAGE}");
            }
            _ => positional.push(arg.clone()),
        }
    }

    let command = match positional.first().map(String::as_str) {
        Some("configure") => match (positional.get(1), positional.get(2)) {
            (Some(token), Some(repo_url)) => Command::Configure {
                token: token.clone(),
                repo_url: repo_url.clone(),
                date_prefix,
            },
            _ => bail!("configure needs a token and a repository URL\n{USAGE}"),
        },
        Some("test") => Command::Test,
        Some("publish") => match positional.get(1) {
            Some(file) => Command::Publish {
                file: file.clone(),
                title,
            },
            None => bail!("publish needs a markdown file\n{USAGE}"),
        },
        _ => bail!("{USAGE}"),
    };

    Ok((command, config_path))
}

fn read_content(file: &str) -> anyhow::Result<String> {
    if file == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(file).with_context(|| format!("failed to read {file}"))
    }
}

fn run_configure(
    path: &Path,
    token: String,
    repo_url: String,
    date_prefix: bool,
) -> anyhow::Result<()> {
    let stored = config::StoredConfig {
        token,
        repo_url,
        date_prefix,
    };
    let resolved = config::resolve(&stored).context("invalid configuration")?;
    config::save_config(path, &stored);
    println!(
        "Saved configuration for {}/{} to {}",
        resolved.owner,
        resolved.repo,
        path.display()
    );
    Ok(())
}

enum SessionRequest {
    Test,
    Publish {
        content: String,
        title: Option<String>,
    },
}

fn run_session(config_path: &Path, request: SessionRequest) -> anyhow::Result<()> {
    let stored = config::load_config(config_path).with_context(|| {
        format!(
            "no configuration at {}; run `configure` first",
            config_path.display()
        )
    })?;
    let repo_config = config::resolve(&stored).context("stored configuration is invalid")?;

    let (msg_tx, msg_rx) = mpsc::channel();
    let runner = EffectRunner::new(msg_tx, repo_config.clone());
    let mut session = Session {
        state: AppState::new(),
        runner,
        last_status: None,
    };

    session.dispatch(Msg::ConfigLoaded(repo_config));
    match request {
        SessionRequest::Test => session.dispatch(Msg::TestConnectionClicked),
        SessionRequest::Publish { content, title } => {
            if let Some(title) = title {
                session.dispatch(Msg::TitleChanged(title));
            }
            session.dispatch(Msg::ContentChanged(content));
            session.dispatch(Msg::PublishClicked);
        }
    }

    // Validation can reject the request before anything reaches the engine.
    let view = session.state.view();
    let waiting = view.session == PublishState::Publishing || view.probing;
    if waiting {
        wait_for_completion(&mut session, &msg_rx)?;
    }

    let view = session.state.view();
    match view.status {
        Some(status) if status.level == StatusLevel::Error => bail!("{}", status.text),
        _ => Ok(()),
    }
}

fn wait_for_completion(session: &mut Session, msg_rx: &mpsc::Receiver<Msg>) -> anyhow::Result<()> {
    let deadline = Instant::now() + RESULT_TIMEOUT;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            bail!("timed out waiting for the engine");
        }
        match msg_rx.recv_timeout(remaining) {
            Ok(msg) => {
                let done = matches!(
                    msg,
                    Msg::PublishFinished { .. } | Msg::ConnectionTested { .. }
                );
                session.dispatch(msg);
                if done {
                    return Ok(());
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => bail!("timed out waiting for the engine"),
            Err(mpsc::RecvTimeoutError::Disconnected) => bail!("engine event channel closed"),
        }
    }
}

struct Session {
    state: AppState,
    runner: EffectRunner,
    last_status: Option<String>,
}

impl Session {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.runner.run(effects);
        if state.consume_dirty() {
            if let Some(status) = state.view().status {
                if self.last_status.as_deref() != Some(status.text.as_str()) {
                    println!("{}", status.text);
                    self.last_status = Some(status.text);
                }
            }
        }
        self.state = state;
    }
}
