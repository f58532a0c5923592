//! The `typequiz play` command.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use typequiz_client::{create_backend, load_config_from};
use typequiz_core::engine::{QuizEngine, ScreenObserver};
use typequiz_core::model::Choice;
use typequiz_core::session::Phase;
use typequiz_core::view::View;

use crate::render::render_view;

/// Prints every screen change to stdout.
struct TerminalScreen;

impl ScreenObserver for TerminalScreen {
    fn on_view(&self, view: &View) {
        print!("{}", render_view(view));
        if let Err(e) = std::io::stdout().flush() {
            tracing::debug!("failed to flush stdout: {e}");
        }
    }
}

/// Line-oriented prompts on stdin.
struct Prompter {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompter {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Show `prompt` and read one line. `None` means stdin is closed.
    async fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt}");
        std::io::stdout().flush()?;
        Ok(self.lines.next_line().await?)
    }
}

pub async fn execute(config_path: Option<PathBuf>, base_url: Option<String>) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(url) = base_url {
        config.base_url = url;
    }
    let backend = Arc::new(create_backend(&config)?);
    tracing::debug!(base_url = %config.base_url, "starting quiz session");
    let mut engine = QuizEngine::new(backend);
    let screen = TerminalScreen;
    let mut prompter = Prompter::new();

    let mut ready = engine.load(&screen).await?;
    loop {
        if !ready {
            anyhow::bail!("could not load questions from {}", config.base_url);
        }

        match prompter.ask("Press Enter to start (q to quit): ").await? {
            Some(line) if !line.trim().eq_ignore_ascii_case("q") => {}
            _ => return Ok(()),
        }
        engine.start(&screen)?;

        while matches!(engine.controller().phase(), Phase::AwaitingAnswer(_)) {
            let Some(line) = prompter.ask("Your answer [a/b]: ").await? else {
                anyhow::bail!("input closed before the quiz was finished");
            };
            match line.parse::<Choice>() {
                Ok(choice) => engine.answer(choice, &screen).await?,
                Err(e) => {
                    tracing::debug!("rejected input: {line:?}");
                    println!("{e}");
                }
            }
        }

        match prompter.ask("\nPlay again? [y/N]: ").await? {
            Some(line) if line.trim().eq_ignore_ascii_case("y") => {
                ready = engine.restart(&screen).await?;
            }
            _ => return Ok(()),
        }
    }
}
