//! Terminal front end: one fetch action, one read-only display and an error
//! notice. Everything about presentation lives here; the pipeline only
//! returns values.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error};

use crate::messages::{error_dialog_text, FETCHING, FETCH_PROMPT};
use crate::report::{Report, Reporter};

/// What the user asked for on one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fetch,
    Quit,
}

pub fn parse_action(line: &str) -> Action {
    match line.trim().to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => Action::Quit,
        _ => Action::Fetch,
    }
}

/// Run the fetch on its own task so a panic inside the pipeline is reported
/// instead of tearing down the session.
pub async fn fetch(reporter: Arc<Reporter>) -> Option<Report> {
    let task = tokio::spawn(async move { reporter.run().await });
    match task.await {
        Ok(report) => Some(report),
        Err(err) => {
            error!(error = %err, "fetch task failed");
            None
        }
    }
}

/// Drive the prompt loop until the input ends or the user quits.
pub async fn run_session<R, W, E>(
    reporter: Arc<Reporter>,
    input: R,
    mut display: W,
    mut notices: E,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    loop {
        display.write_all(format!("{FETCH_PROMPT}\n").as_bytes()).await?;
        display.flush().await?;

        let Some(line) = lines.next_line().await? else {
            debug!("input closed");
            break;
        };
        if parse_action(&line) == Action::Quit {
            break;
        }

        display.write_all(format!("{FETCHING}\n").as_bytes()).await?;
        display.flush().await?;

        match fetch(Arc::clone(&reporter)).await {
            Some(report) => {
                display
                    .write_all(format!("\n{}\n\n", report.visible).as_bytes())
                    .await?;
                display.flush().await?;
                if report.has_failures() {
                    show_error(&mut notices).await?;
                }
            }
            None => {
                reporter
                    .error_log()
                    .record("Unexpected failure while fetching IP details");
                show_error(&mut notices).await?;
            }
        }
    }
    Ok(())
}

async fn show_error<E: AsyncWrite + Unpin>(notices: &mut E) -> Result<()> {
    notices
        .write_all(format!("{}\n", error_dialog_text()).as_bytes())
        .await?;
    notices.flush().await?;
    Ok(())
}
