//! One-shot commands that run a single tool and print its text.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;
use std::future::Future;

async fn with_spinner<F>(msg: &str, fut: F) -> String
where
    F: Future<Output = String>,
{
    let spinner = Output::spinner(msg);
    let text = fut.await;
    spinner.finish_and_clear();
    text
}

/// Run the transcript command.
pub async fn run_transcript(video: &str, settings: Settings) -> Result<()> {
    let orchestrator = Orchestrator::new(settings)?;
    let text = with_spinner("Fetching transcript...", orchestrator.get_full_transcript(video)).await;
    println!("{}", text.trim_end());
    Ok(())
}

/// Run the info command.
pub async fn run_info(video: &str, settings: Settings) -> Result<()> {
    let orchestrator = Orchestrator::new(settings)?;
    let text = with_spinner(
        "Fetching video information...",
        orchestrator.get_video_information(video),
    )
    .await;
    println!("{}", text);
    Ok(())
}

/// Run the search command.
pub async fn run_search(
    video: &str,
    query: &str,
    context_window: Option<u32>,
    settings: Settings,
) -> Result<()> {
    let orchestrator = Orchestrator::new(settings)?;
    let text = with_spinner(
        "Searching transcript...",
        orchestrator.search_transcript(video, query, context_window),
    )
    .await;
    println!("{}", text.trim_end());
    Ok(())
}

/// Run the section command.
pub async fn run_section(video: &str, start: f64, end: f64, settings: Settings) -> Result<()> {
    let orchestrator = Orchestrator::new(settings)?;
    let text = with_spinner(
        "Fetching transcript...",
        orchestrator.get_transcript_section(video, start, end),
    )
    .await;
    println!("{}", text.trim_end());
    Ok(())
}
