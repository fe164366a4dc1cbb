//! Transcript download command.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::transcript;
use anyhow::Result;

/// Run the transcript command.
pub async fn run_transcript(video: &str, timestamps: bool, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Transcript, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let spinner = Output::spinner("Downloading transcript...");
    let text = transcript::fetch_transcript(
        video,
        timestamps,
        &settings.youtube.transcript_languages,
    )
    .await;
    spinner.finish_and_clear();

    println!("{}", text?);
    Ok(())
}
