//! Agent command implementation.

use crate::agent::{Agent, ToolContext};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::youtube::YouTubeClient;
use anyhow::Result;

/// Run the agent command.
pub async fn run_agent(task: &str, model: Option<String>, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Agent, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'ytscout doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let client = YouTubeClient::from_settings(&settings)?;

    let tool_context = ToolContext::new(
        client,
        settings.youtube.region_code.clone(),
        settings.youtube.transcript_languages.clone(),
    );

    let mut agent = Agent::new(tool_context, &settings.agent);
    if let Some(model) = model {
        agent = agent.with_model(&model);
    }

    let spinner = Output::spinner("Agent working...");

    match agent.run(task).await {
        Ok(response) => {
            spinner.finish_and_clear();

            println!("\n{}\n", response.content);

            if !response.tool_calls.is_empty() {
                Output::header(&format!("Tool calls ({})", response.tool_calls.len()));
                for call in &response.tool_calls {
                    Output::info(&format!("  {} {}", call.name, truncate(&call.arguments, 60)));
                }
                println!();
            }

            Output::info(&format!(
                "Completed in {} iteration(s)",
                response.iterations
            ));
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Agent failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
