//! Init command - interactive first-run setup.

use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::io::{self, Write};

/// Run the init command for first-time setup.
pub fn run_init(settings: &Settings) -> anyhow::Result<()> {
    Output::header("ytscout Setup");
    println!();
    println!("Welcome to ytscout! Let's make sure everything is configured correctly.\n");

    // Step 1: YouTube API key
    println!("{}", style("Step 1: YouTube Data API key").bold().cyan());
    println!();

    if settings.youtube.resolve_api_key().is_none() {
        Output::warning("No YouTube API key found.");
        println!();
        println!("  ytscout needs a Data API v3 key for searches and lookups.");
        println!(
            "  Create one in the Google Cloud console: {}",
            style("https://console.cloud.google.com/apis/credentials").underlined()
        );
        println!();
        println!("  Then either export it:");
        println!("  {}", style("export YOUTUBE_API_KEY='AIza...'").green());
        println!("  or set youtube.api_key in the config file.");
        println!();

        if !prompt_continue("Continue without API key?")? {
            println!();
            Output::info("Setup cancelled. Set your API key and run 'ytscout init' again.");
            return Ok(());
        }
    } else {
        Output::success("YouTube API key is configured!");
    }

    println!();

    // Step 2: OpenAI API key
    println!("{}", style("Step 2: OpenAI API key").bold().cyan());
    println!();

    if std::env::var("OPENAI_API_KEY").is_err() {
        Output::warning("OPENAI_API_KEY environment variable is not set.");
        println!();
        println!("  The chat and agent commands need an OpenAI API key.");
        println!(
            "  Get your API key from: {}",
            style("https://platform.openai.com/api-keys").underlined()
        );
        println!();
        println!("  Set it in your shell configuration (~/.bashrc, ~/.zshrc, etc.):");
        println!("  {}", style("export OPENAI_API_KEY='sk-...'").green());
        println!();

        if !prompt_continue("Continue without API key?")? {
            println!();
            Output::info("Setup cancelled. Set your API key and run 'ytscout init' again.");
            return Ok(());
        }
    } else {
        Output::success("OpenAI API key is configured!");
    }

    println!();

    // Step 3: Create config file
    println!("{}", style("Step 3: Configuration file").bold().cyan());
    println!();

    let config_path = Settings::default_config_path();
    if config_path.exists() {
        Output::info(&format!("Config file exists: {}", config_path.display()));
    } else if prompt_continue("Create default configuration file?")? {
        settings.save_to(&config_path)?;
        Output::success(&format!("Created config file: {}", config_path.display()));
        println!();
        println!("  Edit your config with: {}", style("ytscout config edit").green());
    } else {
        Output::info("Skipped config file creation. Using defaults.");
    }

    println!();

    // Summary
    println!("{}", style("Setup Complete!").bold().green());
    println!();
    println!("Next steps:");
    println!("  {} Check configuration", style("ytscout doctor").cyan());
    println!(
        "  {} Search for videos",
        style("ytscout search videos \"<query>\"").cyan()
    );
    println!(
        "  {} Chat with the agent",
        style("ytscout chat").cyan()
    );
    println!();
    println!("For more help: {}", style("ytscout --help").cyan());

    Ok(())
}

/// Prompt user for yes/no confirmation.
fn prompt_continue(message: &str) -> io::Result<bool> {
    print!("{} {} ", style("?").cyan(), message);
    print!("{} ", style("[y/N]").dim());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_lowercase() == "y" || input.trim().to_lowercase() == "yes")
}
