//! Save a free-text video prompt for an authoring assistant to pick up.
//!
//! ```text
//! create-video "Product demo with fade-in title and subtitle"
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use scenereel::prompt::{DEFAULT_PROMPTS_DIR, PromptStore, normalize_prompt};

#[derive(Parser, Debug)]
#[command(name = "create-video", version, about = "Record a video prompt")]
struct Cli {
    /// Directory holding latest.txt and history.txt. Relative paths resolve
    /// against the current directory, not the project root.
    #[arg(long, env = "SCENEREEL_PROMPTS_DIR", default_value = DEFAULT_PROMPTS_DIR)]
    dir: PathBuf,

    /// Enable debug logging (RUST_LOG overrides).
    #[arg(short, long)]
    verbose: bool,

    /// Prompt words; joined with single spaces.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    prompt: Vec<String>,
}

const USAGE: &str = r#"
Create Video - record a prompt for a new scene composition

Usage:
  create-video "Your video description here"
  create-video --dir prompts "Create a 10-second intro with my company logo"

Examples:
  create-video "Product demo with fade-in title and subtitle"
  create-video "Cinematic intro with gradient background"
  create-video "Animated list of 5 features with icons"

Then ask your assistant:
  "Create the video animation described in prompts/latest.txt"
"#;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    scenereel::init_logging(cli.verbose);

    let Some(prompt) = normalize_prompt(&cli.prompt) else {
        println!("{USAGE}");
        return Ok(());
    };

    let store = PromptStore::new(&cli.dir);
    let saved = store
        .save(&prompt)
        .with_context(|| format!("save prompt under '{}'", cli.dir.display()))?;

    let latest = &saved.latest_path;
    println!("\nPrompt saved to {}\n", latest.display());
    println!("Your prompt: \"{}\"\n", saved.entry.prompt);
    println!("Next step: ask your assistant:\n");
    println!("  \"Create the video animation described in {}\"\n", latest.display());
    println!("Or inspect a composition: scenereel windows --in <composition.json>\n");
    Ok(())
}
