//! The `itquiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create itquiz.toml
    if std::path::Path::new("itquiz.toml").exists() {
        println!("itquiz.toml already exists, skipping.");
    } else {
        std::fs::write("itquiz.toml", SAMPLE_CONFIG)?;
        println!("Created itquiz.toml");
    }

    // Create example question bank
    std::fs::create_dir_all("banks")?;
    let example_path = std::path::Path::new("banks/example.toml");
    if example_path.exists() {
        println!("banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit itquiz.toml to point at your leaderboard");
    println!("  2. Run: itquiz validate --bank banks/example.toml");
    println!("  3. Run: itquiz play --bank banks/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# itquiz configuration

leaderboard_limit = 10
feedback_delay_ms = 900
# bank = "banks/example.toml"

# Local leaderboard (default)
[leaderboard]
type = "file"
path = "./itquiz-scores.json"

# Remote leaderboard
# [leaderboard]
# type = "http"
# base_url = "https://scores.example.com/api"
# api_key = "${ITQUIZ_API_KEY}"
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "example"
name = "Example Question Bank"
description = "A small bank to get started"
points_per_correct = 50

[[questions]]
prompt = "Which shortcut locks a Windows computer immediately?"
options = ["Ctrl + Esc", "Alt + F4", "Win + L", "Ctrl + Alt + Del", "Shift + F1"]
correct = "Win + L"

[[questions]]
prompt = "You find a USB stick in the office. What should you do?"
options = [
    "Plug it in to see what is on it",
    "Format it and keep it",
    "Hand it to the IT team for analysis",
    "Open it in a VM without telling IT",
    "Copy it to your network folder",
]
correct = "Hand it to the IT team for analysis"

[[questions]]
prompt = "What is the main benefit of multi-factor authentication?"
options = [
    "It replaces passwords entirely",
    "It lets you share accounts safely",
    "It adds a layer beyond the password, making unauthorized access harder",
    "It avoids system updates",
    "It grants automatic access on public networks",
]
correct = "It adds a layer beyond the password, making unauthorized access harder"
"#;
