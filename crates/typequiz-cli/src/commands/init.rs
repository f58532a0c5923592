//! The `typequiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("typequiz.toml").exists() {
        println!("typequiz.toml already exists, skipping.");
    } else {
        std::fs::write("typequiz.toml", SAMPLE_CONFIG)?;
        println!("Created typequiz.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point base_url in typequiz.toml at your quiz server");
    println!("  2. Run: typequiz questions");
    println!("  3. Run: typequiz play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# typequiz configuration

# Quiz server root. ${VAR} references are expanded from the environment,
# and TYPEQUIZ_BASE_URL overrides this value.
base_url = "http://localhost:8080"

start_path = "/api/mbti/start"
result_path = "/api/mbti/result"

# Client-side request timeout in seconds. Leave unset to wait for the server.
# request_timeout_secs = 60
"#;
