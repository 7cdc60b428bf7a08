use anyhow::Result;

use prompter_core::{AppConfig, ScriptLibrary};

pub fn run() -> Result<()> {
    let library = ScriptLibrary::new(AppConfig::scripts_dir());
    let scripts = library.list()?;

    if scripts.is_empty() {
        println!("No stored scripts. Import one with: prompter import <file>");
        return Ok(());
    }

    println!("{:<36}  {:<16}  {:>6}  TITLE", "ID", "CREATED", "WORDS");
    for script in scripts {
        println!(
            "{:<36}  {:<16}  {:>6}  {}",
            script.id,
            script.created_at.format("%Y-%m-%d %H:%M"),
            script.word_count(),
            script.title
        );
    }
    Ok(())
}
