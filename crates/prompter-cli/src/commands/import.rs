use std::path::Path;

use anyhow::{Context, Result};

use prompter_core::{AppConfig, Script, ScriptLibrary};

pub fn run(mut config: AppConfig, path: &Path, title: Option<String>) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let title = title.unwrap_or_else(|| {
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Untitled")
            .to_string()
    });

    let script = Script::new(title, content);
    let library = ScriptLibrary::new(AppConfig::scripts_dir());
    let stored = library.save(&script)?;

    config.set_active_script(&script);
    config.save()?;

    println!(
        "Imported '{}' ({} words), now the active script",
        script.title,
        script.word_count()
    );
    println!("  id:     {}", script.id);
    println!("  stored: {}", stored.display());
    Ok(())
}
