use anyhow::Result;

use prompter_core::{AppConfig, ScriptLibrary};

pub fn run(mut config: AppConfig, id: &str) -> Result<()> {
    let library = ScriptLibrary::new(AppConfig::scripts_dir());
    let script = library.find(id)?;

    config.set_active_script(&script);
    config.save()?;

    println!("Active script is now '{}'", script.title);
    Ok(())
}
