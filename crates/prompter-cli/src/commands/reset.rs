use anyhow::Result;

use prompter_core::{AppConfig, PrompterConfig};

pub fn run(mut config: AppConfig) -> Result<()> {
    config.prompter = PrompterConfig::default();
    config.save()?;

    println!("Prompter settings restored to defaults");
    Ok(())
}
