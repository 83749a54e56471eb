use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, metric, success, warning};
use std::path::Path;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };

    let path = Config::config_file();

    if *print_config {
        let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
        println!("📄 Current configuration ({}):\n", path.display());
        println!("{yaml}");
        metric("Effective SS rate", format!("{:.0} %", cfg.ss_rate() * 100.0));
    }

    if *edit_config {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });
        let requested = editor.clone().unwrap_or_else(|| default_editor.clone());

        let edited = if open_in_editor(&requested, &path) {
            Some(requested)
        } else {
            warning(format!(
                "Editor '{requested}' not available, falling back to '{default_editor}'"
            ));
            open_in_editor(&default_editor, &path).then_some(default_editor)
        };

        match edited {
            Some(used) => {
                // a bad rate or policy is reported now, not on the next command
                Config::load_from(&path)?;
                success(format!("Configuration file edited using '{used}'"));
            }
            None => error("Failed to edit the configuration file"),
        }
    }

    Ok(())
}

fn open_in_editor(editor: &str, path: &Path) -> bool {
    Command::new(editor)
        .arg(path)
        .status()
        .is_ok_and(|s| s.success())
}
