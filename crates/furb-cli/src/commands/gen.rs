//! `furb gen`: Scaffold a new check module interactively.

use std::path::PathBuf;

use anyhow::Context;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{FuzzySelect, Input};
use furb_engine::scaffold::{self, ScaffoldError, ScaffoldRequest, BASE_DIR};
use furb_engine::NodeKind;

pub fn execute() -> anyhow::Result<()> {
    let theme = ColorfulTheme::default();

    // 1. Node kind; cancelling (Esc, Ctrl-C, no terminal) aborts
    let names: Vec<&str> = NodeKind::names().collect();
    let selection = FuzzySelect::with_theme(&theme)
        .with_prompt("Node type")
        .items(&names)
        .interact_opt()
        .unwrap_or(None);
    let Some(node_kind) = selection.and_then(|index| NodeKind::ALL.get(index).copied()) else {
        std::process::exit(1);
    };

    // 2. Target path
    let Ok(target) = Input::<String>::with_theme(&theme)
        .with_prompt("File")
        .with_initial_text(BASE_DIR)
        .interact_text()
    else {
        std::process::exit(1);
    };

    // 3. Generate
    let request = ScaffoldRequest {
        node_kind,
        target: PathBuf::from(target.trim()),
    };
    let cwd = std::env::current_dir().context("Cannot read the current directory")?;
    match scaffold::generate(&request, &cwd) {
        Ok(generated) => {
            for marker in &generated.created_markers {
                log::info!("Created {}", marker.display());
            }
            println!("Generated {}", request.target.display());
            match &generated.registered_in {
                Some(registry) => println!("Registered Error{} in {}", generated.error_name, registry.display()),
                None => println!(
                    "Add its `CHECK` to `all_checks()` in {}mod.rs to register Error{}.",
                    BASE_DIR, generated.error_name
                ),
            }
            Ok(())
        }
        Err(err @ (ScaffoldError::InvalidExtension(_) | ScaffoldError::InvalidModuleName(_))) => {
            println!("furb: {}", err);
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}
