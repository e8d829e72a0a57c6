//! `furb list`: Show every check and the node kind it runs on.

use furb_engine::checks;

use crate::output::{resolve_color_choice, StyledOutput};

pub fn execute(color: Option<&str>) -> anyhow::Result<()> {
    let mut out = StyledOutput::new(resolve_color_choice(color));

    let mut all = checks::all_checks();
    all.sort_by_key(|check| check.code);

    for check in &all {
        out.bold(&check.error_code().to_string());
        out.plain(&format!("  {:<16} {}", check.kind().name(), check.name));
        if !check.enabled {
            out.info(" (disabled)");
        }
        out.newline();
    }

    out.newline();
    out.plain(&format!(
        "{} check{}.",
        all.len(),
        if all.len() == 1 { "" } else { "s" }
    ));
    out.newline();
    out.flush();
    Ok(())
}
