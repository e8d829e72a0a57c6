//! `furb explain`: Print the documentation of a check.

use furb_engine::{checks, ErrorCode};

use crate::output::{resolve_color_choice, StyledOutput};

pub fn execute(code: ErrorCode, color: Option<&str>) -> anyhow::Result<()> {
    let mut out = StyledOutput::new(resolve_color_choice(color));

    let Some(check) = checks::find(code) else {
        out.stderr_error(&format!("Error code {} not found", code));
        out.flush();
        std::process::exit(1);
    };

    out.bold(&format!("{}", code));
    out.plain(&format!(" ({}, runs on {})", check.name, check.kind()));
    if !check.enabled {
        out.info(" disabled by default");
    }
    out.newline();
    out.newline();
    out.plain(check.docs.trim_end());
    out.newline();
    out.flush();
    Ok(())
}
