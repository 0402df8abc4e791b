//! taskdesk init command implementation
//!
//! Creates the data directory, a default config file, and the seed snapshot.

use std::path::PathBuf;

use crate::cli::Context;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput};

#[derive(serde::Serialize)]
struct InitReport {
    root: PathBuf,
    created_state: bool,
    created_config: bool,
}

pub fn run(ctx: &Context) -> Result<()> {
    let had_config = ctx.root.config_path().exists();
    let created_state = ctx.root.init()?;

    let report = InitReport {
        root: ctx.root.path().to_path_buf(),
        created_state,
        created_config: !had_config,
    };

    let header = if created_state || report.created_config {
        "taskdesk init: initialized data root"
    } else {
        "taskdesk init: nothing to do"
    };
    let mut human = HumanOutput::new(header);
    human.push_summary("root", ctx.root.path().display().to_string());
    human.push_summary(
        "state",
        if created_state { "created" } else { "existing" },
    );
    human.push_summary(
        "config",
        if report.created_config {
            "created"
        } else {
            "existing"
        },
    );

    emit_success(ctx.output(), "init", &report, Some(&human))
}
