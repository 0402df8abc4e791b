//! taskdesk stats commands

use crate::cli::Context;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput};
use crate::stats;

pub fn run_summary(ctx: &Context) -> Result<()> {
    let user_id = ctx.user_id()?;
    let repo = ctx.root.load()?;
    let summary = stats::completion_summary(&repo, user_id);

    let mut human = HumanOutput::new(format!("completion summary for user {user_id}"));
    human.push_summary("total", summary.total.to_string());
    human.push_summary("completed", summary.completed.to_string());
    human.push_summary("pending", summary.pending.to_string());
    human.push_summary("completion", format!("{}%", summary.completion_pct));
    emit_success(ctx.output(), "stats summary", &summary, Some(&human))
}

pub fn run_productivity(ctx: &Context) -> Result<()> {
    let user_id = ctx.user_id()?;
    let repo = ctx.root.load()?;
    let rows = stats::global_productivity(&repo, user_id, ctx.config.admin_user_id)?;

    let mut human = HumanOutput::new("productivity report");
    for row in &rows {
        human.push_detail(format!(
            "#{} {}: {}/{} completed, {} pending ({}%)",
            row.user_id, row.user_name, row.completed, row.total, row.pending, row.completion_pct
        ));
    }
    emit_success(ctx.output(), "stats productivity", &rows, Some(&human))
}
