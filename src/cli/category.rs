//! taskdesk category commands

use crate::cli::Context;
use crate::error::Result;
use crate::lookup;
use crate::mutation;
use crate::output::{emit_success, HumanOutput};

pub fn run_list(ctx: &Context) -> Result<()> {
    let repo = ctx.root.load()?;

    let mut human = HumanOutput::new(format!("{} categor(ies)", repo.categories.len()));
    for category in &repo.categories {
        human.push_detail(format!("#{} {}", category.id, category.name));
    }
    emit_success(ctx.output(), "category list", &repo.categories, Some(&human))
}

pub fn run_get(ctx: &Context, id: u64) -> Result<()> {
    let repo = ctx.root.load()?;
    let category = lookup::find_category(&repo, id)?;

    let mut human = HumanOutput::new(format!("category {}", category.id));
    human.push_summary("name", category.name.clone());
    human.push_summary(
        "tasks",
        repo.category_reference_count(id).to_string(),
    );
    emit_success(ctx.output(), "category get", category, Some(&human))
}

pub fn run_new(ctx: &Context, name: &str) -> Result<()> {
    let _lock = ctx.root.lock()?;
    let mut repo = ctx.root.load()?;
    let category = mutation::create_category(&mut repo, name)?;
    ctx.root.save(&repo)?;

    let mut human = HumanOutput::new(format!("created category {}", category.id));
    human.push_summary("name", category.name.clone());
    emit_success(ctx.output(), "category new", &category, Some(&human))
}

pub fn run_delete(ctx: &Context, id: u64) -> Result<()> {
    let _lock = ctx.root.lock()?;
    let mut repo = ctx.root.load()?;
    let category = mutation::delete_category(&mut repo, id)?;
    ctx.root.save(&repo)?;

    let human = HumanOutput::new(format!(
        "deleted category {} ({})",
        category.id, category.name
    ));
    emit_success(ctx.output(), "category delete", &category, Some(&human))
}
