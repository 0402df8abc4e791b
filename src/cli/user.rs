//! taskdesk user commands

use crate::cli::Context;
use crate::error::Result;
use crate::lookup;
use crate::output::{emit_success, HumanOutput};

pub fn run_list(ctx: &Context) -> Result<()> {
    let repo = ctx.root.load()?;

    let mut human = HumanOutput::new(format!("{} user(s)", repo.users.len()));
    for user in &repo.users {
        human.push_detail(format!("#{} {} <{}>", user.id, user.name, user.email));
    }
    emit_success(ctx.output(), "user list", &repo.users, Some(&human))
}

pub fn run_get(ctx: &Context, id: u64) -> Result<()> {
    let repo = ctx.root.load()?;
    let user = lookup::find_user(&repo, id)?;

    let mut human = HumanOutput::new(format!("user {}", user.id));
    human.push_summary("name", user.name.clone());
    human.push_summary("email", user.email.clone());
    emit_success(ctx.output(), "user get", user, Some(&human))
}
