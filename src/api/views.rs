use axum::response::Html;
use tera::Context;

use crate::domain::models::auth::SessionUser;
use crate::error::AppError;
use crate::state::AppState;

/// Context shared by every page: the current user and the active nav entry.
pub fn page_context(user: Option<&SessionUser>, page: &str) -> Context {
    let mut ctx = Context::new();
    ctx.insert("user", &user);
    ctx.insert("page", page);
    ctx
}

pub fn render(state: &AppState, template: &str, ctx: &Context) -> Result<Html<String>, AppError> {
    Ok(Html(state.templates.render(template, ctx)?))
}
