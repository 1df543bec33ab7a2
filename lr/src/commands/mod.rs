use crate::context::AppContext;
use liblr::action::Action;
use liblr::registry::Registry;
use std::io::Write;

/// Image command handlers
pub mod image;

/// Version command handlers
pub mod version;


/// Runs `action` with its argument, writing results to `out`.
///
/// `connect` is only called for registry actions, so `help` works without
/// any credentials configured. `rm-image` is `ls-tags` followed by
/// `rm-tags` over every tag found.
pub fn dispatch<W, C>(
    ctx: &AppContext,
    action: Action,
    argument: &str,
    connect: C,
    out: &mut W,
) -> Result<(), String>
where
    W: Write,
    C: FnOnce() -> Result<Registry, String>,
{
    match action {
        Action::Help => {
            write!(out, "{}", usage()).map_err(|e| format!("Failed to write output: {}", e))
        }
        Action::ListImages => image::handle_list_images(ctx, &connect()?, out),
        Action::ListTags => image::handle_list_tags(ctx, &connect()?, argument, out),
        Action::DeleteImage => {
            image::remove::handle_delete_image(ctx, &connect()?, argument, out)
        }
        Action::DeleteTags => image::remove::handle_delete_tags(ctx, &connect()?, argument, out),
    }
}

/// Returns the full usage text.
pub fn usage() -> String {
    use clap::CommandFactory;
    crate::Cli::command().render_help().to_string()
}
