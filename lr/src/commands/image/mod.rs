//! Image commands: listing repositories and tags, removing tags.

use crate::context::{AppContext, VerbosityLevel};
use crate::format;
use liblr::registry::Registry;
use std::io::Write;

pub mod remove;


/// Handle `ls-images`: print every repository in catalog order
pub fn handle_list_images<W: Write>(
    ctx: &AppContext,
    registry: &Registry,
    out: &mut W,
) -> Result<(), String> {
    format::print(ctx, VerbosityLevel::Verbose, "Listing images from registry...");
    format::print(
        ctx,
        VerbosityLevel::VeryVerbose,
        &format!("GET {}", registry.client().url_for("/v2/_catalog")),
    );

    let images = registry
        .list_repositories()
        .map_err(|e| format!("Failed to list images: {}", e))?;

    format::print(
        ctx,
        VerbosityLevel::Verbose,
        &format!("Found {} image(s)", images.len()),
    );

    write_list(ctx, &images, out)
}

/// Handle `ls-tags`: print every tag of `image` in registry order
pub fn handle_list_tags<W: Write>(
    ctx: &AppContext,
    registry: &Registry,
    image: &str,
    out: &mut W,
) -> Result<(), String> {
    format::print(
        ctx,
        VerbosityLevel::Verbose,
        &format!("Listing tags for image '{}'...", image),
    );
    format::print(
        ctx,
        VerbosityLevel::VeryVerbose,
        &format!(
            "GET {}",
            registry.client().url_for(&format!("/v2/{}/tags/list", image))
        ),
    );

    let tags = registry
        .list_tags(image)
        .map_err(|e| format!("Failed to list tags: {}", e))?;

    write_list(ctx, &tags, out)
}

/// Writes a list of names in the context's output format.
fn write_list<W: Write>(ctx: &AppContext, items: &[String], out: &mut W) -> Result<(), String> {
    let output = format::format_output_vec(items, ctx.format)?;
    if !output.is_empty() {
        writeln!(out, "{}", output).map_err(|e| format!("Failed to write output: {}", e))?;
    }
    Ok(())
}
