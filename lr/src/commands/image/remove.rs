use crate::context::{AppContext, VerbosityLevel};
use crate::format::{self, OutputFormat};
use liblr::action::TagSelection;
use liblr::registry::{Registry, TagDeletion};
use std::io::Write;

#[cfg(test)]
#[path = "remove_tests.rs"]
mod tests;

/// Handle `rm-image`: remove every tag of `image`
pub fn handle_delete_image<W: Write>(
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

    let selection = registry
        .select_all_tags(image)
        .map_err(|e| format!("Failed to list tags: {}", e))?;

    if selection.tags.is_empty() {
        format::print(
            ctx,
            VerbosityLevel::Verbose,
            &format!("No tags found for image '{}'", selection.image),
        );
    }

    delete_selection(ctx, registry, &selection, out)
}

/// Handle `rm-tags`: remove the tags named in `image:tag1,tag2`
pub fn handle_delete_tags<W: Write>(
    ctx: &AppContext,
    registry: &Registry,
    argument: &str,
    out: &mut W,
) -> Result<(), String> {
    let selection = TagSelection::parse(argument).map_err(|e| e.to_string())?;
    delete_selection(ctx, registry, &selection, out)
}

/// Deletes each selected tag in order.
///
/// Pretty output prints each record as soon as its delete completes, so the
/// lines for earlier tags stay on screen if a later one fails. Structured
/// formats are written once at the end, or just before returning an error
/// when at least one tag completed.
fn delete_selection<W: Write>(
    ctx: &AppContext,
    registry: &Registry,
    selection: &TagSelection,
    out: &mut W,
) -> Result<(), String> {
    format::print(
        ctx,
        VerbosityLevel::Verbose,
        &format!(
            "Deleting {} tag(s) of image '{}'",
            selection.tags.len(),
            selection.image
        ),
    );

    let mut records = Vec::new();

    for tag in &selection.tags {
        format::print(
            ctx,
            VerbosityLevel::VeryVerbose,
            &format!(
                "GET {}",
                registry
                    .client()
                    .url_for(&format!("/v2/{}/manifests/{}", selection.image, tag))
            ),
        );

        let record = match registry.delete_tag(&selection.image, tag) {
            Ok(record) => record,
            Err(e) => {
                if !records.is_empty() {
                    write_records(ctx, &records, out)?;
                }
                return Err(format!(
                    "Failed to delete {}:{}: {}",
                    selection.image, tag, e
                ));
            }
        };

        if !record.has_digest() {
            format::warning(
                ctx,
                &format!(
                    "Registry returned no digest for {}:{}, delete skipped",
                    record.image, record.tag
                ),
            );
        }

        match ctx.format {
            OutputFormat::Pretty => {
                writeln!(out, "{}", record).map_err(|e| format!("Failed to write output: {}", e))?
            }
            OutputFormat::Json | OutputFormat::Yaml => records.push(record),
        }
    }

    write_records(ctx, &records, out)
}

/// Writes buffered records for structured formats; pretty output is never buffered.
fn write_records<W: Write>(
    ctx: &AppContext,
    records: &[TagDeletion],
    out: &mut W,
) -> Result<(), String> {
    if ctx.format == OutputFormat::Pretty {
        return Ok(());
    }

    let output = format::format_output_vec(records, ctx.format)?;
    writeln!(out, "{}", output).map_err(|e| format!("Failed to write output: {}", e))
}
