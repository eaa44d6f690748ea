//! Command Handlers module for processing bot commands

use anyhow::Result;
use tracing::{debug, info};

use crate::commands::{AddArgs, CommandError, EditArgs};
use crate::localization::{t_args_lang, t_lang};

use super::ui_builder::{create_delete_selection_keyboard, format_bookmark_list};
use super::{HandlerContext, Reply};

/// Handle the /start command
pub fn handle_start_command(ctx: &HandlerContext<'_>) -> Reply {
    Reply::Text(t_lang(ctx.localization, "welcome", ctx.language_code))
}

/// Handle the /add command
pub async fn handle_add_command(ctx: &HandlerContext<'_>, args: &AddArgs) -> Result<Reply> {
    let bookmark_id = ctx.store.create(&args.name, &args.url).await?;
    info!(bookmark_id = %bookmark_id, name = %args.name, "Bookmark added");

    Ok(Reply::Text(t_args_lang(
        ctx.localization,
        "bookmark-added",
        &[("name", args.name.as_str())],
        ctx.language_code,
    )))
}

/// Handle the /edit command.
///
/// Every bookmark whose name equals `args.name` is rewritten, not only the
/// first one.
pub async fn handle_edit_command(ctx: &HandlerContext<'_>, args: &EditArgs) -> Result<Reply> {
    let rows_affected = ctx
        .store
        .update_by_name(&args.name, &args.new_name, &args.new_url)
        .await?;

    let reply = if rows_affected == 0 {
        t_args_lang(
            ctx.localization,
            "bookmark-not-found",
            &[("name", args.name.as_str())],
            ctx.language_code,
        )
    } else {
        info!(name = %args.name, rows_affected = %rows_affected, "Bookmark edited");
        t_args_lang(
            ctx.localization,
            "bookmark-updated",
            &[
                ("name", args.name.as_str()),
                ("new_name", args.new_name.as_str()),
                ("new_url", args.new_url.as_str()),
            ],
            ctx.language_code,
        )
    };

    Ok(Reply::Text(reply))
}

/// Handle the /delete command by offering one button per bookmark
pub async fn handle_delete_command(ctx: &HandlerContext<'_>) -> Result<Reply> {
    let labels = ctx.store.list_labels().await?;

    if labels.is_empty() {
        return Ok(Reply::Text(t_lang(
            ctx.localization,
            "no-bookmarks-to-delete",
            ctx.language_code,
        )));
    }

    debug!(count = labels.len(), "Presenting delete selection");
    Ok(Reply::Menu {
        text: t_lang(ctx.localization, "select-bookmark-to-delete", ctx.language_code),
        keyboard: create_delete_selection_keyboard(&labels),
    })
}

/// Handle the /list command
pub async fn handle_list_command(ctx: &HandlerContext<'_>) -> Result<Reply> {
    let links = ctx.store.list_links().await?;

    if links.is_empty() {
        return Ok(Reply::Text(t_lang(
            ctx.localization,
            "no-bookmarks-found",
            ctx.language_code,
        )));
    }

    Ok(Reply::Text(format_bookmark_list(&links)))
}

/// Reply with the usage line of a command given too few arguments
pub fn handle_command_error(ctx: &HandlerContext<'_>, err: &CommandError) -> Reply {
    debug!(error = %err, "Rejected command arguments");
    Reply::Text(t_args_lang(
        ctx.localization,
        "usage",
        &[("usage", err.usage().as_str())],
        ctx.language_code,
    ))
}
