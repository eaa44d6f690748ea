//! # Bot Flow Tests
//!
//! Drives chat commands and selection button presses through the router and
//! handlers against a real SQLite file, without a Telegram connection.


use bookmark_bot::bot::{dispatch_command, handle_delete_confirmation, Reply};
use bookmark_bot::bot::ui_builder::delete_payload;
use bookmark_bot::commands::parse_command;
use bookmark_bot::errors::AppError;
use teloxide::types::InlineKeyboardButtonKind;
use test_helpers::setup_test_env;

#[tokio::test]
async fn test_start_replies_with_welcome() {
    let env = setup_test_env().await;

    let reply = env.send("/start").await;

    assert_eq!(
        reply,
        Reply::Text(
            "Welcome to Bookmark Manager! Use /add, /edit, /delete, and /list commands to manage your bookmarks."
                .to_string()
        )
    );
    assert_eq!(env.count().await, 0);
}

#[tokio::test]
async fn test_add_then_list_round_trip() {
    let env = setup_test_env().await;

    let reply = env.send("/add docs http://example.com").await;
    assert_eq!(reply.text(), "Bookmark 'docs' added successfully!");

    let listing = env.send("/list").await;
    assert_eq!(listing.text(), "docs: http://example.com");
}

#[tokio::test]
async fn test_list_joins_entries_with_newlines() {
    let env = setup_test_env().await;
    env.send("/add docs http://example.com").await;
    env.send("/add rust https://rust-lang.org").await;

    let listing = env.send("/list").await;
    assert_eq!(
        listing.text(),
        "docs: http://example.com\nrust: https://rust-lang.org"
    );
}

#[tokio::test]
async fn test_add_with_missing_arguments_replies_usage() {
    let env = setup_test_env().await;

    assert_eq!(env.send("/add").await.text(), "Usage: /add <name> <url>");
    assert_eq!(env.send("/add docs").await.text(), "Usage: /add <name> <url>");
    assert_eq!(env.count().await, 0);
}

#[tokio::test]
async fn test_add_ignores_extra_arguments() {
    let env = setup_test_env().await;

    env.send("/add my docs http://example.com").await;

    // Names cannot contain spaces: "docs" became the url, the rest is dropped
    assert_eq!(env.send("/list").await.text(), "my: docs");
    assert_eq!(env.count().await, 1);
}

#[tokio::test]
async fn test_edit_replaces_name_and_url() {
    let env = setup_test_env().await;
    env.send("/add docs http://example.com").await;

    let reply = env.send("/edit docs manual https://manual.example.com").await;
    assert_eq!(
        reply.text(),
        "Bookmark 'docs' updated to 'manual: https://manual.example.com' successfully!"
    );

    let listing = env.send("/list").await;
    assert_eq!(listing.text(), "manual: https://manual.example.com");
    assert!(!listing.text().contains("docs"));
}

#[tokio::test]
async fn test_edit_unknown_name_replies_not_found() {
    let env = setup_test_env().await;
    env.send("/add docs http://example.com").await;

    let reply = env.send("/edit missing x http://x").await;

    assert_eq!(reply.text(), "Bookmark 'missing' not found.");
    assert_eq!(env.count().await, 1);
    assert_eq!(env.send("/list").await.text(), "docs: http://example.com");
}

#[tokio::test]
async fn test_edit_applies_to_all_bookmarks_sharing_a_name() {
    let env = setup_test_env().await;
    env.send("/add dup http://one").await;
    env.send("/add dup http://two").await;

    env.send("/edit dup single http://merged").await;

    assert_eq!(
        env.send("/list").await.text(),
        "single: http://merged\nsingle: http://merged"
    );
}

#[tokio::test]
async fn test_edit_with_missing_arguments_replies_usage() {
    let env = setup_test_env().await;
    env.send("/add docs http://example.com").await;

    let reply = env.send("/edit docs manual").await;

    assert_eq!(reply.text(), "Usage: /edit <name> <new_name> <new_url>");
    assert_eq!(env.send("/list").await.text(), "docs: http://example.com");
}

#[tokio::test]
async fn test_delete_with_no_bookmarks_has_no_menu() {
    let env = setup_test_env().await;

    let reply = env.send("/delete").await;

    assert_eq!(reply, Reply::Text("No bookmarks to delete.".to_string()));
}

#[tokio::test]
async fn test_delete_prompt_lists_one_button_per_bookmark() {
    let env = setup_test_env().await;
    env.send("/add docs http://example.com").await;
    env.send("/add docs http://mirror.example.com").await;
    let blog_id = env.store.create("blog", "http://blog.example.com").await.unwrap();

    let reply = env.send("/delete").await;

    let Reply::Menu { text, keyboard } = reply else {
        panic!("expected a selection menu");
    };
    assert_eq!(text, "Select a bookmark to delete:");
    assert_eq!(keyboard.inline_keyboard.len(), 3);

    let labels: Vec<&str> = keyboard
        .inline_keyboard
        .iter()
        .map(|row| row[0].text.as_str())
        .collect();
    assert_eq!(labels, vec!["docs", "docs", "blog"]);
    assert_eq!(
        keyboard.inline_keyboard[2][0].kind,
        InlineKeyboardButtonKind::CallbackData(delete_payload(blog_id))
    );
}

#[tokio::test]
async fn test_deleting_only_bookmark_leaves_empty_list() {
    let env = setup_test_env().await;
    let id = env.store.create("docs", "http://example.com").await.unwrap();

    let confirmation = handle_delete_confirmation(&env.ctx(), Some(delete_payload(id).as_str()))
        .await
        .unwrap();

    assert_eq!(confirmation, "Bookmark deleted successfully!");
    assert_eq!(env.send("/list").await.text(), "No bookmarks found.");
}

#[tokio::test]
async fn test_delete_confirmation_twice_reports_success_both_times() {
    let env = setup_test_env().await;
    let id = env.store.create("docs", "http://example.com").await.unwrap();
    let payload = delete_payload(id);

    let first = handle_delete_confirmation(&env.ctx(), Some(payload.as_str()))
        .await
        .unwrap();
    // The second press refers to a row that no longer exists
    let second = handle_delete_confirmation(&env.ctx(), Some(payload.as_str()))
        .await
        .unwrap();

    assert_eq!(first, "Bookmark deleted successfully!");
    assert_eq!(second, "Bookmark deleted successfully!");
    assert_eq!(env.count().await, 0);
}

#[tokio::test]
async fn test_delete_confirmation_only_removes_selected_bookmark() {
    let env = setup_test_env().await;
    let keep = env.store.create("keep", "http://keep").await.unwrap();
    let gone = env.store.create("gone", "http://gone").await.unwrap();

    handle_delete_confirmation(&env.ctx(), Some(delete_payload(gone).as_str()))
        .await
        .unwrap();

    assert!(env.store.read(keep).await.unwrap().is_some());
    assert_eq!(env.send("/list").await.text(), "keep: http://keep");
}

#[tokio::test]
async fn test_delete_confirmation_with_malformed_payload_deletes_nothing() {
    let env = setup_test_env().await;
    env.store.create("docs", "http://example.com").await.unwrap();

    let reply = handle_delete_confirmation(&env.ctx(), Some("not-an-id"))
        .await
        .unwrap();
    let missing = handle_delete_confirmation(&env.ctx(), None).await.unwrap();

    assert_eq!(reply, "Bookmark deleted successfully!");
    assert_eq!(missing, "Bookmark deleted successfully!");
    assert_eq!(env.count().await, 1);
}

#[tokio::test]
async fn test_list_with_no_bookmarks() {
    let env = setup_test_env().await;
    assert_eq!(
        env.send("/list").await,
        Reply::Text("No bookmarks found.".to_string())
    );
}

#[tokio::test]
async fn test_replies_follow_user_language() {
    let env = setup_test_env().await;

    let added = env.send_in("/add docs http://example.com", Some("fr-FR")).await;
    assert_eq!(added.text(), "Favori 'docs' ajouté avec succès !");

    let usage = env.send_in("/add", Some("fr")).await;
    assert_eq!(usage.text(), "Utilisation : /add <name> <url>");

    // Unsupported languages fall back to English
    let not_found = env.send_in("/edit nope a b", Some("de")).await;
    assert_eq!(not_found.text(), "Bookmark 'nope' not found.");
}

#[tokio::test]
async fn test_commands_addressed_to_bot_are_handled() {
    let env = setup_test_env().await;

    env.send("/add@BookmarkBot docs http://example.com").await;

    assert_eq!(env.send("/LIST").await.text(), "docs: http://example.com");
}

#[tokio::test]
async fn test_storage_failures_are_reported_as_database_errors() {
    let env = setup_test_env().await;
    let id = env.store.create("docs", "http://example.com").await.unwrap();
    env.store.pool().close().await;

    let parsed = parse_command("/list", None).unwrap();
    let err = dispatch_command(&env.ctx(), parsed).await.unwrap_err();
    assert!(matches!(AppError::from(err), AppError::Database(_)));

    let err = handle_delete_confirmation(&env.ctx(), Some(delete_payload(id).as_str()))
        .await
        .unwrap_err();
    let AppError::Database(message) = AppError::from(err) else {
        panic!("expected a database error");
    };
    assert!(message.starts_with("Failed to delete bookmark"));
}
