//! End-to-end tests for the inspection commands.
//!
//! Commands run against a fixture state file and write into a buffer; the
//! output is checked the way a user would read it.

use std::{io::Write as _, path::PathBuf};

use serde_json::Value;
use streamview_cli::{ClientState, CliError, Command, ListKindArg, run};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/state.json")
}

fn run_to_string(command: &Command) -> Result<String, CliError> {
    let mut out = Vec::new();
    run(command, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn streams_prints_sections() {
    let output = run_to_string(&Command::Streams { state: fixture() }).unwrap();
    let sections: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(sections[0]["kind"], "pinned");
    assert_eq!(sections[0]["rows"][0]["name"], "general");
    assert_eq!(sections[0]["rows"][0]["topics"], Value::Null);

    let other = &sections[1]["rows"];
    assert_eq!(sections[1]["kind"], "other");
    assert_eq!(other[0]["name"], "design");
    assert_eq!(other[0]["last_message_id"], 55);
    assert_eq!(other[0]["is_muted"], true);
    assert_eq!(other[0]["unread_count"], 1);
    assert_eq!(other[0]["topics"][0]["name"], "fonts");
    assert_eq!(other[0]["topics"][0]["is_muted"], false);
    assert_eq!(other[0]["topics"][1]["name"], "mockups");
    assert_eq!(other[0]["topics"][1]["is_muted"], true);
    assert_eq!(other[0]["topics"][1]["unread_count"], 2);
    assert_eq!(other[1]["name"], "random");
    assert_eq!(other[1]["unread_count"], 2);
}

#[test]
fn unread_summary() {
    let path = fixture();
    let output = run_to_string(&Command::Unread { state: path }).unwrap();
    let summary: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(summary["total"], 7);
    assert_eq!(summary["direct"], 2);
    assert_eq!(summary["mentions"], 2);
    assert_eq!(summary["streams"]["2"], 1);
    assert_eq!(summary["streams"]["3"], 2);
}

#[test]
fn directory_and_topics() {
    let output =
        run_to_string(&Command::Directory { state: fixture(), filter: Some("R".into()) }).unwrap();
    assert_eq!(output, "1\tgeneral\n3\trandom\n");

    let output = run_to_string(&Command::Topics { state: fixture(), stream: 2 }).unwrap();
    assert_eq!(output, "mockups\nfonts\n");

    let output = run_to_string(&Command::Topics { state: fixture(), stream: 1 }).unwrap();
    assert!(output.is_empty());
}

#[test]
fn render_quote_reply() {
    let command = Command::Render {
        state: fixture(),
        message: 40,
        list_kind: ListKindArg::Mentioned,
        max_reaction_avatars: 1,
    };
    let html = run_to_string(&command).unwrap();

    assert!(html.starts_with("<blockquote class=\"blockquote\""));
    assert!(html.contains("<div class=\"quote-author\">Bob:</div>"));
    assert!(html.contains("&quot;needReplace&quot;:false"));
    assert!(html.contains("edited 5 minutes ago"));
    assert!(html.contains(">starred</span>"));
    assert!(html.contains("class=\"reaction self-voted\""));
    assert!(html.contains("+1</span>"));
}

#[test]
fn render_poll() {
    let command = Command::Render {
        state: fixture(),
        message: 70,
        list_kind: ListKindArg::Conversation,
        max_reaction_avatars: 3,
    };
    let html = run_to_string(&command).unwrap();

    assert!(html.contains("<p class=\"poll-question\">Lunch?</p>"));
    assert!(html.contains("data-key=\"canned,0\">1</button>"));
}

#[test]
fn render_missing_message() {
    let command = Command::Render {
        state: fixture(),
        message: 1234,
        list_kind: ListKindArg::Conversation,
        max_reaction_avatars: 3,
    };
    assert!(matches!(run_to_string(&command), Err(CliError::MessageNotFound(1234))));
}

#[test]
fn invalid_state_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{ \"subscriptions\": [] }").unwrap();

    let result = ClientState::load(file.path());
    assert!(matches!(result, Err(CliError::Json(_))));
}

#[test]
fn missing_state_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let error = ClientState::load(&path).unwrap_err();
    assert!(matches!(error, CliError::Read { .. }));
    assert!(error.to_string().contains("absent.json"));
}
