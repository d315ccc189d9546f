use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use restyle::cli::{Command, Format};
use restyle::clipboard::{Clipboard, ClipboardError};
use restyle::commands::Session;
use restyle::config::Config;
use restyle_core::{Breakpoint, Tag};
use restyle_store::{FileStorage, StyleStore};

#[derive(Clone, Default)]
struct RecordingClipboard {
    copied: Rc<RefCell<Vec<String>>>,
}

impl Clipboard for RecordingClipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        self.copied.borrow_mut().push(text.to_string());
        Ok(())
    }
}

struct BrokenClipboard;

impl Clipboard for BrokenClipboard {
    fn copy(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unsupported)
    }
}

fn session(dir: &Path, clipboard: Box<dyn Clipboard>) -> Session<FileStorage> {
    let config = Config {
        storage_dir: dir.to_path_buf(),
        ..Config::default()
    };
    let store = StyleStore::open(FileStorage::new(dir), config.store_options());
    Session::new(store, config, clipboard)
}

fn run(session: &mut Session<FileStorage>, command: Command) -> (String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    session.execute(&command, &mut out, &mut err).unwrap();
    (
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

fn set(path: &str, value: &str) -> Command {
    Command::Set {
        path: path.into(),
        value: value.into(),
    }
}

#[test]
fn classes_for_default_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session(dir.path(), Box::new(RecordingClipboard::default()));
    let (out, _) = run(&mut session, Command::Classes);
    insta::assert_snapshot!(out, @"text-[16px] font-[400] leading-[1.5]");
}

#[test]
fn set_parses_json_and_falls_back_to_string() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session(dir.path(), Box::new(RecordingClipboard::default()));

    let (out, _) = run(&mut session, set("border.radius.all", "12"));
    assert_eq!(out, "border.radius.all = 12.0\n");

    let (out, _) = run(&mut session, set("textContent", "Hello there"));
    assert_eq!(out, "textContent = \"Hello there\"\n");
    assert_eq!(session.store.get().text_content, "Hello there");
    assert_eq!(session.store.history_len(), 2);
}

#[test]
fn set_rejects_unknown_path() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session(dir.path(), Box::new(RecordingClipboard::default()));
    let mut out = Vec::new();
    let mut err = Vec::new();
    let result = session.execute(&set("border.glow", "1"), &mut out, &mut err);
    assert!(format!("{:#}", result.unwrap_err()).contains("border.glow"));
    assert_eq!(session.store.history_len(), 0);
}

#[test]
fn edits_persist_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut session = session(dir.path(), Box::new(RecordingClipboard::default()));
        run(&mut session, set("tag", "\"h1\""));
        run(&mut session, set("padding.top", "8"));
    }
    let mut session = session(dir.path(), Box::new(RecordingClipboard::default()));
    assert_eq!(session.store.get().tag, Tag::H1);
    let (out, _) = run(&mut session, Command::Classes);
    assert!(out.starts_with("pt-[8px] "));
}

#[test]
fn markup_is_copied_to_clipboard() {
    let dir = tempfile::tempdir().unwrap();
    let clipboard = RecordingClipboard::default();
    let mut session = session(dir.path(), Box::new(clipboard.clone()));
    session.breakpoint = Breakpoint::Md;
    run(&mut session, set("inlineCss", "\"color: red\""));

    let (out, err) = run(
        &mut session,
        Command::Markup {
            sanitize: false,
            copy: true,
        },
    );
    assert!(err.is_empty());
    assert!(out.starts_with("<div class=\"md:text-[16px]"));
    assert!(out.contains("style=\"color: red\""));
    assert_eq!(clipboard.copied.borrow().as_slice(), [out.trim_end()]);
}

#[test]
fn sanitized_markup_drops_unsafe_links() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session(dir.path(), Box::new(RecordingClipboard::default()));
    run(&mut session, set("link", "\"javascript:alert(1)\""));

    let (out, _) = run(
        &mut session,
        Command::Markup {
            sanitize: true,
            copy: false,
        },
    );
    assert!(!out.contains("javascript:"));
}

#[test]
fn clipboard_failure_is_a_warning() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session(dir.path(), Box::new(BrokenClipboard));
    let (out, err) = run(
        &mut session,
        Command::Markup {
            sanitize: false,
            copy: true,
        },
    );
    assert!(out.contains("Edit me"));
    assert!(err.contains("could not copy to clipboard"));
}

#[test]
fn export_reset_import_restores_state() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("hero.json");
    let mut session = session(dir.path(), Box::new(RecordingClipboard::default()));
    session.breakpoint = Breakpoint::Lg;
    run(&mut session, set("textContent", "\"Saved\""));

    let (out, _) = run(
        &mut session,
        Command::Export {
            output: Some(file.clone()),
            copy: false,
        },
    );
    assert!(out.starts_with("exported to "));
    let exported: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(exported["version"], "1.0.0");
    assert_eq!(exported["breakpoint"], "lg");

    run(&mut session, Command::Reset);
    session.breakpoint = Breakpoint::Auto;
    assert_eq!(session.store.get().text_content, "Edit me");

    let (out, _) = run(&mut session, Command::Import { file });
    assert!(out.ends_with("(breakpoint lg)\n"));
    assert_eq!(session.breakpoint, Breakpoint::Lg);
    assert_eq!(session.store.get().text_content, "Saved");
    assert!(!session.store.can_undo());
}

#[test]
fn export_write_failure_is_a_warning() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session(dir.path(), Box::new(RecordingClipboard::default()));
    let (out, err) = run(
        &mut session,
        Command::Export {
            output: Some(dir.path().join("missing").join("out.json")),
            copy: false,
        },
    );
    assert!(out.is_empty());
    assert!(err.contains("could not write"));
}

#[test]
fn import_rejects_foreign_json() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("other.json");
    std::fs::write(&file, "{\"name\": \"not an export\"}").unwrap();

    let mut session = session(dir.path(), Box::new(RecordingClipboard::default()));
    run(&mut session, set("textContent", "\"Kept\""));
    let mut out = Vec::new();
    let mut err = Vec::new();
    assert!(session
        .execute(&Command::Import { file }, &mut out, &mut err)
        .is_err());
    assert_eq!(session.store.get().text_content, "Kept");
}

#[test]
fn show_formats() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session(dir.path(), Box::new(RecordingClipboard::default()));

    let (json, _) = run(
        &mut session,
        Command::Show {
            format: Format::Json,
        },
    );
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["textContent"], "Edit me");

    let (yaml, _) = run(
        &mut session,
        Command::Show {
            format: Format::Yaml,
        },
    );
    assert!(yaml.contains("textContent: Edit me"));
}

#[test]
fn assist_failure_leaves_style_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session(dir.path(), Box::new(RecordingClipboard::default()));
    session.config.assist.endpoint = "http://127.0.0.1:9/api/ai-assist".to_string();
    run(&mut session, set("tailwindClasses", "\"flex\""));

    let mut out = Vec::new();
    let mut err = Vec::new();
    let result = session.execute(
        &Command::Assist {
            prompt: vec!["make".into(), "it".into(), "pop".into()],
        },
        &mut out,
        &mut err,
    );
    assert!(result.is_err());
    assert_eq!(session.store.get().tailwind_classes, "flex");
    assert_eq!(session.store.history_len(), 1);
}
