use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tasklist::io::store::{FILTER_KEY, FileStore, ITEMS_KEY, PersistentStore};
use tasklist::model::filter::Filter;
use tasklist::session::{Command, Outcome, RecordingRenderer, Session};
use tempfile::TempDir;

type FileSession = Session<FileStore, RecordingRenderer>;

fn open(dir: &Path) -> FileSession {
    let store = PersistentStore::new(FileStore::open(dir).unwrap());
    Session::new(store, RecordingRenderer::default())
}

fn add(session: &mut FileSession, text: &str) -> String {
    match session.dispatch(Command::Add(text.to_string())) {
        Outcome::Added(id) => id,
        other => panic!("expected Added, got {:?}", other),
    }
}

fn texts(session: &FileSession) -> Vec<String> {
    session.items().iter().map(|i| i.text.clone()).collect()
}

#[test]
fn items_and_filter_survive_a_restart() {
    let tmp = TempDir::new().unwrap();
    {
        let mut session = open(tmp.path());
        let a = add(&mut session, "A");
        add(&mut session, "B");
        session.dispatch(Command::Toggle(a));
        session.dispatch(Command::SetFilter("active".into()));
    }

    let session = open(tmp.path());
    assert_eq!(texts(&session), vec!["A", "B"]);
    assert_eq!(session.filter(), Filter::Active);
    let view = session.renderer().last().unwrap();
    let visible: Vec<&str> = view.rows.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(visible, vec!["B"]);
    assert_eq!(view.count_label, "1 item");
}

#[test]
fn each_key_is_a_file_in_the_data_dir() {
    let tmp = TempDir::new().unwrap();
    let mut session = open(tmp.path());
    let id = add(&mut session, "  Buy milk  ");
    session.dispatch(Command::SetFilter("Completed".into()));

    let items = fs::read_to_string(tmp.path().join(ITEMS_KEY)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&items).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{ "id": id, "text": "Buy milk", "completed": false }])
    );
    let filter = fs::read_to_string(tmp.path().join(FILTER_KEY)).unwrap();
    assert_eq!(filter, "completed");
}

#[test]
fn corrupt_items_file_starts_empty_and_is_replaced() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(ITEMS_KEY), "[{\"id\": \"x\", \"text\":").unwrap();

    let mut session = open(tmp.path());
    assert!(session.items().is_empty());
    assert!(session.renderer().last().unwrap().show_empty);

    add(&mut session, "fresh start");
    drop(session);

    let session = open(tmp.path());
    assert_eq!(texts(&session), vec!["fresh start"]);
}

#[test]
fn null_items_and_unknown_filter_fall_back() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(ITEMS_KEY), "null").unwrap();
    fs::write(tmp.path().join(FILTER_KEY), "someday").unwrap();

    let session = open(tmp.path());
    assert!(session.items().is_empty());
    assert_eq!(session.filter(), Filter::All);
}

#[test]
fn hand_written_items_are_kept_verbatim() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(ITEMS_KEY),
        r#"[{"id":"legacy-1","text":"Old","completed":true},{"id":"42","text":"New","completed":false}]"#,
    )
    .unwrap();

    let mut session = open(tmp.path());
    assert_eq!(session.items()[0].id, "legacy-1");
    assert_eq!(session.renderer().last().unwrap().count_label, "1 item");

    let outcome = session.dispatch(Command::ClearCompleted);
    assert_eq!(outcome, Outcome::Changed);
    drop(session);

    let session = open(tmp.path());
    assert_eq!(texts(&session), vec!["New"]);
    assert_eq!(session.items()[0].id, "42");
}

#[test]
fn broken_saved_records_are_repaired_on_load() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(ITEMS_KEY),
        r#"[{"id":"a","text":"   ","completed":false},{"id":"b","text":"  padded ","completed":false},{"id":"x","text":"first","completed":false},{"id":"x","text":"second","completed":false}]"#,
    )
    .unwrap();

    let mut session = open(tmp.path());
    assert_eq!(texts(&session), vec!["padded", "first"]);
    assert_eq!(session.renderer().last().unwrap().count_label, "2 items");

    // One delete removes exactly one item
    let outcome = session.dispatch(Command::Delete("x".into()));
    assert_eq!(outcome, Outcome::Changed);
    assert_eq!(texts(&session), vec!["padded"]);
    drop(session);

    let session = open(tmp.path());
    assert_eq!(texts(&session), vec!["padded"]);
}

#[test]
fn editing_to_blank_removes_the_saved_item() {
    let tmp = TempDir::new().unwrap();
    let mut session = open(tmp.path());
    let id = add(&mut session, "X");
    session.dispatch(Command::Update {
        id,
        text: "   ".into(),
    });
    drop(session);

    let session = open(tmp.path());
    assert!(session.items().is_empty());
    let view = session.renderer().last().unwrap();
    assert_eq!(view.count_label, "0 items");
    assert!(view.show_empty);
}

#[test]
fn no_op_commands_do_not_create_files() {
    let tmp = TempDir::new().unwrap();
    let mut session = open(tmp.path());
    session.dispatch(Command::Add("   ".into()));
    session.dispatch(Command::Toggle("missing".into()));
    session.dispatch(Command::ClearCompleted);
    assert!(!tmp.path().join(ITEMS_KEY).exists());
}
