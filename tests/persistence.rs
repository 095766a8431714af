use fluxtodo::actions::TodoAction;
use fluxtodo::app::TodoApp;
use fluxtodo::dispatcher::Dispatcher;
use fluxtodo::storage::fs::FileStorage;
use fluxtodo::storage::KeyValueStorage;
use fluxtodo::sync::LocalStorageAdapter;
use serde_json::Value;
use std::rc::Rc;
use tempfile::TempDir;

const SLOT: &str = "flux-backbone-todo";

fn open(dir: &TempDir) -> TodoApp<LocalStorageAdapter<FileStorage>> {
    let adapter = LocalStorageAdapter::new(SLOT, FileStorage::new(dir.path())).unwrap();
    TodoApp::new(Rc::new(Dispatcher::new()), adapter)
}

#[test]
fn todos_survive_a_reload() {
    let dir = TempDir::new().unwrap();
    {
        let app = open(&dir);
        for text in ["a", "b", "c"] {
            app.dispatch(TodoAction::AddTodo { text: text.into() })
                .unwrap();
        }
        let second = app.items()[1].cid();
        app.dispatch(TodoAction::ToggleTodo { item: second }).unwrap();
    }

    let app = open(&dir);
    let items: Vec<(String, bool)> = app
        .items()
        .into_iter()
        .map(|i| (i.text, i.complete))
        .collect();
    assert_eq!(
        items,
        vec![
            ("a".to_string(), false),
            ("b".to_string(), true),
            ("c".to_string(), false)
        ]
    );
}

#[test]
fn slot_is_a_json_map_keyed_by_id() {
    let dir = TempDir::new().unwrap();
    let app = open(&dir);
    app.dispatch(TodoAction::AddTodo {
        text: "buy milk".into(),
    })
    .unwrap();
    let id = app.items()[0].id.clone().unwrap();

    let raw = FileStorage::new(dir.path()).get_item(SLOT).unwrap().unwrap();
    let json: Value = serde_json::from_str(&raw).unwrap();
    let record = &json[id.as_str()];

    assert_eq!(record["id"], id.as_str());
    assert_eq!(record["text"], "buy milk");
    assert_eq!(record["complete"], false);
}

#[test]
fn cleared_todos_are_gone_after_reload() {
    let dir = TempDir::new().unwrap();
    {
        let app = open(&dir);
        app.dispatch(TodoAction::AddTodo { text: "a".into() })
            .unwrap();
        app.dispatch(TodoAction::AddTodo { text: "b".into() })
            .unwrap();
        let first = app.items()[0].cid();
        app.dispatch(TodoAction::ToggleTodo { item: first }).unwrap();
        app.dispatch(TodoAction::ClearTodos).unwrap();
    }

    let app = open(&dir);
    let texts: Vec<String> = app.items().into_iter().map(|i| i.text).collect();
    assert_eq!(texts, vec!["b"]);
}

#[test]
fn externally_written_slot_is_loaded() {
    let dir = TempDir::new().unwrap();
    let mut storage = FileStorage::new(dir.path());
    storage
        .set_item(
            SLOT,
            r#"{"x1":{"id":"x1","text":"seeded","complete":true}}"#,
        )
        .unwrap();

    let app = open(&dir);
    let items = app.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].text, "seeded");
    assert!(items[0].complete);
}
