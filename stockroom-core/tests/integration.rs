//! End-to-end flows through the session, backed by in-memory and on-disk stores

use stockroom_core::{
    persist, render, Committed, Confirmation, DirStore, FormError, FormMode, Item, ItemForm,
    MemoryStore, Session, SessionError, SortKey, Store, INVENTORY_KEY, PLACEHOLDER_IMAGE,
};
use tempfile::TempDir;

fn item(id: &str, name: &str, quantity: f64, price: f64) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        details: format!("{} details", name),
        quantity,
        price,
        date: "2024-01-01".to_string(),
        kind: "misc".to_string(),
        image: PLACEHOLDER_IMAGE.to_string(),
    }
}

fn widget_form() -> ItemForm {
    ItemForm {
        name: "Widget".to_string(),
        details: String::new(),
        quantity: "5".to_string(),
        price: "2.5".to_string(),
        date: "2024-01-01".to_string(),
        kind: "tool".to_string(),
        image: String::new(),
    }
}

fn seeded(items: &[Item]) -> Session<MemoryStore> {
    let store = MemoryStore::new();
    persist::save(&store, items).unwrap();
    Session::open(store)
}

#[tokio::test]
async fn browser_records_survive_an_add() {
    let store = MemoryStore::new();
    let raw = br#"[
        {"id":"1700000000000","name":"Lamp","details":"desk","quantity":2,"price":19.99,
         "date":"2024-04-01","type":"furniture","image":"https://via.placeholder.com/50"},
        {"id":"1700000000001","name":"Rope","details":"","quantity":1.5,"price":3,
         "date":"2024-04-02","type":"misc","image":"https://via.placeholder.com/50"}
    ]"#;
    store.put(INVENTORY_KEY, raw).unwrap();

    let mut session = Session::open(&store);
    assert_eq!(session.inventory().len(), 2);
    session
        .submit(&FormMode::Create, &widget_form())
        .await
        .unwrap();

    let stored = persist::load(&store);
    let names: Vec<&str> = stored.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Lamp", "Rope", "Widget"]);
    assert_eq!(stored[1].quantity, 1.5);
    assert_eq!(session.rows()[1].cells[2], "1.5");
}

#[tokio::test]
async fn add_to_empty_inventory() {
    let mut session = Session::open(MemoryStore::new());
    let (mode, _) = session.open_form();
    assert_eq!(mode, FormMode::Create);

    let committed = session.submit(&mode, &widget_form()).await.unwrap();

    assert!(matches!(committed, Committed::Added(_)));
    assert_eq!(session.inventory().len(), 1);
    assert_eq!(persist::load(session.store()), session.inventory());

    let rows = session.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].cells[3], "$2.50");
    assert_eq!(rows[0].id, *committed.id());
    assert_eq!(
        session.notices().latest().map(|n| n.text.as_str()),
        Some("Item added!")
    );
}

#[tokio::test]
async fn add_without_image_uses_placeholder() {
    let mut session = Session::open(MemoryStore::new());

    session
        .submit(&FormMode::Create, &widget_form())
        .await
        .unwrap();

    assert_eq!(session.inventory()[0].image, PLACEHOLDER_IMAGE);
}

#[tokio::test]
async fn add_with_image_stores_data_url() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("photo.gif");
    std::fs::write(&path, b"GIF89a").unwrap();
    let mut session = Session::open(MemoryStore::new());
    let form = ItemForm {
        image: path.display().to_string(),
        ..widget_form()
    };

    session.submit(&FormMode::Create, &form).await.unwrap();

    assert_eq!(session.inventory()[0].image, "data:image/gif;base64,R0lGODlh");
}

#[test]
fn delete_confirmed() {
    let mut session = seeded(&[item("1", "a", 1.0, 1.0), item("2", "b", 1.0, 1.0)]);

    assert!(session.delete("1", Confirmation::Accepted).unwrap());

    let ids: Vec<_> = session.inventory().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["2"]);
    assert_eq!(persist::load(session.store()), session.inventory());
}

#[tokio::test]
async fn edit_keeps_id_and_clears_pending() {
    let original = item("1704067200000", "Lamp", 2.0, 19.99);
    let mut session = seeded(&[original.clone()]);

    assert!(session.start_edit(&original.id));
    let (mode, mut form) = session.open_form();
    assert_eq!(mode, FormMode::Edit(original.clone()));
    assert_eq!(form, ItemForm::from_item(&original));

    form.quantity = "7".to_string();
    let committed = session.submit(&mode, &form).await.unwrap();

    assert_eq!(committed, Committed::Updated(original.id.clone()));
    assert!(session.pending_edit().is_none());
    assert_eq!(session.inventory().len(), 1);
    let stored = &persist::load(session.store())[0];
    assert_eq!(stored.id, original.id);
    assert_eq!(stored.quantity, 7.0);
    assert_eq!(stored.image, original.image);
}

#[tokio::test]
async fn edit_replaces_in_place() {
    let mut session = seeded(&[
        item("1", "a", 1.0, 1.0),
        item("2", "b", 1.0, 1.0),
        item("3", "c", 1.0, 1.0),
    ]);

    session.start_edit("2");
    let (mode, mut form) = session.open_form();
    form.name = "renamed".to_string();
    session.submit(&mode, &form).await.unwrap();

    let names: Vec<_> = session.inventory().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["a", "renamed", "c"]);
}

#[tokio::test]
async fn invalid_form_persists_nothing() {
    let mut session = Session::open(MemoryStore::new());
    let form = ItemForm {
        price: "two fifty".to_string(),
        ..widget_form()
    };

    let err = session.submit(&FormMode::Create, &form).await.unwrap_err();

    assert!(matches!(
        err,
        SessionError::Form(FormError::InvalidPrice(_))
    ));
    assert!(session.inventory().is_empty());
    assert_eq!(session.store().get(INVENTORY_KEY).unwrap(), None);
}

#[test]
fn empty_search_returns_everything() {
    let items = [item("1", "a", 1.0, 1.0), item("2", "b", 1.0, 1.0)];
    let mut session = seeded(&items);

    session.search("");

    assert_eq!(session.displayed(), items);
}

#[test]
fn sort_by_price_is_non_decreasing() {
    let mut session = seeded(&[
        item("1", "a", 3.0, 4.0),
        item("2", "b", 1.0, 1.5),
        item("3", "c", 2.0, 4.0),
        item("4", "d", 9.0, 0.0),
    ]);

    session.sort_by(SortKey::Price);

    let shown = session.displayed();
    assert!(shown.windows(2).all(|w| w[0].price <= w[1].price));
    let ids: Vec<_> = shown.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["4", "2", "1", "3"]);
}

#[test]
fn rendering_is_idempotent() {
    let items = [item("1", "a", 1.0, 1.0), item("2", "b", 2.0, 2.0)];

    assert_eq!(render::rows(&items), render::rows(&items));
}

#[tokio::test]
async fn inventory_survives_reopen_on_disk() {
    let dir = TempDir::new().unwrap();

    let added = {
        let mut session = Session::open(DirStore::open(dir.path()).unwrap());
        session
            .submit(&FormMode::Create, &widget_form())
            .await
            .unwrap();
        session.inventory().to_vec()
    };

    let session = Session::open(DirStore::open(dir.path()).unwrap());
    assert_eq!(session.inventory(), added);
}
