//! Entity store and repository semantics: keys, duplicates, version tokens.


use gift_registry::{
    Caller, CreateEventRequest, CreateGiftItemRequest, CreateGiftListRequest, EntityStore, Event,
    EventRepository, GiftItem, GiftItemRepository, GiftList, GiftListRepository,
    InMemoryEntityStore, RepositoryError, StoreError, TableRepository, TablesExt, EVENT_PARTITION,
};

fn event(name: &str) -> Event {
    Event::new(
        CreateEventRequest {
            name: name.into(),
            description: "original".into(),
            event_date: None,
        },
        &Caller::new("u1", "Ann"),
    )
}

fn list(event_name: &str, owner: &str) -> GiftList {
    GiftList::new(
        CreateGiftListRequest {
            name: format!("{}'s list", owner),
            event_name: event_name.into(),
        },
        &Caller::new(owner, owner),
    )
}

fn item(list_id: &str, name: &str) -> GiftItem {
    GiftItem::new(CreateGiftItemRequest {
        name: name.into(),
        description: String::new(),
        url: None,
        gift_list_id: list_id.into(),
        quantity: 1,
    })
}

#[test]
fn event_rows_keyed_by_name() {
    let store = InMemoryEntityStore::new();
    let events = EventRepository::new(store.clone(), "Events");
    events.create(event("Birthday")).unwrap();

    let raw = store
        .table::<Event>("Events")
        .get(EVENT_PARTITION, "Birthday")
        .unwrap();
    assert!(raw.is_some());
}

#[test]
fn create_duplicate_is_already_exists_and_keeps_original() {
    let events = EventRepository::new(InMemoryEntityStore::new(), "Events");
    events.create(event("Birthday")).unwrap();

    let mut second = event("Birthday");
    second.description = "overwritten?".into();
    let err = events.create(second).unwrap_err();
    assert!(matches!(err, RepositoryError::AlreadyExists { .. }));
    assert!(err.to_string().contains("already exists"));

    let stored = events.get("Birthday").unwrap().unwrap();
    assert_eq!(stored.data.description, "original");
}

#[test]
fn get_missing_is_none() {
    let events = EventRepository::new(InMemoryEntityStore::new(), "Events");
    assert!(events.get("nope").unwrap().is_none());
}

#[test]
fn concurrent_updates_with_same_token_first_wins() {
    let events = EventRepository::new(InMemoryEntityStore::new(), "Events");
    events.create(event("Birthday")).unwrap();

    let mut first = events.get("Birthday").unwrap().unwrap();
    let mut second = events.get("Birthday").unwrap().unwrap();
    assert_eq!(first.etag, second.etag);

    first.data.description = "first".into();
    let committed = events.update(first).unwrap();
    assert_ne!(committed.etag, second.etag);

    second.data.description = "second".into();
    let err = events.update(second).unwrap_err();
    assert!(err.is_conflict());

    // A fresh read carries the new token and succeeds.
    let mut retry = events.get("Birthday").unwrap().unwrap();
    assert_eq!(retry.data.description, "first");
    retry.data.description = "second".into();
    events.update(retry).unwrap();
    assert_eq!(
        events.get("Birthday").unwrap().unwrap().data.description,
        "second"
    );
}

#[test]
fn update_of_deleted_entity_is_not_found() {
    let events = EventRepository::new(InMemoryEntityStore::new(), "Events");
    events.create(event("Birthday")).unwrap();
    let stale = events.get("Birthday").unwrap().unwrap();

    assert!(events.delete("Birthday").unwrap());

    let err = events.update(stale).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn delete_reports_absence_without_error() {
    let events = EventRepository::new(InMemoryEntityStore::new(), "Events");
    events.create(event("Birthday")).unwrap();

    assert!(events.delete("Birthday").unwrap());
    assert!(!events.delete("Birthday").unwrap());
}

#[test]
fn lists_filtered_by_event_partition() {
    let lists = GiftListRepository::new(InMemoryEntityStore::new(), "GiftLists");
    let ann = lists.create(list("Birthday", "ann")).unwrap().data;
    lists.create(list("Birthday", "bob")).unwrap();
    lists.create(list("Wedding", "ann")).unwrap();

    assert_eq!(lists.get_by_event("Birthday").unwrap().len(), 2);
    assert_eq!(lists.get_by_event("Wedding").unwrap().len(), 1);
    assert!(lists.get_by_event("Graduation").unwrap().is_empty());

    let owned = lists.get_by_event_and_owner("Birthday", "ann").unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].data.id, ann.id);

    let found = lists.find_by_id(&ann.id).unwrap().unwrap();
    assert_eq!(found.data.event_name, "Birthday");
    assert!(lists.find_by_id("missing").unwrap().is_none());
}

#[test]
fn items_filtered_by_list_partition() {
    let items = GiftItemRepository::new(InMemoryEntityStore::new(), "GiftItems");
    items.create(item("list-a", "Kite")).unwrap();
    items.create(item("list-a", "Yoyo")).unwrap();
    items.create(item("list-b", "Book")).unwrap();

    let mut names: Vec<String> = items
        .get_by_gift_list("list-a")
        .unwrap()
        .into_iter()
        .map(|i| i.data.name)
        .collect();
    names.sort();
    assert_eq!(names, vec!["Kite", "Yoyo"]);
}

#[test]
fn tables_are_isolated() {
    let store = InMemoryEntityStore::new();
    let events = EventRepository::new(store.clone(), "Events");
    let test_events = EventRepository::new(store.clone(), "TestEvents");

    events.create(event("Birthday")).unwrap();
    test_events.create(event("Birthday")).unwrap();

    assert_eq!(events.get_all().unwrap().len(), 1);
    assert_eq!(store.list_all::<Event>("TestEvents").unwrap().len(), 1);
}

#[test]
fn raw_store_create_conflict_is_distinct_from_repository_error() {
    let store = InMemoryEntityStore::new();
    store.create_entity("Events", &event("Birthday")).unwrap();

    let err = store
        .create_entity("Events", &event("Birthday"))
        .unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists(ref key) if key.row == "Birthday"));
}

#[test]
fn generic_repository_mints_fresh_tokens() {
    let repo: TableRepository<_, Event> =
        TableRepository::new(InMemoryEntityStore::new(), "Events", "Event");
    assert_eq!(repo.table_name(), "Events");

    let created = repo.create(event("Birthday")).unwrap();
    assert!(created.etag.as_str().starts_with("W/\""));

    let updated = repo.update(created.clone()).unwrap();
    assert_ne!(updated.etag, created.etag);

    let err = repo.update(created).unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(repo.list_all().unwrap().len(), 1);
}
