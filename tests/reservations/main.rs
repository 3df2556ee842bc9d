//! Reservation engine: counting, limits, masking and lost races.

#[path = "../support/mod.rs"]
mod support;


use gift_registry::{GiftItemRepository, InMemoryEntityStore, ServiceError, UpdateGiftItemRequest};
use support::{create_item, guest, owner, registry, seed_list};

#[test]
fn fills_up_then_refuses() {
    let registry = registry();
    let (_, list) = seed_list(&registry);
    let item = create_item(&registry, &list, "Kite", 2);
    let items = registry.gift_items();
    let (a, b) = (guest(1), guest(2));

    let after_first = items.reserve(&list.id, &item.id, &a).unwrap();
    assert_eq!(after_first.total_reserved(), 1);
    assert!(!after_first.is_fully_reserved());

    let after_second = items.reserve(&list.id, &item.id, &a).unwrap();
    assert_eq!(after_second.total_reserved(), 2);
    assert!(after_second.is_fully_reserved());
    assert_eq!(after_second.reservations.len(), 1);
    assert_eq!(after_second.reservations[0].quantity, 2);

    let err = items.reserve(&list.id, &item.id, &b).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(ref m) if m.contains("fully reserved")));

    let stored = items.get(&list.id, &item.id, &b.user_id).unwrap().unwrap();
    assert_eq!(stored.total_reserved(), 2);
    assert!(!stored.is_reserved_by(&b.user_id));
}

#[test]
fn distinct_users_each_get_one_record() {
    let registry = registry();
    let (_, list) = seed_list(&registry);
    let item = create_item(&registry, &list, "Socks", 3);
    let items = registry.gift_items();

    for n in 0..3 {
        items.reserve(&list.id, &item.id, &guest(n)).unwrap();
    }

    let seen = items.get(&list.id, &item.id, "guest-0").unwrap().unwrap();
    assert_eq!(seen.total_reserved(), 3);
    assert_eq!(seen.reservations.len(), 3);
    assert!(seen.reservations.iter().all(|r| r.quantity == 1));
    assert_eq!(seen.first_reservation().unwrap().display_name, "Guest 0");

    let err = items.reserve(&list.id, &item.id, &guest(9)).unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[test]
fn owner_cannot_reserve_own_item() {
    let registry = registry();
    let (_, list) = seed_list(&registry);
    let item = create_item(&registry, &list, "Kite", 2);

    let err = registry
        .gift_items()
        .reserve(&list.id, &item.id, &owner())
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(ref m) if m.contains("own gift list")));

    let seen = registry
        .gift_items()
        .get(&list.id, &item.id, "guest-1")
        .unwrap()
        .unwrap();
    assert!(seen.reservations.is_empty());
}

#[test]
fn unreserve_steps_down_then_removes() {
    let registry = registry();
    let (_, list) = seed_list(&registry);
    let item = create_item(&registry, &list, "Kite", 5);
    let items = registry.gift_items();
    let a = guest(1);

    items.reserve(&list.id, &item.id, &a).unwrap();
    items.reserve(&list.id, &item.id, &a).unwrap();

    let once = items.unreserve(&list.id, &item.id, &a.user_id).unwrap();
    assert_eq!(once.reservation_for(&a.user_id).unwrap().quantity, 1);

    let twice = items.unreserve(&list.id, &item.id, &a.user_id).unwrap();
    assert!(twice.reservation_for(&a.user_id).is_none());
    assert!(twice.reservations.is_empty());

    let err = items.unreserve(&list.id, &item.id, &a.user_id).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[test]
fn unreserve_without_reservation_fails() {
    let registry = registry();
    let (_, list) = seed_list(&registry);
    let item = create_item(&registry, &list, "Kite", 1);
    registry
        .gift_items()
        .reserve(&list.id, &item.id, &guest(1))
        .unwrap();

    let err = registry
        .gift_items()
        .unreserve(&list.id, &item.id, "guest-2")
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(ref m) if m.contains("no reservation")));
}

#[test]
fn reserve_missing_item_is_not_found() {
    let registry = registry();
    let (_, list) = seed_list(&registry);

    let err = registry
        .gift_items()
        .reserve(&list.id, "no-such-item", &guest(1))
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let err = registry
        .gift_items()
        .reserve("no-such-list", "no-such-item", &guest(1))
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[test]
fn quantity_lowered_below_reservations_is_kept() {
    let registry = registry();
    let (_, list) = seed_list(&registry);
    let item = create_item(&registry, &list, "Mug", 3);
    let items = registry.gift_items();
    items.reserve(&list.id, &item.id, &guest(1)).unwrap();
    items.reserve(&list.id, &item.id, &guest(2)).unwrap();

    let updated = items
        .update(
            &list.id,
            &item.id,
            UpdateGiftItemRequest {
                name: "Mug".into(),
                description: "A Mug".into(),
                url: None,
                quantity: 1,
            },
            &owner().user_id,
        )
        .unwrap();
    assert_eq!(updated.quantity, 1);
    assert_eq!(updated.id, item.id);

    let seen = items.get(&list.id, &item.id, "guest-1").unwrap().unwrap();
    assert_eq!(seen.quantity, 1);
    assert_eq!(seen.reservations.len(), 2);
    assert_eq!(seen.total_reserved(), 2);
    assert!(seen.is_fully_reserved());
}

#[test]
fn owner_never_sees_reservations() {
    let registry = registry();
    let (_, list) = seed_list(&registry);
    let item = create_item(&registry, &list, "Kite", 4);
    let items = registry.gift_items();
    items.reserve(&list.id, &item.id, &guest(1)).unwrap();
    items.reserve(&list.id, &item.id, &guest(2)).unwrap();

    let owner_id = owner().user_id;
    let single = items.get(&list.id, &item.id, &owner_id).unwrap().unwrap();
    assert!(single.reservations.is_empty());
    assert!(!single.is_fully_reserved());

    let listed = items.list_by_gift_list(&list.id, &owner_id).unwrap();
    assert!(listed.iter().all(|i| i.reservations.is_empty()));

    // The owner's reads did not touch storage.
    let raw = GiftItemRepository::new(registry.store().clone(), "GiftItems")
        .get(&list.id, &item.id)
        .unwrap()
        .unwrap();
    assert_eq!(raw.data.reservations.len(), 2);

    let guest_view = items.list_by_gift_list(&list.id, "guest-3").unwrap();
    assert_eq!(guest_view[0].reservations, raw.data.reservations);
}

#[test]
fn reserved_items_by_event_and_user() {
    let registry = registry();
    let (event, list) = seed_list(&registry);
    let other_owner = guest(7);
    let other_list = support::create_list(&registry, &event.name, "Guest 7's wishes", &other_owner);

    let kite = create_item(&registry, &list, "Kite", 2);
    let book = create_item(&registry, &list, "Book", 1);
    let lamp = create_item(&registry, &other_list, "Lamp", 1);
    let items = registry.gift_items();
    let a = guest(1);

    items.reserve(&list.id, &kite.id, &a).unwrap();
    items.reserve(&other_list.id, &lamp.id, &a).unwrap();
    items.reserve(&list.id, &book.id, &guest(2)).unwrap();

    let mut mine: Vec<String> = items
        .list_reserved_by_event_and_user(&event.name, &a.user_id)
        .unwrap()
        .into_iter()
        .map(|i| i.name)
        .collect();
    mine.sort();
    assert_eq!(mine, vec!["Kite", "Lamp"]);

    assert!(items
        .list_reserved_by_event_and_user("Wedding", &a.user_id)
        .unwrap()
        .is_empty());
}

#[test]
fn reservations_survive_store_round_trip_independently() {
    let store = InMemoryEntityStore::new();
    let registry = gift_registry::GiftRegistry::with_store(store, &gift_registry::Config::default());
    let (_, list) = seed_list(&registry);
    let item = create_item(&registry, &list, "Kite", 2);

    let mut copy = registry
        .gift_items()
        .reserve(&list.id, &item.id, &guest(1))
        .unwrap();
    copy.reservations.clear();

    let fresh = registry
        .gift_items()
        .get(&list.id, &item.id, "guest-2")
        .unwrap()
        .unwrap();
    assert_eq!(fresh.reservations.len(), 1);
}
