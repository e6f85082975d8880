//! Store Tests
//!
//! Stores over in-memory collections, including outage behaviour.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::domain::{Content, CreationDate, DataItem, DomainError, ItemKind, RecordId, Screen};
    use crate::repository::{DocumentCollection, MemoryCollection};
    use crate::session::Session;
    use crate::store::{DataItemStore, ScreenStore};

    struct Fixture {
        collection: Arc<MemoryCollection>,
        session: Session,
        items: DataItemStore,
    }

    fn fixture() -> Fixture {
        let collection = Arc::new(MemoryCollection::new("dataItems"));
        let session = Session::signed_in("a@x.com").unwrap();
        let items = DataItemStore::for_data_items(collection.clone(), session.clone());
        Fixture { collection, session, items }
    }

    fn screens(session: &Session) -> (Arc<MemoryCollection>, ScreenStore) {
        let collection = Arc::new(MemoryCollection::new("screens"));
        let store = ScreenStore::for_screens(collection.clone(), session.clone());
        (collection, store)
    }

    fn item(tags: &[&str]) -> DataItem {
        let mut item = DataItem::new("a@x.com", CreationDate::from_ymd(2024, 2, 29).unwrap());
        for tag in tags {
            item.add_tag(tag);
        }
        item
    }

    #[tokio::test]
    async fn test_add_then_list_round_trip() {
        let f = fixture();
        let mut values = item(&["x"]);
        values.field1 = "title".into();
        values.set_kind(ItemKind::Number);
        values.field2 = Content::Number(12.5);

        let added = f.items.add(values.clone()).await.expect("Add failed");
        assert!(added.id.is_some());

        // a fresh store sees exactly what was written
        let reader = DataItemStore::for_data_items(f.collection.clone(), f.session.clone());
        let listed = reader.list().await.expect("List failed");
        assert_eq!(listed.len(), 1);
        let expected = DataItem { id: added.id.clone(), ..values };
        assert_eq!(listed[0], expected);
    }

    #[tokio::test]
    async fn test_list_scopes_to_owner_and_replaces_state() {
        let f = fixture();
        f.items.add(item(&["mine"])).await.unwrap();
        f.collection
            .create(&json!({ "ownerEmail": "b@x.com", "creationDate": "01-01-2024", "tags": ["theirs"] }))
            .await
            .unwrap();

        let listed = f.items.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].tags, vec!["mine".to_string()]);
        assert_eq!(f.items.snapshot(), listed);
    }

    #[tokio::test]
    async fn test_list_without_user_clears_and_succeeds() {
        let f = fixture();
        f.items.add(item(&[])).await.unwrap();
        assert!(f.items.records().is_some());

        f.session.sign_out();
        let listed = f.items.list().await.expect("List must succeed when signed out");
        assert!(listed.is_empty());
        assert!(f.items.records().is_none());

        let (_, screens) = screens(&f.session);
        assert!(screens.list().await.unwrap().is_empty());
        assert!(screens.records().is_none());
    }

    #[tokio::test]
    async fn test_failed_list_keeps_previous_state() {
        let f = fixture();
        f.items.add(item(&["x"])).await.unwrap();
        f.items.list().await.unwrap();

        f.collection.set_offline(true);
        assert!(matches!(f.items.list().await, Err(DomainError::Storage(_))));
        assert_eq!(f.items.snapshot().len(), 1);
        assert!(!f.items.is_loading());
    }

    #[tokio::test]
    async fn test_failed_writes_leave_local_state_unchanged() {
        let f = fixture();
        let saved = f.items.add(item(&["x"])).await.unwrap();
        let before = f.items.snapshot();

        f.collection.set_offline(true);
        assert!(f.items.add(item(&["y"])).await.is_err());

        let mut changed = saved.clone();
        changed.field1 = "changed".into();
        assert!(f.items.update(changed).await.is_err());
        assert!(f.items.remove(saved.id.as_ref().unwrap()).await.is_err());

        assert_eq!(f.items.snapshot(), before);
        assert!(!f.items.is_loading());
    }

    #[tokio::test]
    async fn test_update_replaces_local_entry_and_is_idempotent() {
        let f = fixture();
        let saved = f.items.add(item(&["x"])).await.unwrap();
        let id = saved.id.clone().unwrap();

        let mut changed = saved.clone();
        changed.field1 = "renamed".into();
        changed.add_tag("y");
        f.items.update(changed.clone()).await.unwrap();
        let first = f.collection.get(&id).unwrap();

        f.items.update(changed.clone()).await.unwrap();
        assert_eq!(f.collection.get(&id).unwrap(), first);
        assert_eq!(f.items.find(&id), Some(changed));
        assert_eq!(f.items.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_update_requires_id() {
        let f = fixture();
        assert!(matches!(f.items.update(item(&[])).await, Err(DomainError::InvalidInput(_))));
        assert!(f.collection.is_empty());
    }

    #[tokio::test]
    async fn test_remove_unknown_id_succeeds_without_change() {
        let f = fixture();
        f.items.add(item(&["x"])).await.unwrap();
        let before = f.items.snapshot();

        f.items.remove(&RecordId::new("not-here")).await.expect("Remote delete of absent id succeeds");
        assert_eq!(f.items.snapshot(), before);
    }

    #[tokio::test]
    async fn test_remove_drops_local_entry() {
        let f = fixture();
        let saved = f.items.add(item(&["x"])).await.unwrap();
        f.items.add(item(&["y"])).await.unwrap();
        f.items.remove(saved.id.as_ref().unwrap()).await.unwrap();
        let left = f.items.snapshot();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].tags, vec!["y".to_string()]);
        assert_eq!(f.collection.len(), 1);
    }

    #[tokio::test]
    async fn test_list_skips_documents_that_do_not_decode() {
        let f = fixture();
        f.items.add(item(&["good"])).await.unwrap();
        f.collection
            .create(&json!({ "ownerEmail": "a@x.com", "creationDate": "10-16-2024", "tags": ["bad-date"] }))
            .await
            .unwrap();
        f.collection
            .create(&json!({ "ownerEmail": "a@x.com", "creationDate": "01-01-2024", "type": "video" }))
            .await
            .unwrap();
        f.collection
            .create(&json!({ "ownerEmail": "a@x.com", "tags": ["no-date"] }))
            .await
            .unwrap();

        let listed = f.items.list().await.expect("Undecodable documents must not fail the list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].tags, vec!["good".to_string()]);
        assert_eq!(f.items.snapshot(), listed);
        assert_eq!(f.collection.len(), 4);
    }

    #[tokio::test]
    async fn test_data_item_add_stamps_session_owner() {
        let f = fixture();
        let mut foreign = item(&["x"]);
        foreign.owner_email = "b@x.com".into();
        let added = f.items.add(foreign).await.unwrap();
        assert_eq!(added.owner_email, "a@x.com");
        let id = added.id.clone().unwrap();
        assert_eq!(f.collection.get(&id).unwrap()["ownerEmail"], "a@x.com");

        let mut anonymous = item(&[]);
        anonymous.owner_email.clear();
        assert_eq!(f.items.add(anonymous).await.unwrap().owner_email, "a@x.com");
        assert_eq!(f.items.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_rejects_record_of_another_owner() {
        let f = fixture();
        let saved = f.items.add(item(&["x"])).await.unwrap();
        let before = f.collection.get(saved.id.as_ref().unwrap()).unwrap();

        let mut stolen = saved.clone();
        stolen.owner_email = "b@x.com".into();
        stolen.field1 = "changed".into();
        assert!(matches!(f.items.update(stolen).await, Err(DomainError::InvalidInput(_))));
        assert_eq!(f.collection.get(saved.id.as_ref().unwrap()).unwrap(), before);
        assert_eq!(f.items.snapshot(), vec![saved]);
    }

    #[tokio::test]
    async fn test_writes_require_session() {
        let f = fixture();
        let saved = f.items.add(item(&["x"])).await.unwrap();
        let id = saved.id.clone().unwrap();
        f.session.sign_out();
        f.items.list().await.unwrap();

        assert_eq!(f.items.add(item(&["y"])).await, Err(DomainError::Unauthenticated));
        let mut changed = saved.clone();
        changed.field1 = "changed".into();
        assert_eq!(f.items.update(changed).await, Err(DomainError::Unauthenticated));
        assert_eq!(f.items.remove(&id).await, Err(DomainError::Unauthenticated));

        assert_eq!(f.collection.len(), 1);
        assert_ne!(f.collection.get(&id).unwrap()["field1"], "changed");
        assert!(f.items.records().is_none());
        assert!(!f.items.is_loading());
    }

    #[tokio::test]
    async fn test_screen_create_stamps_owner_and_assigns_id() {
        let session = Session::signed_in("a@x.com").unwrap();
        let (collection, store) = screens(&session);

        let mut screen = Screen::template();
        screen.name = "Home".into();
        screen.owner_email = "someone@else.com".into();
        let saved = store.save(screen).await.expect("Create failed");

        let id = saved.id.clone().expect("id assigned");
        assert!(!id.as_str().is_empty());
        assert_eq!(saved.owner_email, "a@x.com");
        assert_eq!(collection.get(&id).unwrap()["ownerEmail"], "a@x.com");
        assert_eq!(store.find_by_name("Home"), Some(saved));
    }

    #[tokio::test]
    async fn test_screen_save_updates_existing() {
        let session = Session::signed_in("a@x.com").unwrap();
        let (collection, store) = screens(&session);
        let mut saved = store.save(Screen::template()).await.unwrap();
        saved.name = "Renamed".into();
        let updated = store.save(saved.clone()).await.unwrap();
        assert_eq!(updated.id, saved.id);
        assert_eq!(collection.len(), 1);
        assert_eq!(store.snapshot()[0].name, "Renamed");
    }

    #[tokio::test]
    async fn test_screen_create_requires_session() {
        let session = Session::anonymous();
        let (collection, store) = screens(&session);
        assert_eq!(store.add(Screen::template()).await, Err(DomainError::Unauthenticated));
        assert!(collection.is_empty());
    }

    #[tokio::test]
    async fn test_import_json_adds_each_item() {
        let f = fixture();
        let report = f
            .items
            .import_json(
                r#"[
                    {"creationDate": "01-01-2024", "type": "text", "field2": "one", "tags": ["a"]},
                    {"creationDate": "02-01-2024", "type": "number", "field2": 2, "tags": ["a", "b"]}
                ]"#,
            )
            .await
            .unwrap();
        assert_eq!(report.added.len(), 2);
        assert_eq!(report.failed, 0);
        assert!(report.added.iter().all(|i| i.owner_email == "a@x.com"));
        assert_eq!(f.items.tagged("a").len(), 2);
        assert_eq!(f.items.tagged("b").len(), 1);
    }

    #[tokio::test]
    async fn test_import_json_rejects_malformed_input() {
        let f = fixture();
        assert!(matches!(
            f.items.import_json("not json").await,
            Err(DomainError::Serialization(_))
        ));
        assert!(f.collection.is_empty());
    }

    #[tokio::test]
    async fn test_import_counts_failures() {
        let f = fixture();
        f.collection.set_offline(true);
        let report = f
            .items
            .import_json(r#"[{"creationDate": "01-01-2024"}]"#)
            .await
            .unwrap();
        assert!(report.added.is_empty());
        assert_eq!(report.failed, 1);
    }
}
