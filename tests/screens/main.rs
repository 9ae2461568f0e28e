//! Integration tests for collection screens: store, query criteria, edit
//! sessions and delete confirmation working together over the service
//! doubles.

mod support;

use std::sync::Arc;

use curator::collections::{roles, users, Status, User};
use curator::{
    CollectionScreen, CollectionStore, FieldValue, FormError, InMemoryDataService, LoadPhase,
    RecordingNotifier, ScreenError, ServiceError, StoreError,
};

use support::{role, user, GatedService};

fn users_screen(
    service: InMemoryDataService<User>,
) -> (CollectionScreen<User>, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    let screen = CollectionScreen::new(
        users::CONFIG,
        Arc::new(service),
        Arc::new(notifier.clone()),
    );
    (screen, notifier)
}

fn seeded_users_service() -> InMemoryDataService<User> {
    InMemoryDataService::with_records(vec![
        user("Amy", "amy@example.com", "Editor", Status::Active),
        user("Bob", "bob@example.com", "Viewer", Status::Inactive),
    ])
    .with_unique_key("email", |u: &User| u.email.clone())
}

#[tokio::test]
async fn load_populates_the_store_and_view() {
    let (screen, _notifier) = users_screen(seeded_users_service());

    assert_eq!(screen.phase().unwrap(), LoadPhase::Pending);
    screen.load().await.unwrap();
    assert_eq!(screen.phase().unwrap(), LoadPhase::Ready);

    let page = screen.view().unwrap();
    assert_eq!(page.total, 2);
    let names: Vec<&str> = page.records.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["Amy", "Bob"]);
}

#[tokio::test]
async fn failed_load_degrades_to_a_visible_error() {
    let service = InMemoryDataService::<User>::new();
    service.fail_next(ServiceError::Fetch("service unavailable".to_string()));
    let (screen, notifier) = users_screen(service);

    let err = screen.load().await.unwrap_err();
    assert!(matches!(err, StoreError::Service(ServiceError::Fetch(_))));
    assert_eq!(screen.phase().unwrap(), LoadPhase::Failed);
    assert_eq!(notifier.errors(), vec!["service unavailable"]);

    // The screen stays usable: an empty view, not a crash.
    assert!(screen.view().unwrap().is_empty());
}

#[tokio::test]
async fn create_flow_commits_canonical_record_and_closes_session() {
    let (mut screen, notifier) = users_screen(seeded_users_service());
    screen.load().await.unwrap();

    screen.begin_create(users::default_draft(&[role("Editor", &["read"])]));
    screen
        .update_field("name", FieldValue::text("Carol"))
        .unwrap();
    screen
        .update_field("email", FieldValue::text("carol@example.com"))
        .unwrap();

    screen.submit().await.unwrap();

    assert!(screen.session().is_none());
    let records = screen.store().records().unwrap();
    let created = records.iter().find(|u| u.name == "Carol").unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.role, "Editor");
    assert_eq!(notifier.successes(), vec!["User created successfully!"]);
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_service() {
    let service = seeded_users_service();
    let (mut screen, notifier) = users_screen(service.clone());
    screen.load().await.unwrap();

    screen.begin_create(users::default_draft(&[]));
    let err = screen.submit().await.unwrap_err();
    assert_eq!(err, ScreenError::Form(FormError::Missing("name".to_string())));

    // Session stays open for correction; nothing was sent or notified.
    assert!(screen.session().is_some());
    assert_eq!(service.snapshot().len(), 2);
    assert!(notifier.take().is_empty());
}

#[tokio::test]
async fn rejected_save_keeps_the_session_open_with_draft_intact() {
    let (mut screen, notifier) = users_screen(seeded_users_service());
    screen.load().await.unwrap();

    screen.begin_create(users::default_draft(&[]));
    screen
        .update_field("name", FieldValue::text("Amy Clone"))
        .unwrap();
    screen
        .update_field("email", FieldValue::text("amy@example.com"))
        .unwrap();

    let err = screen.submit().await.unwrap_err();
    assert!(matches!(err, ScreenError::Store(_)));

    let session = screen.session().unwrap();
    assert_eq!(session.draft().email, "amy@example.com");
    assert_eq!(
        notifier.errors(),
        vec!["a user with this email already exists"]
    );
    assert_eq!(screen.store().len().unwrap(), 2);
}

#[tokio::test]
async fn edit_flow_replaces_a_single_entry() {
    let (mut screen, notifier) = users_screen(seeded_users_service());
    screen.load().await.unwrap();

    assert!(screen.begin_edit("users-2").unwrap());
    screen
        .update_field("status", FieldValue::text("active"))
        .unwrap();
    screen.submit().await.unwrap();

    assert!(screen.session().is_none());
    let records = screen.store().records().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].status, Status::Active);
    assert_eq!(records[0].status, Status::Active);
    assert_eq!(notifier.successes(), vec!["User updated successfully!"]);
}

#[tokio::test]
async fn editing_an_unknown_id_opens_nothing() {
    let (mut screen, _notifier) = users_screen(seeded_users_service());
    screen.load().await.unwrap();

    assert!(!screen.begin_edit("users-99").unwrap());
    assert!(screen.session().is_none());
}

#[tokio::test]
async fn cancel_discards_the_draft_without_a_service_call() {
    let service = seeded_users_service();
    let (mut screen, notifier) = users_screen(service.clone());
    screen.load().await.unwrap();

    assert!(screen.begin_edit("users-1").unwrap());
    screen
        .update_field("name", FieldValue::text("Renamed"))
        .unwrap();
    screen.cancel_edit();

    assert!(screen.session().is_none());
    assert_eq!(screen.store().get("users-1").unwrap().unwrap().name, "Amy");
    assert_eq!(service.snapshot()[0].name, "Amy");
    assert!(notifier.take().is_empty());
}

#[tokio::test]
async fn role_name_is_immutable_once_created() {
    let service = InMemoryDataService::with_records(vec![
        role("Admin", &["read", "write", "delete"]),
        role("Viewer", &["read"]),
    ])
    .with_unique_key("name", |r: &curator::collections::Role| r.name.clone());

    let notifier = RecordingNotifier::new();
    let mut screen = CollectionScreen::new(
        roles::CONFIG,
        Arc::new(service),
        Arc::new(notifier.clone()),
    );
    screen.load().await.unwrap();

    assert!(screen.begin_edit("roles-1").unwrap());
    let err = screen
        .update_field("name", FieldValue::text("Root"))
        .unwrap_err();
    assert_eq!(err, FormError::Immutable("name".to_string()));

    // Everything else stays editable.
    screen
        .update_field("description", FieldValue::text("Full access"))
        .unwrap();
    screen.submit().await.unwrap();

    let stored = screen.store().get("roles-1").unwrap().unwrap();
    assert_eq!(stored.name, "Admin");
    assert_eq!(stored.description.as_deref(), Some("Full access"));
}

#[tokio::test]
async fn toggling_a_permission_twice_restores_the_draft() {
    let service = InMemoryDataService::with_records(vec![role("Viewer", &["read"])]);
    let notifier = RecordingNotifier::new();
    let mut screen = CollectionScreen::new(
        roles::CONFIG,
        Arc::new(service),
        Arc::new(notifier.clone()),
    );
    screen.load().await.unwrap();

    assert!(screen.begin_edit("roles-1").unwrap());
    let before = screen.session().unwrap().draft().permissions.clone();

    screen.toggle_tag("permissions", "write").unwrap();
    assert_eq!(
        screen.session().unwrap().draft().permissions,
        vec!["read", "write"]
    );

    screen.toggle_tag("permissions", "write").unwrap();
    assert_eq!(screen.session().unwrap().draft().permissions, before);
}

#[tokio::test]
async fn delete_cancel_then_confirm() {
    let (mut screen, notifier) = users_screen(seeded_users_service());
    screen.load().await.unwrap();

    // Request then cancel: the record survives and nothing fires.
    assert!(screen.request_delete("users-1").unwrap());
    assert_eq!(screen.pending_delete().unwrap().name, "Amy");
    screen.cancel_delete();
    screen.confirm_delete().await.unwrap();
    assert!(screen.store().get("users-1").unwrap().is_some());
    assert!(notifier.take().is_empty());

    // Request again and confirm: gone, with exactly one success.
    assert!(screen.request_delete("users-1").unwrap());
    screen.confirm_delete().await.unwrap();
    assert!(screen.store().get("users-1").unwrap().is_none());
    assert_eq!(notifier.successes(), vec!["User deleted successfully!"]);

    // Confirmation is idle again; confirming once more is a no-op.
    screen.confirm_delete().await.unwrap();
    assert_eq!(screen.store().len().unwrap(), 1);
}

#[tokio::test]
async fn second_delete_request_replaces_the_target() {
    let (mut screen, _notifier) = users_screen(seeded_users_service());
    screen.load().await.unwrap();

    assert!(screen.request_delete("users-1").unwrap());
    assert!(screen.request_delete("users-2").unwrap());
    screen.confirm_delete().await.unwrap();

    assert!(screen.store().get("users-1").unwrap().is_some());
    assert!(screen.store().get("users-2").unwrap().is_none());
}

#[tokio::test]
async fn rejected_delete_leaves_the_record_and_the_dialog_closed() {
    let service = seeded_users_service();
    let (mut screen, notifier) = users_screen(service.clone());
    screen.load().await.unwrap();

    assert!(screen.request_delete("users-1").unwrap());
    service.fail_next(ServiceError::Delete("referenced by audit log".to_string()));
    let err = screen.confirm_delete().await.unwrap_err();
    assert!(matches!(err, StoreError::Service(ServiceError::Delete(_))));

    assert!(screen.store().get("users-1").unwrap().is_some());
    assert!(screen.pending_delete().is_none());
    assert_eq!(notifier.errors(), vec!["referenced by audit log"]);
}

#[tokio::test]
async fn criteria_changes_reset_pagination() {
    let records: Vec<User> = (0..25)
        .map(|i| {
            user(
                &format!("user{:02}", i),
                &format!("user{:02}@example.com", i),
                "Viewer",
                Status::Active,
            )
        })
        .collect();
    let (mut screen, _notifier) = users_screen(InMemoryDataService::with_records(records));
    screen.load().await.unwrap();

    screen.set_page(3).unwrap();
    assert_eq!(screen.view().unwrap().records.len(), 5);

    screen.set_filter("status", "active");
    assert_eq!(screen.criteria().page(), 1);

    screen.set_page(2).unwrap();
    screen.set_search("user0");
    assert_eq!(screen.criteria().page(), 1);
}

#[tokio::test]
async fn set_page_clamps_into_the_valid_range() {
    let (mut screen, _notifier) = users_screen(seeded_users_service());
    screen.load().await.unwrap();

    screen.set_page(99).unwrap();
    assert_eq!(screen.criteria().page(), 1);

    // An unconfigured filter field is ignored entirely.
    screen.set_filter("email", "amy@example.com");
    assert_eq!(screen.view().unwrap().total, 2);
}

#[tokio::test]
async fn response_arriving_after_teardown_is_discarded() {
    let inner = InMemoryDataService::<User>::new();
    let gated = Arc::new(GatedService::new(inner.clone()));
    let entered = Arc::clone(&gated.entered);
    let release = Arc::clone(&gated.release);

    let notifier = RecordingNotifier::new();
    let store = CollectionStore::new("User", gated, Arc::new(notifier.clone()));
    store.load().await.unwrap();

    let task = {
        let store = store.clone();
        tokio::spawn(async move {
            store
                .create(&user("Late", "late@example.com", "Viewer", Status::Active))
                .await
        })
    };

    // The create is now parked inside the service; tear the screen down,
    // then let the response come back.
    entered.notified().await;
    store.close();
    release.notify_one();

    let result = task.await.unwrap();
    assert_eq!(result.unwrap_err(), StoreError::Closed);
    assert!(store.records().unwrap().is_empty());
    assert!(notifier.take().is_empty());
}

#[tokio::test]
async fn new_user_draft_is_seeded_from_the_roles_screen() {
    let roles_service = InMemoryDataService::with_records(vec![
        role("Admin", &["read", "write"]),
        role("Viewer", &["read"]),
    ]);
    let roles_screen = CollectionScreen::new(
        roles::CONFIG,
        Arc::new(roles_service),
        Arc::new(RecordingNotifier::new()),
    );
    roles_screen.load().await.unwrap();

    let (mut screen, _notifier) = users_screen(seeded_users_service());
    screen.load().await.unwrap();

    let available = roles_screen.store().records().unwrap();
    screen.begin_create(users::default_draft(&available));

    let draft = screen.session().unwrap().draft();
    assert_eq!(draft.role, "Admin");
    assert_eq!(draft.status, Status::Active);
}
