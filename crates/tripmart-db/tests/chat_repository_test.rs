//! Integration tests for the ChatMessage repository: append, thread
//! listing, read-marking, and unread counts.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use tripmart_core::models::chat_message::{CreateChatMessage, MessageType, Sender};
use tripmart_core::repository::{ChatMessageRepository, Pagination};
use tripmart_db::repository::SurrealChatMessageRepository;
use uuid::Uuid;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    tripmart_db::run_migrations(&db).await.unwrap();
    db
}

fn message(vendor_id: Uuid, sender: Sender, text: &str) -> CreateChatMessage {
    CreateChatMessage {
        vendor_id,
        sender,
        sender_id: Uuid::new_v4(),
        sender_name: match sender {
            Sender::Vendor => "Vera Vendor".into(),
            Sender::Admin => "Ann Admin".into(),
        },
        message: text.into(),
        message_type: MessageType::Text,
        update_request_id: None,
    }
}

#[tokio::test]
async fn append_and_list_thread_in_order() {
    let db = setup().await;
    let repo = SurrealChatMessageRepository::new(db);
    let vendor_id = Uuid::new_v4();

    let first = repo
        .append(message(vendor_id, Sender::Vendor, "hello"))
        .await
        .unwrap();
    repo.append(message(vendor_id, Sender::Admin, "hi there"))
        .await
        .unwrap();
    repo.append(message(Uuid::new_v4(), Sender::Vendor, "other thread"))
        .await
        .unwrap();

    assert!(first.read_at.is_none());
    assert_eq!(first.message, "hello");

    let thread = repo
        .list_by_vendor(vendor_id, Pagination::default())
        .await
        .unwrap();
    assert_eq!(thread.len(), 2);
    assert_eq!(thread[0].message, "hello"); // oldest first
    assert_eq!(thread[1].message, "hi there");
}

#[tokio::test]
async fn mark_read_stamps_counterparty_messages() {
    let db = setup().await;
    let repo = SurrealChatMessageRepository::new(db);
    let vendor_id = Uuid::new_v4();

    repo.append(message(vendor_id, Sender::Admin, "one"))
        .await
        .unwrap();
    repo.append(message(vendor_id, Sender::Admin, "two"))
        .await
        .unwrap();
    repo.append(message(vendor_id, Sender::Vendor, "mine"))
        .await
        .unwrap();

    // The vendor reads the thread: both admin messages get stamped,
    // the vendor's own message does not.
    let stamped = repo.mark_read(vendor_id, Sender::Vendor).await.unwrap();
    assert_eq!(stamped, 2);

    let thread = repo
        .list_by_vendor(vendor_id, Pagination::default())
        .await
        .unwrap();
    for msg in &thread {
        match msg.sender {
            Sender::Admin => assert!(msg.read_at.is_some()),
            Sender::Vendor => assert!(msg.read_at.is_none()),
        }
    }

    // Re-marking finds nothing unread.
    let again = repo.mark_read(vendor_id, Sender::Vendor).await.unwrap();
    assert_eq!(again, 0);
}

#[tokio::test]
async fn unread_counts() {
    let db = setup().await;
    let repo = SurrealChatMessageRepository::new(db);
    let vendor_a = Uuid::new_v4();
    let vendor_b = Uuid::new_v4();

    repo.append(message(vendor_a, Sender::Vendor, "a1"))
        .await
        .unwrap();
    repo.append(message(vendor_b, Sender::Vendor, "b1"))
        .await
        .unwrap();
    repo.append(message(vendor_a, Sender::Admin, "reply"))
        .await
        .unwrap();

    // Admin sees unread vendor messages across all threads.
    assert_eq!(repo.unread_count_for_admin().await.unwrap(), 2);

    // Each vendor sees unread admin messages in their own thread.
    assert_eq!(repo.unread_count_for_vendor(vendor_a).await.unwrap(), 1);
    assert_eq!(repo.unread_count_for_vendor(vendor_b).await.unwrap(), 0);

    // Reading clears the counts on the relevant side.
    repo.mark_read(vendor_a, Sender::Admin).await.unwrap();
    assert_eq!(repo.unread_count_for_admin().await.unwrap(), 1);
}

#[tokio::test]
async fn list_recent_is_newest_first() {
    let db = setup().await;
    let repo = SurrealChatMessageRepository::new(db);

    for i in 0..3 {
        repo.append(message(Uuid::new_v4(), Sender::Vendor, &format!("m{i}")))
            .await
            .unwrap();
    }

    let recent = repo
        .list_recent(Pagination {
            offset: 0,
            limit: 2,
        })
        .await
        .unwrap();
    assert_eq!(recent.len(), 2);
    assert!(recent[0].created_at >= recent[1].created_at);
}
