//! Tests for typed collection access.

use heritage_core::{BOOKS, Book, BookPatch, LOCATIONS, Location, LocationImages, LocationPatch};
use heritage_error::StoreErrorKind;
use heritage_store::{DocumentStore, JsonFileStore};
use serde_json::json;
use tempfile::TempDir;

fn book(id: &str, title: &str) -> Book {
    Book {
        id: id.to_string(),
        title: title.to_string(),
        author: "B".to_string(),
        description: "About the island".to_string(),
        link: "https://example.org/book".to_string(),
        cover: None,
        isbn: None,
    }
}

async fn store() -> (TempDir, JsonFileStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp_dir.path()).unwrap();
    store.ensure_collection(BOOKS).await.unwrap();
    store.ensure_collection(LOCATIONS).await.unwrap();
    (temp_dir, store)
}

#[tokio::test]
async fn test_typed_insert_list_get() {
    let (_dir, store) = store().await;
    let books = store.collection::<Book>(BOOKS);

    books.insert(&book("2", "Second")).await.unwrap();
    books.insert(&book("1", "First")).await.unwrap();

    let titles: Vec<_> = books
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.title)
        .collect();
    assert_eq!(titles, vec!["Second", "First"]);
    assert_eq!(books.get("1").await.unwrap(), book("1", "First"));
}

#[tokio::test]
async fn test_typed_patch_only_touches_given_fields() {
    let (_dir, store) = store().await;
    let books = store.collection::<Book>(BOOKS);
    books.insert(&book("1", "A")).await.unwrap();

    let patch = BookPatch {
        title: Some("X".to_string()),
        ..Default::default()
    };
    let updated = books.update("1", &patch).await.unwrap();

    assert_eq!(updated.title, "X");
    assert_eq!(updated.author, "B");
    assert_eq!(updated.link, "https://example.org/book");
}

#[tokio::test]
async fn test_unknown_fields_survive_typed_updates() {
    let (_dir, store) = store().await;
    store
        .insert(
            LOCATIONS,
            json!({
                "id": "fort-ward",
                "title": "Fort Ward",
                "slug": "fort-ward",
                "description": "Battery",
                "curator_notes": "keep"
            })
            .try_into()
            .unwrap(),
        )
        .await
        .unwrap();

    let locations = store.collection::<Location>(LOCATIONS);
    let images = LocationImages {
        full: Some("public/images/x-full.webp".to_string()),
        card: Some("public/images/x-card.webp".to_string()),
        thumb: Some("public/images/x-thumb.webp".to_string()),
    };
    let updated = locations
        .update("fort-ward", &LocationPatch::images(images.clone()))
        .await
        .unwrap();
    assert_eq!(updated.images, images);

    let raw = store.get(LOCATIONS, "fort-ward").await.unwrap();
    assert_eq!(raw.get("curator_notes"), Some(&json!("keep")));
}

#[tokio::test]
async fn test_shape_mismatch_is_format_error() {
    let (_dir, store) = store().await;
    store
        .insert(BOOKS, json!({ "id": "1", "title": "No author" }).try_into().unwrap())
        .await
        .unwrap();

    let err = store.collection::<Book>(BOOKS).get("1").await.unwrap_err();
    assert!(matches!(
        err.as_store().unwrap().kind(),
        StoreErrorKind::Format(_)
    ));
}

#[tokio::test]
async fn test_typed_delete_returns_record() {
    let (_dir, store) = store().await;
    let books = store.collection::<Book>(BOOKS);
    books.insert(&book("1", "A")).await.unwrap();

    let removed = books.delete("1").await.unwrap();
    assert_eq!(removed.id, "1");
    assert!(books.list().await.unwrap().is_empty());
}
