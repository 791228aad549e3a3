//! Contract checks shared by every backend's tests.
//!
//! Each check expects an empty store and leaves it empty.

use tokio_test::{assert_err, assert_ok};

use super::{Post, PostStore, StorageError};

const T1: i64 = 1_700_000_000;

fn sample(id: i64) -> Post {
    Post::builder(id)
        .title("A")
        .content("B")
        .author(10, "Alice")
        .created_at(T1 - 60)
        .published_at(T1)
        .build()
}

/// Run every contract check in sequence.
pub(crate) async fn run_all(store: &dyn PostStore) {
    lifecycle(store).await;
    round_trip(store).await;
    ordered_by_id(store).await;
    update_missing_is_not_found(store).await;
    delete_missing_is_not_found(store).await;
    update_keeps_created_at(store).await;
}

/// Add, update title, delete: the end-to-end scenario.
pub(crate) async fn lifecycle(store: &dyn PostStore) {
    let post = sample(1);
    assert_ok!(store.add_post(&post).await);

    let posts = store.posts().await.unwrap();
    assert_eq!(posts, vec![post.clone()], "{}", store.backend_name());

    let mut edited = post.clone();
    edited.title = "A2".to_string();
    assert_ok!(store.update_post(&edited).await);

    let posts = store.posts().await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "A2");
    assert_eq!(posts[0].content, post.content);
    assert_eq!(posts[0].author_id, post.author_id);
    assert_eq!(posts[0].author_name, post.author_name);
    assert_eq!(posts[0].created_at, post.created_at);
    assert_eq!(posts[0].published_at, post.published_at);

    assert_ok!(store.delete_post(&edited).await);
    let posts = store.posts().await.unwrap();
    assert!(posts.iter().all(|p| p.id != 1));
}

/// Every field survives a write and a read.
pub(crate) async fn round_trip(store: &dyn PostStore) {
    let post = Post::builder(42)
        .title("Ünïcode title")
        .content("multi\nline\tcontent")
        .author(77, "Zoë")
        .created_at(1_600_000_000)
        .published_at(1_600_003_600)
        .build();

    assert_ok!(store.add_post(&post).await);
    let posts = store.posts().await.unwrap();
    assert_eq!(posts, vec![post.clone()]);

    assert_ok!(store.delete_post(&post).await);
}

/// Listing is ascending by id regardless of insertion order.
pub(crate) async fn ordered_by_id(store: &dyn PostStore) {
    for id in [3, 1, 2] {
        assert_ok!(store.add_post(&sample(id)).await);
    }

    let ids: Vec<i64> = store.posts().await.unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    for id in [1, 2, 3] {
        assert_ok!(store.delete_post(&sample(id)).await);
    }
}

pub(crate) async fn update_missing_is_not_found(store: &dyn PostStore) {
    let err = assert_err!(store.update_post(&sample(999)).await);
    assert_eq!(err, StorageError::not_found(999));
    assert!(store.posts().await.unwrap().is_empty());
}

pub(crate) async fn delete_missing_is_not_found(store: &dyn PostStore) {
    let err = assert_err!(store.delete_post(&sample(999)).await);
    assert!(err.is_not_found());
}

/// `created_at` is not replaceable through an update.
pub(crate) async fn update_keeps_created_at(store: &dyn PostStore) {
    let post = sample(5);
    assert_ok!(store.add_post(&post).await);

    let mut edited = post.clone();
    edited.created_at = 1;
    edited.content = "rewritten".to_string();
    edited.published_at = T1 + 3600;
    assert_ok!(store.update_post(&edited).await);

    let posts = store.posts().await.unwrap();
    assert_eq!(posts[0].created_at, post.created_at);
    assert_eq!(posts[0].content, "rewritten");
    assert_eq!(posts[0].published_at, T1 + 3600);

    assert_ok!(store.delete_post(&post).await);
}
