//! Change notification tests.

use super::{add_photo, store_with_workspace, ItemStore};
use crate::grid::Rect;
use crate::store::ItemUpdate;
use crate::ItemPatch;
use tokio::sync::broadcast::error::TryRecvError;

#[tokio::test]
async fn test_subscriber_sees_create_update_delete() {
    let (store, ws) = store_with_workspace().await;
    let mut rx = store.subscribe();

    let item = add_photo(&store, &ws, Rect::new(0, 0, 1, 1)).await;
    let moved = store
        .update_item(&item.id, ItemPatch::position(Rect::new(1, 0, 1, 1)))
        .await
        .expect("update");
    store.delete_item(&item.id).await.expect("delete");

    assert_eq!(rx.recv().await.expect("created"), ItemUpdate::Created(item.clone()));
    assert_eq!(rx.recv().await.expect("updated"), ItemUpdate::Updated(moved));
    assert_eq!(
        rx.recv().await.expect("deleted"),
        ItemUpdate::Deleted {
            id: item.id,
            workspace_id: ws,
        }
    );
}

#[tokio::test]
async fn test_failed_operations_do_not_notify() {
    let (store, _ws) = store_with_workspace().await;
    let mut rx = store.subscribe();

    let _ = store.update_item("item-404", ItemPatch::locked(true)).await;
    let _ = store.delete_item("item-404").await;

    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn test_empty_patch_does_not_notify() {
    let (store, ws) = store_with_workspace().await;
    let item = add_photo(&store, &ws, Rect::new(1, 0, 1, 1)).await;
    let mut rx = store.subscribe();

    let unchanged = store
        .update_item(&item.id, ItemPatch::default())
        .await
        .expect("update");

    assert_eq!(unchanged, item);
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn test_multiple_subscribers_receive_same_update() {
    let (store, ws) = store_with_workspace().await;
    let mut rx1 = store.subscribe();
    let mut rx2 = store.subscribe();
    assert_eq!(store.subscriber_count(), 2);

    let item = add_photo(&store, &ws, Rect::new(0, 0, 1, 1)).await;

    assert_eq!(rx1.recv().await.expect("rx1"), ItemUpdate::Created(item.clone()));
    assert_eq!(rx2.recv().await.expect("rx2"), ItemUpdate::Created(item));
}

#[tokio::test]
async fn test_dropped_subscriber_is_not_counted() {
    let (store, _ws) = store_with_workspace().await;
    let rx = store.subscribe();
    assert_eq!(store.subscriber_count(), 1);
    drop(rx);
    assert_eq!(store.subscriber_count(), 0);
}
