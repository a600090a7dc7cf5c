use crate::SessionStore;
use crate::tests::user;

use googletest::prelude::*;

#[test]
fn given_new_store_then_loading_with_no_user() {
    let store = SessionStore::new();

    let snapshot = store.current();

    assert!(snapshot.loading);
    assert_that!(snapshot.user, none());
}

#[test]
fn given_loading_store_when_finish_loading_twice_then_only_first_flips() {
    let store = SessionStore::new();

    assert!(store.finish_loading());
    assert!(!store.finish_loading());
    assert!(!store.is_loading());
}

#[tokio::test]
async fn given_subscriber_when_user_set_then_notified_with_whole_snapshot() {
    // Given
    let store = SessionStore::new();
    let mut rx = store.subscribe();

    // When
    store.set(user(false));

    // Then
    rx.changed().await.unwrap();
    let snapshot = rx.borrow_and_update().clone();
    assert_that!(snapshot.user, some(eq(&user(false))));
}

#[test]
fn given_cleared_store_when_setting_with_old_epoch_then_discarded() {
    // Given: An epoch read before a clear
    let store = SessionStore::new();
    let epoch = store.epoch();
    store.clear();

    // When
    let applied = store.set_if_epoch(epoch, user(true));

    // Then
    assert!(!applied);
    assert_that!(store.user(), none());
}

#[test]
fn given_current_epoch_when_setting_then_applied() {
    let store = SessionStore::new();
    let epoch = store.epoch();

    assert!(store.set_if_epoch(epoch, user(false)));
    assert_that!(store.user(), some(eq(&user(false))));
}

#[test]
fn given_different_user_signed_in_when_replacing_then_left_alone() {
    let store = SessionStore::new();
    let mut other = user(false);
    other.id = "user-999".to_string();
    store.set(other.clone());

    let replaced = store.replace_user(user(true));

    assert!(!replaced);
    assert_that!(store.user(), some(eq(&other)));
}

#[tokio::test]
async fn given_loading_store_when_finished_elsewhere_then_wait_until_loaded_returns() {
    let store = SessionStore::new();
    let waiter = {
        let store = store.clone();
        tokio::spawn(async move { store.wait_until_loaded().await })
    };

    store.finish_loading();

    let snapshot = waiter.await.unwrap();
    assert!(!snapshot.loading);
}
