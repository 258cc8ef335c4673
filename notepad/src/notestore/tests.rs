use crate::access::Denial;
use crate::errors::NoteStoreError;
use crate::event::NoteEvent;
use crate::{Address, NoteID, NoteStore};

pub(super) const ADMIN: Address = Address::new([0xad; 20]);
pub(super) const USER1: Address = Address::new([1; 20]);
pub(super) const USER2: Address = Address::new([2; 20]);
pub(super) const USER3: Address = Address::new([3; 20]);

fn id(n: u64) -> NoteID {
    NoteID::new(n)
}

pub(super) async fn sequential_ids(store: impl NoteStore) {
    assert_eq!(store.add_note(USER1, "Foo".into()).await.unwrap(), id(1));
    assert_eq!(store.add_note(USER2, "Bar".into()).await.unwrap(), id(2));
    assert_eq!(store.add_note(USER1, "Baz".into()).await.unwrap(), id(3));
    assert_eq!(store.get_user_notes(USER1).await.unwrap(), vec![id(1), id(3)]);
    assert_eq!(store.get_user_notes(USER2).await.unwrap(), vec![id(2)]);
    assert!(store.get_user_notes(USER3).await.unwrap().is_empty());
}

pub(super) async fn content_retrieve(store: impl NoteStore) {
    let contents = vec![
        "My first note".to_owned(),
        "".to_owned(),
        "This is a special note! @#&*()".to_owned(),
        "A".repeat(1024),
        "ünïcödé ✓".to_owned(),
    ];
    for content in contents {
        let note_id = store.add_note(USER1, content.clone()).await.unwrap();
        assert_eq!(
            store.get_shared_note(note_id, USER1).await.unwrap(),
            content
        );
    }
}

pub(super) async fn delete_keeps_ids(store: impl NoteStore) {
    store.add_note(USER1, "A".into()).await.unwrap();
    store.add_note(USER1, "B".into()).await.unwrap();
    store.delete_note(id(1), USER1).await.unwrap();
    assert_eq!(store.add_note(USER1, "C".into()).await.unwrap(), id(3));
    assert_eq!(store.get_shared_note(id(2), USER1).await.unwrap(), "B");
    assert_eq!(store.get_shared_note(id(3), USER1).await.unwrap(), "C");
    assert!(matches!(
        store.get_shared_note(id(1), USER1).await,
        Err(NoteStoreError::NoteDeleted(_))
    ));
    assert_eq!(store.get_user_notes(USER1).await.unwrap(), vec![id(2), id(3)]);
}

pub(super) async fn delete_errors(store: impl NoteStore) {
    assert!(matches!(
        store.delete_note(id(999), USER1).await,
        Err(NoteStoreError::NoteNotExist(_))
    ));
    assert!(matches!(
        store.delete_note(id(0), USER1).await,
        Err(NoteStoreError::NoteNotExist(_))
    ));
    store.add_note(USER1, "Note".into()).await.unwrap();
    assert!(matches!(
        store.delete_note(id(1), USER2).await,
        Err(NoteStoreError::Unauthorized(_, Denial::Delete))
    ));
    assert!(matches!(
        store.delete_note(id(1), ADMIN).await,
        Err(NoteStoreError::Unauthorized(_, Denial::Delete))
    ));
    store.delete_note(id(1), USER1).await.unwrap();
    assert!(matches!(
        store.delete_note(id(1), USER1).await,
        Err(NoteStoreError::NoteDeleted(_))
    ));
    assert!(store.get_user_notes(USER1).await.unwrap().is_empty());
}

pub(super) async fn read_existence_before_access(store: impl NoteStore) {
    assert!(matches!(
        store.get_shared_note(id(1), USER2).await,
        Err(NoteStoreError::NoteNotExist(_))
    ));
    store.add_note(USER1, "Public note".into()).await.unwrap();
    store
        .update_sharing_settings(id(1), USER1, true, vec![])
        .await
        .unwrap();
    store.delete_note(id(1), USER1).await.unwrap();
    for caller in [USER1, USER2, ADMIN] {
        assert!(matches!(
            store.get_shared_note(id(1), caller).await,
            Err(NoteStoreError::NoteDeleted(_))
        ));
    }
}

pub(super) async fn read_authorization(store: impl NoteStore) {
    store
        .add_note(USER1, "Confidential note".into())
        .await
        .unwrap();
    assert!(matches!(
        store.get_shared_note(id(1), USER2).await,
        Err(NoteStoreError::Unauthorized(_, Denial::Read))
    ));
    assert!(matches!(
        store.get_shared_note(id(1), ADMIN).await,
        Err(NoteStoreError::Unauthorized(_, Denial::Read))
    ));
    store
        .update_sharing_settings(id(1), USER1, false, vec![USER2])
        .await
        .unwrap();
    assert_eq!(
        store.get_shared_note(id(1), USER2).await.unwrap(),
        "Confidential note"
    );
    assert!(store.get_shared_note(id(1), USER3).await.is_err());
    store
        .update_sharing_settings(id(1), USER1, true, vec![])
        .await
        .unwrap();
    assert_eq!(
        store.get_shared_note(id(1), USER3).await.unwrap(),
        "Confidential note"
    );
}

pub(super) async fn sharing_is_additive(store: impl NoteStore) {
    store.add_note(USER1, "Shared".into()).await.unwrap();
    store
        .update_sharing_settings(id(1), USER1, true, vec![USER2])
        .await
        .unwrap();
    store
        .update_sharing_settings(id(1), USER1, false, vec![USER3])
        .await
        .unwrap();
    store
        .update_sharing_settings(id(1), USER1, false, vec![])
        .await
        .unwrap();
    assert_eq!(store.get_shared_note(id(1), USER2).await.unwrap(), "Shared");
    assert_eq!(store.get_shared_note(id(1), USER3).await.unwrap(), "Shared");
    // Public access is revoked
    assert!(matches!(
        store.get_shared_note(id(1), ADMIN).await,
        Err(NoteStoreError::Unauthorized(_, Denial::Read))
    ));
}

pub(super) async fn sharing_duplicates_and_zero_address(store: impl NoteStore) {
    store.add_note(USER1, "Mixed".into()).await.unwrap();
    store
        .update_sharing_settings(id(1), USER1, false, vec![USER2, USER2, Address::ZERO])
        .await
        .unwrap();
    assert_eq!(store.get_shared_note(id(1), USER2).await.unwrap(), "Mixed");
    store
        .remove_shared_address(id(1), USER1, USER2)
        .await
        .unwrap();
    // Duplicates collapse into one membership
    assert!(matches!(
        store.remove_shared_address(id(1), USER1, USER2).await,
        Err(NoteStoreError::NotShared(_, a)) if a == USER2
    ));
    store
        .remove_shared_address(id(1), USER1, Address::ZERO)
        .await
        .unwrap();
}

pub(super) async fn sharing_authority(store: impl NoteStore) {
    store.add_note(USER1, "New note".into()).await.unwrap();
    assert!(matches!(
        store
            .update_sharing_settings(id(1), USER2, true, vec![USER2])
            .await,
        Err(NoteStoreError::Unauthorized(_, Denial::UpdateSharing))
    ));
    store
        .update_sharing_settings(id(1), ADMIN, true, vec![USER2])
        .await
        .unwrap();
    store
        .update_sharing_settings(id(1), USER1, true, vec![USER2])
        .await
        .unwrap();
    assert!(matches!(
        store.remove_shared_address(id(1), ADMIN, USER2).await,
        Err(NoteStoreError::Unauthorized(_, Denial::RemoveShared))
    ));
    assert!(matches!(
        store.remove_shared_address(id(1), USER2, USER2).await,
        Err(NoteStoreError::Unauthorized(_, Denial::RemoveShared))
    ));
}

pub(super) async fn rejected_update_changes_nothing(store: impl NoteStore) {
    store.add_note(USER1, "Untouched".into()).await.unwrap();
    assert!(matches!(
        store
            .update_sharing_settings(id(1), USER2, true, vec![USER2])
            .await,
        Err(NoteStoreError::Unauthorized(_, Denial::UpdateSharing))
    ));
    // Neither the public flag nor the share set took effect
    assert!(matches!(
        store.get_shared_note(id(1), USER3).await,
        Err(NoteStoreError::Unauthorized(_, Denial::Read))
    ));
    assert!(matches!(
        store.get_shared_note(id(1), USER2).await,
        Err(NoteStoreError::Unauthorized(_, Denial::Read))
    ));
    assert!(matches!(
        store.remove_shared_address(id(1), USER1, USER2).await,
        Err(NoteStoreError::NotShared(_, a)) if a == USER2
    ));
    // Nor did a rejected delete
    assert!(store.delete_note(id(1), USER2).await.is_err());
    assert_eq!(store.get_user_notes(USER1).await.unwrap(), vec![id(1)]);
    assert_eq!(
        store.get_shared_note(id(1), USER1).await.unwrap(),
        "Untouched"
    );
}

pub(super) async fn sharing_on_missing_notes(store: impl NoteStore) {
    assert!(matches!(
        store
            .update_sharing_settings(id(999), USER1, false, vec![USER2])
            .await,
        Err(NoteStoreError::NoteNotExist(_))
    ));
    assert!(matches!(
        store.remove_shared_address(id(999), USER1, USER2).await,
        Err(NoteStoreError::NoteNotExist(_))
    ));
    store.add_note(USER1, "Doomed".into()).await.unwrap();
    store
        .update_sharing_settings(id(1), USER1, false, vec![USER2])
        .await
        .unwrap();
    store.delete_note(id(1), USER1).await.unwrap();
    assert!(matches!(
        store
            .update_sharing_settings(id(1), USER1, true, vec![USER2])
            .await,
        Err(NoteStoreError::NoteDeleted(_))
    ));
    assert!(matches!(
        store.remove_shared_address(id(1), USER1, USER2).await,
        Err(NoteStoreError::NoteDeleted(_))
    ));
}

pub(super) async fn remove_shared_address(store: impl NoteStore) {
    store
        .add_note(USER1, "Selectively shared".into())
        .await
        .unwrap();
    store
        .update_sharing_settings(id(1), USER1, false, vec![USER2, USER3])
        .await
        .unwrap();
    store
        .remove_shared_address(id(1), USER1, USER2)
        .await
        .unwrap();
    assert!(matches!(
        store.get_shared_note(id(1), USER2).await,
        Err(NoteStoreError::Unauthorized(_, Denial::Read))
    ));
    assert_eq!(
        store.get_shared_note(id(1), USER3).await.unwrap(),
        "Selectively shared"
    );
}

pub(super) async fn remove_from_public_note(store: impl NoteStore) {
    store.add_note(USER1, "Public".into()).await.unwrap();
    store
        .update_sharing_settings(id(1), USER1, true, vec![USER2])
        .await
        .unwrap();
    store
        .remove_shared_address(id(1), USER1, USER2)
        .await
        .unwrap();
    assert_eq!(store.get_shared_note(id(1), USER3).await.unwrap(), "Public");
    assert_eq!(store.get_shared_note(id(1), USER2).await.unwrap(), "Public");
    // Public access is not membership of the share set
    assert!(matches!(
        store.remove_shared_address(id(1), USER1, USER3).await,
        Err(NoteStoreError::NotShared(_, _))
    ));
}

pub(super) async fn events(store: impl NoteStore) {
    let mut rx = store.subscribe();
    store.add_note(USER1, "Evented".into()).await.unwrap();
    store
        .update_sharing_settings(id(1), ADMIN, true, vec![USER2, USER2])
        .await
        .unwrap();
    // Failed operations publish nothing
    assert!(store
        .update_sharing_settings(id(1), USER3, true, vec![USER3])
        .await
        .is_err());
    assert!(store.remove_shared_address(id(1), USER1, USER3).await.is_err());
    store
        .remove_shared_address(id(1), USER1, USER2)
        .await
        .unwrap();
    store.delete_note(id(1), USER1).await.unwrap();

    assert_eq!(
        rx.recv().await.unwrap(),
        NoteEvent::NoteCreated {
            id: id(1),
            creator: USER1
        }
    );
    assert_eq!(
        rx.recv().await.unwrap(),
        NoteEvent::NoteSharingUpdated {
            id: id(1),
            is_public: true,
            addresses: vec![USER2, USER2]
        }
    );
    assert_eq!(
        rx.recv().await.unwrap(),
        NoteEvent::NoteSharingRemoved {
            id: id(1),
            address: USER2
        }
    );
    assert!(rx.try_recv().is_err());
}
