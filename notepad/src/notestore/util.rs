use crate::errors::NoteStoreError;
use crate::notestore::BoxedNoteStore;

/// Seed a store with a few notes owned by its administrator.
pub async fn populate_test_data(store: &BoxedNoteStore) -> Result<(), NoteStoreError> {
    let owner = store.administrator();
    let welcome = store
        .add_note(
            owner,
            "# Welcome to Notepad\nThis note is readable by everyone.".to_owned(),
        )
        .await?;
    store
        .update_sharing_settings(welcome, owner, true, vec![])
        .await?;
    store
        .add_note(owner, "A private note, only its creator can read it.".to_owned())
        .await?;
    Ok(())
}
