/// Application store: the single source of truth for memos and folders
///
/// All mutators take `&self` and complete synchronously. Every change to the
/// memo or folder collections is written through to the blob store, then
/// subscribers are notified after all internal borrows are released.
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::{Rc, Weak};

use crate::memo_data::{FolderFilter, FolderItem, MemoItem, MemoType};
use crate::operations::{
    FolderCounts, MemoQuery, count_by_folder, count_by_type, filter_memos, memos_with_images,
};
use crate::storage::{self, BlobStore};

type Listener = Rc<dyn Fn()>;
type ListenerList = RefCell<Vec<(u64, Listener)>>;

#[derive(Debug, Default)]
struct StoreState {
    memos: Vec<MemoItem>,
    folders: Vec<FolderItem>,
    query: MemoQuery,
}

/// Which collections a mutation touched
#[derive(Clone, Copy)]
enum Dirty {
    Memos,
    Folders,
    Both,
    Session,
}

pub struct MemoStore {
    state: RefCell<StoreState>,
    blob: Rc<dyn BlobStore>,
    listeners: Rc<ListenerList>,
    next_listener_id: Cell<u64>,
}

/// Keeps a listener registered; dropping it unsubscribes
pub struct Subscription {
    id: u64,
    listeners: Weak<ListenerList>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

impl MemoStore {
    /// Load both collections from `blob`; unreadable data starts empty.
    pub fn load(blob: Rc<dyn BlobStore>) -> Self {
        let memos = storage::load_memos(blob.as_ref());
        let folders = storage::load_folders(blob.as_ref());
        log::info!("Loaded {} memos and {} folders", memos.len(), folders.len());

        MemoStore {
            state: RefCell::new(StoreState {
                memos,
                folders,
                query: MemoQuery::default(),
            }),
            blob,
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_listener_id: Cell::new(0),
        }
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        let id = self.next_listener_id.get();
        self.next_listener_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));

        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Apply `change` to the state, persist what it touched, then notify.
    fn mutate<R>(&self, dirty: Dirty, change: impl FnOnce(&mut StoreState) -> R) -> R {
        let result = {
            let mut state = self.state.borrow_mut();
            let result = change(&mut state);
            self.persist(&state, dirty);
            result
        };
        self.notify();
        result
    }

    fn persist(&self, state: &StoreState, dirty: Dirty) {
        let blob = self.blob.as_ref();
        let outcome = match dirty {
            Dirty::Memos => storage::save_memos(blob, &state.memos),
            Dirty::Folders => storage::save_folders(blob, &state.folders),
            // Memos first: a failed write must not leave stored memos
            // pointing at a folder that is already gone.
            Dirty::Both => storage::save_memos(blob, &state.memos)
                .and_then(|_| storage::save_folders(blob, &state.folders)),
            Dirty::Session => Ok(()),
        };

        if let Err(e) = outcome {
            log::warn!("Failed to persist store: {}", e);
        }
    }

    fn notify(&self) {
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener();
        }
    }

    // Mutators

    /// Prepend a new memo. The URL is expected to be validated by the caller.
    pub fn add_memo(&self, url: &str, folder_id: Option<String>) -> MemoItem {
        let memo = MemoItem::new(url.to_string(), folder_id);
        log::debug!("add memo {} ({})", memo.id, memo.memo_type);

        self.mutate(Dirty::Memos, |state| {
            state.memos.insert(0, memo.clone());
        });
        memo
    }

    /// Remove a memo; unknown ids are ignored.
    pub fn remove_memo(&self, id: &str) -> bool {
        log::debug!("remove memo {}", id);
        self.mutate(Dirty::Memos, |state| {
            let original_len = state.memos.len();
            state.memos.retain(|memo| memo.id != id);
            state.memos.len() < original_len
        })
    }

    /// Prepend a new folder. Name uniqueness is the caller's concern.
    pub fn add_folder(&self, name: &str) -> FolderItem {
        let folder = FolderItem::new(name.to_string());
        log::debug!("add folder {} ({})", folder.id, folder.name);

        self.mutate(Dirty::Folders, |state| {
            state.folders.insert(0, folder.clone());
        });
        folder
    }

    /// Remove a folder and move its memos to uncategorized in one step.
    pub fn remove_folder(&self, id: &str) -> bool {
        log::debug!("remove folder {}", id);
        self.mutate(Dirty::Both, |state| {
            let original_len = state.folders.len();
            state.folders.retain(|folder| folder.id != id);

            for memo in state.memos.iter_mut() {
                if memo.folder_id.as_deref() == Some(id) {
                    memo.folder_id = None;
                }
            }

            if state.query.folder.folder_id() == Some(id) {
                state.query.folder = FolderFilter::All;
            }

            state.folders.len() < original_len
        })
    }

    /// Reassign a memo's folder. `folder_id` is not checked against the folders.
    pub fn move_memo_to_folder(&self, memo_id: &str, folder_id: Option<String>) -> bool {
        log::debug!("move memo {} to {:?}", memo_id, folder_id);
        self.mutate(Dirty::Memos, |state| {
            state
                .memos
                .iter_mut()
                .find(|memo| memo.id == memo_id)
                .map(|memo| {
                    memo.folder_id = folder_id;
                })
                .is_some()
        })
    }

    pub fn attach_image(&self, memo_id: &str, image_url: String) -> bool {
        log::debug!("attach image to memo {}", memo_id);
        self.mutate(Dirty::Memos, |state| {
            state
                .memos
                .iter_mut()
                .find(|memo| memo.id == memo_id)
                .map(|memo| {
                    memo.image_url = Some(image_url);
                })
                .is_some()
        })
    }

    // Session state (not persisted)

    pub fn set_active_folder(&self, folder: FolderFilter) {
        self.mutate(Dirty::Session, |state| state.query.folder = folder);
    }

    pub fn set_search_term(&self, term: String) {
        self.mutate(Dirty::Session, |state| state.query.search_term = term);
    }

    pub fn toggle_type(&self, memo_type: MemoType) {
        self.mutate(Dirty::Session, |state| {
            if !state.query.types.remove(&memo_type) {
                state.query.types.insert(memo_type);
            }
        });
    }

    pub fn clear_type_filters(&self) {
        self.mutate(Dirty::Session, |state| state.query.types.clear());
    }

    // Snapshots and derived views

    pub fn memos(&self) -> Vec<MemoItem> {
        self.state.borrow().memos.clone()
    }

    pub fn folders(&self) -> Vec<FolderItem> {
        self.state.borrow().folders.clone()
    }

    pub fn folder(&self, id: &str) -> Option<FolderItem> {
        self.state
            .borrow()
            .folders
            .iter()
            .find(|folder| folder.id == id)
            .cloned()
    }

    pub fn active_folder(&self) -> FolderFilter {
        self.state.borrow().query.folder.clone()
    }

    pub fn search_term(&self) -> String {
        self.state.borrow().query.search_term.clone()
    }

    pub fn selected_types(&self) -> BTreeSet<MemoType> {
        self.state.borrow().query.types.clone()
    }

    /// Memos matching the active folder, search term and type filters
    pub fn visible_memos(&self) -> Vec<MemoItem> {
        let state = self.state.borrow();
        filter_memos(&state.memos, &state.query)
    }

    pub fn folder_counts(&self) -> FolderCounts {
        let state = self.state.borrow();
        count_by_folder(&state.memos, &state.folders, &state.query.types)
    }

    pub fn type_counts(&self) -> BTreeMap<MemoType, usize> {
        let state = self.state.borrow();
        count_by_type(&state.memos, &state.query.folder)
    }

    pub fn memos_with_images(&self) -> Vec<MemoItem> {
        memos_with_images(&self.state.borrow().memos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MEMOS_KEY;
    use crate::storage::{MemoryBlob, StorageError};

    /// Memory store that rejects memo writes once `full` is set
    #[derive(Default)]
    struct FullMemoBlob {
        inner: MemoryBlob,
        full: Cell<bool>,
    }

    impl BlobStore for FullMemoBlob {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.full.get() && key == MEMOS_KEY {
                return Err(StorageError::Write {
                    key: key.to_string(),
                    reason: "QuotaExceededError".to_string(),
                });
            }
            self.inner.set(key, value)
        }
    }

    fn empty_store() -> (Rc<MemoryBlob>, MemoStore) {
        let blob = Rc::new(MemoryBlob::new());
        let store = MemoStore::load(blob.clone());
        (blob, store)
    }

    #[test]
    fn test_add_memo() {
        let (_, store) = empty_store();
        let existing = store.add_memo("https://example.com", None);

        let memo = store.add_memo("x.com/foo/status/123", None);

        assert_eq!(memo.memo_type, MemoType::Twitter);
        assert_eq!(memo.folder_id, None);
        assert_ne!(memo.id, existing.id);
        assert_eq!(store.memos()[0].id, memo.id, "newest memo comes first");
    }

    #[test]
    fn test_remove_memo() {
        let (_, store) = empty_store();
        let memo = store.add_memo("https://example.com", None);

        assert!(store.remove_memo(&memo.id));
        assert!(store.memos().is_empty());
        assert!(!store.remove_memo(&memo.id));
    }

    #[test]
    fn test_add_folder_prepends() {
        let (_, store) = empty_store();
        store.add_folder("Work");
        store.add_folder("Fun");

        let names: Vec<String> = store.folders().into_iter().map(|f| f.name).collect();

        assert_eq!(names, vec!["Fun", "Work"]);
    }

    #[test]
    fn test_remove_folder_uncategorizes_memos() {
        let (_, store) = empty_store();
        let work = store.add_folder("Work");
        let fun = store.add_folder("Fun");
        let m1 = store.add_memo("https://youtu.be/a", Some(work.id.clone()));
        let m2 = store.add_memo("https://youtu.be/b", Some(fun.id.clone()));

        assert!(store.remove_folder(&work.id));

        assert!(store.folder(&work.id).is_none());
        let memos = store.memos();
        assert!(memos.iter().all(|m| m.folder_id.as_deref() != Some(work.id.as_str())));
        let moved = memos.iter().find(|m| m.id == m1.id).unwrap();
        assert_eq!(moved.folder_id, None);
        let kept = memos.iter().find(|m| m.id == m2.id).unwrap();
        assert_eq!(kept.folder_id.as_deref(), Some(fun.id.as_str()));
    }

    #[test]
    fn test_remove_folder_is_atomic_for_observers() {
        let (_, store) = empty_store();
        let store = Rc::new(store);
        let work = store.add_folder("Work");
        store.add_memo("https://example.com", Some(work.id.clone()));

        let consistent = Rc::new(Cell::new(true));
        let _subscription = {
            let observed = Rc::downgrade(&store);
            let consistent = consistent.clone();
            store.subscribe(move || {
                if let Some(store) = observed.upgrade() {
                    let folder_ids: Vec<String> = store.folders().into_iter().map(|f| f.id).collect();
                    let dangling = store.memos().iter().any(|m| {
                        m.folder_id.as_ref().is_some_and(|id| !folder_ids.contains(id))
                    });
                    if dangling {
                        consistent.set(false);
                    }
                }
            })
        };

        store.remove_folder(&work.id);

        assert!(consistent.get());
    }

    #[test]
    fn test_remove_active_folder_resets_selection() {
        let (_, store) = empty_store();
        let work = store.add_folder("Work");
        store.set_active_folder(FolderFilter::Folder(work.id.clone()));

        store.remove_folder(&work.id);

        assert_eq!(store.active_folder(), FolderFilter::All);
    }

    #[test]
    fn test_move_memo_to_folder() {
        let (_, store) = empty_store();
        let memo = store.add_memo("https://example.com", None);

        assert!(store.move_memo_to_folder(&memo.id, Some("f9".to_string())));
        assert_eq!(store.memos()[0].folder_id.as_deref(), Some("f9"));

        assert!(store.move_memo_to_folder(&memo.id, None));
        assert_eq!(store.memos()[0].folder_id, None);

        assert!(!store.move_memo_to_folder("missing", None));
    }

    #[test]
    fn test_attach_image() {
        let (_, store) = empty_store();
        let memo = store.add_memo("https://x.com/a/status/1", None);
        store.add_memo("https://example.com", None);

        store.attach_image(&memo.id, "https://img/1".to_string());

        let with_images = store.memos_with_images();
        assert_eq!(with_images.len(), 1);
        assert_eq!(with_images[0].id, memo.id);
    }

    #[test]
    fn test_every_mutation_writes_through() {
        let (blob, store) = empty_store();

        store.add_memo("https://example.com", None);

        let raw = blob.get(MEMOS_KEY).unwrap();
        let stored: Vec<MemoItem> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[test]
    fn test_round_trip_through_blob() {
        let (blob, store) = empty_store();
        let work = store.add_folder("Work");
        let fun = store.add_folder("Fun");
        store.add_memo("https://x.com/a/status/1", Some(work.id.clone()));
        let m2 = store.add_memo("https://youtu.be/b", Some(fun.id.clone()));
        store.add_memo("https://example.com", None);
        store.remove_folder(&fun.id);
        store.attach_image(&m2.id, "https://img".to_string());

        let reloaded = MemoStore::load(blob.clone());

        assert_eq!(reloaded.memos(), store.memos());
        assert_eq!(reloaded.folders(), store.folders());
        let before: Vec<i64> = store.memos().iter().map(|m| m.created_at.timestamp()).collect();
        let after: Vec<i64> = reloaded.memos().iter().map(|m| m.created_at.timestamp()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_subscribers_notified_and_unsubscribed() {
        let (_, store) = empty_store();
        let calls = Rc::new(Cell::new(0));

        let subscription = {
            let calls = calls.clone();
            store.subscribe(move || calls.set(calls.get() + 1))
        };

        store.add_memo("https://example.com", None);
        store.set_search_term("exa".to_string());
        assert_eq!(calls.get(), 2);

        drop(subscription);
        store.add_folder("Work");
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_visible_memos_and_counts() {
        let (_, store) = empty_store();
        let work = store.add_folder("Work");
        store.add_memo("https://twitter.com/rust/status/1", Some(work.id.clone()));
        store.add_memo("https://youtu.be/rust", Some(work.id.clone()));
        store.add_memo("https://x.com/go/status/2", None);

        store.set_active_folder(FolderFilter::Folder(work.id.clone()));
        store.toggle_type(MemoType::Twitter);

        let visible = store.visible_memos();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].url, "https://twitter.com/rust/status/1");

        let type_counts = store.type_counts();
        assert_eq!(type_counts[&MemoType::Twitter], 1);
        assert_eq!(type_counts[&MemoType::Youtube], 1);

        let folder_counts = store.folder_counts();
        assert_eq!(folder_counts.all, 2);
        assert_eq!(folder_counts.for_folder(&work.id), 1);

        store.toggle_type(MemoType::Twitter);
        assert!(store.selected_types().is_empty());

        store.set_search_term("YOUTU".to_string());
        assert_eq!(store.visible_memos().len(), 1);

        store.toggle_type(MemoType::Other);
        store.clear_type_filters();
        assert!(store.selected_types().is_empty());
    }

    #[test]
    fn test_failed_memo_write_keeps_stored_folder() {
        let blob = Rc::new(FullMemoBlob::default());
        let store = MemoStore::load(blob.clone());
        let work = store.add_folder("Work");
        store.add_memo("https://youtu.be/abc", Some(work.id.clone()));

        blob.full.set(true);
        assert!(store.remove_folder(&work.id));

        let reloaded = MemoStore::load(blob);
        let folder_ids: Vec<String> = reloaded.folders().into_iter().map(|f| f.id).collect();
        for memo in reloaded.memos() {
            if let Some(folder_id) = memo.folder_id {
                assert!(
                    folder_ids.contains(&folder_id),
                    "stored memo points at missing folder {}",
                    folder_id
                );
            }
        }
        assert_eq!(folder_ids, vec![work.id]);
    }
}
