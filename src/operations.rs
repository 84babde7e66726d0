/// Derived views over memos: filtering and counting

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::memo_data::{FolderFilter, FolderItem, MemoItem, MemoType};

/// What the memo list is narrowed by
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoQuery {
    pub folder: FolderFilter,
    pub search_term: String,
    pub types: BTreeSet<MemoType>,
}

impl MemoQuery {
    fn matches_search(&self, memo: &MemoItem) -> bool {
        if self.search_term.is_empty() {
            return true;
        }

        let needle = self.search_term.to_lowercase();
        memo.url.to_lowercase().contains(&needle)
            || memo
                .title
                .as_ref()
                .is_some_and(|title| title.to_lowercase().contains(&needle))
    }

    fn matches_type(&self, memo: &MemoItem) -> bool {
        self.types.is_empty() || self.types.contains(&memo.memo_type)
    }

    pub fn matches(&self, memo: &MemoItem) -> bool {
        self.folder.matches(memo) && self.matches_search(memo) && self.matches_type(memo)
    }
}

/// Memos matching every active predicate, in collection order
pub fn filter_memos(memos: &[MemoItem], query: &MemoQuery) -> Vec<MemoItem> {
    memos.iter().filter(|memo| query.matches(memo)).cloned().collect()
}

/// Memo counts shown next to each folder entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderCounts {
    pub all: usize,
    pub uncategorized: usize,
    pub by_folder: HashMap<String, usize>,
}

impl FolderCounts {
    pub fn for_folder(&self, folder_id: &str) -> usize {
        self.by_folder.get(folder_id).copied().unwrap_or(0)
    }
}

/// Count memos per folder, narrowed to `types` when it is non-empty
pub fn count_by_folder(
    memos: &[MemoItem],
    folders: &[FolderItem],
    types: &BTreeSet<MemoType>,
) -> FolderCounts {
    let counted: Vec<&MemoItem> = memos
        .iter()
        .filter(|memo| types.is_empty() || types.contains(&memo.memo_type))
        .collect();

    let by_folder = folders
        .iter()
        .map(|folder| {
            let count = counted
                .iter()
                .filter(|memo| memo.folder_id.as_deref() == Some(folder.id.as_str()))
                .count();
            (folder.id.clone(), count)
        })
        .collect();

    FolderCounts {
        all: counted.len(),
        uncategorized: counted.iter().filter(|memo| memo.folder_id.is_none()).count(),
        by_folder,
    }
}

/// Count memos per provider type within the selected folder
///
/// Every type is present in the result, with zero when absent.
pub fn count_by_type(memos: &[MemoItem], folder: &FolderFilter) -> BTreeMap<MemoType, usize> {
    let mut counts: BTreeMap<MemoType, usize> =
        MemoType::ALL.iter().map(|memo_type| (*memo_type, 0)).collect();

    for memo in memos.iter().filter(|memo| folder.matches(memo)) {
        *counts.entry(memo.memo_type).or_insert(0) += 1;
    }

    counts
}

/// Memos that carry a downloaded image, in collection order
pub fn memos_with_images(memos: &[MemoItem]) -> Vec<MemoItem> {
    memos
        .iter()
        .filter(|memo| memo.image_url.is_some())
        .cloned()
        .collect()
}
