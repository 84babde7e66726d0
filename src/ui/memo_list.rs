/// Grid of the memos passing the current filters
use yew::prelude::*;

use super::components::EmptyState;
use super::memo_card::MemoCard;
use super::store_context::use_store;

#[function_component(MemoList)]
pub fn memo_list() -> Html {
    let store = use_store();
    let memos = store.visible_memos();

    if memos.is_empty() {
        let search_term = store.search_term();
        let message = if !search_term.is_empty() {
            format!("No memos match your search term \"{}\". Try a different search.", search_term)
        } else if !store.selected_types().is_empty() {
            "No memos match the selected filters.".to_string()
        } else {
            "Add your first memo by clicking the \"Add Memo\" button.".to_string()
        };
        return html! { <EmptyState title="No memos found" {message} /> };
    }

    html! {
        <div class="memo-grid">
            {for memos.into_iter().map(|memo| {
                let key = memo.id.clone();
                html! { <MemoCard key={key} {memo} /> }
            })}
        </div>
    }
}
