/// Type filter badges
use patternfly_yew::prelude::*;
use yew::prelude::*;

use super::components::ProviderIcon;
use super::store_context::use_store;
use crate::memo_data::MemoType;

#[function_component(MemoFilter)]
pub fn memo_filter() -> Html {
    let store = use_store();
    let counts = store.type_counts();
    let selected = store.selected_types();

    let on_clear = {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| store.clear_type_filters())
    };

    html! {
        <div class="memo-filter">
            {for MemoType::ALL.into_iter().map(|memo_type| {
                let onclick = {
                    let store = store.clone();
                    Callback::from(move |_: MouseEvent| store.toggle_type(memo_type))
                };
                let active = selected.contains(&memo_type);
                html! {
                    <button
                        class={classes!("type-badge", active.then_some("type-badge-active"))}
                        {onclick}
                    >
                        <ProviderIcon {memo_type} />
                        <span class="type-badge-label">{memo_type.label()}</span>
                        <span class="type-badge-count">{counts.get(&memo_type).copied().unwrap_or(0)}</span>
                    </button>
                }
            })}
            if !selected.is_empty() {
                <Button onclick={on_clear} variant={ButtonVariant::Secondary}>{"Clear Filters"}</Button>
            }
        </div>
    }
}
