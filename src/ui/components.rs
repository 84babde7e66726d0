/// Reusable UI components

use patternfly_yew::prelude::*;
use yew::prelude::*;

use crate::memo_data::MemoType;

#[derive(Properties, PartialEq)]
pub struct ProviderIconProps {
    pub memo_type: MemoType,
}

#[function_component(ProviderIcon)]
pub fn provider_icon(props: &ProviderIconProps) -> Html {
    let glyph = match props.memo_type {
        MemoType::Twitter => "🐦",
        MemoType::Instagram => "📷",
        MemoType::Youtube => "▶️",
        MemoType::Other => "🔗",
    };

    html! {
        <span
            class={classes!("provider-icon", format!("provider-icon-{}", props.memo_type.as_str()))}
            title={props.memo_type.label()}
        >
            {glyph}
        </span>
    }
}

#[derive(Properties, PartialEq)]
pub struct EmptyStateProps {
    pub title: String,
    pub message: String,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(EmptyState)]
pub fn empty_state(props: &EmptyStateProps) -> Html {
    html! {
        <div class="empty-state">
            <h3 class="empty-state-title">{&props.title}</h3>
            <p class="empty-state-hint">{&props.message}</p>
            {props.children.clone()}
        </div>
    }
}

#[function_component(LoadingPlaceholder)]
pub fn loading_placeholder() -> Html {
    html! {
        <div class="loading-text-center">
            <Spinner />
            <p class="loading-text">{"Loading..."}</p>
        </div>
    }
}
