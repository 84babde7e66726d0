/// Form for saving a new link
use patternfly_yew::prelude::*;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use super::store_context::use_store;
use crate::validation::prepare_memo_url;

#[derive(Properties, PartialEq)]
pub struct MemoFormProps {
    pub on_close: Callback<()>,
}

#[function_component(MemoForm)]
pub fn memo_form(props: &MemoFormProps) -> Html {
    let store = use_store();
    let url = use_state(String::new);
    let error = use_state(|| None::<String>);
    // New memos land in the folder being viewed
    let folder_id = {
        let initial = store.active_folder().folder_id().map(str::to_string);
        use_state(move || initial)
    };

    let on_url = {
        let url = url.clone();
        let error = error.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            url.set(input.value());
            error.set(None);
        })
    };

    let on_folder = {
        let folder_id = folder_id.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let value = select.value();
            folder_id.set((!value.is_empty()).then_some(value));
        })
    };

    let onsubmit = {
        let store = store.clone();
        let url = url.clone();
        let folder_id = folder_id.clone();
        let error = error.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match prepare_memo_url(&url) {
                Ok(valid) => {
                    let memo = store.add_memo(&valid, (*folder_id).clone());
                    log::info!("Saved {} memo {}", memo.memo_type, memo.id);
                    url.set(String::new());
                    on_close.emit(());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        })
    };

    let on_cancel = props.on_close.reform(|_: MouseEvent| ());
    let selected = (*folder_id).clone().unwrap_or_default();

    html! {
        <form class="inline-form memo-form" {onsubmit}>
            <input
                class="pf-v5-c-form-control"
                type="text"
                placeholder="Paste a Twitter, Instagram or YouTube link"
                value={(*url).clone()}
                oninput={on_url}
            />
            if let Some(message) = (*error).clone() {
                <p class="field-error">{message}</p>
            }
            <select class="pf-v5-c-form-control" onchange={on_folder}>
                <option value="" selected={selected.is_empty()}>{"Uncategorized"}</option>
                {for store.folders().into_iter().map(|folder| html! {
                    <option
                        key={folder.id.clone()}
                        value={folder.id.clone()}
                        selected={folder.id == selected}
                    >
                        {folder.name}
                    </option>
                })}
            </select>
            <div class="form-actions">
                <button type="submit" class="pf-v5-c-button pf-m-primary">{"Save"}</button>
                <Button onclick={on_cancel} variant={ButtonVariant::Secondary}>{"Cancel"}</Button>
            </div>
        </form>
    }
}
