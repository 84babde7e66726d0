/// Folder sidebar and the new-folder form
use patternfly_yew::prelude::*;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::store_context::use_store;
use crate::memo_data::FolderFilter;
use crate::validation::prepare_folder_name;

#[derive(Properties, PartialEq)]
struct FolderEntryProps {
    name: AttrValue,
    count: usize,
    active: bool,
    on_select: Callback<()>,
    #[prop_or_default]
    on_delete: Option<Callback<()>>,
}

#[function_component(FolderEntry)]
fn folder_entry(props: &FolderEntryProps) -> Html {
    let onclick = props.on_select.reform(|_: MouseEvent| ());

    let delete_button = props.on_delete.clone().map(|on_delete| {
        let name = props.name.clone();
        let onclick = Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            let confirmed = web_sys::window()
                .and_then(|w| {
                    w.confirm_with_message(&format!(
                        "Delete folder \"{}\"? Its memos will become uncategorized.",
                        name
                    ))
                    .ok()
                })
                .unwrap_or(false);
            if confirmed {
                on_delete.emit(());
            }
        });
        html! {
            <button class="folder-delete" title="Delete folder" {onclick}>{"✕"}</button>
        }
    });

    html! {
        <li class={classes!("folder-entry", props.active.then_some("folder-entry-active"))} {onclick}>
            <span class="folder-name">{&props.name}</span>
            <span class="folder-count">{props.count}</span>
            {for delete_button}
        </li>
    }
}

#[function_component(FolderPanel)]
pub fn folder_panel() -> Html {
    let store = use_store();
    let counts = store.folder_counts();
    let active = store.active_folder();

    let select = |filter: FolderFilter| {
        let store = store.clone();
        Callback::from(move |_| store.set_active_folder(filter.clone()))
    };

    html! {
        <nav class="folder-panel">
            <h2 class="folder-panel-title">{"Folders"}</h2>
            <ul class="folder-list">
                <FolderEntry
                    name="All Memos"
                    count={counts.all}
                    active={active == FolderFilter::All}
                    on_select={select(FolderFilter::All)}
                />
                {for store.folders().into_iter().map(|folder| {
                    let filter = FolderFilter::Folder(folder.id.clone());
                    let on_delete = {
                        let store = store.clone();
                        let id = folder.id.clone();
                        Callback::from(move |_| {
                            store.remove_folder(&id);
                        })
                    };
                    html! {
                        <FolderEntry
                            key={folder.id.clone()}
                            name={folder.name.clone()}
                            count={counts.for_folder(&folder.id)}
                            active={active == filter}
                            on_select={select(filter.clone())}
                            on_delete={Some(on_delete)}
                        />
                    }
                })}
                <FolderEntry
                    name="Uncategorized"
                    count={counts.uncategorized}
                    active={active == FolderFilter::Uncategorized}
                    on_select={select(FolderFilter::Uncategorized)}
                />
            </ul>
        </nav>
    }
}

#[derive(Properties, PartialEq)]
pub struct FolderFormProps {
    pub on_close: Callback<()>,
}

#[function_component(FolderForm)]
pub fn folder_form(props: &FolderFormProps) -> Html {
    let store = use_store();
    let name = use_state(String::new);
    let error = use_state(|| None::<String>);

    let oninput = {
        let name = name.clone();
        let error = error.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            name.set(input.value());
            error.set(None);
        })
    };

    let onsubmit = {
        let store = store.clone();
        let name = name.clone();
        let error = error.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match prepare_folder_name(&name, &store.folders()) {
                Ok(valid) => {
                    store.add_folder(&valid);
                    name.set(String::new());
                    on_close.emit(());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        })
    };

    let on_cancel = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <form class="inline-form folder-form" {onsubmit}>
            <input
                class="pf-v5-c-form-control"
                type="text"
                placeholder="Folder name"
                value={(*name).clone()}
                {oninput}
            />
            if let Some(message) = (*error).clone() {
                <p class="field-error">{message}</p>
            }
            <div class="form-actions">
                <button type="submit" class="pf-v5-c-button pf-m-primary">{"Create"}</button>
                <Button onclick={on_cancel} variant={ButtonVariant::Secondary}>{"Cancel"}</Button>
            </div>
        </form>
    }
}
