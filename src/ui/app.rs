/// Main page for Link Memo
use std::rc::Rc;

use patternfly_yew::prelude::*;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::folder_panel::{FolderForm, FolderPanel};
use super::memo_filter::MemoFilter;
use super::memo_form::MemoForm;
use super::memo_list::MemoList;
use super::saved_images::SavedImages;
use super::store_context::{StoreHandle, use_store};
use crate::storage::{BlobStore, LocalStorageBlob, MemoryBlob};
use crate::store::MemoStore;

/// localStorage when the browser allows it, otherwise an in-memory store
fn open_store() -> MemoStore {
    let blob: Rc<dyn BlobStore> = match LocalStorageBlob::new() {
        Ok(local) => Rc::new(local),
        Err(e) => {
            log::warn!("{}; memos will not survive a reload", e);
            Rc::new(MemoryBlob::new())
        }
    };
    MemoStore::load(blob)
}

#[function_component(App)]
pub fn app() -> Html {
    let store = use_memo((), |_| StoreHandle::new(open_store()));

    html! {
        <ContextProvider<StoreHandle> context={(*store).clone()}>
            <Shell />
        </ContextProvider<StoreHandle>>
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Page {
    Memos,
    SavedImages,
}

#[derive(Clone, Copy, PartialEq)]
enum OpenForm {
    None,
    Memo,
    Folder,
}

#[function_component(Shell)]
fn shell() -> Html {
    let store = use_store();
    let page = use_state(|| Page::Memos);
    let open_form = use_state(|| OpenForm::None);

    let on_search = {
        let store = store.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            store.set_search_term(input.value());
        })
    };

    // Toggle a form, closing the other one
    let toggle_form = {
        let open_form = open_form.clone();
        move |form: OpenForm| {
            let open_form = open_form.clone();
            Callback::from(move |_: MouseEvent| {
                open_form.set(if *open_form == form { OpenForm::None } else { form });
            })
        }
    };

    let close_form = {
        let open_form = open_form.clone();
        Callback::from(move |_| open_form.set(OpenForm::None))
    };

    let on_show_images = {
        let page = page.clone();
        Callback::from(move |_: MouseEvent| page.set(Page::SavedImages))
    };

    let on_back = {
        let page = page.clone();
        Callback::from(move |_: MouseEvent| page.set(Page::Memos))
    };

    if *page == Page::SavedImages {
        return html! {
            <div class="padding-20">
                <SavedImages on_back={on_back} />
            </div>
        };
    }

    html! {
        <div class="padding-20">
            <header class="app-header">
                <h1 class="app-title">{"Link Memo"}</h1>
                <input
                    class="pf-v5-c-form-control search-input"
                    type="search"
                    placeholder="Search memos..."
                    value={store.search_term()}
                    oninput={on_search}
                />
                <div class="header-actions">
                    <Button onclick={toggle_form(OpenForm::Folder)} variant={ButtonVariant::Secondary}>
                        {"📁 New Folder"}
                    </Button>
                    <Button onclick={toggle_form(OpenForm::Memo)} variant={ButtonVariant::Primary}>
                        {"➕ Add Memo"}
                    </Button>
                    <Button onclick={on_show_images} variant={ButtonVariant::Secondary}>
                        {"🖼️ Saved Images"}
                    </Button>
                </div>
            </header>

            {match *open_form {
                OpenForm::Memo => html! { <MemoForm on_close={close_form.clone()} /> },
                OpenForm::Folder => html! { <FolderForm on_close={close_form.clone()} /> },
                OpenForm::None => html! {},
            }}

            <div class="app-layout">
                <aside class="app-sidebar">
                    <FolderPanel />
                </aside>
                <main class="app-main">
                    <MemoFilter />
                    <MemoList />
                </main>
            </div>
        </div>
    }
}
