/// A single saved link with its live embed
use chrono::Utc;
use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlSelectElement};
use yew::prelude::*;

use super::components::{LoadingPlaceholder, ProviderIcon};
use super::store_context::use_store;
use crate::constants::EMBED_GRACE_MS;
use crate::download::placeholder_image_url;
use crate::embed::dom::{self, DomSurface};
use crate::embed::grace::LoadingGrace;
use crate::embed::{EmbedMount, run_embed};
use crate::memo_data::{MemoItem, MemoType};
use crate::url_utils::domain_of;

#[derive(Properties, PartialEq)]
pub struct MemoCardProps {
    pub memo: MemoItem,
}

#[derive(Clone, PartialEq)]
enum Notice {
    Saved,
    Failed(String),
}

#[function_component(MemoCard)]
pub fn memo_card(props: &MemoCardProps) -> Html {
    let store = use_store();
    let memo = &props.memo;
    let embeddable = memo.memo_type != MemoType::Other;

    let container = use_node_ref();
    let mount = use_memo((), |_| EmbedMount::default());
    let loading = use_state_eq(|| embeddable);
    let notice = use_state(|| None::<Notice>);

    // Grace period before the embed container is revealed
    {
        let loading = loading.clone();
        use_effect_with(memo.url.clone(), move |_| {
            loading.set(embeddable);
            let grace = embeddable.then(|| LoadingGrace::start(EMBED_GRACE_MS, move || loading.set(false)));
            move || drop(grace)
        });
    }

    {
        let container = container.clone();
        let mount = mount.clone();
        use_effect_with((memo.url.clone(), memo.memo_type), move |(url, memo_type)| {
            match container.cast::<Element>() {
                Some(element) => {
                    let token = mount.begin();
                    let url = url.clone();
                    let memo_type = *memo_type;
                    spawn_local(async move {
                        let env = dom::environment();
                        let surface = DomSurface::new(element);
                        run_embed(&env, &surface, memo_type, &url, &token).await;
                    });
                }
                None => log::warn!("Embed container missing for {}", url),
            }
            move || mount.cancel()
        });
    }

    let on_download = {
        let store = store.clone();
        let memo = memo.clone();
        let notice = notice.clone();
        Callback::from(move |_: MouseEvent| match placeholder_image_url(&memo, Utc::now()) {
            Ok(image_url) => {
                store.attach_image(&memo.id, image_url);
                notice.set(Some(Notice::Saved));
            }
            Err(e) => notice.set(Some(Notice::Failed(e.to_string()))),
        })
    };

    let on_move = {
        let store = store.clone();
        let id = memo.id.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let value = select.value();
            store.move_memo_to_folder(&id, (!value.is_empty()).then_some(value));
        })
    };

    let on_delete = {
        let store = store.clone();
        let id = memo.id.clone();
        Callback::from(move |_: MouseEvent| {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("Delete this memo?").ok())
                .unwrap_or(false);
            if confirmed {
                store.remove_memo(&id);
            }
        })
    };

    let folder = memo.folder_id.as_deref().and_then(|id| store.folder(id));
    let current_folder = memo.folder_id.clone().unwrap_or_default();

    html! {
        <div class="memo-card">
            <div class="memo-card-header">
                <ProviderIcon memo_type={memo.memo_type} />
                <span class="memo-card-provider">{memo.memo_type.label()}</span>
                <span class="memo-card-domain">{domain_of(&memo.url)}</span>
            </div>

            <div class="memo-card-body">
                if *loading {
                    <LoadingPlaceholder />
                }
                <div
                    ref={container}
                    class={classes!("embed-container", loading.then_some("embed-container-hidden"))}
                />
                if !embeddable {
                    <a class="memo-card-link" href={memo.url.clone()} target="_blank" rel="noopener noreferrer">
                        {"Open URL"}
                    </a>
                }
            </div>

            {match (*notice).clone() {
                Some(Notice::Saved) => html! {
                    <Alert r#type={AlertType::Success} title={"Image saved to your gallery"} inline={true}>
                    </Alert>
                },
                Some(Notice::Failed(message)) => html! {
                    <Alert r#type={AlertType::Warning} title={message} inline={true}>
                    </Alert>
                },
                None => html! {},
            }}

            <div class="memo-card-footer">
                <span class="memo-card-date">{memo.created_at.format("%b %-d, %Y").to_string()}</span>
                if let Some(folder) = folder {
                    <span class="folder-badge">{folder.name}</span>
                }
            </div>

            <div class="memo-card-actions">
                <a class="pf-v5-c-button pf-m-secondary" href={memo.url.clone()} target="_blank" rel="noopener noreferrer">
                    {"Open"}
                </a>
                <Button onclick={on_download} variant={ButtonVariant::Secondary}>{"Download"}</Button>
                <select class="pf-v5-c-form-control" onchange={on_move}>
                    <option value="" selected={current_folder.is_empty()}>{"Uncategorized"}</option>
                    {for store.folders().into_iter().map(|f| html! {
                        <option key={f.id.clone()} value={f.id.clone()} selected={f.id == current_folder}>
                            {f.name}
                        </option>
                    })}
                </select>
                <Button onclick={on_delete} variant={ButtonVariant::Danger}>{"Delete"}</Button>
            </div>
        </div>
    }
}
