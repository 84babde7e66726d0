/// Gallery of downloaded images
use patternfly_yew::prelude::*;
use yew::prelude::*;

use super::components::{EmptyState, ProviderIcon};
use super::store_context::use_store;

#[derive(Properties, PartialEq)]
pub struct SavedImagesProps {
    pub on_back: Callback<MouseEvent>,
}

#[function_component(SavedImages)]
pub fn saved_images(props: &SavedImagesProps) -> Html {
    let store = use_store();
    let memos = store.memos_with_images();

    html! {
        <div class="saved-images">
            <header class="app-header">
                <Button onclick={props.on_back.clone()} variant={ButtonVariant::Secondary}>
                    {"← Back"}
                </Button>
                <h1 class="app-title">{"Saved Images"}</h1>
            </header>

            if memos.is_empty() {
                <EmptyState
                    title="No saved images"
                    message="Use the Download button on a Twitter or Instagram memo to save its image."
                />
            } else {
                <div class="image-grid">
                    {for memos.into_iter().map(|memo| {
                        let image_url = memo.image_url.clone().unwrap_or_default();
                        html! {
                            <figure key={memo.id.clone()} class="image-card">
                                <img src={image_url} alt={memo.url.clone()} loading="lazy" />
                                <figcaption>
                                    <ProviderIcon memo_type={memo.memo_type} />
                                    <a href={memo.url.clone()} target="_blank" rel="noopener noreferrer">
                                        {memo.created_at.format("%b %-d, %Y").to_string()}
                                    </a>
                                </figcaption>
                            </figure>
                        }
                    })}
                </div>
            }
        </div>
    }
}
