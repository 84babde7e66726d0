//! Embed lifecycle for memo cards
//!
//! Each visible card drives one `EmbedMount`. Provider scripts are injected
//! at most once per process through `EmbedEnvironment::ensure_script`, which
//! hands every caller the same shared load future.
//!
//! Mount phases:
//! - `Idle` → `ScriptLoading` → `ContentAttached`
//! - `ScriptLoading` | `ContentAttached` → `ErrorFallback` on provider failure
//!
//! Async continuations check their `MountToken` and the surface's liveness
//! before touching the container, so a torn-down card never gets content.

pub mod dom;
pub mod grace;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use futures::future::{self, FutureExt, LocalBoxFuture, Shared};
use thiserror::Error;

use crate::constants::{INSTAGRAM_EMBED_URL, TWITTER_WIDGETS_URL};
use crate::memo_data::MemoType;
use crate::url_utils::{embed_url_for, tweet_id};

/// Providers whose embeds need a third-party script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptProvider {
    Twitter,
    Instagram,
}

impl ScriptProvider {
    pub fn script_url(self) -> &'static str {
        match self {
            ScriptProvider::Twitter => TWITTER_WIDGETS_URL,
            ScriptProvider::Instagram => INSTAGRAM_EMBED_URL,
        }
    }
}

/// Whether a provider's API is reachable in the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbedError {
    #[error("failed to load script {0}")]
    ScriptLoad(String),
    #[error("{0:?} embed API is not available")]
    ProviderMissing(ScriptProvider),
    #[error("provider failed to create embed: {0}")]
    Create(String),
}

/// The container a card renders provider content into
pub trait EmbedSurface {
    fn clear(&self);
    /// False once the container has left the document
    fn is_live(&self) -> bool;
    fn attach_frame(&self, src: &str);
    fn attach_instagram_quote(&self, permalink: &str);
    fn show_fallback_link(&self, url: &str);
}

/// Every assumption about third-party embed APIs lives behind this trait.
pub trait EmbedBackend {
    type Surface: EmbedSurface;

    fn inject_script(&self, provider: ScriptProvider) -> LocalBoxFuture<'static, Result<(), EmbedError>>;
    fn capability(&self, provider: ScriptProvider) -> Capability;
    fn create_tweet(
        &self,
        tweet_id: &str,
        surface: &Self::Surface,
    ) -> LocalBoxFuture<'static, Result<(), EmbedError>>;
    fn process_instagram(&self) -> Result<(), EmbedError>;
}

pub type ScriptLoad = Shared<LocalBoxFuture<'static, Result<(), EmbedError>>>;

/// Process-wide embed state: the backend plus one memoized load per provider
pub struct EmbedEnvironment<B: EmbedBackend> {
    backend: B,
    scripts: RefCell<HashMap<ScriptProvider, ScriptLoad>>,
}

impl<B: EmbedBackend> EmbedEnvironment<B> {
    pub fn new(backend: B) -> Self {
        EmbedEnvironment {
            backend,
            scripts: RefCell::new(HashMap::new()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The provider's script load, started on first request.
    ///
    /// Failed loads stay memoized; later callers see the same error and the
    /// script is only retried after a page reload.
    pub fn ensure_script(&self, provider: ScriptProvider) -> ScriptLoad {
        if let Some(load) = self.scripts.borrow().get(&provider) {
            return load.clone();
        }

        let load = match self.backend.capability(provider) {
            Capability::Present => future::ready(Ok::<(), EmbedError>(())).boxed_local().shared(),
            Capability::Absent => {
                log::debug!("Injecting {}", provider.script_url());
                self.backend.inject_script(provider).shared()
            }
        };

        self.scripts.borrow_mut().insert(provider, load.clone());
        load
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbedPhase {
    #[default]
    Idle,
    ScriptLoading,
    ContentAttached,
    ErrorFallback,
}

#[derive(Debug, Default)]
struct MountState {
    generation: Cell<u64>,
    attached: Cell<Option<u64>>,
    phase: Cell<EmbedPhase>,
}

/// Per-card embed state, shared between the card and its async work
#[derive(Debug, Clone, Default)]
pub struct EmbedMount {
    state: Rc<MountState>,
}

impl EmbedMount {
    /// Start a new attachment generation, invalidating older tokens.
    pub fn begin(&self) -> MountToken {
        let generation = self.state.generation.get() + 1;
        self.state.generation.set(generation);
        self.state.phase.set(EmbedPhase::Idle);

        MountToken {
            generation,
            mount: self.clone(),
        }
    }

    /// Teardown: pending continuations become no-ops.
    pub fn cancel(&self) {
        self.state.generation.set(self.state.generation.get() + 1);
        self.state.attached.set(None);
        self.state.phase.set(EmbedPhase::Idle);
    }

    pub fn phase(&self) -> EmbedPhase {
        self.state.phase.get()
    }
}

pub struct MountToken {
    generation: u64,
    mount: EmbedMount,
}

impl MountToken {
    pub fn is_current(&self) -> bool {
        self.mount.state.generation.get() == self.generation
    }

    /// At most one attachment attempt per generation.
    fn claim_attachment(&self) -> bool {
        let state = &self.mount.state;
        if !self.is_current() || state.attached.get() == Some(self.generation) {
            return false;
        }
        state.attached.set(Some(self.generation));
        true
    }

    fn set_phase(&self, phase: EmbedPhase) {
        if self.is_current() {
            self.mount.state.phase.set(phase);
        }
    }
}

fn still_wanted<S: EmbedSurface>(token: &MountToken, surface: &S) -> bool {
    token.is_current() && surface.is_live()
}

/// Attach the provider content for `url` into `surface`
///
/// `Other` memos have no embed and leave the mount idle. Provider failures
/// replace the container content with a plain link to `url`; there is no retry.
pub async fn run_embed<B: EmbedBackend>(
    env: &EmbedEnvironment<B>,
    surface: &B::Surface,
    memo_type: MemoType,
    url: &str,
    token: &MountToken,
) {
    if memo_type == MemoType::Other || !token.claim_attachment() {
        return;
    }

    surface.clear();

    let outcome = match memo_type {
        MemoType::Youtube => {
            surface.attach_frame(&embed_url_for(url));
            Ok(())
        }
        MemoType::Twitter => attach_tweet(env, surface, url, token).await,
        MemoType::Instagram => attach_instagram(env, surface, url, token).await,
        MemoType::Other => Ok(()),
    };

    if !still_wanted(token, surface) {
        return;
    }

    match outcome {
        Ok(()) => token.set_phase(EmbedPhase::ContentAttached),
        Err(e) => {
            log::warn!("Embed failed for {}: {}", url, e);
            surface.clear();
            surface.show_fallback_link(url);
            token.set_phase(EmbedPhase::ErrorFallback);
        }
    }
}

async fn attach_tweet<B: EmbedBackend>(
    env: &EmbedEnvironment<B>,
    surface: &B::Surface,
    url: &str,
    token: &MountToken,
) -> Result<(), EmbedError> {
    token.set_phase(EmbedPhase::ScriptLoading);
    env.ensure_script(ScriptProvider::Twitter).await?;

    if !still_wanted(token, surface) {
        return Ok(());
    }
    if env.backend().capability(ScriptProvider::Twitter) == Capability::Absent {
        return Err(EmbedError::ProviderMissing(ScriptProvider::Twitter));
    }

    env.backend().create_tweet(&tweet_id(url), surface).await
}

async fn attach_instagram<B: EmbedBackend>(
    env: &EmbedEnvironment<B>,
    surface: &B::Surface,
    url: &str,
    token: &MountToken,
) -> Result<(), EmbedError> {
    surface.attach_instagram_quote(url);
    token.set_phase(EmbedPhase::ScriptLoading);
    env.ensure_script(ScriptProvider::Instagram).await?;

    if !still_wanted(token, surface) {
        return Ok(());
    }
    if env.backend().capability(ScriptProvider::Instagram) == Capability::Absent {
        return Err(EmbedError::ProviderMissing(ScriptProvider::Instagram));
    }

    env.backend().process_instagram()
}
