/// Store context shared by every view
use std::ops::Deref;
use std::rc::Rc;

use yew::prelude::*;

use crate::store::MemoStore;

/// Cheap handle to the one `MemoStore`; equal only to itself
#[derive(Clone)]
pub struct StoreHandle(Rc<MemoStore>);

impl StoreHandle {
    pub fn new(store: MemoStore) -> Self {
        StoreHandle(Rc::new(store))
    }
}

impl PartialEq for StoreHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for StoreHandle {
    type Target = MemoStore;

    fn deref(&self) -> &MemoStore {
        &self.0
    }
}

/// The store, with a re-render of the calling component on every change.
///
/// The subscription lives exactly as long as the component.
#[hook]
pub fn use_store() -> StoreHandle {
    let store = use_context::<StoreHandle>()
        .expect("use_store must be called beneath the app's ContextProvider<StoreHandle>");
    let update = use_force_update();

    {
        let store = store.clone();
        use_effect_with((), move |_| {
            let subscription = store.subscribe(move || update.force_update());
            move || drop(subscription)
        });
    }

    store
}
