//! Browser navigator and the `popstate` / `pageshow` listeners.

use std::rc::Rc;
use std::time::Duration;

use patti_core::navigation::{NavigationGuard, Navigator};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, PageTransitionEvent, Window};

/// [`Navigator`] backed by `window`.
#[derive(Clone)]
pub struct BrowserNavigator {
    window: Window,
}

impl BrowserNavigator {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Navigator for BrowserNavigator {
    fn confirm(&self, message: &str) -> bool {
        // A failed prompt keeps the player at the table.
        self.window.confirm_with_message(message).unwrap_or(true)
    }

    fn assign(&self, url: &str) {
        if let Err(e) = self.window.location().set_href(url) {
            tracing::error!("navigation to {url} failed: {e:?}");
        }
    }

    fn reload(&self) {
        if let Err(e) = self.window.location().reload() {
            tracing::error!("reload failed: {e:?}");
        }
    }

    fn schedule_reload(&self, delay: Duration) {
        let navigator = self.clone();
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(millis).await;
            navigator.reload();
        });
    }
}

/// Register the guard for `popstate` and `pageshow` for the page's lifetime.
pub fn install_navigation_guard(
    window: &Window,
    guard: NavigationGuard<BrowserNavigator>,
) -> Result<(), JsValue> {
    let guard = Rc::new(guard);

    let on_popstate = {
        let guard = Rc::clone(&guard);
        Closure::<dyn FnMut(Event)>::new(move |_e: Event| {
            guard.on_popstate();
        })
    };
    window.add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())?;
    on_popstate.forget();

    let on_pageshow = {
        let guard = Rc::clone(&guard);
        Closure::<dyn FnMut(Event)>::new(move |e: Event| {
            let persisted = e
                .dyn_ref::<PageTransitionEvent>()
                .is_some_and(PageTransitionEvent::persisted);
            guard.on_pageshow(persisted);
        })
    };
    window.add_event_listener_with_callback("pageshow", on_pageshow.as_ref().unchecked_ref())?;
    on_pageshow.forget();

    Ok(())
}
