use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::clock::{Clock, SystemClock};
use crate::components::{AuthView, FeedView};
use crate::config::Config;
use crate::error::Result;
use crate::routes::{current_route, replace_history, update_history, HistoryMode, Route};
use crate::session::SessionGuard;
use crate::storage::{BrowserStorage, CookieJar, DocumentCookies, KeyValueStore};

pub type Session = SessionGuard<Rc<dyn CookieJar>, Rc<dyn Clock>>;

/// Everything the views read and write, handed down through a context.
#[derive(Clone)]
pub struct Services {
    pub config: Rc<Config>,
    pub storage: Rc<dyn KeyValueStore>,
    pub clock: Rc<dyn Clock>,
    pub session: Rc<Session>,
}

impl Services {
    pub fn new(config: Config, storage: Rc<dyn KeyValueStore>, cookies: Rc<dyn CookieJar>, clock: Rc<dyn Clock>) -> Self {
        let session = SessionGuard::new(cookies, clock.clone(), &config);
        Self {
            config: Rc::new(config),
            storage,
            clock,
            session: Rc::new(session),
        }
    }

    /// `localStorage`, `document.cookie` and the system clock.
    pub fn browser(config: Config) -> Result<Self> {
        Ok(Self::new(
            config,
            Rc::new(BrowserStorage::local()?),
            Rc::new(DocumentCookies::new()?),
            Rc::new(SystemClock),
        ))
    }
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config)
            && Rc::ptr_eq(&self.session, &other.session)
            && std::ptr::eq(
                Rc::as_ptr(&self.storage) as *const (),
                Rc::as_ptr(&other.storage) as *const (),
            )
    }
}

/// Guarded navigation: the session decides where `target` really lands.
fn navigation(route: UseStateHandle<Route>, session: Rc<Session>, mode: HistoryMode) -> Callback<Route> {
    Callback::from(move |target: Route| {
        let next = session.guard(target);
        tracing::debug!(path = next.path(), ?mode, "Navigating");
        update_history(next, mode);
        route.set(next);
    })
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub services: Services,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let services = props.services.clone();
    let route = {
        let session = services.session.clone();
        use_state(move || session.guard(current_route()))
    };

    // Fix up the address bar after a redirect and follow back/forward.
    {
        let route = route.clone();
        let session = services.session.clone();
        use_effect_with((), move |_| {
            if *route != current_route() {
                replace_history(*route);
            }
            let on_popstate = Closure::<dyn Fn()>::new(move || {
                let next = session.guard(current_route());
                if next != current_route() {
                    replace_history(next);
                }
                route.set(next);
            });
            let window = web_sys::window();
            if let Some(window) = &window {
                if window
                    .add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())
                    .is_err()
                {
                    tracing::warn!("Failed to listen for history navigation");
                }
            }
            move || {
                if let Some(window) = window {
                    let _ = window.remove_event_listener_with_callback(
                        "popstate",
                        on_popstate.as_ref().unchecked_ref(),
                    );
                }
                drop(on_popstate);
            }
        });
    }

    let navigate = navigation(route.clone(), services.session.clone(), HistoryMode::Push);
    let redirect = navigation(route.clone(), services.session.clone(), HistoryMode::Replace);

    html! {
        <ContextProvider<Services> context={services}>
            { match *route {
                Route::Entry => html! { <AuthView navigate={navigate} /> },
                Route::Feed => html! { <FeedView navigate={navigate} redirect={redirect} /> },
            }}
        </ContextProvider<Services>>
    }
}
