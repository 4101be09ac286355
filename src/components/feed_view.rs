use std::rc::Rc;

use web_sys::HtmlTextAreaElement;
use yew::platform::spawn_local;
use yew::platform::time::sleep;
use yew::prelude::*;

use crate::app::Services;
use crate::clock::Clock;
use crate::components::{Logo, PostCard};
use crate::error::AppError;
use crate::feed::FeedStore;
use crate::routes::Route;
use crate::storage::KeyValueStore;
use crate::types::{Post, PostId, Reaction};

const EMPTY_FEED_TEXT: &str = "No posts yet. Be the first to post!";

type Feed = FeedStore<Rc<dyn KeyValueStore>, Rc<dyn Clock>>;

#[derive(Properties, PartialEq)]
pub struct FeedViewProps {
    pub navigate: Callback<Route>,
    /// Navigation that replaces the current history entry.
    pub redirect: Callback<Route>,
}

#[function_component(FeedView)]
pub fn feed_view(props: &FeedViewProps) -> Html {
    let services = use_context::<Services>();
    let user = use_state(|| None::<String>);
    let posts = use_state(Vec::<Post>::new);
    let draft = use_state(String::new);
    let error = use_state(|| None::<String>);
    let highlighted = use_state(|| None::<PostId>);
    let store = use_mut_ref(|| None::<Feed>);

    // Guard the view and load the feed once
    {
        let services = services.clone();
        let user = user.clone();
        let posts = posts.clone();
        let store = store.clone();
        let redirect = props.redirect.clone();
        use_effect_with((), move |_| {
            match services {
                Some(services) => match services.session.get_active_user() {
                    Some(name) => {
                        let feed = FeedStore::load_or_empty(
                            services.storage.clone(),
                            services.clock.clone(),
                            &services.config,
                        );
                        posts.set(feed.posts().to_vec());
                        *store.borrow_mut() = Some(feed);
                        user.set(Some(name));
                    }
                    None => redirect.emit(Route::Entry),
                },
                None => tracing::error!("Services context missing"),
            }
            || ()
        });
    }

    let on_draft_input = {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            let target = event.target_unchecked_into::<HtmlTextAreaElement>();
            draft.set(target.value());
        })
    };

    let on_post = {
        let user = user.clone();
        let posts = posts.clone();
        let draft = draft.clone();
        let error = error.clone();
        let store = store.clone();
        Callback::from(move |_: MouseEvent| {
            let mut store = store.borrow_mut();
            let Some(feed) = store.as_mut() else {
                error.set(Some(crate::error::EMPTY_POST_MESSAGE.to_string()));
                return;
            };
            let created = feed.create_post(user.as_deref(), &draft).map(|_| ());
            match created {
                Err(AppError::Validation(message)) => {
                    error.set(Some(message));
                    return;
                }
                Err(e) => tracing::error!("Failed to save posts: {}", e),
                Ok(()) => {}
            }
            posts.set(feed.posts().to_vec());
            draft.set(String::new());
            error.set(None);
        })
    };

    let on_react = {
        let posts = posts.clone();
        let highlighted = highlighted.clone();
        let store = store.clone();
        let delay = services
            .as_ref()
            .map(|s| s.config.reaction_highlight)
            .unwrap_or_default();
        Callback::from(move |(id, reaction): (PostId, Reaction)| {
            highlighted.set(Some(id));
            if let Some(feed) = store.borrow_mut().as_mut() {
                match feed.react(id, reaction).map(|_| ()) {
                    Ok(()) => {}
                    Err(AppError::NotFound(_)) => {}
                    Err(e) => tracing::error!("Failed to save posts: {}", e),
                }
                posts.set(feed.posts().to_vec());
            }
            let highlighted = highlighted.clone();
            spawn_local(async move {
                sleep(delay).await;
                highlighted.set(None);
            });
        })
    };

    let on_logout = {
        let services = services.clone();
        let navigate = props.navigate.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(services) = &services {
                if let Err(e) = services.session.end_session() {
                    tracing::error!("Failed to end session: {}", e);
                }
            }
            navigate.emit(Route::Entry);
        })
    };

    html! {
        <div style="min-height:100vh; padding:1.5em; background:linear-gradient(to bottom, #eff6ff, #faf5ff); font-family:Arial,sans-serif;">
            <div style="max-width:42em; margin:0 auto;">
                <div style="display:flex; justify-content:space-between; align-items:center; margin-bottom:1.5em;">
                    <div style="display:flex; align-items:center; gap:0.75em;">
                        <Logo />
                        <div>
                            <h1 style="margin:0; font-size:1.5em; color:#1f2937;">{ "Mini Newsfeed" }</h1>
                            <p style="margin:0; color:#6b7280; font-size:0.9em;">{ "Share your thoughts instantly" }</p>
                        </div>
                    </div>
                    <button style="background:#ef4444; color:white; border:none; padding:0.5em 1em; border-radius:12px; cursor:pointer;" onclick={on_logout}>
                        { "Logout" }
                    </button>
                </div>

                <div style="background:white; border-radius:24px; box-shadow:0 4px 12px rgba(0,0,0,0.08); padding:1.25em; margin-bottom:1.5em;">
                    if let Some(name) = &*user {
                        <p style="color:#374151; font-size:1.1em; font-weight:bold; margin:0 0 0.75em 0;">
                            { format!("Hi, {} 👋", name) }
                        </p>
                    }
                    <textarea
                        placeholder="What's on your mind?"
                        style="width:100%; min-height:5em; padding:1em; border:1px solid #e5e7eb; border-radius:16px; margin-bottom:0.75em; box-sizing:border-box; font-size:1em; resize:vertical;"
                        value={(*draft).clone()}
                        oninput={on_draft_input}
                    />
                    if let Some(message) = &*error {
                        <p style="color:#ef4444; font-size:0.9em; margin:0 0 0.75em 0;">{ message }</p>
                    }
                    <button style="width:100%; padding:0.75em 0; border:none; border-radius:12px; color:white; font-weight:bold; cursor:pointer; background:linear-gradient(to right, #3b82f6, #9333ea);" onclick={on_post}>
                        { "Post" }
                    </button>
                </div>

                <div>
                    if posts.is_empty() {
                        <p style="text-align:center; color:#9ca3af;">{ EMPTY_FEED_TEXT }</p>
                    }
                    { for posts.iter().map(|post| html! {
                        <PostCard
                            key={post.id.to_string()}
                            post={post.clone()}
                            highlighted={*highlighted == Some(post.id)}
                            on_react={on_react.clone()}
                        />
                    })}
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_feed_text() {
        assert_eq!(EMPTY_FEED_TEXT, "No posts yet. Be the first to post!");
    }
}
