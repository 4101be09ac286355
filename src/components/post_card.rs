use yew::prelude::*;

use crate::format::{format_timestamp, initials};
use crate::types::{Post, PostId, Reaction};

#[derive(Properties, PartialEq)]
pub struct PostCardProps {
    pub post: Post,
    /// Set for a moment after one of this post's reactions was clicked.
    pub highlighted: bool,
    pub on_react: Callback<(PostId, Reaction)>,
}

fn reaction_style(reaction: Reaction, highlighted: bool) -> String {
    let color = match (reaction, highlighted) {
        (Reaction::Like, true) => "#3b82f6",
        (Reaction::Love, true) => "#ef4444",
        (_, false) => "#6b7280",
    };
    let scale = if highlighted { "scale(1.25)" } else { "scale(1)" };
    format!(
        "border:none; background:none; cursor:pointer; font-size:1em; color:{}; transform:{}; transition:transform 0.2s;",
        color, scale
    )
}

#[function_component(PostCard)]
pub fn post_card(props: &PostCardProps) -> Html {
    let post = &props.post;

    html! {
        <div style="background:white; border-radius:24px; box-shadow:0 4px 12px rgba(0,0,0,0.08); padding:1.25em; margin-bottom:1em;">
            <div style="display:flex; align-items:center; gap:0.75em; margin-bottom:0.75em;">
                <div style="width:40px; height:40px; border-radius:50%; display:flex; align-items:center; justify-content:center; color:white; font-weight:bold; background:linear-gradient(to bottom right, #60a5fa, #a855f7);">
                    { initials(&post.author) }
                </div>
                <div>
                    <div style="font-weight:bold; color:#1f2937;">{ &post.author }</div>
                    <div style="font-size:0.8em; color:#9ca3af;">{ format_timestamp(post.timestamp) }</div>
                </div>
            </div>
            <p style="color:#374151; white-space:pre-wrap; margin:0 0 0.75em 0;">{ &post.text }</p>
            <div style="display:flex; gap:1.5em;">
                { for Reaction::ALL.iter().map(|&reaction| {
                    let onclick = {
                        let on_react = props.on_react.clone();
                        let id = post.id;
                        Callback::from(move |_: MouseEvent| on_react.emit((id, reaction)))
                    };
                    html! {
                        <button style={reaction_style(reaction, props.highlighted)} {onclick}>
                            { format!("{} {}", reaction.emoji(), post.count(reaction)) }
                        </button>
                    }
                })}
            </div>
        </div>
    }
}
