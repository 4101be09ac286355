use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::app::Services;
use crate::auth::{AuthForm, AuthMode};
use crate::components::Logo;
use crate::routes::Route;

const INPUT_STYLE: &str = "width:100%; padding:0.75em 1em; margin-bottom:0.75em; border:1px solid #ddd; border-radius:12px; box-sizing:border-box; font-size:1em;";
const BUTTON_STYLE: &str = "width:100%; padding:0.75em 0; border:none; border-radius:12px; color:white; font-weight:bold; cursor:pointer; background:linear-gradient(to right, #3b82f6, #9333ea);";
const LINK_STYLE: &str = "color:#3b82f6; font-weight:bold; cursor:pointer;";

#[derive(Properties, PartialEq)]
pub struct AuthViewProps {
    pub navigate: Callback<Route>,
}

fn on_field(form: &UseStateHandle<AuthForm>, update: fn(&mut AuthForm, String)) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |event: InputEvent| {
        let target = event.target_unchecked_into::<HtmlInputElement>();
        let mut next = (*form).clone();
        update(&mut next, target.value());
        form.set(next);
    })
}

#[function_component(AuthView)]
pub fn auth_view(props: &AuthViewProps) -> Html {
    let services = use_context::<Services>();
    let mode = use_state(|| AuthMode::SignIn);
    let form = use_state(AuthForm::default);
    let error = use_state(|| None::<String>);

    let toggle_mode = {
        let mode = mode.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            error.set(None);
            mode.set(mode.toggled());
        })
    };

    let on_submit = {
        let mode = mode.clone();
        let form = form.clone();
        let error = error.clone();
        let navigate = props.navigate.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(services) = services.as_ref() else {
                tracing::error!("Services context missing");
                return;
            };
            let started = form
                .submit(*mode)
                .and_then(|name| services.session.start_session(&name));
            match started {
                Ok(()) => {
                    error.set(None);
                    navigate.emit(Route::Feed);
                }
                Err(e) => {
                    if e.user_message().is_none() {
                        tracing::error!("Failed to start session: {}", e);
                    }
                    error.set(e.user_message().map(str::to_string));
                }
            }
        })
    };

    let error_line = match &*error {
        Some(message) => html! {
            <p style="color:#ef4444; font-size:0.9em; margin:0 0 0.75em 0;">{ message }</p>
        },
        None => html! {},
    };

    let fields = match *mode {
        AuthMode::SignIn => html! {
            <>
                <input type="text" placeholder="Username" style={INPUT_STYLE}
                    value={form.username.clone()}
                    oninput={on_field(&form, |f, v| f.username = v)} />
                <input type="password" placeholder="Password" style={INPUT_STYLE}
                    value={form.password.clone()}
                    oninput={on_field(&form, |f, v| f.password = v)} />
                { error_line }
                <button style={BUTTON_STYLE} onclick={on_submit}>{ "SIGN IN" }</button>
                <p style="margin-top:1em; color:#666; font-size:0.9em;">
                    { "Don't have an account? " }
                    <span style={LINK_STYLE} onclick={toggle_mode.clone()}>{ "SIGN UP" }</span>
                </p>
            </>
        },
        AuthMode::SignUp => html! {
            <>
                <input type="text" placeholder="Full Name" style={INPUT_STYLE}
                    value={form.name.clone()}
                    oninput={on_field(&form, |f, v| f.name = v)} />
                <input type="email" placeholder="Email" style={INPUT_STYLE}
                    value={form.email.clone()}
                    oninput={on_field(&form, |f, v| f.email = v)} />
                <input type="password" placeholder="Password" style={INPUT_STYLE}
                    value={form.password.clone()}
                    oninput={on_field(&form, |f, v| f.password = v)} />
                { error_line }
                <button style={BUTTON_STYLE} onclick={on_submit}>{ "SIGN UP" }</button>
                <p style="margin-top:1em; color:#666; font-size:0.9em;">
                    { "Already have an account? " }
                    <span style={LINK_STYLE} onclick={toggle_mode.clone()}>{ "SIGN IN" }</span>
                </p>
            </>
        },
    };

    html! {
        <div style="min-height:100vh; display:flex; align-items:center; justify-content:center; background:linear-gradient(to bottom, #eff6ff, #faf5ff); font-family:Arial,sans-serif;">
            <div style="display:flex; width:800px; max-width:95vw; min-height:480px; background:white; border-radius:24px; box-shadow:0 10px 30px rgba(0,0,0,0.1); overflow:hidden;">
                <div style="flex:1; padding:3em 2.5em; text-align:center;">
                    <Logo />
                    <h1 style="margin:0 0 1.5em 0; color:#1f2937;">{ "Mini Newsfeed" }</h1>
                    { fields }
                </div>
                <div style="flex:1; padding:3em 2.5em; display:flex; flex-direction:column; align-items:center; justify-content:center; text-align:center; color:white; background:linear-gradient(to right, #3b82f6, #9333ea);">
                    <h2 style="margin:0 0 0.75em 0;">{ mode.welcome_title() }</h2>
                    <p style="margin:0 0 1.5em 0; opacity:0.9;">{ mode.welcome_text() }</p>
                    <button style="padding:0.6em 2.5em; border:2px solid white; border-radius:12px; background:transparent; color:white; font-weight:bold; cursor:pointer;" onclick={toggle_mode}>
                        { mode.switch_label() }
                    </button>
                </div>
            </div>
        </div>
    }
}
