use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LogoProps {
    #[prop_or(64)]
    pub size: u32,
}

#[function_component(Logo)]
pub fn logo(props: &LogoProps) -> Html {
    let style = format!("width:{0}px; height:{0}px; margin:0 auto 1em auto;", props.size);
    html! {
        <div style={style}>
            <svg viewBox="0 0 100 100" width="100%" height="100%">
                <defs>
                    <linearGradient id="logoGradient" x1="0" y1="0" x2="1" y2="1">
                        <stop offset="0%" stop-color="#3b82f6" />
                        <stop offset="100%" stop-color="#a855f7" />
                    </linearGradient>
                </defs>
                <circle cx="50" cy="50" r="50" fill="url(#logoGradient)" />
                <text x="50%" y="55%" text-anchor="middle" fill="white" font-size="32" font-weight="bold" font-family="sans-serif" dominant-baseline="middle">
                    { "MN" }
                </text>
            </svg>
        </div>
    }
}
