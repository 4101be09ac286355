use anyhow::Context;
use wasm_bindgen::prelude::*;

pub mod app;
pub mod auth;
pub mod clock;
pub mod components;
pub mod config;
pub mod error;
pub mod feed;
pub mod format;
pub mod logging;
pub mod routes;
pub mod session;
pub mod storage;
pub mod types;

use crate::app::{App, AppProps, Services};
use crate::config::Config;

fn mount(config: Config) -> anyhow::Result<()> {
    let document = web_sys::window()
        .context("window not available")?
        .document()
        .context("document not available")?;
    let root = document
        .get_element_by_id(&config.root_element_id)
        .with_context(|| format!("element #{} not found", config.root_element_id))?;
    let services = Services::browser(config).context("browser storage unavailable")?;
    yew::Renderer::<App>::with_root_and_props(root, AppProps { services }).render();
    Ok(())
}

#[wasm_bindgen(start)]
pub fn run_app() -> Result<(), JsValue> {
    let config = Config::from_env();
    logging::init(config.log_level);
    tracing::info!("Starting Mini Newsfeed");
    mount(config).map_err(|e| {
        tracing::error!("Failed to start: {:#}", e);
        JsValue::from_str(&format!("{:#}", e))
    })
}
