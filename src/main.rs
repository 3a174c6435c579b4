#![allow(warnings)]
//! Parking Contract Dashboard Entry Point

mod station;
mod models;
mod calendar;
mod filter;
mod stats;
mod error;
mod config;
mod commands;
mod context;
mod store;
mod components;
mod app;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::load();
    let level = config.as_ref().map_or(log::LevelFilter::Info, |c| c.log_level);
    if let Err(e) = rolling_logger::init_logger("PCM", level) {
        web_sys::console::warn_1(&format!("[APP] logger init failed: {}", e).into());
    }
    match &config {
        Ok(c) => log::info!("[APP] script endpoint {}", c.script_url),
        Err(e) => log::error!("[APP] configuration error: {}", e),
    }

    mount_to_body(move || view! { <App config=config.clone() /> });
}
