//! Browser client for the Youth Skills Hub REST API: session handling,
//! a thin endpoint client and per-view state for a Leptos front end.
pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod pages;
pub mod session;
pub mod state;
mod test_support;
pub mod utils;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Starting Youth Skills Hub client");

    // window.__SKILLS_HUB_ENV, when present, wins over ./config.json.
    leptos::spawn_local(async move {
        config::init().await;
        log::info!("Runtime config initialized: {}", config::await_api_base_url().await);
    });

    leptos::mount_to_body(|| leptos::view! { <app::AppRoot>{()}</app::AppRoot> });
}
