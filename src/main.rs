//! Task Hub Frontend Entry Point

mod app;
mod browser;
mod components;
mod context;
mod hooks;
mod pages;
mod route;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
    mount_to_body(App);
}
