mod app;
mod browser;
mod web_document;

fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = app::start().await {
            tracing::error!("table view failed to start: {e}");
        }
    });
}
