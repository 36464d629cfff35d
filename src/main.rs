#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    xr_panel::flow::run(xr_panel::SceneConfig::default())
}

// The browser starts through `web::start` instead.
#[cfg(target_arch = "wasm32")]
fn main() {}
