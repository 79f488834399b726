#[cfg(target_arch = "wasm32")]
pub fn main() {
    use crossbox::{app_lib::config::AppConfig, App};

    crossbox::app_lib::logging::init(AppConfig::get());
    leptos::mount::mount_to_body(App);
}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use crossbox::cli::{actions, actions::Action, start};

    let action = start()?;

    match action {
        Action::Console { .. } => actions::console::handle(action).await?,
    }

    Ok(())
}
