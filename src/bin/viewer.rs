use mannequin::{ViewerApp, ViewerConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut config = ViewerConfig::default();
    if let Some(uri) = std::env::args().nth(1) {
        config.asset_uri = uri;
    }

    log::info!("male figure asset: {}", config.asset_uri);
    ViewerApp::new(config).run()
}
