//! Desktop viewer binary for the vitrine infinite gallery.

use std::path::Path;

use vitrine::{options::Options, Viewer};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let asset_root = args.next().unwrap_or_else(|| ".".to_owned());

    let options = match args.next() {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{path}: {e}");
                log::error!("Usage: vitrine [asset_root] [options.toml]");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    log::info!("serving images from {asset_root}");
    let viewer = Viewer::builder()
        .with_asset_root(asset_root)
        .with_options(options)
        .build();
    if let Err(e) = viewer.run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
