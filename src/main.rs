//! Desktop viewer for precomputed summary tables from a hematologic
//! malignancy cohort: variant counts, expression outliers, splicing and
//! fusion events, and driver-gene predictions.

use std::path::PathBuf;

use log::{error, info};
use mimalloc::MiMalloc;

mod app;
mod data;
mod page;
mod pipeline;
mod ui;

use app::HemaviewApp;
use data::DataContext;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // The dataset is a static deployment artifact; a missing or malformed
    // file means the process cannot serve any page.
    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    let data = match DataContext::load_all(&data_dir) {
        Ok(data) => data,
        Err(err) => {
            error!("failed to load datasets from {}: {err:#}", data_dir.display());
            std::process::exit(1);
        }
    };
    info!("all datasets loaded from {}", data_dir.display());

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 900.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Hemaview",
        options,
        Box::new(move |cc| Ok(Box::new(HemaviewApp::new(cc, data)))),
    )
}
