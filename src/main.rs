use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use log::info;

use imgwatch::app::ViewerApp;
use imgwatch::decode::{decode_image, DecodePolicy};
use imgwatch::slot::ImageSlot;
use imgwatch::watcher::{spawn_reload_thread, FileWatcher};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Image viewer that reloads the file whenever it changes on disk"
)]
struct Args {
    /// Image file to display and watch
    #[arg(value_name = "IMAGE")]
    image: PathBuf,

    /// Behavior when the changed file no longer decodes
    #[arg(long, value_enum, default_value_t = DecodePolicy::Fatal)]
    on_decode_error: DecodePolicy,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let initial = decode_image(&args.image)
        .with_context(|| format!("unable to load {}", args.image.display()))?;
    info!(
        "loaded {} ({}x{})",
        args.image.display(),
        initial.width,
        initial.height
    );

    let slot = Arc::new(ImageSlot::new());
    slot.publish(initial);

    // Establish the watch before the window opens so a bad path fails fast
    // with a nonzero exit instead of a blank viewer.
    let watcher = FileWatcher::new(&args.image)
        .with_context(|| format!("unable to watch {}", args.image.display()))?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("imgwatch: {}", args.image.display()))
            .with_inner_size(egui::vec2(800.0, 600.0)),
        ..Default::default()
    };

    let path = args.image;
    let policy = args.on_decode_error;
    let render_slot = Arc::clone(&slot);
    eframe::run_native(
        "imgwatch",
        native_options,
        Box::new(move |cc| {
            spawn_reload_thread(
                watcher,
                path.clone(),
                Arc::clone(&slot),
                policy,
                cc.egui_ctx.clone(),
            );
            Ok(Box::new(ViewerApp::new(path, render_slot)))
        }),
    )?;

    Ok(())
}
