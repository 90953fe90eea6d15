//! WiFi Trilateration Visualizer (native entry point)
//!
//! The plot window owns the main thread. Feeds and the render loop run on a
//! single-threaded tokio runtime in a background thread; when the render
//! loop stops, the window is closed and the process exits once that thread
//! has finished.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use tracing::{error, info};

use trilateration_viz::{init_logging, FeedExit, PlotWindow, Visualizer, VisualizerConfig};

fn main() -> anyhow::Result<()> {
    let config = VisualizerConfig::default();
    init_logging(config.debug_logging);

    let visualizer = Visualizer::new(config.clone())?;
    let window = PlotWindow::new(&config.render);

    info!(
        sensors = %config.sensors.url,
        trilaterations = %config.trilaterations.url,
        "Starting trilateration visualizer"
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.render.window_width, config.render.window_height])
            .with_title(config.render.title.clone()),
        ..Default::default()
    };

    let runtime_thread: Arc<Mutex<Option<JoinHandle<()>>>> = Arc::new(Mutex::new(None));
    let runtime_slot = runtime_thread.clone();

    let result = eframe::run_native(
        &config.render.title,
        native_options,
        Box::new(move |cc| {
            let surface = window.surface(cc.egui_ctx.clone());
            let closer = window.surface(cc.egui_ctx.clone());

            let handle = thread::Builder::new()
                .name("feed-runtime".to_string())
                .spawn(move || {
                    match tokio::runtime::Builder::new_current_thread().enable_all().build() {
                        Ok(runtime) => {
                            let shutdown = runtime.block_on(visualizer.run(surface));
                            let cancelled = shutdown
                                .feeds
                                .iter()
                                .filter(|(_, exit)| *exit == FeedExit::Cancelled)
                                .count();
                            info!(
                                cause = %shutdown.render.cause,
                                ticks = shutdown.render.ticks,
                                cancelled_feeds = cancelled,
                                "Visualizer stopped"
                            );
                        }
                        Err(e) => error!(error = %e, "Failed to start feed runtime"),
                    }
                    closer.close_window();
                })?;
            *runtime_slot.lock() = Some(handle);

            Ok(Box::new(window))
        }),
    );

    // The window is gone, so the render loop stops on its next tick
    let handle = runtime_thread.lock().take();
    if let Some(handle) = handle {
        if handle.join().is_err() {
            error!("Feed runtime thread panicked");
        }
    }

    result.map_err(|e| anyhow::anyhow!("Plot window failed: {}", e))?;
    Ok(())
}
