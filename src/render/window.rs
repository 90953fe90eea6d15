//! Native plot window backed by egui
//!
//! The window runs on the UI thread owned by eframe. The render loop lives
//! on the feed runtime and reaches the window through an [`EguiSurface`],
//! which hands over the latest frame and asks egui for a repaint.
//!
//! A close request from the user is held back until the render loop has
//! stopped: the window only closes once [`EguiSurface::close_window`] is
//! called after shutdown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use egui::Color32;
use egui_plot::{Legend, MarkerShape, Plot, PlotBounds, Points};
use parking_lot::Mutex;
use tracing::info;

use crate::render::{MarkerStyle, PlotFrame, PlotSurface, RenderError, RenderResult, Series};
use crate::utils::config::RenderConfig;

/// eframe application drawing the most recently presented frame
pub struct PlotWindow {
    latest: Arc<Mutex<PlotFrame>>,
    /// Set when the user asked to close; the render loop stops on it
    closed: Arc<AtomicBool>,
    /// Set once shutdown is done and the window may really close
    stopping: Arc<AtomicBool>,
}

impl PlotWindow {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            latest: Arc::new(Mutex::new(PlotFrame::new(config))),
            closed: Arc::new(AtomicBool::new(false)),
            stopping: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Surface feeding this window; `ctx` is the window's egui context
    pub fn surface(&self, ctx: egui::Context) -> EguiSurface {
        EguiSurface {
            latest: self.latest.clone(),
            closed: self.closed.clone(),
            stopping: self.stopping.clone(),
            ctx,
        }
    }

    /// Turn a close request into a render loop stop, keeping the window
    /// open until shutdown has finished.
    fn intercept_close(&self, ctx: &egui::Context) {
        if !ctx.input(|i| i.viewport().close_requested()) {
            return;
        }
        if self.stopping.load(Ordering::SeqCst) {
            return;
        }

        if !self.closed.swap(true, Ordering::SeqCst) {
            info!("Plot window close requested, stopping render loop");
        }
        ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
    }
}

impl Drop for PlotWindow {
    fn drop(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

impl eframe::App for PlotWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.intercept_close(ctx);

        let frame = self.latest.lock().clone();

        egui::CentralPanel::default().show(ctx, |ui| {
            draw_frame(ui, &frame);
        });
    }
}

fn draw_frame(ui: &mut egui::Ui, frame: &PlotFrame) {
    ui.vertical_centered(|ui| {
        ui.heading(frame.title.as_str());
    });

    // View bounds follow the data, so interactive panning is disabled
    let plot = Plot::new("trilateration_plot")
        .legend(Legend::default())
        .show_grid(true)
        .x_axis_label(frame.x_label.clone())
        .y_axis_label(frame.y_label.clone())
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false);

    plot.show(ui, |plot_ui| {
        if let Some(bounds) = frame.bounds {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [bounds.min.x, bounds.min.y],
                [bounds.max.x, bounds.max.y],
            ));
        }

        plot_ui.points(series_points(&frame.sensors));
        plot_ui.points(series_points(&frame.trilaterations));
    });
}

fn series_points(series: &Series) -> Points {
    let (shape, radius, color) = match series.marker {
        MarkerStyle::Circle => (MarkerShape::Circle, 6.0_f32, Color32::from_rgb(31, 119, 180)),
        MarkerStyle::Cross => (MarkerShape::Cross, 5.0_f32, Color32::from_rgb(214, 39, 40)),
    };
    let points: Vec<[f64; 2]> = series.points().collect();

    Points::new(points)
        .name(&series.label)
        .shape(shape)
        .radius(radius)
        .filled(true)
        .color(color)
}

/// [`PlotSurface`] handing frames to a [`PlotWindow`]
pub struct EguiSurface {
    latest: Arc<Mutex<PlotFrame>>,
    closed: Arc<AtomicBool>,
    stopping: Arc<AtomicBool>,
    ctx: egui::Context,
}

impl EguiSurface {
    /// Ask the window to close, e.g. once the render loop has stopped
    pub fn close_window(&self) {
        self.stopping.store(true, Ordering::SeqCst);
        self.ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl PlotSurface for EguiSurface {
    fn present(&mut self, frame: &PlotFrame) -> RenderResult<()> {
        if self.is_closed() {
            return Err(RenderError::SurfaceClosed);
        }

        *self.latest.lock() = frame.clone();
        self.ctx.request_repaint();
        Ok(())
    }
}
