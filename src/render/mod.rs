//! Plot model, render loop and drawing backends

pub mod scene;
pub mod surface;
pub mod render_loop;
pub mod window;
pub mod error;

pub use scene::{MarkerStyle, PlotFrame, Series, ViewBounds};
pub use surface::{PlotSurface, RecordingSurface};
pub use render_loop::{RenderLoop, RenderStopped};
pub use window::{EguiSurface, PlotWindow};
pub use error::{RenderError, RenderResult};
