//! Fixed endpoints and plot parameters

/// Websocket stream of sensor positions
pub const SENSORS_WS_URL: &str = "ws://localhost:8080/api/sensors/ws";

/// Websocket stream of computed trilateration positions
pub const TRILATERATIONS_WS_URL: &str = "ws://localhost:8080/api/trilaterations/ws";

/// Target redraw period (milliseconds)
pub const RENDER_PERIOD_MS: u64 = 50;

/// Pause between reconnection attempts (milliseconds). Constant, never grows.
pub const RECONNECT_DELAY_MS: u64 = 500;

pub const PLOT_TITLE: &str = "WiFi Trilateration";
pub const X_AXIS_LABEL: &str = "X (in m)";
pub const Y_AXIS_LABEL: &str = "Y (in m)";
pub const SENSORS_LABEL: &str = "Sensors";
pub const TRILATERATIONS_LABEL: &str = "Trilaterations";

/// Fraction of the data span added on each side of the view
pub const BOUNDS_MARGIN: f64 = 0.05;

/// Half-width used when every point shares the same coordinate on an axis (meters)
pub const DEGENERATE_AXIS_PADDING_M: f64 = 0.5;
