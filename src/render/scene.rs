//! Backend-independent description of what the plot shows

use crate::core::{Position2D, PositionMap, DEGENERATE_AXIS_PADDING_M};
use crate::render::{RenderError, RenderResult};
use crate::utils::config::RenderConfig;

/// Marker drawn for every point of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    Circle,
    Cross,
}

/// One scatter series, stored as parallel x and y sequences
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub marker: MarkerStyle,
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Series {
    pub fn new(label: impl Into<String>, marker: MarkerStyle) -> Self {
        Self {
            label: label.into(),
            marker,
            xs: Vec::new(),
            ys: Vec::new(),
        }
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.xs.iter().zip(&self.ys).map(|(&x, &y)| [x, y])
    }

    /// Split `map` into x and y sequences for this series.
    ///
    /// Fails on the first coordinate that is not finite.
    fn project(&self, map: &PositionMap) -> RenderResult<(Vec<f64>, Vec<f64>)> {
        let mut xs = Vec::with_capacity(map.len());
        let mut ys = Vec::with_capacity(map.len());

        for (id, position) in map {
            if !position.x.is_finite() || !position.y.is_finite() {
                return Err(RenderError::NonFiniteCoordinate {
                    series: self.label.clone(),
                    id: id.to_string(),
                });
            }
            xs.push(position.x);
            ys.push(position.y);
        }

        Ok((xs, ys))
    }
}

/// Axis-aligned view rectangle in plot coordinates (meters)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBounds {
    pub min: Position2D,
    pub max: Position2D,
}

impl ViewBounds {
    /// Smallest view holding every point, widened by `margin` times the data
    /// span on each side. An axis with no spread is padded by a fixed amount
    /// instead. Returns None when there are no points.
    pub fn fit(points: impl IntoIterator<Item = [f64; 2]>, margin: f64) -> Option<Self> {
        let mut points = points.into_iter();
        let [x0, y0] = points.next()?;
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (x0, x0, y0, y0);

        for [x, y] in points {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }

        let (min_x, max_x) = pad_axis(min_x, max_x, margin);
        let (min_y, max_y) = pad_axis(min_y, max_y, margin);

        Some(Self {
            min: Position2D::new(min_x, min_y),
            max: Position2D::new(max_x, max_y),
        })
    }

    pub fn contains(&self, point: [f64; 2]) -> bool {
        let [x, y] = point;
        x >= self.min.x && x <= self.max.x && y >= self.min.y && y <= self.max.y
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

fn pad_axis(lo: f64, hi: f64, margin: f64) -> (f64, f64) {
    let span = hi - lo;
    if span > 0.0 {
        (lo - span * margin, hi + span * margin)
    } else {
        (lo - DEGENERATE_AXIS_PADDING_M, hi + DEGENERATE_AXIS_PADDING_M)
    }
}

/// Complete content of the plot after a render tick
#[derive(Debug, Clone, PartialEq)]
pub struct PlotFrame {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub sensors: Series,
    pub trilaterations: Series,
    /// None until the first point is known
    pub bounds: Option<ViewBounds>,
    /// Number of completed updates
    pub revision: u64,
    margin: f64,
}

impl PlotFrame {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            title: config.title.clone(),
            x_label: config.x_label.clone(),
            y_label: config.y_label.clone(),
            sensors: Series::new(config.sensors_label.clone(), MarkerStyle::Circle),
            trilaterations: Series::new(config.trilaterations_label.clone(), MarkerStyle::Cross),
            bounds: None,
            revision: 0,
            margin: config.bounds_margin,
        }
    }

    /// Apply one pair of snapshots.
    ///
    /// An empty snapshot leaves its series as it was, so the last known
    /// points stay on screen. Bounds are refitted to everything displayed.
    /// On error the frame is left exactly as it was.
    pub fn update(&mut self, sensors: &PositionMap, trilaterations: &PositionMap) -> RenderResult<()> {
        let sensor_data = if sensors.is_empty() {
            None
        } else {
            Some(self.sensors.project(sensors)?)
        };
        let trilateration_data = if trilaterations.is_empty() {
            None
        } else {
            Some(self.trilaterations.project(trilaterations)?)
        };

        if let Some((xs, ys)) = sensor_data {
            self.sensors.xs = xs;
            self.sensors.ys = ys;
        }
        if let Some((xs, ys)) = trilateration_data {
            self.trilaterations.xs = xs;
            self.trilaterations.ys = ys;
        }

        self.bounds = ViewBounds::fit(
            self.sensors.points().chain(self.trilaterations.points()),
            self.margin,
        );
        self.revision += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PositionId;

    fn sensors_a() -> PositionMap {
        [
            (PositionId::Number(1), Position2D::new(0.0, 0.0)),
            (PositionId::Number(2), Position2D::new(3.0, 4.0)),
        ]
        .into_iter()
        .collect()
    }

    fn sorted_points(series: &Series) -> Vec<[f64; 2]> {
        let mut points: Vec<_> = series.points().collect();
        points.sort_by(|a, b| a.partial_cmp(b).unwrap());
        points
    }

    #[test]
    fn test_series_matches_map_values() {
        let mut frame = PlotFrame::new(&RenderConfig::default());
        frame.update(&sensors_a(), &PositionMap::new()).unwrap();

        assert_eq!(sorted_points(&frame.sensors), vec![[0.0, 0.0], [3.0, 4.0]]);
        assert_eq!(frame.sensors.xs().len(), frame.sensors.ys().len());
        assert!(frame.trilaterations.is_empty());
        assert_eq!(frame.revision, 1);
    }

    #[test]
    fn test_empty_snapshot_freezes_series() {
        let mut frame = PlotFrame::new(&RenderConfig::default());
        frame.update(&sensors_a(), &PositionMap::new()).unwrap();
        let before = frame.sensors.clone();

        frame.update(&PositionMap::new(), &PositionMap::new()).unwrap();

        assert_eq!(frame.sensors, before);
        assert_eq!(frame.revision, 2);
    }

    #[test]
    fn test_non_empty_snapshot_replaces_series() {
        let mut frame = PlotFrame::new(&RenderConfig::default());
        frame.update(&sensors_a(), &PositionMap::new()).unwrap();

        let next: PositionMap = [(PositionId::Number(9), Position2D::new(-2.0, 1.0))]
            .into_iter()
            .collect();
        frame.update(&next, &PositionMap::new()).unwrap();

        assert_eq!(sorted_points(&frame.sensors), vec![[-2.0, 1.0]]);
    }

    #[test]
    fn test_bounds_cover_both_series() {
        let mut frame = PlotFrame::new(&RenderConfig::default());
        let trilaterations: PositionMap = [(PositionId::from("ap1"), Position2D::new(10.0, -6.0))]
            .into_iter()
            .collect();

        frame.update(&sensors_a(), &trilaterations).unwrap();
        let bounds = frame.bounds.unwrap();

        for point in frame.sensors.points().chain(frame.trilaterations.points()) {
            assert!(bounds.contains(point));
        }
        // 5% of the 10 m x-span on each side
        assert!((bounds.min.x - -0.5).abs() < 1e-9);
        assert!((bounds.max.x - 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_no_points_no_bounds() {
        let mut frame = PlotFrame::new(&RenderConfig::default());
        frame.update(&PositionMap::new(), &PositionMap::new()).unwrap();
        assert!(frame.bounds.is_none());
    }

    #[test]
    fn test_single_point_gets_padded_bounds() {
        let bounds = ViewBounds::fit([[2.0, 3.0]], 0.05).unwrap();

        assert!((bounds.width() - 2.0 * DEGENERATE_AXIS_PADDING_M).abs() < 1e-9);
        assert!((bounds.height() - 2.0 * DEGENERATE_AXIS_PADDING_M).abs() < 1e-9);
        assert!(bounds.contains([2.0, 3.0]));
    }

    #[test]
    fn test_non_finite_coordinate_is_rejected() {
        let mut frame = PlotFrame::new(&RenderConfig::default());
        frame.update(&sensors_a(), &PositionMap::new()).unwrap();
        let before = frame.sensors.clone();

        let bad: PositionMap = [(PositionId::Number(4), Position2D::new(f64::NAN, 1.0))]
            .into_iter()
            .collect();
        let result = frame.update(&bad, &PositionMap::new());

        assert!(matches!(result, Err(RenderError::NonFiniteCoordinate { .. })));
        assert_eq!(frame.sensors, before);
    }

    #[test]
    fn test_bad_trilateration_leaves_whole_frame_unchanged() {
        let mut frame = PlotFrame::new(&RenderConfig::default());
        frame.update(&sensors_a(), &PositionMap::new()).unwrap();
        let before = frame.clone();

        let next: PositionMap = [(PositionId::Number(9), Position2D::new(-2.0, 1.0))]
            .into_iter()
            .collect();
        let bad: PositionMap = [(PositionId::from("ap1"), Position2D::new(1.0, f64::INFINITY))]
            .into_iter()
            .collect();
        let result = frame.update(&next, &bad);

        assert!(matches!(result, Err(RenderError::NonFiniteCoordinate { .. })));
        assert_eq!(frame, before);
    }

    #[test]
    fn test_series_styles() {
        let frame = PlotFrame::new(&RenderConfig::default());
        assert_eq!(frame.sensors.marker, MarkerStyle::Circle);
        assert_eq!(frame.trilaterations.marker, MarkerStyle::Cross);
        assert_eq!(frame.title, "WiFi Trilateration");
        assert_eq!(frame.x_label, "X (in m)");
        assert_eq!(frame.y_label, "Y (in m)");
    }
}
