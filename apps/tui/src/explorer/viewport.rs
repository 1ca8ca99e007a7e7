use crate::domain::LatLon;
use crate::explorer::gazetteer::RegionEntry;
use std::time::Duration;

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 12.0;

const TRANSITION: Duration = Duration::from_millis(1500);

/// Map centre plus zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLon,
    pub zoom: f64,
}

impl Viewport {
    pub const WORLD: Self = Self {
        center: LatLon::new(20.0, 0.0),
        zoom: 2.0,
    };

    pub const fn new(center: LatLon, zoom: f64) -> Self {
        Self { center, zoom }
    }

    /// Visible `(lon, lat)` ranges, as canvas x/y bounds.
    ///
    /// Zoom 2 shows the whole world; every zoom step halves both spans.
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let lon_span = (360.0 / 2f64.powf(self.zoom - 2.0)).min(360.0);
        let lat_span = (lon_span / 2.0).min(180.0);

        let lon_min = (self.center.lon - lon_span / 2.0).clamp(-180.0, 180.0 - lon_span);
        let lat_min = (self.center.lat - lat_span / 2.0).clamp(-90.0, 90.0 - lat_span);

        (
            [lon_min, lon_min + lon_span],
            [lat_min, lat_min + lat_span],
        )
    }

    pub fn contains(&self, point: LatLon) -> bool {
        let ([lon_min, lon_max], [lat_min, lat_max]) = self.bounds();
        (lon_min..=lon_max).contains(&point.lon) && (lat_min..=lat_max).contains(&point.lat)
    }

    fn lerp(from: Self, to: Self, t: f64) -> Self {
        let t = ease_out_cubic(t.clamp(0.0, 1.0));
        Self {
            center: LatLon::new(
                from.center.lat + (to.center.lat - from.center.lat) * t,
                from.center.lon + (to.center.lon - from.center.lon) * t,
            ),
            zoom: from.zoom + (to.zoom - from.zoom) * t,
        }
    }
}

impl From<&RegionEntry> for Viewport {
    fn from(entry: &RegionEntry) -> Self {
        Self::new(entry.center, entry.zoom)
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    from: Viewport,
    elapsed: Duration,
}

/// Sole owner of the map viewport.
///
/// `viewport()` is the target the map is heading to; `displayed()` is where the
/// animation currently is. A new target replaces any running transition, starting
/// from whatever is on screen at that moment.
#[derive(Debug, Clone)]
pub struct MapController {
    target: Viewport,
    transition: Option<Transition>,
}

impl Default for MapController {
    fn default() -> Self {
        Self {
            target: Viewport::WORLD,
            transition: None,
        }
    }
}

impl MapController {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn viewport(&self) -> Viewport {
        self.target
    }

    pub fn set_viewport(&mut self, center: LatLon, zoom: f64) {
        let from = self.displayed();
        self.target = Viewport::new(center, zoom.clamp(MIN_ZOOM, MAX_ZOOM));
        self.transition = Some(Transition {
            from,
            elapsed: Duration::ZERO,
        });
    }

    /// Frame the map on a resolved region.
    pub fn focus(&mut self, entry: &RegionEntry) {
        self.set_viewport(entry.center, entry.zoom);
    }

    /// Move to a centre the backend suggested, keeping the current zoom.
    pub fn recenter(&mut self, center: LatLon) {
        self.set_viewport(center, self.target.zoom);
    }

    pub fn reset(&mut self) {
        self.set_viewport(Viewport::WORLD.center, Viewport::WORLD.zoom);
    }

    pub fn zoom_in(&mut self) {
        self.set_viewport(self.target.center, self.target.zoom + 1.0);
    }

    pub fn zoom_out(&mut self) {
        self.set_viewport(self.target.center, self.target.zoom - 1.0);
    }

    pub const fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Advance the running transition.
    pub fn tick(&mut self, delta: Duration) {
        if let Some(transition) = &mut self.transition {
            transition.elapsed += delta;
            if transition.elapsed >= TRANSITION {
                self.transition = None;
            }
        }
    }

    pub fn displayed(&self) -> Viewport {
        self.transition.map_or(self.target, |transition| {
            let progress = transition.elapsed.as_secs_f64() / TRANSITION.as_secs_f64();
            Viewport::lerp(transition.from, self.target, progress)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_world_view() {
        let controller = MapController::new();
        assert_eq!(controller.viewport(), Viewport::WORLD);
        assert_eq!(controller.displayed(), Viewport::WORLD);
    }

    #[test]
    fn last_call_wins() {
        let mut controller = MapController::new();
        controller.set_viewport(LatLon::new(11.0, 78.0), 6.0);
        controller.tick(Duration::from_millis(300));
        controller.set_viewport(LatLon::new(40.0, -74.0), 8.0);

        assert_eq!(
            controller.viewport(),
            Viewport::new(LatLon::new(40.0, -74.0), 8.0)
        );

        controller.tick(TRANSITION);
        assert!(!controller.is_animating());
        assert_eq!(controller.displayed(), controller.viewport());
    }

    #[test]
    fn new_target_starts_from_displayed_position() {
        let mut controller = MapController::new();
        controller.set_viewport(LatLon::new(60.0, 100.0), 6.0);
        controller.tick(TRANSITION / 2);
        let midway = controller.displayed();

        controller.set_viewport(LatLon::new(0.0, 0.0), 3.0);
        assert_eq!(controller.displayed(), midway);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut controller = MapController::new();
        controller.set_viewport(LatLon::new(0.0, 0.0), 40.0);
        assert!((controller.viewport().zoom - MAX_ZOOM).abs() < f64::EPSILON);

        for _ in 0..20 {
            controller.zoom_out();
        }
        assert!((controller.viewport().zoom - MIN_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn recenter_keeps_zoom() {
        let mut controller = MapController::new();
        controller.set_viewport(LatLon::new(10.0, 10.0), 7.0);
        controller.recenter(LatLon::new(20.0, 30.0));
        assert_eq!(
            controller.viewport(),
            Viewport::new(LatLon::new(20.0, 30.0), 7.0)
        );
    }

    #[test]
    fn reset_returns_to_world() {
        let mut controller = MapController::new();
        controller.set_viewport(LatLon::new(10.0, 10.0), 7.0);
        controller.reset();
        assert_eq!(controller.viewport(), Viewport::WORLD);
    }

    #[test]
    fn world_bounds_cover_the_globe() {
        let (lon, lat) = Viewport::WORLD.bounds();
        assert_eq!(lon, [-180.0, 180.0]);
        assert_eq!(lat, [-90.0, 90.0]);
    }

    #[test]
    fn zoomed_bounds_stay_around_center() {
        let viewport = Viewport::new(LatLon::new(11.0, 78.0), 6.0);
        let ([lon_min, lon_max], [lat_min, lat_max]) = viewport.bounds();
        assert!((lon_max - lon_min - 22.5).abs() < 1e-9);
        assert!((lat_max - lat_min - 11.25).abs() < 1e-9);
        assert!(viewport.contains(LatLon::new(11.0, 78.0)));
        assert!(!viewport.contains(LatLon::new(40.0, -74.0)));
    }
}
