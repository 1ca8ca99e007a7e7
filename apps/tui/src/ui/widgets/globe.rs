use crate::domain::LatLon;
use crate::explorer::RegionEntry;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

const TILT: f64 = -0.35;
/// Points slightly past the limb stay visible so lines do not clip abruptly.
const LIMB: f64 = -0.1;

/// Orthographic projection onto the unit disc. `None` on the far side.
pub fn project(point: LatLon, rotation: f64, tilt: f64) -> Option<(f64, f64)> {
    let (lat, lon) = (point.lat.to_radians(), point.lon.to_radians());
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = (lon + rotation).sin_cos();
    let (sin_tilt, cos_tilt) = tilt.sin_cos();

    let x = cos_lat * sin_lon;
    let y = cos_lat * cos_lon;
    let z = sin_lat;

    let depth = y.mul_add(cos_tilt, -(z * sin_tilt));
    if depth < LIMB {
        return None;
    }
    let height = y.mul_add(sin_tilt, z * cos_tilt);
    Some((x, height))
}

fn graticule(rotation: f64) -> Vec<(f64, f64)> {
    let mut coords = Vec::new();
    for lat in (-60..=60).step_by(30) {
        for lon in (-180..180).step_by(3) {
            let point = LatLon::new(f64::from(lat), f64::from(lon));
            coords.extend(project(point, rotation, TILT));
        }
    }
    for lon in (-180..180).step_by(30) {
        for lat in (-90..=90).step_by(3) {
            let point = LatLon::new(f64::from(lat), f64::from(lon));
            coords.extend(project(point, rotation, TILT));
        }
    }
    coords
}

/// Spinning globe for the home page; `animation` is the app's phase in radians.
pub fn render_globe(f: &mut Frame<'_>, area: Rect, animation: f64, markers: &[RegionEntry]) {
    let rotation = -animation;
    let grid = graticule(rotation);
    let sites: Vec<(f64, f64)> = markers
        .iter()
        .filter_map(|entry| project(entry.center, rotation, TILT))
        .collect();

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .marker(Marker::Braille)
        .x_bounds([-1.2, 1.2])
        .y_bounds([-1.2, 1.2])
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &grid,
                color: Color::DarkGray,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &sites,
                color: Color::Yellow,
            });
        });

    f.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn front_center_projects_to_origin() {
        let (x, y) = project(LatLon::new(0.0, 0.0), 0.0, 0.0).unwrap();
        assert!(x.abs() < 1e-9);
        assert!(y.abs() < 1e-9);
    }

    #[test]
    fn far_side_is_hidden() {
        assert!(project(LatLon::new(0.0, 180.0), 0.0, 0.0).is_none());
        assert!(project(LatLon::new(0.0, 90.0), 0.0, 0.0).is_some());
    }

    #[test]
    fn rotation_brings_points_around() {
        let point = LatLon::new(0.0, 180.0);
        assert!(project(point, std::f64::consts::PI, 0.0).is_some());
    }

    #[test]
    fn projection_stays_on_disc() {
        for lat in (-90..=90).step_by(15) {
            for lon in (-180..180).step_by(15) {
                let point = LatLon::new(f64::from(lat), f64::from(lon));
                if let Some((x, y)) = project(point, 0.7, TILT) {
                    assert!(x.hypot(y) <= 1.0 + 1e-9);
                }
            }
        }
    }
}
