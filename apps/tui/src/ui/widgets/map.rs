use crate::api::models::NightlightsData;
use crate::domain::LatLon;
use crate::explorer::{RegionEntry, Viewport};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Map, MapResolution, Points};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

/// Colour ramp from faint to saturated light, lowest bucket first.
pub const INTENSITY_RAMP: [Color; 4] = [
    Color::Blue,
    Color::Cyan,
    Color::Yellow,
    Color::White,
];

/// Ramp bucket for `value` relative to the brightest point in the frame.
pub fn intensity_bucket(value: f64, max: f64) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    let ratio = (value / max).clamp(0.0, 1.0);
    let last = INTENSITY_RAMP.len() - 1;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let bucket = (ratio * INTENSITY_RAMP.len() as f64) as usize;
    bucket.min(last)
}

/// Data points inside the viewport, grouped by ramp bucket as canvas `(x, y)` pairs.
pub fn bucket_points(data: &NightlightsData, viewport: &Viewport) -> [Vec<(f64, f64)>; 4] {
    let max = data.max_value();
    let mut buckets: [Vec<(f64, f64)>; 4] = Default::default();
    for point in &data.data_points {
        if !viewport.contains(LatLon::new(point.lat, point.lon)) {
            continue;
        }
        buckets[intensity_bucket(point.value, max)].push((point.lon, point.lat));
    }
    buckets
}

pub struct MapLayer<'a> {
    pub viewport: Viewport,
    pub data: Option<&'a NightlightsData>,
    pub marker: Option<&'a RegionEntry>,
    pub title: String,
}

pub fn render_map(f: &mut Frame<'_>, area: Rect, layer: &MapLayer<'_>) {
    let (x_bounds, y_bounds) = layer.viewport.bounds();
    let buckets = layer
        .data
        .map(|data| bucket_points(data, &layer.viewport))
        .unwrap_or_default();

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(layer.title.as_str())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: Color::DarkGray,
            });
            ctx.layer();

            for (bucket, coords) in buckets.iter().enumerate() {
                if coords.is_empty() {
                    continue;
                }
                ctx.draw(&Points {
                    coords,
                    color: INTENSITY_RAMP[bucket],
                });
            }

            if let Some(entry) = layer.marker {
                ctx.print(
                    entry.center.lon,
                    entry.center.lat,
                    TextLine::from(Span::styled(
                        format!("+ {}", entry.key),
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    )),
                );
            }
        });

    f.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::DataPoint;

    #[test]
    fn buckets_follow_relative_brightness() {
        assert_eq!(intensity_bucket(0.0, 50.0), 0);
        assert_eq!(intensity_bucket(10.0, 50.0), 0);
        assert_eq!(intensity_bucket(30.0, 50.0), 2);
        assert_eq!(intensity_bucket(50.0, 50.0), 3);
        assert_eq!(intensity_bucket(5.0, 0.0), 0);
    }

    #[test]
    fn points_outside_the_viewport_are_dropped() {
        let data = NightlightsData {
            data_points: vec![
                DataPoint {
                    lat: 13.08,
                    lon: 80.27,
                    value: 60.0,
                },
                DataPoint {
                    lat: 40.71,
                    lon: -74.0,
                    value: 60.0,
                },
            ],
            ..NightlightsData::default()
        };
        let viewport = Viewport::new(LatLon::new(11.12, 78.65), 6.8);
        let buckets = bucket_points(&data, &viewport);
        let total: usize = buckets.iter().map(Vec::len).sum();
        assert_eq!(total, 1);
        assert_eq!(buckets[3], vec![(80.27, 13.08)]);
    }
}
