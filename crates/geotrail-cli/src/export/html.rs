//! Self-contained Leaflet page for a [`TimelineSnapshot`].
//!
//! All map content is embedded as one JSON object; the page script only
//! turns it into layers. Popup text is HTML-escaped on the Rust side.

use geotrail_core::{GeoRecord, PathGeometry, PathKind, RecordKind};
use geotrail_timeline::TimelineSnapshot;
use serde::Serialize;

use super::ExportError;

const TIMELINE_COLOR: &str = "green";
const ACTIVITY_COLOR: &str = "blue";
const VISIT_COLOR: &str = "red";

#[derive(Debug, Serialize)]
struct TileLayer {
    name: &'static str,
    url: &'static str,
    attribution: &'static str,
}

const TILE_LAYERS: &[TileLayer] = &[
    TileLayer {
        name: "OpenStreetMap",
        url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
        attribution: "&copy; OpenStreetMap contributors",
    },
    TileLayer {
        name: "Dark Mode",
        url: "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png",
        attribution: "&copy; OpenStreetMap contributors &copy; CARTO",
    },
    TileLayer {
        name: "Positron",
        url: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png",
        attribution: "&copy; OpenStreetMap contributors &copy; CARTO",
    },
    TileLayer {
        name: "Satellite",
        url: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
        attribution: "Esri",
    },
];

#[derive(Debug, Serialize)]
struct MarkerView {
    lat: f64,
    lon: f64,
    radius: u8,
    color: &'static str,
    popup: String,
}

#[derive(Debug, Serialize)]
struct PolylineView {
    points: Vec<[f64; 2]>,
    color: &'static str,
    popup: Option<String>,
}

#[derive(Debug, Serialize)]
struct MapData<'a> {
    tiles: &'a [TileLayer],
    markers: Vec<MarkerView>,
    paths: Vec<PolylineView>,
    /// `[lat, lon]` of the initial view; the world origin when nothing was plotted.
    center: [f64; 2],
    /// `[[south, west], [north, east]]`, absent when nothing was plotted.
    bounds: Option<[[f64; 2]; 2]>,
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn marker_view(record: &GeoRecord) -> MarkerView {
    let start = escape_html(&record.start_time);
    let end = escape_html(&record.end_time);
    let (radius, color, popup) = match record.kind {
        RecordKind::TimelinePoint => (3, TIMELINE_COLOR, format!("Timeline point: {start}")),
        RecordKind::ActivityStart | RecordKind::ActivityEnd => (
            4,
            ACTIVITY_COLOR,
            format!("{}: {start} \u{2192} {end}", record.kind),
        ),
        RecordKind::Visit => (5, VISIT_COLOR, format!("Visit: {start} \u{2192} {end}")),
    };
    MarkerView {
        lat: record.latitude,
        lon: record.longitude,
        radius,
        color,
        popup,
    }
}

fn polyline_view(path: &PathGeometry) -> PolylineView {
    let color = match path.kind {
        PathKind::TimelinePath => TIMELINE_COLOR,
        PathKind::ActivitySegment => ACTIVITY_COLOR,
    };
    let popup = path.activity.as_ref().map(|info| {
        format!(
            "<b>Activity</b><br>Type: {} {}<br>Distance: {} meters<br>From: {}<br>To: {}",
            escape_html(&info.icon),
            escape_html(&info.activity_type),
            escape_html(&info.distance_meters),
            escape_html(&path.start_time),
            escape_html(&path.end_time),
        )
    });
    PolylineView {
        points: path.points.coords().map(|c| [c.y, c.x]).collect(),
        color,
        popup,
    }
}

fn map_data(snapshot: &TimelineSnapshot) -> MapData<'static> {
    MapData {
        tiles: TILE_LAYERS,
        markers: snapshot.records.iter().map(marker_view).collect(),
        paths: snapshot.paths.iter().map(polyline_view).collect(),
        center: snapshot
            .bounds
            .map_or([0.0, 0.0], |b| [b.center().y, b.center().x]),
        bounds: snapshot
            .bounds
            .map(|b| [[b.min().y, b.min().x], [b.max().y, b.max().x]]),
    }
}

const LEGEND: &str = r#"<div class="legend">
<b>Legend</b><br>
<span style="color:green;">&#9679;</span> Timeline Path<br>
<span style="color:blue;">&#9679;</span> Activity Segment<br>
<span style="color:red;">&#9679;</span> Visit Location
</div>"#;

const MAP_SCRIPT: &str = r"const map = L.map('map', { center: data.center, zoom: 2 });
const baseLayers = {};
data.tiles.forEach((t, i) => {
  const layer = L.tileLayer(t.url, { attribution: t.attribution, maxZoom: 19 });
  baseLayers[t.name] = layer;
  if (i === 0) layer.addTo(map);
});
L.control.layers(baseLayers).addTo(map);
L.control.scale().addTo(map);
data.paths.forEach((p) => {
  const line = L.polyline(p.points, { color: p.color, weight: 2, opacity: 0.6 }).addTo(map);
  if (p.popup) line.bindPopup(p.popup);
});
data.markers.forEach((m) => {
  L.circleMarker([m.lat, m.lon], {
    radius: m.radius, color: m.color, fill: true, fillColor: m.color
  }).bindPopup(m.popup).addTo(map);
});
if (data.bounds) map.fitBounds(data.bounds);";

/// Renders the snapshot as a standalone HTML page titled `title`.
///
/// # Errors
///
/// Returns [`ExportError::Json`] if the map data cannot be encoded.
pub(crate) fn render_map_html(
    snapshot: &TimelineSnapshot,
    title: &str,
) -> Result<String, ExportError> {
    // `</` would end the script element early.
    let data = serde_json::to_string(&map_data(snapshot))?.replace("</", "<\\/");

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>
html, body, #map {{ height: 100%; margin: 0; }}
.legend {{ position: fixed; bottom: 50px; left: 50px; width: 200px; z-index: 9999;
  background-color: white; font-size: 14px; border: 2px solid grey; padding: 10px; }}
</style>
</head>
<body>
<div id="map"></div>
{LEGEND}
<script>
const data = {data};
{MAP_SCRIPT}
</script>
</body>
</html>
"#,
        title = escape_html(title),
    ))
}

#[cfg(test)]
mod tests {
    use geo::BoundingRect;
    use geo_types::{LineString, MultiPoint, Point};
    use geotrail_core::ActivityInfo;

    use super::*;

    fn record(kind: RecordKind, start: &str) -> GeoRecord {
        GeoRecord {
            latitude: 10.0,
            longitude: 20.0,
            kind,
            start_time: start.to_string(),
            end_time: "2019-03-01T11:00:00Z".to_string(),
            source_index: 0,
        }
    }

    fn activity_path() -> PathGeometry {
        PathGeometry {
            kind: PathKind::ActivitySegment,
            points: LineString::from(vec![(20.0, 10.0), (20.5, 10.5)]),
            source_index: 0,
            start_time: "2019-03-01T10:00:00Z".to_string(),
            end_time: "2019-03-01T11:00:00Z".to_string(),
            activity: Some(ActivityInfo {
                activity_type: "in bus".to_string(),
                distance_meters: "1200".to_string(),
                icon: "\u{1f68c}".to_string(),
            }),
        }
    }

    #[test]
    fn escape_html_escapes_markup() {
        assert_eq!(
            escape_html(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn marker_styles_follow_kind() {
        let t = marker_view(&record(RecordKind::TimelinePoint, "s"));
        assert_eq!((t.radius, t.color), (3, "green"));
        assert_eq!(t.popup, "Timeline point: s");

        let a = marker_view(&record(RecordKind::ActivityEnd, "s"));
        assert_eq!((a.radius, a.color), (4, "blue"));
        assert_eq!(a.popup, "activity-end: s \u{2192} 2019-03-01T11:00:00Z");

        let v = marker_view(&record(RecordKind::Visit, "s"));
        assert_eq!((v.radius, v.color), (5, "red"));
        assert!(v.popup.starts_with("Visit: s"));
    }

    #[test]
    fn activity_polyline_has_popup() {
        let view = polyline_view(&activity_path());
        assert_eq!(view.color, "blue");
        assert_eq!(view.points, vec![[10.0, 20.0], [10.5, 20.5]]);
        let popup = view.popup.unwrap();
        assert!(popup.contains("Type: \u{1f68c} in bus"));
        assert!(popup.contains("Distance: 1200 meters"));
    }

    #[test]
    fn timeline_polyline_has_no_popup() {
        let mut path = activity_path();
        path.kind = PathKind::TimelinePath;
        path.activity = None;
        let view = polyline_view(&path);
        assert_eq!(view.color, "green");
        assert!(view.popup.is_none());
    }

    #[test]
    fn empty_snapshot_renders_world_view() {
        let html = render_map_html(&TimelineSnapshot::default(), "filtered_map").unwrap();
        assert!(html.contains("<title>filtered_map</title>"));
        assert!(html.contains("\"bounds\":null"));
        assert!(html.contains("\"center\":[0.0,0.0]"));
        assert!(html.contains("Legend"));
        for layer in ["OpenStreetMap", "Dark Mode", "Positron", "Satellite"] {
            assert!(html.contains(layer), "missing tile layer {layer}");
        }
    }

    #[test]
    fn bounds_are_embedded() {
        let points = vec![Point::new(20.0, 10.0), Point::new(20.5, 10.5)];
        let snapshot = TimelineSnapshot {
            records: vec![record(RecordKind::Visit, "s")],
            paths: vec![activity_path()],
            path_count: 1,
            bounds: MultiPoint::new(points.clone()).bounding_rect(),
            points,
            ..TimelineSnapshot::default()
        };
        let html = render_map_html(&snapshot, "trip").unwrap();
        assert!(html.contains("\"bounds\":[[10.0,20.0],[10.5,20.5]]"));
        assert!(html.contains("\"center\":[10.25,20.25]"));
    }

    #[test]
    fn script_breakout_is_neutralised() {
        let snapshot = TimelineSnapshot {
            records: vec![record(RecordKind::TimelinePoint, "</script><script>alert(1)")],
            ..TimelineSnapshot::default()
        };
        let html = render_map_html(&snapshot, "trip").unwrap();
        assert!(!html.contains("</script><script>alert"));
        assert!(html.contains("&lt;/script&gt;"));
    }
}
