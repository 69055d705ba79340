//! GlobeRenderer - plotly の Scattergeo で軌跡を描く HTML
//!
//! # トレース構成
//! 1. 背景の星（ランダム、hover なし）
//! 2. 全軌跡（cyan の lines+markers、hover なし）
//! 3. n 件ごとの透明マーカー（timestamp を hover 表示）
//! 4. 最新位置（赤い star）

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use serde_json::{Value, json};

use crate::config::RenderConfig;
use crate::domain::{Observation, OrbitrailError, RenderError};
use crate::ports::TrackRenderer;

const TITLE: &str = "🛰️ International Space Station - Orbit Trail";

#[derive(Debug, Clone)]
pub struct GlobeRenderer {
    plotly_src: String,
    star_count: usize,
    hover_every: usize,
    star_seed: Option<u64>,
}

impl GlobeRenderer {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            plotly_src: config.plotly_src.clone(),
            star_count: config.star_count,
            hover_every: config.hover_every.max(1),
            star_seed: None,
        }
    }

    /// Pin the star field (tests, reproducible snapshots).
    pub fn with_star_seed(mut self, seed: u64) -> Self {
        self.star_seed = Some(seed);
        self
    }

    fn stars(&self) -> (Vec<f64>, Vec<f64>) {
        let mut rng = match self.star_seed {
            Some(seed) => Pcg64Mcg::seed_from_u64(seed),
            None => Pcg64Mcg::from_entropy(),
        };
        let lon: Vec<f64> = (0..self.star_count).map(|_| rng.gen_range(-180.0..180.0)).collect();
        let lat: Vec<f64> = (0..self.star_count).map(|_| rng.gen_range(-90.0..90.0)).collect();
        (lon, lat)
    }

    /// plotly の `data` と `layout`
    pub fn figure(&self, track: &[Observation]) -> Result<(Value, Value), RenderError> {
        let latest = track.last().ok_or(RenderError::EmptyTrack)?;
        let (star_lon, star_lat) = self.stars();

        let lons: Vec<f64> = track.iter().map(|o| o.lon).collect();
        let lats: Vec<f64> = track.iter().map(|o| o.lat).collect();
        let stepped: Vec<&Observation> = track.iter().step_by(self.hover_every).collect();

        let data = json!([
            {
                "type": "scattergeo",
                "lon": star_lon,
                "lat": star_lat,
                "mode": "markers",
                "marker": {"size": 2, "color": "white", "opacity": 0.6},
                "hoverinfo": "skip",
                "showlegend": false
            },
            {
                "type": "scattergeo",
                "lon": lons,
                "lat": lats,
                "mode": "lines+markers",
                "line": {"color": "cyan", "width": 1},
                "marker": {"size": 5, "color": "cyan", "opacity": 0.5},
                "hoverinfo": "skip",
                "showlegend": false
            },
            {
                "type": "scattergeo",
                "lon": stepped.iter().map(|o| o.lon).collect::<Vec<_>>(),
                "lat": stepped.iter().map(|o| o.lat).collect::<Vec<_>>(),
                "mode": "markers",
                "marker": {"size": 8, "color": "rgba(0,0,0,0)"},
                "text": stepped.iter().map(|o| o.ts.as_str()).collect::<Vec<_>>(),
                "hoverinfo": "text",
                "name": "Timestamps (hover only)"
            },
            {
                "type": "scattergeo",
                "lon": [latest.lon],
                "lat": [latest.lat],
                "mode": "markers",
                "marker": {"size": 14, "color": "red", "symbol": "star"},
                "text": [format!("ISS 🛰️<br>{}", latest.ts)],
                "hoverinfo": "text",
                "name": "Current ISS"
            }
        ]);

        let layout = json!({
            "geo": {
                "projection": {"type": "orthographic"},
                "showland": true, "landcolor": "rgb(20,20,20)",
                "showocean": true, "oceancolor": "rgb(0,0,40)",
                "showcountries": true, "countrycolor": "rgb(60,60,60)",
                "showlakes": false,
                "bgcolor": "black"
            },
            "paper_bgcolor": "black",
            "plot_bgcolor": "black",
            "margin": {"l": 0, "r": 0, "t": 30, "b": 0},
            "title": {"text": TITLE, "x": 0.5, "font": {"color": "white"}}
        });

        Ok((data, layout))
    }
}

impl TrackRenderer for GlobeRenderer {
    fn render(&self, track: &[Observation]) -> Result<String, OrbitrailError> {
        let (data, layout) = self.figure(track)?;
        let data = script_json(&data)?;
        let layout = script_json(&layout)?;
        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>ISS Orbit Trail</title>
<script src="{src}"></script>
<style>html, body {{ margin: 0; height: 100%; background: black; }} #map {{ width: 100%; height: 100%; }}</style>
</head>
<body>
<div id="map"></div>
<script>
Plotly.newPlot("map", {data}, {layout}, {{"responsive": true}});
</script>
</body>
</html>
"#,
            src = self.plotly_src,
        ))
    }
}

/// JSON safe to inline inside `<script>`.
fn script_json(value: &Value) -> Result<String, RenderError> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}
