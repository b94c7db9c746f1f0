//! Threshold bar chart on a `<canvas>`.
//!
//! [`layout`] computes every rectangle and label position; [`draw`] only
//! replays that layout through the 2d context.

use contracts::shared::numeric::format_decimal;
use contracts::shared::series::SeriesPoint;
use leptos::html;
use leptos::prelude::*;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub const MIN_WIDTH: f64 = 600.0;
pub const HEIGHT: f64 = 300.0;
pub const BAR_WIDTH: f64 = 40.0;
pub const BAR_SPACING: f64 = 60.0;
pub const CHART_HEIGHT: f64 = 250.0;
pub const CHART_TOP: f64 = 30.0;
const FIRST_BAR_X: f64 = 30.0;
const LINE_INSET: f64 = 20.0;

pub const COLOR_ABOVE: &str = "#28a745";
pub const COLOR_BELOW: &str = "#dc3545";
pub const COLOR_THRESHOLD: &str = "#ff6b35";
const COLOR_TEXT: &str = "#333";

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub height: f64,
    pub color: &'static str,
    pub value_text: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub scale_max: f64,
    pub threshold: f64,
    pub threshold_y: f64,
    pub bars: Vec<Bar>,
}

fn to_y(value: f64, scale_max: f64) -> f64 {
    let ratio = if scale_max > 0.0 {
        (value / scale_max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    CHART_TOP + CHART_HEIGHT - ratio * CHART_HEIGHT
}

pub fn layout(points: &[SeriesPoint], threshold: f64) -> ChartLayout {
    let width = MIN_WIDTH.max(points.len() as f64 * BAR_SPACING + 2.0 * FIRST_BAR_X);
    let scale_max = points
        .iter()
        .map(|p| p.value)
        .fold(threshold, f64::max)
        * 1.1;
    let bars = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let y = to_y(p.value, scale_max);
            Bar {
                x: i as f64 * BAR_SPACING + FIRST_BAR_X,
                y,
                height: CHART_TOP + CHART_HEIGHT - y,
                color: if p.value >= threshold {
                    COLOR_ABOVE
                } else {
                    COLOR_BELOW
                },
                value_text: format_decimal(p.value),
                label: p.label.clone(),
            }
        })
        .collect();
    ChartLayout {
        width,
        height: HEIGHT,
        scale_max,
        threshold,
        threshold_y: to_y(threshold, scale_max),
        bars,
    }
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("canvas 2d context unavailable")]
    NoContext,
    #[error("canvas call failed: {0}")]
    Js(String),
}

impl From<JsValue> for ChartError {
    fn from(value: JsValue) -> Self {
        ChartError::Js(format!("{:?}", value))
    }
}

pub fn draw(canvas: &HtmlCanvasElement, chart: &ChartLayout) -> Result<(), ChartError> {
    canvas.set_width(chart.width as u32);
    canvas.set_height(chart.height as u32);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(ChartError::NoContext)?
        .dyn_into()
        .map_err(|_| ChartError::NoContext)?;

    ctx.clear_rect(0.0, 0.0, chart.width, chart.height);
    ctx.set_line_dash(&js_sys::Array::new())?;

    ctx.set_font("12px Arial");
    ctx.set_text_align("center");
    for bar in &chart.bars {
        let center = bar.x + BAR_WIDTH / 2.0;
        if bar.height > 0.0 {
            ctx.set_fill_style_str(bar.color);
            ctx.fill_rect(bar.x, bar.y, BAR_WIDTH, bar.height);
            ctx.set_fill_style_str(COLOR_TEXT);
            ctx.fill_text(&bar.value_text, center, bar.y - 5.0)?;
        }
        ctx.set_fill_style_str(COLOR_TEXT);
        ctx.fill_text(&bar.label, center, CHART_TOP + CHART_HEIGHT + 20.0)?;
    }

    ctx.set_stroke_style_str(COLOR_THRESHOLD);
    ctx.set_line_width(2.0);
    ctx.set_line_dash(&js_sys::Array::of2(&JsValue::from_f64(5.0), &JsValue::from_f64(5.0)))?;
    ctx.begin_path();
    ctx.move_to(LINE_INSET, chart.threshold_y);
    ctx.line_to(chart.width - LINE_INSET, chart.threshold_y);
    ctx.stroke();

    ctx.set_fill_style_str(COLOR_THRESHOLD);
    ctx.set_font("bold 12px Arial");
    ctx.set_text_align("left");
    ctx.fill_text(
        &format!("Batas: {}", format_decimal(chart.threshold)),
        LINE_INSET + 5.0,
        chart.threshold_y - 5.0,
    )?;
    Ok(())
}

/// Triggers a PNG download of the current canvas content
pub fn export_png(canvas: &HtmlCanvasElement, file_name: &str) -> Result<(), ChartError> {
    let url = canvas.to_data_url()?;
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ChartError::Js("no document".to_string()))?;
    let link: web_sys::HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into()
        .map_err(|_| ChartError::Js("anchor cast failed".to_string()))?;
    link.set_download(file_name);
    link.set_href(&url);
    link.click();
    Ok(())
}

#[component]
pub fn BarChart(
    #[prop(into)] points: Signal<Vec<SeriesPoint>>,
    #[prop(into)] threshold: Signal<f64>,
    #[prop(optional)] node_ref: Option<NodeRef<html::Canvas>>,
) -> impl IntoView {
    let canvas_ref = node_ref.unwrap_or_default();

    Effect::new(move |_| {
        let chart = layout(&points.get(), threshold.get());
        if let Some(canvas) = canvas_ref.get() {
            if let Err(e) = draw(&canvas, &chart) {
                log::error!("bar chart: {}", e);
            }
        }
    });

    view! {
        <div class="bar-chart">
            <canvas node_ref=canvas_ref width="600" height="300"></canvas>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(values: &[f64]) -> Vec<SeriesPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| SeriesPoint {
                label: (i + 1).to_string(),
                value: *v,
            })
            .collect()
    }

    #[test]
    fn test_width_grows_with_bar_count() {
        assert_eq!(layout(&pts(&[1.0; 3]), 1.0).width, 600.0);
        assert_eq!(layout(&pts(&[1.0; 12]), 1.0).width, 780.0);
    }

    #[test]
    fn test_last_bar_fits_inside_canvas() {
        for n in [9, 10, 12, 30] {
            let chart = layout(&pts(&vec![1.0; n]), 1.0);
            let last = chart.bars.last().unwrap();
            assert!(last.x + BAR_WIDTH <= chart.width, "{n} bars");
        }
    }

    #[test]
    fn test_scale_and_colors() {
        let chart = layout(&pts(&[100.0, 200.0]), 150.0);
        assert!((chart.scale_max - 220.0).abs() < 1e-9);
        assert_eq!(chart.bars[0].color, COLOR_BELOW);
        assert_eq!(chart.bars[1].color, COLOR_ABOVE);
        assert_eq!(chart.bars[1].x, 90.0);
        let expected = 200.0 / 220.0 * CHART_HEIGHT;
        assert!((chart.bars[1].height - expected).abs() < 1e-9);
    }

    #[test]
    fn test_threshold_above_data_sets_scale() {
        let chart = layout(&pts(&[10.0]), 150.0);
        assert!((chart.scale_max - 165.0).abs() < 1e-9);
        let expected_y = CHART_TOP + CHART_HEIGHT - 150.0 / 165.0 * CHART_HEIGHT;
        assert!((chart.threshold_y - expected_y).abs() < 1e-9);
    }

    #[test]
    fn test_value_equal_to_threshold_is_green() {
        let chart = layout(&pts(&[150.0]), 150.0);
        assert_eq!(chart.bars[0].color, COLOR_ABOVE);
    }

    #[test]
    fn test_all_zero_series_has_no_bar_height() {
        let chart = layout(&pts(&[0.0, 0.0]), 0.0);
        assert_eq!(chart.scale_max, 0.0);
        assert!(chart.bars.iter().all(|b| b.height == 0.0));
        assert_eq!(chart.threshold_y, CHART_TOP + CHART_HEIGHT);
        assert!(layout(&[], 150.0).bars.is_empty());
    }
}
