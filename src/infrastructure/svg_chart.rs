// SVG chart rendering with Plotters
use crate::domain::chart::{BarChartData, LineChartData};
use chrono::{Duration, NaiveDate};
use plotters::prelude::*;

const CHART_WIDTH: u32 = 960;
const LINE_CHART_HEIGHT: u32 = 420;
const BAR_CHART_HEIGHT: u32 = 520;

const PALETTE: [RGBColor; 4] = [
    RGBColor(31, 119, 180),
    RGBColor(127, 127, 127),
    RGBColor(44, 160, 44),
    RGBColor(148, 103, 189),
];
const MARKER_COLOR: RGBColor = RGBColor(214, 39, 40);
const BLUE_LIGHT: RGBColor = RGBColor(198, 219, 239);
const BLUE_DARK: RGBColor = RGBColor(8, 48, 107);

/// Time series chart with the lockdown marker drawn as a vertical line.
pub fn line_chart_svg(data: &LineChartData) -> anyhow::Result<String> {
    let dates = data
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.date))
        .chain(std::iter::once(data.marker.date));
    let (start, end) = date_bounds(dates, data.marker.date);
    let x_max = (end - start).num_days().max(1);

    let peak = data
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.rate))
        .fold(0.0_f64, f64::max);
    let y_max = y_upper_bound(peak);

    let to_x = |date: NaiveDate| (date - start).num_days();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH, LINE_CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(data.title.as_str(), ("sans-serif", 20))
            .margin(16)
            .x_label_area_size(40)
            .y_label_area_size(56)
            .build_cartesian_2d(0i64..x_max, 0f64..y_max)?;

        let format_x = |days: &i64| (start + Duration::days(*days)).format("%b %Y").to_string();
        let format_y = |rate: &f64| format!("{rate:.0}{}", data.unit);
        chart
            .configure_mesh()
            .x_labels(8)
            .y_labels(6)
            .x_label_formatter(&format_x)
            .y_label_formatter(&format_y)
            .y_desc("Unemployment rate")
            .draw()?;

        for (idx, series) in data.series.iter().enumerate() {
            if series.points.is_empty() {
                continue;
            }
            let color = series
                .color
                .as_deref()
                .and_then(parse_hex_color)
                .unwrap_or(PALETTE[idx % PALETTE.len()]);
            let points: Vec<(i64, f64)> = series.points.iter().map(|p| (to_x(p.date), p.rate)).collect();

            chart
                .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?
                .label(series.name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2)));
            chart.draw_series(points.iter().map(|&p| Circle::new(p, 3, color.filled())))?;
        }

        let marker_x = to_x(data.marker.date);
        chart.draw_series(LineSeries::new(
            vec![(marker_x, 0.0), (marker_x, y_max)],
            MARKER_COLOR.stroke_width(2),
        ))?;
        chart.draw_series(std::iter::once(Text::new(
            data.marker.label.clone(),
            (marker_x, y_max),
            ("sans-serif", 12).into_font().color(&MARKER_COLOR),
        )))?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;

        root.present()?;
    }

    Ok(svg)
}

/// Bar chart in the given order, shaded on a blue scale by value.
pub fn bar_chart_svg(data: &BarChartData) -> anyhow::Result<String> {
    let count = data.bars.len().max(1) as u32;
    let values = data.bars.iter().map(|b| b.value);
    let low = values.clone().fold(f64::INFINITY, f64::min);
    let high = values.fold(0.0_f64, f64::max);
    let y_max = y_upper_bound(high);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH, BAR_CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(data.title.as_str(), ("sans-serif", 20))
            .margin(16)
            .x_label_area_size(160)
            .y_label_area_size(56)
            .build_cartesian_2d((0u32..count).into_segmented(), 0f64..y_max)?;

        let format_x = |value: &SegmentValue<u32>| match value {
            SegmentValue::CenterOf(idx) => data
                .bars
                .get(*idx as usize)
                .map(|b| b.label.clone())
                .unwrap_or_default(),
            _ => String::new(),
        };
        let format_y = |rate: &f64| format!("{rate:.0}{}", data.unit);
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(count as usize)
            .x_label_formatter(&format_x)
            .x_label_style(("sans-serif", 11).into_font().transform(FontTransform::Rotate90))
            .y_label_formatter(&format_y)
            .y_desc("Average unemployment rate")
            .draw()?;

        chart.draw_series(data.bars.iter().enumerate().map(|(idx, bar)| {
            let idx = idx as u32;
            let mut rect = Rectangle::new(
                [(SegmentValue::Exact(idx), 0.0), (SegmentValue::Exact(idx + 1), bar.value)],
                blue_scale(bar.value, low, high).filled(),
            );
            rect.set_margin(0, 0, 3, 3);
            rect
        }))?;

        chart.draw_series(data.bars.iter().enumerate().map(|(idx, bar)| {
            Text::new(
                format!("{:.2}{}", bar.value, data.unit),
                (SegmentValue::CenterOf(idx as u32), bar.value),
                ("sans-serif", 9).into_font().transform(FontTransform::Rotate270),
            )
        }))?;

        root.present()?;
    }

    Ok(svg)
}

fn date_bounds(dates: impl Iterator<Item = NaiveDate>, fallback: NaiveDate) -> (NaiveDate, NaiveDate) {
    let (min, max) = dates.fold((None, None), |(min, max): (Option<NaiveDate>, Option<NaiveDate>), d| {
        (
            Some(min.map_or(d, |m| m.min(d))),
            Some(max.map_or(d, |m| m.max(d))),
        )
    });
    let min = min.unwrap_or(fallback);
    let max = max.unwrap_or(fallback);

    // Pad so points on the edge are not clipped by the frame
    (min - Duration::days(7), max + Duration::days(7))
}

fn y_upper_bound(peak: f64) -> f64 {
    if peak.is_finite() && peak > 0.0 {
        peak * 1.15
    } else {
        1.0
    }
}

/// "#1f77b4" -> RGB
fn parse_hex_color(hex: &str) -> Option<RGBColor> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn blue_scale(value: f64, low: f64, high: f64) -> RGBColor {
    let t = if high > low {
        ((value - low) / (high - low)).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RGBColor(
        mix(BLUE_LIGHT.0, BLUE_DARK.0),
        mix(BLUE_LIGHT.1, BLUE_DARK.1),
        mix(BLUE_LIGHT.2, BLUE_DARK.2),
    )
}
