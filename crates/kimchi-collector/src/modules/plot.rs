//! 최근 N개월 차트 이미지 (PNG).
//!
//! 세로 세 패널: 김치프리미엄(%), 국내금 vs 국제금 환산, 환율.
//! 글꼴을 찾지 못하면 제목과 눈금 없이 선만 그립니다.

use std::fmt::Display;
use std::path::Path;

use chrono::{Days, NaiveDate};
use kimchi_core::DATE_FORMAT;
use once_cell::sync::Lazy;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::chart::{ChartError, ChartRow};

/// 이미지 크기 (가로, 세로)
pub const CHART_SIZE: (u32, u32) = (1200, 1500);

const FONT_FAMILY: &str = "sans-serif";

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

const PURPLE: RGBColor = RGBColor(128, 0, 128);

/// 시스템 글꼴 등록 여부 (프로세스당 한 번)
static FONT_READY: Lazy<bool> = Lazy::new(register_system_font);

fn register_system_font() -> bool {
    for candidate in FONT_CANDIDATES {
        let Ok(bytes) = std::fs::read(candidate) else {
            continue;
        };
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        if register_font(FONT_FAMILY, FontStyle::Normal, bytes).is_ok() {
            tracing::debug!(font = candidate, "차트 글꼴 등록");
            return true;
        }
    }
    tracing::warn!("차트 글꼴을 찾지 못했습니다. 제목과 눈금 없이 그립니다.");
    false
}

struct Series {
    label: &'static str,
    color: RGBColor,
    points: Vec<(f64, f64)>,
}

struct Panel {
    title: String,
    y_desc: &'static str,
    series: Vec<Series>,
}

fn render_err<E: Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// 값 범위에 여백을 더한 y축 범위
fn y_range<'a>(series: impl IntoIterator<Item = &'a Series>) -> (f64, f64) {
    let (min, max) = series
        .into_iter()
        .flat_map(|s| s.points.iter().map(|&(_, y)| y))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
    if !min.is_finite() || !max.is_finite() {
        return (-1.0, 1.0);
    }
    let pad = (max - min) * 0.1;
    if pad > 0.0 {
        (min - pad, max + pad)
    } else {
        (min - 1.0, max + 1.0)
    }
}

fn panels(rows: &[ChartRow], first: NaiveDate, months: u32) -> Vec<Panel> {
    let series = |label: &'static str, color: RGBColor, value: fn(&ChartRow) -> Decimal| Series {
        label,
        color,
        points: rows
            .iter()
            .map(|r| ((r.date - first).num_days() as f64, to_f64(value(r))))
            .collect(),
    };

    vec![
        Panel {
            title: format!("Recent {} Months: Kimchi Premium (%)", months),
            y_desc: "Premium (%)",
            series: vec![series("Kimchi Premium (%)", RED, |r| r.premium_percent)],
        },
        Panel {
            title: format!("Recent {} Months: Domestic vs International Gold Price", months),
            y_desc: "Price (KRW/g)",
            series: vec![
                series("Domestic Gold (KRW/g)", BLUE, |r| r.domestic_price),
                series("International Gold (KRW/g, FX adjusted)", GREEN, |r| {
                    r.international_local_per_gram
                }),
            ],
        },
        Panel {
            title: format!("Recent {} Months: Exchange Rate Trend", months),
            y_desc: "KRW/USD",
            series: vec![series("Exchange Rate (KRW/USD)", PURPLE, |r| r.exchange_rate)],
        },
    ]
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    panel: &Panel,
    x_max: f64,
    first: NaiveDate,
    labeled: bool,
) -> Result<(), ChartError> {
    let (y_min, y_max) = y_range(&panel.series);

    let mut builder = ChartBuilder::on(area);
    builder.margin(20);
    if labeled {
        builder
            .caption(&panel.title, (FONT_FAMILY, 24))
            .x_label_area_size(40)
            .y_label_area_size(70);
    }
    let mut chart = builder
        .build_cartesian_2d(0f64..x_max, y_min..y_max)
        .map_err(render_err)?;

    if labeled {
        let date_label = |x: &f64| {
            first
                .checked_add_days(Days::new(x.max(0.0).round() as u64))
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default()
        };
        chart
            .configure_mesh()
            .x_labels(6)
            .x_label_formatter(&date_label)
            .y_desc(panel.y_desc)
            .draw()
            .map_err(render_err)?;
    }

    for series in &panel.series {
        let color = series.color;
        chart
            .draw_series(LineSeries::new(
                series.points.iter().copied(),
                color.stroke_width(2),
            ))
            .map_err(render_err)?
            .label(series.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        chart
            .draw_series(
                series
                    .points
                    .iter()
                    .map(|&point| Circle::new(point, 3, color.filled())),
            )
            .map_err(render_err)?;
    }

    if labeled {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()
            .map_err(render_err)?;
    }
    Ok(())
}

/// 세 패널 차트를 `path`에 PNG로 저장합니다.
///
/// `rows`는 날짜순으로 정렬되어 있어야 합니다.
pub fn draw_recent_chart(path: &Path, rows: &[ChartRow], months: u32) -> Result<(), ChartError> {
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return Err(ChartError::EmptyWindow(months));
    };
    let first = first.date;
    let x_max = ((last.date - first).num_days() as f64).max(1.0);
    let labeled = *FONT_READY;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    for (area, panel) in root
        .split_evenly((3, 1))
        .iter()
        .zip(panels(rows, first, months))
    {
        draw_panel(area, &panel, x_max, first, labeled)?;
    }
    root.present().map_err(render_err)?;

    tracing::debug!(path = %path.display(), labeled, "차트 이미지 저장");
    Ok(())
}
