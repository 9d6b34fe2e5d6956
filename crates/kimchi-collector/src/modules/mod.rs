//! 데이터 수집 모듈.

pub mod chart;
pub mod current_premium;
pub mod daily_collect;
pub mod plot;
pub mod premium;
pub mod price_log;

pub use chart::{
    chart_image_path, chart_output_path, render_recent_chart, ChartError, ChartReport, ChartRow,
    SeriesSummary,
};
pub use plot::draw_recent_chart;
pub use current_premium::{current_premium, format_premium_report};
pub use daily_collect::run_daily_collection;
pub use premium::compute_premium;
pub use price_log::{append_record, is_already_logged, read_records};
