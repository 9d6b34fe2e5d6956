//! 김치 프리미엄 수집기 CLI.

use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use kimchi_collector::modules::{self, ChartError};
use kimchi_collector::{CollectionOutcome, CollectorConfig};
use kimchi_core::{init_logging, LocalClock, LogConfig};

#[derive(Parser)]
#[command(name = "kimchi-collector")]
#[command(about = "Kimchi Gold Premium Collector", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// 오늘 김치 프리미엄 수집 (이미 있으면 건너뜀)
    Collect,

    /// 현재 김치 프리미엄 조회 (기록하지 않음)
    Now {
        /// JSON으로 출력
        #[arg(long)]
        json: bool,
    },

    /// 최근 N개월 차트 이미지와 데이터 저장
    Chart {
        /// 기간 (개월, 기본: KIMCHI_CHART_MONTHS 또는 12)
        #[arg(long)]
        months: Option<u32>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // 로깅 초기화
    let level = format!(
        "kimchi_collector={lvl},kimchi_data={lvl},kimchi_core={lvl}",
        lvl = cli.log_level
    );
    init_logging(LogConfig::from_env_or(level))
        .map_err(|e| anyhow::anyhow!(e))
        .context("로깅 초기화 실패")?;

    // 설정 로드
    let config = CollectorConfig::from_env().context("설정 로드 실패")?;
    tracing::debug!(log_path = %config.log_path.display(), "설정 로드 완료");

    let code = match cli.command {
        Commands::Collect => {
            let source = config.quote_source()?;
            match modules::run_daily_collection(&source, &LocalClock, &config.log_path).await {
                CollectionOutcome::Failed(_) => ExitCode::FAILURE,
                CollectionOutcome::Written(_) | CollectionOutcome::Skipped => ExitCode::SUCCESS,
            }
        }
        Commands::Now { json } => {
            let source = config.quote_source()?;
            let premium = modules::current_premium(&source).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&premium)?);
            } else {
                println!("{}", modules::format_premium_report(&premium));
            }
            ExitCode::SUCCESS
        }
        Commands::Chart { months } => {
            let months = months.unwrap_or(config.chart.months).max(1);
            match modules::render_recent_chart(&config.log_path, &LocalClock, months) {
                Ok(report) => {
                    println!(
                        "Recent {} months chart saved to {}",
                        months,
                        report.image_path.display()
                    );
                    println!(
                        "Recent {} months data saved to {}",
                        months,
                        report.output_path.display()
                    );
                    ExitCode::SUCCESS
                }
                Err(e @ (ChartError::LogMissing(_) | ChartError::EmptyWindow(_))) => {
                    tracing::warn!("{}", e);
                    eprintln!("Error: {}", e);
                    ExitCode::FAILURE
                }
                Err(e) => return Err(e.into()),
            }
        }
    };

    Ok(code)
}
