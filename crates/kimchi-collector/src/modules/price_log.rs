//! 일별 김치 프리미엄 CSV 로그.
//!
//! 파일은 추가 전용입니다. 헤더는 파일을 만들 때 한 번만 쓰고,
//! 이미 기록된 행은 다시 쓰지 않습니다.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use kimchi_core::{PremiumRecord, LOG_HEADER};

use crate::Result;

/// 오늘 날짜로 시작하는 행이 있는지 확인합니다.
///
/// 파일이 없으면 `false`. 첫 행은 헤더로 간주하고 건너뜁니다.
/// 열 개수가 다른 행도 첫 번째 필드만 보고 판단합니다.
pub fn is_already_logged(log_path: &Path, today: &str) -> Result<bool> {
    if !log_path.exists() {
        return Ok(false);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(log_path)?;

    for row in reader.records() {
        let row = row?;
        if row.get(0).is_some_and(|date| date.starts_with(today)) {
            return Ok(true);
        }
    }

    Ok(false)
}

/// 기록 한 행을 추가합니다.
///
/// 새 파일(또는 비어 있는 파일)이면 헤더를 먼저 씁니다. 헤더와 행은
/// 메모리에서 직렬화한 뒤 한 번의 쓰기로 기록합니다.
pub fn append_record(log_path: &Path, record: &PremiumRecord) -> Result<()> {
    if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut file = open_for_append(log_path)?;
    let needs_header = file.metadata()?.len() == 0;

    let mut writer = csv::Writer::from_writer(Vec::new());
    if needs_header {
        writer.write_record(LOG_HEADER)?;
    }
    writer.write_record(record.to_fields())?;
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;

    file.write_all(&bytes)?;
    file.flush()?;

    tracing::debug!(
        path = %log_path.display(),
        date = %record.date,
        header = needs_header,
        "기록 추가"
    );

    Ok(())
}

/// 로그 전체를 기록 목록으로 읽습니다.
///
/// 형식이 맞지 않는 행은 경고 후 건너뜁니다.
pub fn read_records(log_path: &Path) -> Result<Vec<PremiumRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(log_path)?;

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row?;
        let fields: Vec<&str> = row.iter().collect();
        match PremiumRecord::from_fields(&fields) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(line = idx + 2, error = %e, "잘못된 행 건너뜀");
            }
        }
    }

    Ok(records)
}

fn open_for_append(log_path: &Path) -> Result<File> {
    match OpenOptions::new().append(true).create_new(true).open(log_path) {
        Ok(file) => Ok(file),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            Ok(OpenOptions::new().append(true).open(log_path)?)
        }
        Err(e) => Err(e.into()),
    }
}
