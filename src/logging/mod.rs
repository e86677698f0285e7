//! 로깅 초기화 모듈
//!
//! `env_logger`를 설정된 필터로 구성하고, 모든 레코드를 로그 파일과 표준 출력에
//! 동시에 기록합니다. 컴포넌트는 `log` 파사드 매크로(`info!`, `error!` 등)만 사용합니다.
//!
//! 출력 형식:
//!
//! ```text
//! 2024-01-01T12:00:00.000+00:00 INFO [user_rest_api::repositories::users::user_repo src/repositories/users/user_repo.rs:90] create user: created 65a...
//! ```

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use env_logger::{Builder, Target};

use crate::config::LogConfig;
use crate::core::errors::{AppError, AppResult};

/// 두 출력 대상에 같은 바이트를 기록하는 writer
///
/// 첫 번째 대상의 실패는 그대로 반환되고, 두 번째 대상은 최선을 다해 기록합니다.
pub struct TeeWriter<A: Write, B: Write> {
    primary: A,
    secondary: B,
}

impl<A: Write, B: Write> TeeWriter<A, B> {
    pub fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }
}

impl<A: Write, B: Write> Write for TeeWriter<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.primary.write_all(buf)?;
        let _ = self.secondary.write_all(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.primary.flush()?;
        let _ = self.secondary.flush();
        Ok(())
    }
}

/// 전역 로거 초기화
///
/// `<directory>/<file>`을 생성(추가 모드)하고 로거를 설치합니다.
/// 프로세스당 한 번만 호출할 수 있습니다.
///
/// # Errors
///
/// * `AppError::ConfigError` - 로그 디렉터리/파일 생성 실패
/// * `AppError::InternalError` - 로거가 이미 설치됨
pub fn init(config: &LogConfig) -> AppResult<()> {
    let directory = Path::new(&config.directory);
    fs::create_dir_all(directory).map_err(|e| {
        AppError::ConfigError(format!("cannot create log directory {}: {}", config.directory, e))
    })?;

    let path = directory.join(&config.file);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| AppError::ConfigError(format!("cannot open log file {}: {}", path.display(), e)))?;

    builder(&config.filter)
        .target(Target::Pipe(Box::new(TeeWriter::new(file, io::stdout()))))
        .try_init()
        .map_err(|e| AppError::InternalError(format!("logger already initialized: {}", e)))
}

fn builder(filter: &str) -> Builder {
    let mut builder = Builder::new();
    builder.parse_filters(filter).format(|buf, record| {
        writeln!(
            buf,
            "{} {} [{} {}:{}] {}",
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, false),
            record.level(),
            record.target(),
            record.file().unwrap_or("unknown"),
            record.line().unwrap_or(0),
            record.args()
        )
    });
    builder
}
