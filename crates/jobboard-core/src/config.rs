//! 설정 관리.
//!
//! 기본값 → `config/default.toml` → `config/local.toml` → 환경 변수 순으로 덮어씁니다.
//! 환경 변수는 `JOBBOARD__<섹션>__<키>` 형식입니다 (예: `JOBBOARD__JWT__SECRET`).

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::Path;

use crate::error::{JobBoardError, JobBoardResult};

/// 서명 키 최소 길이 (바이트).
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// 토큰 수명 상한 (30일, 밀리초).
pub const MAX_JWT_EXPIRATION_MS: u64 = 30 * 24 * 60 * 60 * 1000;

/// 애플리케이션 설정.
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 데이터베이스 설정
    #[serde(default)]
    pub database: DatabaseConfig,
    /// 토큰 설정
    #[serde(default)]
    pub jwt: JwtSettings,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
    /// 허용 CORS origin (쉼표 구분, 비어 있으면 모두 허용)
    pub cors_origins: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
            cors_origins: String::new(),
        }
    }
}

impl ServerConfig {
    /// `host:port` 바인딩 주소.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// CORS origin 목록.
    pub fn cors_origin_list(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// 데이터베이스 설정.
///
/// `url`이 없으면 인메모리 저장소로 동작합니다.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// 연결 URL
    pub url: Option<SecretString>,
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 획득 타임아웃 (초)
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            acquire_timeout_secs: 10,
        }
    }
}

/// 토큰 발급 설정.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct JwtSettings {
    /// HMAC 서명 키
    pub secret: Option<SecretString>,
    /// 토큰 수명 (밀리초)
    pub expiration_ms: u64,
    /// `iss` 클레임 (선택)
    pub issuer: Option<String>,
}

impl Default for JwtSettings {
    fn default() -> Self {
        Self {
            secret: None,
            expiration_ms: 86_400_000,
            issuer: None,
        }
    }
}

impl JwtSettings {
    pub fn with_secret(secret: impl Into<String>, expiration_ms: u64) -> Self {
        Self {
            secret: Some(SecretString::from(secret.into())),
            expiration_ms,
            issuer: None,
        }
    }

    /// 검증된 서명 키를 반환합니다.
    pub fn secret(&self) -> JobBoardResult<&SecretString> {
        let secret = self
            .secret
            .as_ref()
            .ok_or_else(|| JobBoardError::Config("jwt.secret is not set".to_string()))?;

        if secret.expose_secret().len() < MIN_JWT_SECRET_LEN {
            return Err(JobBoardError::Config(format!(
                "jwt.secret must be at least {} bytes",
                MIN_JWT_SECRET_LEN
            )));
        }
        Ok(secret)
    }

    /// 검증된 토큰 수명(밀리초)을 반환합니다. 0이거나 상한을 넘으면 실패합니다.
    pub fn lifetime_ms(&self) -> JobBoardResult<i64> {
        if self.expiration_ms == 0 || self.expiration_ms > MAX_JWT_EXPIRATION_MS {
            return Err(JobBoardError::Config(format!(
                "jwt.expiration_ms must be between 1 and {}",
                MAX_JWT_EXPIRATION_MS
            )));
        }
        i64::try_from(self.expiration_ms)
            .map_err(|_| JobBoardError::Config("jwt.expiration_ms is out of range".to_string()))
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "jobboard_api=info,jobboard_core=info,tower_http=info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 기본 경로(`config/`)의 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));
        Self::finish(builder)
    }

    /// 지정한 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(config::File::from(path.as_ref()));
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        builder
            .add_source(
                config::Environment::with_prefix("JOBBOARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// 기동 전에 치명적인 설정 오류를 확인합니다.
    pub fn validate(&self) -> JobBoardResult<()> {
        self.jwt.secret()?;
        self.jwt.lifetime_ms()?;
        if self.database.max_connections == 0 {
            return Err(JobBoardError::Config(
                "database.max_connections must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
