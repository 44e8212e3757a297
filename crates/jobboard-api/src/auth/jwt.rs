//! Bearer 토큰 발급 및 검증.
//!
//! HS512 대칭 서명, `sub` = 사용자 이름, 만료 시간이 유일한 폐기 수단입니다.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::debug;

use jobboard_core::{JobBoardResult, JwtSettings};

/// 토큰 페이로드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 이름
    pub sub: String,
    /// Issued At (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// JWT ID
    pub jti: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// 토큰 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("토큰 인코딩 실패: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
    #[error("토큰이 만료되었습니다")]
    Expired,
    #[error("서명이 유효하지 않습니다")]
    BadSignature,
    #[error("지원하지 않는 알고리즘")]
    UnsupportedAlgorithm,
    #[error("잘못된 토큰 형식")]
    Malformed,
    #[error("토큰에 subject가 없습니다")]
    EmptyClaims,
    #[error("만료 시각이 표현 범위를 벗어났습니다")]
    ExpiryOutOfRange,
}

/// 토큰 발급/검증 서비스.
///
/// 서명 키는 기동 시 한 번 검증되며 이후 발급 경로에는 설정 에러가 없습니다.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
    issuer: Option<String>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("lifetime_ms", &self.lifetime.num_milliseconds())
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub const ALGORITHM: Algorithm = Algorithm::HS512;

    /// 설정에서 서비스를 만듭니다. 키가 없거나 짧거나 수명이 범위를 벗어나면 실패합니다.
    pub fn from_settings(settings: &JwtSettings) -> JobBoardResult<Self> {
        let secret = settings.secret()?;
        let lifetime_ms = settings.lifetime_ms()?;
        Ok(Self::new(
            secret.expose_secret().as_bytes(),
            Duration::milliseconds(lifetime_ms),
            settings.issuer.clone(),
        ))
    }

    pub fn new(secret: &[u8], lifetime: Duration, issuer: Option<String>) -> Self {
        let mut validation = Validation::new(Self::ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub", "iat"]);
        if let Some(iss) = &issuer {
            validation.set_issuer(&[iss]);
        }

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            lifetime,
            issuer,
        }
    }

    /// 토큰 수명.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// 현재 시각 기준으로 토큰을 발급합니다.
    pub fn issue(&self, username: &str) -> Result<String, TokenError> {
        self.issue_at(username, Utc::now())
    }

    /// 지정한 발급 시각으로 토큰을 발급합니다.
    pub fn issue_at(&self, username: &str, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            sub: username.to_string(),
            iat: issued_at.timestamp(),
            exp: issued_at
                .checked_add_signed(self.lifetime)
                .ok_or(TokenError::ExpiryOutOfRange)?
                .timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            iss: self.issuer.clone(),
        };
        let token = encode(&Header::new(Self::ALGORITHM), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// 서명과 만료를 검증하고 클레임을 반환합니다.
    pub fn claims(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    TokenError::UnsupportedAlgorithm
                }
                _ => TokenError::Malformed,
            }
        })?;

        if data.claims.sub.trim().is_empty() {
            return Err(TokenError::EmptyClaims);
        }
        Ok(data.claims)
    }

    /// 토큰이 유효한지 확인합니다. 실패 사유는 로그로만 남깁니다.
    pub fn validate(&self, token: &str) -> bool {
        match self.claims(token) {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "토큰 검증 실패");
                false
            }
        }
    }

    /// 토큰의 subject(사용자 이름)를 반환합니다. 유효하지 않은 토큰이면 에러입니다.
    pub fn subject(&self, token: &str) -> Result<String, TokenError> {
        self.claims(token).map(|claims| claims.sub)
    }
}
