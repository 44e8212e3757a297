//! 역할 정의.
//!
//! 역할은 고정된 닫힌 집합이며 기동 시 한 번 시딩됩니다.
//! 권한(authority) 문자열은 `ROLE_` 접두사 + 역할 이름입니다.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 권한 문자열 접두사.
pub const AUTHORITY_PREFIX: &str = "ROLE_";

/// 사용자 역할.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "UPPERCASE")]
pub enum RoleType {
    /// 관리자 - 회사/채용공고/리뷰 쓰기
    Admin,
    /// 매니저 - 회사 조회
    Manager,
    /// 일반 사용자 - 채용공고 조회
    #[default]
    User,
}

impl RoleType {
    /// 시딩 대상 전체 역할.
    pub const ALL: [RoleType; 3] = [RoleType::Admin, RoleType::Manager, RoleType::User];

    /// 저장소에 기록되는 역할 이름.
    pub fn name(&self) -> &'static str {
        match self {
            RoleType::Admin => "ADMIN",
            RoleType::Manager => "MANAGER",
            RoleType::User => "USER",
        }
    }

    /// `ROLE_` 접두사가 붙은 권한 문자열.
    pub fn authority(&self) -> String {
        format!("{}{}", AUTHORITY_PREFIX, self.name())
    }

    /// 문자열에서 역할 파싱 (대소문자 무시, `ROLE_` 접두사 허용).
    pub fn parse(s: &str) -> Option<Self> {
        let upper = s.trim().to_uppercase();
        let name = upper.strip_prefix(AUTHORITY_PREFIX).unwrap_or(&upper);
        match name {
            "ADMIN" => Some(RoleType::Admin),
            "MANAGER" => Some(RoleType::Manager),
            "USER" => Some(RoleType::User),
            _ => None,
        }
    }
}

impl FromStr for RoleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown role: {}", s))
    }
}

impl std::fmt::Display for RoleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authority_naming() {
        assert_eq!(RoleType::Admin.authority(), "ROLE_ADMIN");
        assert_eq!(RoleType::Manager.authority(), "ROLE_MANAGER");
        assert_eq!(RoleType::User.authority(), "ROLE_USER");
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(RoleType::parse("admin"), Some(RoleType::Admin));
        assert_eq!(RoleType::parse("Manager"), Some(RoleType::Manager));
        assert_eq!(RoleType::parse("ROLE_USER"), Some(RoleType::User));
        assert_eq!(RoleType::parse("owner"), None);
        assert!("".parse::<RoleType>().is_err());
    }

    #[test]
    fn test_default_role_is_user() {
        assert_eq!(RoleType::default(), RoleType::User);
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&RoleType::Manager).unwrap();
        assert_eq!(json, "\"MANAGER\"");

        let parsed: RoleType = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(parsed, RoleType::Admin);
    }
}
