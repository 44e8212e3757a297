//! 인증된 주체(principal)와 역할 요구 조건.

use std::collections::BTreeSet;

use jobboard_core::RoleType;

/// 요청에 첨부되는 인증 주체.
///
/// 인증 게이트가 요청 extensions에 넣고, 역할 가드가 읽습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub roles: BTreeSet<RoleType>,
}

impl Principal {
    pub fn new(username: impl Into<String>, roles: impl IntoIterator<Item = RoleType>) -> Self {
        Self {
            username: username.into(),
            roles: roles.into_iter().collect(),
        }
    }

    /// `ROLE_` 접두사 권한 문자열 목록.
    pub fn authorities(&self) -> Vec<String> {
        self.roles.iter().map(RoleType::authority).collect()
    }

    /// 정확히 해당 권한을 보유했는지 확인합니다. 역할 간 상하 관계는 없습니다.
    pub fn has_authority(&self, role: RoleType) -> bool {
        self.roles.contains(&role)
    }
}

/// 라우트가 요구하는 역할을 타입으로 선언합니다.
pub trait RoleRequirement: Send + Sync + 'static {
    const ROLE: RoleType;
}

/// ADMIN 역할 요구.
#[derive(Debug, Clone, Copy)]
pub struct AdminRole;

/// MANAGER 역할 요구.
#[derive(Debug, Clone, Copy)]
pub struct ManagerRole;

/// USER 역할 요구.
#[derive(Debug, Clone, Copy)]
pub struct UserRole;

impl RoleRequirement for AdminRole {
    const ROLE: RoleType = RoleType::Admin;
}

impl RoleRequirement for ManagerRole {
    const ROLE: RoleType = RoleType::Manager;
}

impl RoleRequirement for UserRole {
    const ROLE: RoleType = RoleType::User;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorities_are_prefixed() {
        let principal = Principal::new("a@b.io", [RoleType::User, RoleType::Admin]);
        assert_eq!(principal.authorities(), vec!["ROLE_ADMIN", "ROLE_USER"]);
    }

    #[test]
    fn test_no_implicit_hierarchy() {
        let admin = Principal::new("root@b.io", [RoleType::Admin]);
        assert!(admin.has_authority(RoleType::Admin));
        assert!(!admin.has_authority(RoleType::Manager));
        assert!(!admin.has_authority(RoleType::User));
    }
}
