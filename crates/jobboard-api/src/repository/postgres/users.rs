use async_trait::async_trait;
use tracing::{info, warn};

use jobboard_core::{JobBoardError, JobBoardResult, NewUser, RoleType, User, UserWithRoles};

use super::{map_unique, PgRepository};
use crate::repository::memory::username_taken;
use crate::repository::UserRepository;

#[async_trait]
impl UserRepository for PgRepository {
    async fn seed_roles(&self) -> JobBoardResult<()> {
        let mut inserted = 0;
        for role in RoleType::ALL {
            inserted += sqlx::query("INSERT INTO roles (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
                .bind(role.name())
                .execute(&self.pool)
                .await?
                .rows_affected();
        }

        if inserted > 0 {
            info!(inserted, "기본 역할 시드 완료");
        }
        Ok(())
    }

    async fn create(&self, user: NewUser) -> JobBoardResult<User> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, first_name, last_name)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, password_hash, first_name, last_name, created_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique(e, || username_taken(&user.username)))?;

        for role in &user.roles {
            let linked = sqlx::query(
                r#"
                INSERT INTO user_roles (user_id, role_id)
                SELECT $1, id FROM roles WHERE name = $2
                "#,
            )
            .bind(created.id)
            .bind(role.name())
            .execute(&mut *tx)
            .await?
            .rows_affected();

            if linked == 0 {
                return Err(JobBoardError::Internal(format!(
                    "role {} has not been seeded",
                    role.name()
                )));
            }
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn find_by_username(&self, username: &str) -> JobBoardResult<Option<UserWithRoles>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, first_name, last_name, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        let Some(user) = user else {
            return Ok(None);
        };

        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT r.name
            FROM roles r
            JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = $1
            ORDER BY r.name
            "#,
        )
        .bind(user.id)
        .fetch_all(&self.pool)
        .await?;

        let roles = names
            .iter()
            .filter_map(|name| match RoleType::parse(name) {
                Some(role) => Some(role),
                None => {
                    warn!(role = %name, "알 수 없는 역할 무시");
                    None
                }
            })
            .collect();

        Ok(Some(UserWithRoles { user, roles }))
    }
}
