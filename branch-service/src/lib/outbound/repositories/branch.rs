use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::branch::errors::BranchError;
use crate::domain::branch::models::Branch;
use crate::domain::branch::models::BranchId;
use crate::domain::branch::models::Login;
use crate::domain::branch::ports::BranchRepository;

pub struct PostgresBranchRepository {
    pool: PgPool,
}

impl PostgresBranchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct BranchRow {
    id: i32,
    name: String,
    login: String,
    password_hash: String,
    active: Option<bool>,
}

impl TryFrom<BranchRow> for Branch {
    type Error = BranchError;

    fn try_from(row: BranchRow) -> Result<Self, Self::Error> {
        Ok(Branch {
            id: BranchId(row.id),
            name: row.name,
            login: Login::new(row.login)?,
            password_hash: row.password_hash,
            active: row.active,
        })
    }
}

#[async_trait]
impl BranchRepository for PostgresBranchRepository {
    async fn find_by_login(&self, login: &Login) -> Result<Option<Branch>, BranchError> {
        let row = sqlx::query_as::<_, BranchRow>(
            r#"
            SELECT id, name, login, password_hash, active
            FROM branches
            WHERE login = $1
            "#,
        )
        .bind(login.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BranchError::DatabaseError(e.to_string()))?;

        row.map(Branch::try_from).transpose()
    }
}
