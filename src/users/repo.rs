use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use super::dto::{UserInput, UserRecord};

/// Mutable columns of `users`, in bind order.
macro_rules! user_columns {
    () => {
        "name, surname, email, avatar, login, password, role, weight, height, locked"
    };
}

const LIST_SQL: &str = concat!("SELECT id, ", user_columns!(), " FROM users");
const GET_SQL: &str = concat!("SELECT id, ", user_columns!(), " FROM users WHERE id = $1");
const INSERT_SQL: &str = concat!(
    "INSERT INTO users (",
    user_columns!(),
    ") VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING id"
);
const UPDATE_SQL: &str = "UPDATE users \
    SET name = $1, surname = $2, email = $3, avatar = $4, login = $5, \
        password = $6, role = $7, weight = $8, height = $9, locked = $10 \
    WHERE id = $11";
const DELETE_SQL: &str = "DELETE FROM users WHERE id = $1";

/// Storage for user records. One call is one statement; no transactions.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<UserRecord>>;
    async fn create(&self, user: &UserInput) -> anyhow::Result<i64>;
    async fn get(&self, id: i64) -> anyhow::Result<Option<UserRecord>>;
    /// Returns the number of rows replaced.
    async fn update(&self, id: i64, user: &UserInput) -> anyhow::Result<u64>;
    /// Returns the number of rows removed.
    async fn delete(&self, id: i64) -> anyhow::Result<u64>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self) -> anyhow::Result<Vec<UserRecord>> {
        let rows = sqlx::query_as::<_, UserRecord>(LIST_SQL)
            .fetch_all(&self.db)
            .await
            .context("list users")?;
        Ok(rows)
    }

    async fn create(&self, user: &UserInput) -> anyhow::Result<i64> {
        let (id,) = sqlx::query_as::<_, (i64,)>(INSERT_SQL)
            .bind(&user.name)
            .bind(&user.surname)
            .bind(&user.email)
            .bind(&user.avatar)
            .bind(&user.login)
            .bind(&user.password)
            .bind(user.role)
            .bind(user.weight)
            .bind(user.height)
            .bind(user.locked)
            .fetch_one(&self.db)
            .await
            .context("insert user")?;
        Ok(id)
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRecord>(GET_SQL)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .with_context(|| format!("get user {id}"))?;
        Ok(row)
    }

    async fn update(&self, id: i64, user: &UserInput) -> anyhow::Result<u64> {
        let res = sqlx::query(UPDATE_SQL)
            .bind(&user.name)
            .bind(&user.surname)
            .bind(&user.email)
            .bind(&user.avatar)
            .bind(&user.login)
            .bind(&user.password)
            .bind(user.role)
            .bind(user.weight)
            .bind(user.height)
            .bind(user.locked)
            .bind(id)
            .execute(&self.db)
            .await
            .with_context(|| format!("update user {id}"))?;
        Ok(res.rows_affected())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<u64> {
        let res = sqlx::query(DELETE_SQL)
            .bind(id)
            .execute(&self.db)
            .await
            .with_context(|| format!("delete user {id}"))?;
        Ok(res.rows_affected())
    }
}
