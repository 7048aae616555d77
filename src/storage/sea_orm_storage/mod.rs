//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod trabalhos;

use crate::config::DatabaseConfig;
use crate::errors::{Result, TrabalhosError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例并执行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| TrabalhosError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    fn is_memory_url(url: &str) -> bool {
        url.contains(":memory:") || url.contains("mode=memory")
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| TrabalhosError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool_options = if Self::is_memory_url(url) {
            // 内存库只存在于单个连接中，连接必须常驻
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("mmap_size", "536870912")
                .pragma("wal_autocheckpoint", "1000");
            SqlitePoolOptions::new()
                .max_connections(config.pool_size.max(1))
                .min_connections(1)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| TrabalhosError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| TrabalhosError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(TrabalhosError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::trabalhos::entities::Trabalho;
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    async fn insert_trabalho(&self, trabalho: Trabalho) -> Result<Trabalho> {
        self.insert_trabalho_impl(trabalho).await
    }

    async fn update_trabalho(&self, trabalho: Trabalho) -> Result<bool> {
        self.update_trabalho_impl(trabalho).await
    }

    async fn get_trabalho_by_id(&self, id: &str) -> Result<Option<Trabalho>> {
        self.get_trabalho_by_id_impl(id).await
    }

    async fn list_trabalhos(&self) -> Result<Vec<Trabalho>> {
        self.list_trabalhos_impl().await
    }

    async fn delete_trabalho(&self, id: &str) -> Result<bool> {
        self.delete_trabalho_impl(id).await
    }

    async fn count_trabalhos(&self) -> Result<u64> {
        self.count_trabalhos_impl().await
    }
}
