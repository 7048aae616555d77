//! Trabalhos & QR - 学术活动作品登记与二维码服务
//!
//! 基于 Actix Web 构建，管理作品记录并为每条记录生成指向公开详情页的二维码。
//!
//! # 架构
//! - `access`: 管理员口令访问控制
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `import`: CSV / XLSX 导入与表头归一化
//! - `middlewares`: 访问控制与限流中间件
//! - `models`: 数据模型定义
//! - `qr`: 详情链接与二维码生成
//! - `routes`: API 与页面路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod access;
pub mod config;
pub mod entity;
pub mod errors;
pub mod import;
pub mod middlewares;
pub mod models;
pub mod qr;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
