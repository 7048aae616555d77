//! 访问控制
//!
//! 每个请求只计算一次访问级别（公开 / 管理），作为显式参数传给处理函数。
//! 未配置管理员口令时所有请求都是管理级别。

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use serde::Serialize;

use crate::config::AppConfig;
use crate::utils::password::{ARGON2_PREFIX, verify_password};

/// 客户端提交管理员口令的请求头
pub const ADMIN_PASSWORD_HEADER: &str = "X-Admin-Password";

/// 访问级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Admin,
}

/// 管理员可执行的操作
pub const ADMIN_ACTIONS: &[&str] = &["create", "import", "edit", "delete", "export"];
/// 所有人可执行的操作
pub const PUBLIC_ACTIONS: &[&str] = &["list", "detail", "qr", "cards"];

/// 当前请求的访问上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessContext {
    pub visibility: Visibility,
}

impl AccessContext {
    pub fn public() -> Self {
        Self {
            visibility: Visibility::Public,
        }
    }

    pub fn admin() -> Self {
        Self {
            visibility: Visibility::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.visibility == Visibility::Admin
    }

    /// 当前访问级别可用的操作
    pub fn actions(&self) -> Vec<&'static str> {
        let mut actions = PUBLIC_ACTIONS.to_vec();
        if self.is_admin() {
            actions.extend_from_slice(ADMIN_ACTIONS);
        }
        actions
    }
}

/// 访问策略，启动时由配置构建
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    admin_secret: Option<String>,
}

impl AccessPolicy {
    pub fn new(admin_secret: Option<String>) -> Self {
        Self {
            admin_secret: admin_secret.filter(|s| !s.is_empty()),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.admin_secret().map(str::to_string))
    }

    /// 是否配置了管理员口令
    pub fn is_protected(&self) -> bool {
        self.admin_secret.is_some()
    }

    /// 根据用户输入的口令计算访问级别
    pub fn resolve(&self, typed: Option<&str>) -> AccessContext {
        let Some(secret) = &self.admin_secret else {
            return AccessContext::admin();
        };

        let typed = typed.unwrap_or("");
        let granted = if secret.starts_with(ARGON2_PREFIX) {
            !typed.is_empty() && verify_password(typed, secret)
        } else {
            typed == secret
        };

        if granted {
            AccessContext::admin()
        } else {
            AccessContext::public()
        }
    }

    /// 从请求头读取口令并计算访问级别
    pub fn resolve_request(&self, req: &HttpRequest) -> AccessContext {
        let typed = req
            .headers()
            .get(ADMIN_PASSWORD_HEADER)
            .and_then(|h| h.to_str().ok());
        self.resolve(typed)
    }
}

/// 从请求中取出访问上下文
///
/// 优先使用 ResolveAccess 中间件写入的结果；未经过中间件时按 app data 中的策略现算，
/// 都没有时视为公开访问。
impl FromRequest for AccessContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(ctx) = req.extensions().get::<AccessContext>() {
            return ready(Ok(*ctx));
        }
        let ctx = req
            .app_data::<web::Data<AccessPolicy>>()
            .map(|policy| policy.resolve_request(req))
            .unwrap_or_else(AccessContext::public);
        ready(Ok(ctx))
    }
}
