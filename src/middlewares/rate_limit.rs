/*!
 * 限流中间件
 *
 * 按客户端 IP 计数，每分钟一个窗口。管理员口令通过请求头逐次提交，
 * 限流可以拖慢对口令的穷举。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * web::scope("/api/v1/trabalhos")
 *     .wrap(RateLimit::api(&AppConfig::get().rate_limit))
 *     .service(
 *         web::resource("/import")
 *             .wrap(RateLimit::import())
 *             .route(web::post().to(import_trabalhos)),
 *     )
 * ```
 *
 * 不同的限流器通过前缀分开计数，超限返回 429。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{CONTENT_TYPE, HeaderName, HeaderValue, RETRY_AFTER},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::config::RateLimitConfig;
use crate::models::{ApiResponse, ErrorCode};

/// 计数窗口（秒）
const WINDOW_SECS: u64 = 60;

/// 导入接口每分钟允许的次数
const IMPORT_PER_MINUTE: u32 = 10;

/// 所有限流器共享的计数表，键为 `前缀:IP`
static HITS: Lazy<Cache<String, u32>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(WINDOW_SECS))
        .max_capacity(100_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    key_prefix: &'static str,
}

impl RateLimit {
    pub fn new(key_prefix: &'static str, max_requests: u32) -> Self {
        Self {
            max_requests,
            key_prefix,
        }
    }

    /// 导入接口：10 次/分钟/IP
    pub fn import() -> Self {
        Self::new("import", IMPORT_PER_MINUTE)
    }

    /// 整个 API：次数来自配置
    pub fn api(config: &RateLimitConfig) -> Self {
        Self::new("api", config.max_requests_per_minute)
    }
}

/// 记录一次请求，返回窗口内剩余次数；超限时返回 None
///
/// 读取与自增在同一个 entry 上原子完成，并发请求不会丢失计数。
pub(crate) async fn hit(key: String, max_requests: u32) -> Option<u32> {
    let entry = HITS
        .entry(key.clone())
        .and_upsert_with(|current| {
            let used = current.map(|e| e.into_value()).unwrap_or(0);
            ready(used.saturating_add(1))
        })
        .await;
    let used = entry.into_value();
    if used > max_requests {
        warn!("Rate limit exceeded for {} ({}/{})", key, used, max_requests);
        return None;
    }
    Some(max_requests - used)
}

/// 窗口内已记录的次数，不计入本次
pub(crate) async fn recorded(key: &str) -> u32 {
    HITS.get(key).await.unwrap_or(0)
}

/// 客户端地址，反向代理场景下取 Forwarded / X-Forwarded-For
pub(crate) fn client_key(req: &ServiceRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub(crate) fn too_many_requests() -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header((RETRY_AFTER, WINDOW_SECS.to_string()))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let RateLimit {
            max_requests,
            key_prefix,
        } = self.limit.clone();

        Box::pin(async move {
            let key = format!("{}:{}", key_prefix, client_key(&req));

            let Some(remaining) = hit(key, max_requests).await else {
                return Ok(req.into_response(too_many_requests().map_into_right_body()));
            };

            let mut res = srv.call(req).await?;
            let headers = res.headers_mut();
            headers.insert(
                HeaderName::from_static("x-ratelimit-limit"),
                HeaderValue::from(max_requests),
            );
            headers.insert(
                HeaderName::from_static("x-ratelimit-remaining"),
                HeaderValue::from(remaining),
            );
            Ok(res.map_into_left_body())
        })
    }
}
