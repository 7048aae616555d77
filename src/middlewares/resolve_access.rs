/*!
 * 访问级别解析中间件
 *
 * 每个请求计算一次访问上下文并写入请求扩展，处理函数通过 `AccessContext` 提取器取用。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::access::{AccessContext, AccessPolicy};
 * use crate::middlewares::ResolveAccess;
 *
 * App::new()
 *     .app_data(web::Data::new(AccessPolicy::new(Some("segredo".into()))))
 *     .wrap(ResolveAccess::new(20))
 *     .route("/whoami", web::get().to(|ctx: AccessContext| async move {
 *         format!("{:?}", ctx.visibility)
 *     }))
 * ```
 *
 * ## 解析流程
 *
 * 1. 客户端在请求头 `X-Admin-Password` 中提交口令（可选）
 * 2. 中间件按 app data 中的 `AccessPolicy` 计算访问级别
 * 3. 结果存入请求扩展，请求继续向下传递
 *
 * 口令错误按客户端 IP 计数，窗口内错误次数达到上限后，带口令的请求一律返回 429，
 * 不再校验口令；不带口令的请求照常以公开级别放行。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, warn};

use super::rate_limit::{client_key, hit, recorded, too_many_requests};
use crate::access::{ADMIN_PASSWORD_HEADER, AccessContext, AccessPolicy};

#[derive(Clone)]
pub struct ResolveAccess {
    max_failures: u32,
}

impl ResolveAccess {
    /// `max_failures`：每个 IP 每分钟允许的口令错误次数
    pub fn new(max_failures: u32) -> Self {
        Self { max_failures }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ResolveAccess
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ResolveAccessMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ResolveAccessMiddleware {
            service: Rc::new(service),
            max_failures: self.max_failures,
        }))
    }
}

pub struct ResolveAccessMiddleware<S> {
    service: Rc<S>,
    max_failures: u32,
}

impl<S, B> Service<ServiceRequest> for ResolveAccessMiddleware<S>
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
        let max_failures = self.max_failures;

        Box::pin(async move {
            let policy = req.app_data::<web::Data<AccessPolicy>>().cloned();
            let submitted = req.headers().contains_key(ADMIN_PASSWORD_HEADER);

            let ctx = match policy {
                Some(policy) if policy.is_protected() && submitted => {
                    let key = format!("admin:{}", client_key(&req));
                    if recorded(&key).await >= max_failures {
                        warn!("Admin password attempts throttled for {}", key);
                        return Ok(req.into_response(too_many_requests().map_into_right_body()));
                    }

                    let ctx = policy.resolve_request(req.request());
                    if !ctx.is_admin() {
                        warn!("Wrong admin password from {}", key);
                        hit(key, max_failures).await;
                    }
                    ctx
                }
                Some(policy) => policy.resolve_request(req.request()),
                // 未注册策略时视为公开访问
                None => AccessContext::public(),
            };

            debug!("Resolved {:?} access for {}", ctx.visibility, req.path());
            req.extensions_mut().insert(ctx);
            let res = srv.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
