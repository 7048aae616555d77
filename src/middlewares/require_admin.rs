/*!
 * 管理权限中间件
 *
 * 必须在 ResolveAccess 之后使用。新增、导入、编辑、删除、导出只对管理级别开放，
 * 公开级别的请求返回 403。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::web;
 * use crate::middlewares::RequireAdmin;
 *
 * web::resource("/api/v1/trabalhos/export")
 *     .wrap(RequireAdmin)
 *     .route(web::get().to(export_trabalhos))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use super::create_error_response;
use crate::access::AccessContext;

#[derive(Clone)]
pub struct RequireAdmin;

impl<S, B> Transform<S, ServiceRequest> for RequireAdmin
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAdminMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAdminMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireAdminMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireAdminMiddleware<S>
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
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, "").map_into_right_body(),
                ));
            }

            let is_admin = req
                .extensions()
                .get::<AccessContext>()
                .map(|ctx| ctx.is_admin())
                .unwrap_or(false);

            if is_admin {
                let res = srv.call(req).await?.map_into_left_body();
                return Ok(res);
            }

            info!("Admin access denied for {} {}", req.method(), req.path());
            Ok(req.into_response(
                create_error_response(
                    StatusCode::FORBIDDEN,
                    "Forbidden: admin password required",
                )
                .map_into_right_body(),
            ))
        })
    }
}
