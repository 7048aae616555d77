use actix_cors::Cors;
use actix_web::middleware::{Compress, DefaultHeaders};
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use human_panic::setup_panic;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

use trabalhos_qr::config::AppConfig;
use trabalhos_qr::middlewares::ResolveAccess;
use trabalhos_qr::routes;
use trabalhos_qr::runtime::{lifetime, logging};
use trabalhos_qr::utils::password::hash_password;
use trabalhos_qr::utils::{json_error_handler, query_error_handler};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    let started = Instant::now();

    // `trabalhos-qr hash-password <口令>`：输出可写入 admin.password 的 argon2 哈希
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(String::as_str) == Some("hash-password") {
        let Some(password) = args.get(2) else {
            eprintln!("Usage: {} hash-password <password>", env!("CARGO_PKG_NAME"));
            std::process::exit(2);
        };
        return match hash_password(password) {
            Ok(hash) => {
                println!("{hash}");
                Ok(())
            }
            Err(e) => Err(std::io::Error::other(e.to_string())),
        };
    }

    setup_panic!();
    if let Err(e) = AppConfig::init() {
        eprintln!("Failed to initialize configuration: {e}");
        std::process::exit(1);
    }
    let config = AppConfig::get();

    let _log_guard = logging::init_tracing(config);

    warn!(
        "Starting {} {} ({})",
        config.app.system_name,
        env!("CARGO_PKG_VERSION"),
        config.app.environment
    );

    let startup = match lifetime::startup::prepare_server_startup().await {
        Ok(startup) => startup,
        Err(e) => {
            error!("{}", e.format_simple());
            return Err(std::io::Error::other(e.to_string()));
        }
    };
    let lifetime::startup::StartupContext {
        storage,
        access,
        qr,
    } = startup;

    debug!(
        "Startup completed in {} ms",
        started.elapsed().as_millis()
    );
    warn!("Using {} worker(s)", config.server.workers);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(config.cors.max_age),
            )
            // 每个请求解析一次访问级别，口令错误过多时限流
            .wrap(ResolveAccess::new(
                config.rate_limit.admin_failures_per_minute,
            ))
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PayloadConfig::new(
                config.server.limits.max_payload_size,
            ))
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(access.clone()))
            .app_data(web::Data::new(qr.clone()))
            .configure(routes::configure_session_routes)
            .configure(routes::configure_trabalhos_routes)
            .configure(routes::configure_page_routes)
    })
    .keep_alive(Duration::from_secs(config.server.timeouts.keep_alive))
    .client_request_timeout(Duration::from_millis(
        config.server.timeouts.client_request,
    ))
    .client_disconnect_timeout(Duration::from_millis(
        config.server.timeouts.client_disconnect,
    ))
    .workers(config.server.workers);

    #[cfg(unix)]
    let server = match config.unix_socket_path() {
        Some(socket_path) => {
            warn!("Listening on Unix socket {}", socket_path);
            // 清理上次遗留的套接字文件
            if std::path::Path::new(socket_path).exists() {
                std::fs::remove_file(socket_path)?;
            }
            server.bind_uds(socket_path)?
        }
        None => {
            let address = config.server_bind_address();
            warn!("Listening on http://{}", address);
            server.bind(address)?
        }
    };

    #[cfg(not(unix))]
    let server = {
        let address = config.server_bind_address();
        warn!("Listening on http://{}", address);
        server.bind(address)?
    };

    tokio::select! {
        res = server.run() => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("Graceful shutdown: all tasks completed");
        }
    }

    Ok(())
}
