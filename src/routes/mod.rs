pub mod pages;

pub mod session;

pub mod trabalhos;

pub use pages::configure_page_routes;
pub use session::configure_session_routes;
pub use trabalhos::configure_trabalhos_routes;
