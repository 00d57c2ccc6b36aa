pub mod app;
pub mod feeds;

pub use app::AppConfig;
