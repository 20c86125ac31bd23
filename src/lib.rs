pub mod app;
pub mod config;
pub mod errors;
pub mod feed;
pub mod handlers;
pub mod models;
pub mod poller;
pub mod stats;
pub mod summary;
pub mod ui;
pub mod state;
pub mod window;

pub use app::router;
pub use config::Config;
pub use feed::FeedClient;
pub use poller::Poller;
pub use state::AppState;
