pub mod api;
mod app;
pub mod camera;
pub mod config;
pub mod dom;
pub mod error;
pub mod events;
pub mod net;
pub mod palette;
pub mod reconnect;
pub mod render;
pub mod sse;
pub mod state;

pub use app::run;
