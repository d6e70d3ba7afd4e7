pub mod config;
pub mod context;
pub mod hover;
pub mod subscription;
pub mod wheel;
