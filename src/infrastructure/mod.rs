pub mod config;
pub mod http;
pub mod janitor;
pub mod middleware;
pub mod repositories;
