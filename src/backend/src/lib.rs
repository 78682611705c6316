pub mod api;
pub mod config;
pub mod http_client;
pub mod llm_client;
pub mod middleware;
pub mod services;
