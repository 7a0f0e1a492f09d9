pub mod core;
pub mod db;
pub mod models;
pub mod routes;
pub mod session_sync_web_server;
