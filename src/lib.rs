pub mod config;
pub mod constants;
pub mod database;
pub mod db_store;
pub mod error;
pub mod handlers;
pub mod inheritance;
pub mod models;
pub mod month;
pub mod ratio;
pub mod service;
pub mod status;
pub mod store;
pub mod summary;
pub mod utils;
