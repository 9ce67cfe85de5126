pub mod booter;
pub mod config;
pub mod gate;
pub mod server;
pub mod upload;
pub mod utils;
