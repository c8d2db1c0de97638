pub mod api;
pub mod app;
pub mod chat;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod message;
pub mod paths;
pub mod session;
pub mod transcript;
