pub mod aliases;
pub mod auth;
pub mod cli;
pub mod context;
pub mod models;
pub mod observable;
pub mod optimistic;
pub mod persist;
pub mod repository;
pub mod types;
