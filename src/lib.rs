pub mod catalog;
pub mod coingecko;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod export;
pub mod models;
pub mod prices;
