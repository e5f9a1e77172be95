pub mod components;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod shutdown;
pub mod startup;
pub mod utils;
pub mod web;
