//! Client library for the EchoBulletin news API.
//!
//! - [`planner`]: which endpoint a filter combination calls
//! - [`presenter`]: sentiment badge, source label and date for one article
//! - [`state`] and [`page`]: filter transitions and the page controller
//! - [`api`]: HTTP transport and typed endpoint access
//! - [`outputs`]: Markdown and JSON rendering

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod outputs;
pub mod page;
pub mod planner;
pub mod presenter;
pub mod state;
pub mod utils;
