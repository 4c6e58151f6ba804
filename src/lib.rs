pub mod audit;
pub mod config;
pub mod db;
pub mod dto;
pub mod entity;
pub mod error;
pub mod migration;
pub mod params;
pub mod services;
pub mod state;
pub mod validation;
