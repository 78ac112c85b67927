pub mod config;
pub mod enums;
pub mod error;
pub mod analytics;
pub mod db;
pub mod locks;
pub mod services;
pub mod api;
pub mod scheduler;

pub use config::Config;
pub use enums::{ AlertLevel, AlertType, Direction, IndicatorType };
pub use error::{ AppError, Result };
