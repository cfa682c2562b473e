pub mod abilities;
pub mod config;
pub mod delayed;
pub mod error;
pub mod events;
pub mod factory;
pub mod field;
pub mod hazards;
pub mod modifiers;
pub mod protection;
pub mod screens;
pub mod snapshot;
pub mod state;
pub mod suppression;
pub mod tags;
pub mod utils;
