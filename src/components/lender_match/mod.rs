mod card;
mod classify;
mod component;
mod config;
mod error;
mod hit_test;
mod interaction;
mod layout;
mod overlay;
mod render;
mod scheduler;
mod state;
mod types;

pub use component::LenderMatchCanvas;
pub use types::{Candidate, FilterCategory, FilterSelection};
