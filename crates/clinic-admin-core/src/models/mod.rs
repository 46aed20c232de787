//! Domain models for the clinic administration system.

mod appointment;
mod doctor;
mod patient;

pub use appointment::*;
pub use doctor::*;
pub use patient::*;
