//! VisCend Domain Concerns

pub mod challenges;
pub mod contracts;
pub mod memory;
pub mod submissions;
