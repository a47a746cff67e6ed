//! VisCend application services: verification challenges, contract storage,
//! code delivery and contract backends.

pub mod client;
pub mod context;
pub mod database;
pub mod delivery;
pub mod domain;

#[cfg(test)]
mod test;

pub mod uuids;
