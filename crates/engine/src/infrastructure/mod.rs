//! Infrastructure adapters and the port traits they implement.

pub mod clock;
pub mod ports;
pub mod sqlite;
