//! Value objects shared across the domain.

mod attribute;
mod stat_change;

pub use attribute::Attribute;
pub use stat_change::{parse_stat_changes, StatChange};
