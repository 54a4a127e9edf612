// Join launches with rockets, then derive the aggregate views

pub mod aggregate;
pub mod enrich;
pub mod views;

pub use aggregate::{frequency, group_by, GroupKey, Groups, Keyed, Tally};
pub use enrich::{enrich, RocketIndex};
