pub mod aggregator;
pub mod percentile;

pub use aggregator::aggregate;
pub use percentile::percentile;
