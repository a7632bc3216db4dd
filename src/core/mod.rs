pub mod absorption;
pub mod emissions;
pub mod format;
pub mod production;
pub mod regional;
pub mod units;
