pub mod builders;
pub mod harness;
