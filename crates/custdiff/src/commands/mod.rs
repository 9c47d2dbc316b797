pub mod common;
pub mod reconcile;

pub use common::RunOptions;
pub use reconcile::Reconcile;
