// Portfolio records: storage accessor, seed routine and read-only handlers.
// Handlers only ever read; the seed routine is the sole writer.

pub mod handlers;
#[cfg(test)]
pub mod memory;
pub mod postgres;
pub mod seed;
pub mod store;

pub use postgres::PgPortfolioStore;
pub use store::PortfolioStore;
