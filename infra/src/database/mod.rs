//! Database layer: connection pooling and the MySQL account store.

pub mod connection;
pub mod mysql;

pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::MySqlAccountRepository;

#[cfg(test)]
mod tests;
