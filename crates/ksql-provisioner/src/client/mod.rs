//! ksqlDB REST client.

mod ksql;
pub mod response;

#[cfg(test)]
pub(crate) mod mock;

pub use ksql::{KsqlClient, KSQL_CONTENT_TYPE};
