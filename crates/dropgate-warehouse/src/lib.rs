//! # dropgate warehouse
//!
//! The data side of the gateway: turning a data-type definition and a search
//! term into a parameterized query, and the [`DataSource`] interface that runs it.
//! The real warehouse driver lives outside this workspace; two built-in sources
//! cover offline use:
//!
//! - [`MockDataSource`] serves fixed rows for local testing
//! - [`UnavailableDataSource`] fails every call when no connection could be made

pub mod error;
pub mod mock;
pub mod query;
pub mod source;
pub mod unavailable;

pub use error::{Result, WarehouseError};
pub use mock::MockDataSource;
pub use query::{QueryBuilder, QueryParam, QuerySource, WarehouseQuery};
pub use source::{DataSource, QueryResult, Row};
pub use unavailable::UnavailableDataSource;
