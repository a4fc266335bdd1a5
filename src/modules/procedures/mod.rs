//! Stored procedure invocation
//!
//! Builds named-parameter procedure calls and normalizes their tabular
//! results into ordered, JSON-safe records.

mod call;
mod decode;
mod record;

#[cfg(test)]
pub use call::ProcedureParam;
pub use call::ProcedureCall;
pub use record::{Record, ScalarValue};
