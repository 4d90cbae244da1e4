//! Functional core for the company dashboard.
//!
//! Everything in this crate is free of I/O: key construction for the
//! single-table layout, the query shapes issued against the store, the
//! storage traits implemented by the server crate, and the pure rules used to
//! assemble a dashboard response.

pub mod dashboard;
pub mod storage;
