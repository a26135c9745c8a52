//! Paygate Xsolla - payment gateway bridge for forum purchase requests.
//!
//! Bridges the Xsolla hosted checkout and its asynchronous webhook
//! notifications into the forum platform's purchase request lifecycle
//! (pending -> paid).

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
