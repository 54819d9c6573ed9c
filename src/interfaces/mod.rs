//! Outer adapters. Only the REST API lives here.

pub mod http;
