//! Test helpers for behemoth-rest.

#![allow(dead_code, unused_imports)]

pub mod app;
pub mod client;
pub mod fakes;

pub use app::TestApp;
pub use client::{TestClient, TestResponse};
pub use fakes::*;
