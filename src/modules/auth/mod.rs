//! Login, refresh-token rotation and logout.

pub mod controller;
pub mod router;
pub mod service;
