//! Console services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own state and mock data so route handlers can stay
//! focused on request translation, cookies, and rendering.

pub mod audit;
pub mod catalog;
pub mod feeds;
pub mod kv;
pub mod policy;
pub mod session;
pub mod tenancy;
pub mod ticker;
