// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition and read-only catalog access.
// Middleware: none beyond the global layers

pub mod auth;
pub mod items;
