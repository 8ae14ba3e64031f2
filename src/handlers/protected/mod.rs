// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every route here is wrapped in bearer_auth_middleware, which rejects the
// request with 401 before the handler runs and otherwise injects AuthUser.

pub mod items;
