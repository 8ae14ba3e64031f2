// handlers/mod.rs - two security tiers
//
// Public (no auth) → Protected (bearer token required)
pub mod public; // Registration, login and item reads
pub mod protected; // Item mutations, behind bearer_auth_middleware
