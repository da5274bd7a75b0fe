pub mod lookup;
pub mod serve;

// Re-export command functions for convenience
pub use lookup::lookup;
pub use serve::{serve, ServeParams};
