pub mod hibp;

pub use hibp::{BreachClient, LookupFailure};
