pub mod store_seed;

pub use store_seed::*;
