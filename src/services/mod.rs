pub mod enricher;
pub mod exa_client;

pub use enricher::*;
pub use exa_client::*;
