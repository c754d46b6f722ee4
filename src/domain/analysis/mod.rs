pub mod entities;
pub mod heuristics;
pub mod matcher;
pub mod normalize;
pub mod ports;
pub mod services;

pub use entities::*;
pub use normalize::*;
pub use ports::*;
