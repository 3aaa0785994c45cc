pub mod calculations;
pub mod randomness;
pub mod validation;

pub use calculations::*;
pub use randomness::*;
pub use validation::*;
