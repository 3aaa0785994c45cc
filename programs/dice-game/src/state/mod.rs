pub mod bet;
pub mod house;

pub use bet::*;
pub use house::*;
