pub mod dao;
pub mod proposal;
pub mod vote;

pub use dao::*;
pub use proposal::*;
pub use vote::*;
