// Instructions module exports
pub mod cast_vote;
pub mod finalize_proposal;
pub mod init_dao;
pub mod init_proposal;

pub use cast_vote::*;
pub use finalize_proposal::*;
pub use init_dao::*;
pub use init_proposal::*;
