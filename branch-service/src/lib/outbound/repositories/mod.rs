pub mod branch;

pub use branch::PostgresBranchRepository;
