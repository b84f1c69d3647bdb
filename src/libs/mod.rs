pub mod error;
pub mod filter;
pub mod io;
pub mod psl;
pub mod relation;
pub mod report;
