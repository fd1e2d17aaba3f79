pub mod normalize;
pub mod report;
pub mod runner;
pub mod suite;
pub mod testcase;
pub mod verdict;

pub use normalize::*;
pub use report::*;
pub use runner::*;
pub use suite::*;
pub use testcase::*;
pub use verdict::*;
