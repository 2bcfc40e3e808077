pub mod limits;
pub mod parallel;
pub mod results;
pub mod searcher;

pub use limits::*;
pub use parallel::*;
pub use results::*;
pub use searcher::*;
