/// Set of functions used throughout assure the correctness of the library.
pub mod assertions;

mod config;

#[doc(inline)]
pub use config::BinSelection;
#[doc(inline)]
pub use config::ConsolidationStrategy;
#[doc(inline)]
pub use config::CutConfig;
#[doc(inline)]
pub use config::MaxRectsHeuristic;
#[doc(inline)]
pub use config::OracleConfig;
