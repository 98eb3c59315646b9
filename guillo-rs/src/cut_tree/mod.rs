mod generator;

#[doc(inline)]
pub use generator::CutPlan;
#[doc(inline)]
pub use generator::generate_cuts;
#[doc(inline)]
pub use generator::plan_cuts;
