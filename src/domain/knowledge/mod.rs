//! Breed knowledge - static fact sheets and name resolution

mod catalog;
mod fact_sheet;

pub use catalog::{BreedKnowledge, FactLookup, MatchTier};
pub use fact_sheet::BreedFactSheet;
