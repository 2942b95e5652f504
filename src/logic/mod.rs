pub mod calendar;
pub mod context;
pub mod rules;

pub use rules::RulesEngine;
