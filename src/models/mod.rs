pub mod advice;
pub mod health;
pub mod scheme;
pub mod soil;
pub mod symptom;

pub use advice::*;
pub use health::*;
pub use scheme::*;
pub use soil::*;
pub use symptom::*;
