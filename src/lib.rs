mod dfa;
#[cfg(feature = "graphs")]
mod graphviz;
mod nfa;
mod table;
mod tests;
mod traits;

pub use dfa::*;
#[cfg(feature = "graphs")]
pub use graphviz::*;
pub use nfa::*;
pub use table::*;
pub use traits::*;
