//! Rules datasets: document types, sources, the loader, and identity joins.

pub mod ability;
pub mod army;
pub mod dataset;
pub mod detachment;
pub mod library;
pub mod loader;
pub mod resolver;
pub mod settings;
pub mod source;
pub mod strategem;
pub mod unit;
