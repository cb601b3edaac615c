//! Home page navigation cards.

mod cards;

pub use cards::{cards, Card};
