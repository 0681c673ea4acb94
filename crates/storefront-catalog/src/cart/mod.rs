//! Shopping cart.

mod cart;

pub use cart::{Cart, LineItem, MAX_QUANTITY_PER_ITEM};
