pub mod cell;
pub mod error;
pub mod factory;
pub mod formula;
pub mod layout;
pub mod mutate;
pub mod rewrite;
pub mod rows;
pub mod sheet;
pub mod ticket;
