pub mod compose;
pub mod context;
pub mod error;
pub mod outlet;
pub mod research;
pub mod workflow;

#[cfg(test)]
pub mod testing;
