pub mod ai;
pub mod calculators;
pub mod engine;
pub mod state;
pub mod view;

#[cfg(test)]
mod tests;
