pub mod audit;
pub mod dispatch;
pub mod import;
pub mod repair;
pub mod restore;

#[cfg(test)]
mod flow_tests;
