pub mod seed;
pub mod state;
