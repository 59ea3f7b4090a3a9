pub mod docs;
pub mod evaluation;
pub mod feedback;
pub mod health;
pub mod questions;
pub mod speech;
