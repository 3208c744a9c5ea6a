pub mod allowed;
pub mod limits;
pub mod threshold;
