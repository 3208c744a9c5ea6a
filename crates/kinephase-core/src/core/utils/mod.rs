pub mod lorentz;
pub mod range;
