pub mod math;
pub mod string;
