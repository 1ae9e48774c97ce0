pub mod hash;
pub mod random_text;
