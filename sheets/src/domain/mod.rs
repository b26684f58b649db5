mod a1;
mod value_range;

pub use a1::*;
pub use value_range::*;
