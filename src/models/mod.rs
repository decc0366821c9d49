pub mod critique;
pub mod record;
pub mod session;
pub mod tone;

pub use critique::*;
pub use record::*;
pub use session::*;
pub use tone::*;
