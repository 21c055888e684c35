mod broadcast;
mod elementwise;
mod quantize;

pub use self::broadcast::*;
pub use self::elementwise::*;
pub use self::quantize::*;
