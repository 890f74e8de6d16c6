mod playback;
mod route;
mod station;

pub use playback::*;
pub use route::*;
pub use station::*;
