pub mod fallback;
pub mod home;
pub mod prediction;
pub mod system;
pub mod unimplemented;
