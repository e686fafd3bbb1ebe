pub mod beam;
pub mod board;
pub mod event;
pub mod level;
pub mod progress;
pub mod trace;
pub mod world;
