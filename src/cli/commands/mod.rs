mod export;
mod rotate_key;
mod seed;
mod stats;

pub use export::cmd_export;
pub use rotate_key::cmd_rotate_key;
pub use seed::cmd_seed;
pub use stats::cmd_stats;
