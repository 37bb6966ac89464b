pub mod commands;
pub mod config;
pub mod events;
pub mod mask;
pub mod pending;
pub mod utils;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

pub struct Data {
    pub pending_radii: pending::PendingRadii,
    pub mask_api: mask::MaskApi,
}
