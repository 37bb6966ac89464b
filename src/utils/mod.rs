pub mod messenger;

pub use messenger::{Messenger, Prompt, Render};
