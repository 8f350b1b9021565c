pub mod actions;
mod app_state;
mod bubble;
mod bubble_list;
pub mod events;
mod order_updates;
mod scroll;

pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use order_updates::*;
pub use scroll::*;
