mod confirm;
mod form;
mod input;
mod nav_bar;
mod status_bar;

pub use confirm::{ConfirmAnswer, ConfirmDialog};
pub use form::{FIELD_HEIGHT, Form, FormEvent};
pub use input::TextInput;
pub use nav_bar::NavBar;
pub use status_bar::StatusBar;
