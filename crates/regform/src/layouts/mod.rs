// Layouts module
// Page shells shared by the form, error and confirmation pages

pub mod root;

pub use root::{layout, Slots};
