mod display_surface;

pub use display_surface::{ConsoleDisplay, Cue, DisplayNode, DisplaySurface, TextSlot};

#[cfg(test)]
pub mod test_support;
