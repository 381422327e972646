//! A terminal choices picker.
//!
//! Renders a list of options either as a radio-style choice group or as a
//! dropdown, optionally decorated with icons from a JSON configuration, and
//! reports selection changes through a callback. See [`picker::ChoicesPicker`].

pub mod picker;
pub mod theme;
