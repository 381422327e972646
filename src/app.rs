use crossterm::event::{KeyCode, KeyEvent};
use std::time::Instant;

use choices_picker::picker::{ChoicesPicker, FormFactor, InteractionState, PickerProps, View};
use choices_picker::theme::Theme;

use crate::config::HostConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

/// The host: owns the props (including the selected value) and re-renders
/// the picker from them
pub struct App {
    pub props: PickerProps,
    pub picker: ChoicesPicker,
    pub theme: Theme,
    pub popup: Popup,

    // Status message (auto-clears after a few seconds)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
}

impl App {
    pub fn new(config: &HostConfig) -> Self {
        Self {
            props: config.props(),
            picker: ChoicesPicker::new(),
            theme: Theme::load(config.theme_file.as_deref()),
            popup: Popup::None,
            status_message: None,
            status_message_time: None,
        }
    }

    pub fn view(&mut self) -> View {
        self.picker.render(&self.props)
    }

    /// Set a status message (auto-clears after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.popup != Popup::None {
            // Any key closes the help popup
            self.popup = Popup::None;
            return;
        }

        let mut changed = None;
        if self.picker.handle_key(&self.props, key, |value| changed = Some(value)) {
            if let Some(value) = changed {
                self.apply_selection(value);
            }
            return;
        }

        match key.code {
            KeyCode::Char('f') => {
                self.props.form_factor = match self.props.form_factor {
                    FormFactor::Small => FormFactor::Large,
                    FormFactor::Large => FormFactor::Small,
                };
                self.picker.state = InteractionState::default();
                self.set_status(format!("Form factor: {:?}", self.props.form_factor));
            }
            KeyCode::Char('m') => {
                self.props.masked = !self.props.masked;
                self.picker.state = InteractionState::default();
                self.set_status(if self.props.masked { "Masked" } else { "Unmasked" });
            }
            KeyCode::Char('d') => {
                self.props.disabled = !self.props.disabled;
                self.picker.state = InteractionState::default();
                self.set_status(if self.props.disabled { "Disabled" } else { "Enabled" });
            }
            KeyCode::Char('?') => self.popup = Popup::Help,
            _ => {}
        }
    }

    /// Echo a reported change back into the props for the next render
    fn apply_selection(&mut self, value: Option<i64>) {
        tracing::info!("Selection changed to {:?}", value);
        self.props.value = value;

        let label = value
            .and_then(|v| self.props.options.iter().find(|o| o.value == v))
            .map(|o| o.label.clone());
        match label {
            Some(label) => self.set_status(format!("Selected {}", label)),
            None => self.set_status("Selection cleared"),
        }
    }

    pub fn tick(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}
