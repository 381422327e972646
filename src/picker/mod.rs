//! The choices picker control
//!
//! A picker is a pure function of its [`PickerProps`]: every render pass turns
//! the props into a [`View`] (drawn by [`PickerWidget`]). The selected value is
//! owned by the host; user changes are reported through an `on_change`
//! callback and only show up once the host passes the new value back in.

pub mod icons;
pub mod items;
mod widget;

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent};
use serde::{Deserialize, Serialize};

pub use icons::{ConfigurationParseError, IconMapping, IconProps};
pub use items::{ChoiceItem, DerivedItems, DropdownData, DropdownItem, ItemsCache, OptionMetadata};
pub use widget::PickerWidget;

/// Shown instead of the selector when masked
pub const MASK: &str = "****";

/// Dropdown text for the unselected state
pub const PLACEHOLDER: &str = "---";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FormFactor {
    /// Dropdown
    #[default]
    Small,
    /// Choice group
    Large,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerProps {
    pub label: String,
    pub value: Option<i64>,
    pub options: Vec<OptionMetadata>,
    pub form_factor: FormFactor,
    /// JSON object mapping option values to icon names
    pub configuration: Option<String>,
    pub disabled: bool,
    pub masked: bool,
}

impl PickerProps {
    fn selected_key(&self) -> Option<String> {
        self.value.map(|v| v.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceGroupView {
    pub label: String,
    pub options: Vec<ChoiceItem>,
    pub selected_key: Option<String>,
    pub disabled: bool,
}

impl ChoiceGroupView {
    pub fn is_selected(&self, item: &ChoiceItem) -> bool {
        self.selected_key.as_deref() == Some(item.key.as_str())
    }

    /// Row that takes focus before the user has moved: the selection, else the first row
    pub fn initial_focus(&self) -> usize {
        self.options
            .iter()
            .position(|item| self.is_selected(item))
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownView {
    pub label: String,
    pub aria_label: String,
    pub placeholder: String,
    pub options: Vec<DropdownItem>,
    pub selected_key: Option<String>,
    pub disabled: bool,
}

impl DropdownView {
    /// The entry shown in the collapsed title, if any matches the selection
    pub fn title(&self) -> Option<&DropdownItem> {
        let key = self.selected_key.as_deref()?;
        self.options.iter().find(|item| item.key == key)
    }

    pub fn is_selected(&self, item: &DropdownItem) -> bool {
        self.selected_key.as_deref() == Some(item.key.as_str())
    }
}

/// Render tree for one pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum View {
    Error { message: String },
    Masked { text: String },
    ChoiceGroup(ChoiceGroupView),
    Dropdown(DropdownView),
}

/// Keyboard focus inside the control. Never holds the selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionState {
    /// Focused choice-group row; unset until the user moves, then the selected row is used
    pub focus: Option<usize>,
    /// Dropdown expanded
    pub open: bool,
    /// Highlighted dropdown row; 0 is the placeholder
    pub highlight: usize,
}

#[derive(Debug, Default)]
pub struct ChoicesPicker {
    cache: ItemsCache,
    pub state: InteractionState,
}

impl ChoicesPicker {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(&mut self, props: &PickerProps) -> Rc<DerivedItems> {
        self.cache.get(&props.options, props.configuration.as_deref())
    }

    /// Render pass: build the view for the current props
    pub fn render(&mut self, props: &PickerProps) -> View {
        let items = self.items(props);

        if let Some(message) = &items.error {
            return View::Error {
                message: message.clone(),
            };
        }

        if props.masked {
            return View::Masked {
                text: MASK.to_string(),
            };
        }

        match props.form_factor {
            FormFactor::Large => View::ChoiceGroup(ChoiceGroupView {
                label: props.label.clone(),
                options: items.choices.clone(),
                selected_key: props.selected_key(),
                disabled: props.disabled,
            }),
            FormFactor::Small => View::Dropdown(DropdownView {
                label: props.label.clone(),
                aria_label: props.label.clone(),
                placeholder: PLACEHOLDER.to_string(),
                options: items.dropdown.clone(),
                selected_key: props.selected_key(),
                disabled: props.disabled,
            }),
        }
    }

    /// A choice-group item was picked (or the group cleared)
    pub fn on_choice_change(
        &self,
        option: Option<&ChoiceItem>,
        mut on_change: impl FnMut(Option<i64>),
    ) {
        on_change(option.map(|item| item.value));
    }

    /// A dropdown entry was picked; `None` is the placeholder
    pub fn on_dropdown_change(
        &self,
        option: Option<&DropdownItem>,
        mut on_change: impl FnMut(Option<i64>),
    ) {
        on_change(option.map(|item| item.data.value));
    }

    /// Route a key press. Returns whether the picker consumed it.
    pub fn handle_key(
        &mut self,
        props: &PickerProps,
        key: KeyEvent,
        on_change: impl FnMut(Option<i64>),
    ) -> bool {
        let items = self.items(props);
        if items.error.is_some() || props.masked || props.disabled {
            return false;
        }

        match props.form_factor {
            FormFactor::Large => self.handle_choice_key(props, &items.choices, key, on_change),
            FormFactor::Small => self.handle_dropdown_key(props, &items.dropdown, key, on_change),
        }
    }

    fn handle_choice_key(
        &mut self,
        props: &PickerProps,
        choices: &[ChoiceItem],
        key: KeyEvent,
        on_change: impl FnMut(Option<i64>),
    ) -> bool {
        if choices.is_empty() {
            return false;
        }
        let last = choices.len() - 1;
        let focus = self
            .state
            .focus
            .or_else(|| props.value.and_then(|v| choices.iter().position(|c| c.value == v)))
            .unwrap_or(0)
            .min(last);

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.state.focus = Some((focus + 1).min(last)),
            KeyCode::Up | KeyCode::Char('k') => self.state.focus = Some(focus.saturating_sub(1)),
            KeyCode::Home => self.state.focus = Some(0),
            KeyCode::End => self.state.focus = Some(last),
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.state.focus = Some(focus);
                let item = &choices[focus];
                if props.value != Some(item.value) {
                    self.on_choice_change(Some(item), on_change);
                }
            }
            _ => return false,
        }
        true
    }

    fn handle_dropdown_key(
        &mut self,
        props: &PickerProps,
        entries: &[DropdownItem],
        key: KeyEvent,
        on_change: impl FnMut(Option<i64>),
    ) -> bool {
        if !self.state.open {
            return match key.code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => {
                    self.state.open = true;
                    // Start on the selected row, else the placeholder
                    self.state.highlight = props
                        .value
                        .and_then(|v| entries.iter().position(|item| item.data.value == v))
                        .map_or(0, |i| i + 1);
                    true
                }
                _ => false,
            };
        }

        // Row 0 is the placeholder
        let last = entries.len();
        let highlight = self.state.highlight.min(last);

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.state.highlight = (highlight + 1).min(last),
            KeyCode::Up | KeyCode::Char('k') => self.state.highlight = highlight.saturating_sub(1),
            KeyCode::Home => self.state.highlight = 0,
            KeyCode::End => self.state.highlight = last,
            KeyCode::Esc => self.state.open = false,
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.state.open = false;
                let picked = highlight.checked_sub(1).and_then(|i| entries.get(i));
                let new_value = picked.map(|item| item.data.value);
                if new_value != props.value {
                    self.on_dropdown_change(picked, on_change);
                }
            }
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn props(form_factor: FormFactor) -> PickerProps {
        PickerProps {
            label: "Preferred contact".to_string(),
            value: None,
            options: vec![
                OptionMetadata::new(1, "Email"),
                OptionMetadata::new(2, "Phone"),
                OptionMetadata::new(3, "Fax"),
            ],
            form_factor,
            configuration: None,
            disabled: false,
            masked: false,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Feed keys, collecting every callback invocation
    fn press(
        picker: &mut ChoicesPicker,
        props: &PickerProps,
        codes: &[KeyCode],
    ) -> Vec<Option<i64>> {
        let mut calls = Vec::new();
        for code in codes {
            picker.handle_key(props, key(*code), |v| calls.push(v));
        }
        calls
    }

    #[test]
    fn test_large_renders_choice_group() {
        let mut picker = ChoicesPicker::new();
        let view = picker.render(&props(FormFactor::Large));

        let View::ChoiceGroup(group) = view else {
            panic!("expected a choice group");
        };
        assert_eq!(group.label, "Preferred contact");
        assert_eq!(group.options.len(), 3);
        let labels: Vec<&str> = group.options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(labels, ["Email", "Phone", "Fax"]);
        assert!(group.options.iter().all(|o| o.icon.is_none()));
        assert_eq!(group.selected_key, None);
        assert!(!group.disabled);
    }

    #[test]
    fn test_small_renders_dropdown() {
        let mut p = props(FormFactor::Small);
        p.value = Some(2);
        p.disabled = true;
        p.configuration = Some(r#"{"2":"Phone"}"#.to_string());

        let View::Dropdown(dropdown) = ChoicesPicker::new().render(&p) else {
            panic!("expected a dropdown");
        };
        assert_eq!(dropdown.aria_label, "Preferred contact");
        assert_eq!(dropdown.placeholder, PLACEHOLDER);
        assert_eq!(dropdown.selected_key.as_deref(), Some("2"));
        assert!(dropdown.disabled);

        let title = dropdown.title().unwrap();
        assert_eq!(title.text, "Phone");
        assert_eq!(title.data.value, 2);
        assert_eq!(title.data.icon.as_ref().map(|i| i.title.as_str()), Some("Phone"));
    }

    #[test]
    fn test_icons_follow_mapping() {
        let mut p = props(FormFactor::Large);
        p.configuration = Some(r#"{"1":"Mail","3":"Print"}"#.to_string());

        let View::ChoiceGroup(group) = ChoicesPicker::new().render(&p) else {
            panic!("expected a choice group");
        };
        let icons: Vec<Option<&str>> = group
            .options
            .iter()
            .map(|o| o.icon.as_ref().map(|i| i.icon_name.as_str()))
            .collect();
        assert_eq!(icons, [Some("Mail"), None, Some("Print")]);
    }

    #[test]
    fn test_invalid_configuration_wins_over_everything() {
        for form_factor in [FormFactor::Small, FormFactor::Large] {
            for masked in [false, true] {
                let mut p = props(form_factor);
                p.masked = masked;
                p.configuration = Some("not json".to_string());

                let view = ChoicesPicker::new().render(&p);
                assert_eq!(
                    view,
                    View::Error {
                        message: "Invalid configuration: 'not json'".to_string()
                    }
                );
            }
        }
    }

    #[test]
    fn test_masked_hides_selector() {
        for form_factor in [FormFactor::Small, FormFactor::Large] {
            let mut p = props(form_factor);
            p.masked = true;
            p.configuration = Some(r#"{"1":"Mail"}"#.to_string());

            let view = ChoicesPicker::new().render(&p);
            assert_eq!(view, View::Masked { text: "****".to_string() });
        }
    }

    #[test]
    fn test_unmatched_value_has_no_title() {
        let mut p = props(FormFactor::Small);
        p.value = Some(42);
        let View::Dropdown(dropdown) = ChoicesPicker::new().render(&p) else {
            panic!("expected a dropdown");
        };
        assert!(dropdown.title().is_none());
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut p = props(FormFactor::Small);
        p.value = Some(1);
        let mut picker = ChoicesPicker::new();
        assert_eq!(picker.render(&p), picker.render(&p));
    }

    #[test]
    fn test_change_handlers_report_values() {
        let picker = ChoicesPicker::new();
        let items = DerivedItems::derive(&props(FormFactor::Small).options, None);
        let mut calls = Vec::new();

        picker.on_choice_change(Some(&items.choices[1]), |v| calls.push(v));
        picker.on_dropdown_change(Some(&items.dropdown[1]), |v| calls.push(v));
        picker.on_choice_change(None, |v| calls.push(v));
        picker.on_dropdown_change(None, |v| calls.push(v));

        assert_eq!(calls, [Some(2), Some(2), None, None]);
    }

    #[test]
    fn test_choice_group_keyboard_selection() {
        let mut picker = ChoicesPicker::new();
        let p = props(FormFactor::Large);

        let calls = press(&mut picker, &p, &[KeyCode::Down, KeyCode::Char(' ')]);
        assert_eq!(calls, [Some(2)]);
        assert_eq!(picker.state.focus, Some(1));
    }

    #[test]
    fn test_choice_group_reselect_is_not_a_change() {
        let mut picker = ChoicesPicker::new();
        let mut p = props(FormFactor::Large);
        p.value = Some(1);

        let calls = press(&mut picker, &p, &[KeyCode::Enter]);
        assert!(calls.is_empty());
    }

    #[test]
    fn test_choice_group_focus_clamps() {
        let mut picker = ChoicesPicker::new();
        let p = props(FormFactor::Large);

        press(&mut picker, &p, &[KeyCode::Up, KeyCode::Up]);
        assert_eq!(picker.state.focus, Some(0));
        press(&mut picker, &p, &[KeyCode::End, KeyCode::Down]);
        assert_eq!(picker.state.focus, Some(2));
    }

    #[test]
    fn test_choice_group_focus_starts_on_selection() {
        let mut picker = ChoicesPicker::new();
        let mut p = props(FormFactor::Large);
        p.value = Some(2);

        // Enter on the untouched group keeps the current selection
        assert!(press(&mut picker, &p, &[KeyCode::Enter]).is_empty());
        assert_eq!(picker.state.focus, Some(1));

        let calls = press(&mut picker, &p, &[KeyCode::Down, KeyCode::Enter]);
        assert_eq!(calls, [Some(3)]);

        let View::ChoiceGroup(group) = ChoicesPicker::new().render(&p) else {
            panic!("expected a choice group");
        };
        assert_eq!(group.initial_focus(), 1);
    }

    #[test]
    fn test_dropdown_keyboard_selection() {
        let mut picker = ChoicesPicker::new();
        let p = props(FormFactor::Small);

        // Open on the placeholder, move to "Phone", pick it
        let calls = press(
            &mut picker,
            &p,
            &[KeyCode::Enter, KeyCode::Down, KeyCode::Down, KeyCode::Enter],
        );
        assert_eq!(calls, [Some(2)]);
        assert!(!picker.state.open);
    }

    #[test]
    fn test_dropdown_clear_with_placeholder() {
        let mut picker = ChoicesPicker::new();
        let mut p = props(FormFactor::Small);
        p.value = Some(2);

        press(&mut picker, &p, &[KeyCode::Enter]);
        assert!(picker.state.open);
        assert_eq!(picker.state.highlight, 2);

        let calls = press(&mut picker, &p, &[KeyCode::Home, KeyCode::Enter]);
        assert_eq!(calls, [None]);
    }

    #[test]
    fn test_dropdown_escape_closes_without_change() {
        let mut picker = ChoicesPicker::new();
        let p = props(FormFactor::Small);

        let calls = press(&mut picker, &p, &[KeyCode::Enter, KeyCode::Down, KeyCode::Esc]);
        assert!(calls.is_empty());
        assert!(!picker.state.open);
    }

    #[test]
    fn test_inert_states_ignore_keys() {
        let mut disabled = props(FormFactor::Large);
        disabled.disabled = true;
        let mut masked = props(FormFactor::Small);
        masked.masked = true;
        let mut broken = props(FormFactor::Small);
        broken.configuration = Some("{".to_string());

        for p in [disabled, masked, broken] {
            let mut picker = ChoicesPicker::new();
            let mut calls = Vec::new();
            let handled = picker.handle_key(&p, key(KeyCode::Enter), |v| calls.push(v));
            assert!(!handled);
            assert!(calls.is_empty());
            assert_eq!(picker.state, InteractionState::default());
        }
    }
}
