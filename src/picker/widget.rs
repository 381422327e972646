use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use super::{ChoiceGroupView, DropdownView, IconProps, InteractionState, View};
use crate::theme::Theme;

/// Draws a [`View`] produced by [`super::ChoicesPicker::render`]
pub struct PickerWidget<'a> {
    view: &'a View,
    state: InteractionState,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> PickerWidget<'a> {
    pub fn new(view: &'a View, state: InteractionState, theme: &'a Theme) -> Self {
        Self {
            view,
            state,
            theme,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn border_style(&self, disabled: bool) -> Style {
        if self.focused && !disabled {
            Style::default().fg(self.theme.accent)
        } else {
            Style::default().fg(self.theme.inactive)
        }
    }

    fn text_style(&self, disabled: bool) -> Style {
        let color = if disabled { self.theme.text_dim } else { self.theme.text };
        Style::default().fg(color)
    }

    /// Icon beside the label, shared by the dropdown title and its rows
    fn option_spans(
        &self,
        text: &'a str,
        icon: Option<&IconProps>,
        style: Style,
    ) -> Vec<Span<'a>> {
        let mut spans = Vec::with_capacity(2);
        if let Some(icon) = icon {
            spans.push(Span::styled(
                format!("{} ", icon.glyph()),
                Style::default().fg(self.theme.text_dim),
            ));
        }
        spans.push(Span::styled(text, style));
        spans
    }

    fn render_choice_group(&self, group: &'a ChoiceGroupView, area: Rect, buf: &mut Buffer) {
        let text_style = self.text_style(group.disabled);
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", group.label),
                text_style.add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(self.border_style(group.disabled));

        let focus = self
            .state
            .focus
            .unwrap_or_else(|| group.initial_focus())
            .min(group.options.len().saturating_sub(1));
        let lines: Vec<Line> = group
            .options
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let selected = group.is_selected(item);
                let marker_color = if selected && !group.disabled {
                    self.theme.accent
                } else {
                    self.theme.text_dim
                };

                let mut spans = vec![Span::styled(
                    if selected { " ◉ " } else { " ○ " },
                    Style::default().fg(marker_color),
                )];
                spans.extend(self.option_spans(&item.text, item.icon.as_ref(), text_style));

                let line = Line::from(spans);
                if self.focused && !group.disabled && i == focus {
                    line.style(Style::default().bg(self.theme.bg_selected))
                } else {
                    line
                }
            })
            .collect();

        Paragraph::new(lines).block(block).render(area, buf);
    }

    fn render_dropdown(&self, dropdown: &'a DropdownView, area: Rect, buf: &mut Buffer) {
        let text_style = self.text_style(dropdown.disabled);
        let open = self.state.open && !dropdown.disabled;
        let list_height = if open {
            // Placeholder row plus borders
            u16::try_from(dropdown.options.len()).unwrap_or(u16::MAX).saturating_add(3)
        } else {
            0
        };

        let [label_area, title_area, list_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(list_height),
        ])
        .areas(area);

        let label = Span::styled(dropdown.label.as_str(), text_style.add_modifier(Modifier::BOLD));
        Paragraph::new(label).render(label_area, buf);

        let mut title = match dropdown.title() {
            Some(item) => self.option_spans(&item.text, item.data.icon.as_ref(), text_style),
            None => vec![Span::styled(
                dropdown.placeholder.as_str(),
                Style::default().fg(self.theme.text_dim),
            )],
        };
        title.insert(0, Span::raw(" "));
        title.push(Span::styled(
            if open { "  ▴" } else { "  ▾" },
            Style::default().fg(self.theme.text_dim),
        ));
        Paragraph::new(Line::from(title))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.border_style(dropdown.disabled)),
            )
            .render(title_area, buf);

        if open {
            self.render_dropdown_list(dropdown, text_style, list_area, buf);
        }
    }

    fn render_dropdown_list(
        &self,
        dropdown: &'a DropdownView,
        text_style: Style,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let highlight = self.state.highlight.min(dropdown.options.len());
        let row = |i: usize, mut spans: Vec<Span<'a>>, selected: bool| {
            spans.insert(0, Span::raw(if selected { " ✓ " } else { "   " }));
            let line = Line::from(spans);
            if i == highlight {
                line.style(Style::default().bg(self.theme.bg_selected))
            } else {
                line
            }
        };

        let mut lines = vec![row(
            0,
            vec![Span::styled(
                dropdown.placeholder.as_str(),
                Style::default().fg(self.theme.text_dim),
            )],
            dropdown.title().is_none(),
        )];
        lines.extend(dropdown.options.iter().enumerate().map(|(i, item)| {
            row(
                i + 1,
                self.option_spans(&item.text, item.data.icon.as_ref(), text_style),
                dropdown.is_selected(item),
            )
        }));

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.accent)),
            )
            .render(area, buf);
    }
}

impl Widget for PickerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.view {
            View::Error { message } => Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(self.theme.danger),
            ))
            .wrap(Wrap { trim: false })
            .render(area, buf),
            View::Masked { text } => {
                let mask = Span::styled(text.as_str(), self.text_style(false));
                Paragraph::new(mask).render(area, buf)
            }
            View::ChoiceGroup(group) => self.render_choice_group(group, area, buf),
            View::Dropdown(dropdown) => self.render_dropdown(dropdown, area, buf),
        }
    }
}
