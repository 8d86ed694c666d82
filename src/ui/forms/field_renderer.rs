//! Field rendering: one renderer per presentation capability
//!
//! Each renderer turns the current value, an optional error and the static
//! option list into document lines. Change events flow back through
//! [`crate::state::FieldEvent`]; renderers never touch the store.

use crate::state::catalog::{option_label, ChoiceOption, FieldKind};
use crate::state::validation::is_required;
use crate::state::{FieldName, FieldValue};
use crate::ui::text::{tail_fitting, width_of, wrap_text};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Indentation of values and errors under their label
const INDENT: &str = "    ";
const INDENT_WIDTH: usize = 4;

/// Shown for a choice nobody picked yet
const UNSELECTED: &str = "(sin seleccionar)";

/// Everything a renderer needs besides the value itself
#[derive(Debug, Clone, Copy)]
pub struct FieldProps<'a> {
    pub name: FieldName,
    pub error: Option<&'a str>,
    pub focused: bool,
    /// Highlighted option of a focused checkbox group
    pub option_cursor: Option<usize>,
    /// Total document width in cells
    pub width: u16,
}

impl FieldProps<'_> {
    fn value_width(&self) -> usize {
        (self.width as usize).saturating_sub(INDENT_WIDTH + 1).max(8)
    }

    fn accent(&self) -> Style {
        if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        }
    }
}

/// Render a field with the renderer matching its kind
pub fn render_field(props: FieldProps, value: FieldValue) -> Vec<Line<'static>> {
    let mut lines = label_lines(&props);
    match (props.name.kind(), value) {
        (FieldKind::Text | FieldKind::Number | FieldKind::Date, FieldValue::Text(text)) => {
            lines.extend(input_lines(&props, text))
        }
        (FieldKind::Choice(options), FieldValue::Text(text)) => {
            lines.extend(select_lines(&props, text, options))
        }
        (FieldKind::LongText { rows }, FieldValue::Text(text)) => {
            lines.extend(textarea_lines(&props, text, rows))
        }
        (FieldKind::MultiSelect { options, max }, FieldValue::List(selected)) => {
            lines.extend(checkbox_group_lines(&props, selected, options, max))
        }
        (kind, value) => {
            tracing::warn!("{}: {kind:?} cannot render {value:?}", props.name);
        }
    }
    if let Some(error) = props.error {
        lines.extend(error_lines(&props, error));
    }
    lines
}

fn label_lines(props: &FieldProps) -> Vec<Line<'static>> {
    let marker = if props.focused { "› " } else { "  " };
    let required = if is_required(props.name) { " *" } else { "" };
    let label = format!("{}{}", props.name.label(), required);
    let style = props.accent().add_modifier(Modifier::BOLD);

    wrap_text(&label, (props.width as usize).saturating_sub(2))
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let prefix = if i == 0 { marker } else { "  " };
            Line::from(vec![
                Span::styled(prefix, props.accent()),
                Span::styled(text, style),
            ])
        })
        .collect()
}

/// Single-line text, number or date input.
///
/// While focused only the tail that fits beside the caret is shown; otherwise
/// the whole value wraps onto as many lines as it needs.
pub fn input_lines(props: &FieldProps, value: &str) -> Vec<Line<'static>> {
    let width = props.value_width();
    let (shown, style) = match (value.is_empty(), props.name.placeholder()) {
        (true, Some(placeholder)) => (
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        _ => (value.to_string(), props.accent()),
    };

    if props.focused {
        let visible = tail_fitting(&shown, width.saturating_sub(1)).to_string();
        return vec![input_line(visible, style, "▌", width)];
    }

    let mut rows = wrap_text(&shown, width);
    let last = rows.pop().unwrap_or_default();
    let mut lines: Vec<Line<'static>> = rows
        .into_iter()
        .map(|text| Line::from(vec![Span::raw(INDENT), Span::styled(text, style)]))
        .collect();
    lines.push(input_line(last, style, "", width));
    lines
}

/// Last line of an input: text, caret and the underline filling the rest
fn input_line(text: String, style: Style, cursor: &'static str, width: usize) -> Line<'static> {
    let fill = width.saturating_sub(width_of(&text) + width_of(cursor));
    Line::from(vec![
        Span::raw(INDENT),
        Span::styled(text, style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
        Span::styled("_".repeat(fill), Style::default().fg(Color::DarkGray)),
    ])
}

/// Single-select enumerated choice
pub fn select_lines(props: &FieldProps, value: &str, options: &[ChoiceOption]) -> Vec<Line<'static>> {
    let label = option_label(props.name, value)
        .or_else(|| options.iter().find(|o| o.value == value).map(|o| o.label));
    let (text, style) = match label {
        Some(label) => (label.to_string(), props.accent()),
        None => (UNSELECTED.to_string(), Style::default().fg(Color::DarkGray)),
    };
    let (open, close) = if props.focused { ("◄ ", " ►") } else { ("[ ", " ]") };

    vec![Line::from(vec![
        Span::raw(INDENT),
        Span::styled(open, props.accent()),
        Span::styled(text, style.add_modifier(Modifier::BOLD)),
        Span::styled(close, props.accent()),
    ])]
}

/// Multi-line text area, padded to its configured row count
pub fn textarea_lines(props: &FieldProps, value: &str, rows: u16) -> Vec<Line<'static>> {
    let width = props.value_width().saturating_sub(2);
    let mut wrapped = if value.is_empty() {
        Vec::new()
    } else {
        wrap_text(value, width)
    };
    if props.focused {
        match wrapped.last_mut() {
            Some(last) => last.push('▌'),
            None => wrapped.push("▌".to_string()),
        }
    }
    while wrapped.len() < rows as usize {
        wrapped.push(String::new());
    }

    wrapped
        .into_iter()
        .map(|text| {
            Line::from(vec![
                Span::raw(INDENT),
                Span::styled("│ ", Style::default().fg(Color::DarkGray)),
                Span::styled(text, props.accent()),
            ])
        })
        .collect()
}

/// Multi-select checkbox group with an optional cardinality limit
pub fn checkbox_group_lines(
    props: &FieldProps,
    selected: &[String],
    options: &[ChoiceOption],
    max: Option<usize>,
) -> Vec<Line<'static>> {
    let label_width = props.value_width().saturating_sub(4);
    let mut lines: Vec<Line<'static>> = options
        .iter()
        .enumerate()
        .flat_map(|(i, option)| {
            let checked = selected.iter().any(|s| s == option.value);
            let mark = if checked { "[x] " } else { "[ ] " };
            let highlighted = props.focused && props.option_cursor == Some(i);
            let style = if highlighted {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            wrap_text(option.label, label_width)
                .into_iter()
                .enumerate()
                .map(move |(row, text)| {
                    let lead = if row == 0 { mark } else { "    " };
                    Line::from(vec![
                        Span::raw(INDENT),
                        Span::styled(format!("{lead}{text}"), style),
                    ])
                })
        })
        .collect();

    if let Some(max) = max {
        lines.push(Line::from(vec![
            Span::raw(INDENT),
            Span::styled(
                format!("{}/{} seleccionadas", selected.len(), max),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }
    lines
}

fn error_lines(props: &FieldProps, error: &str) -> Vec<Line<'static>> {
    let style = Style::default().fg(Color::Red);
    wrap_text(error, props.value_width().saturating_sub(2))
        .into_iter()
        .map(|text| {
            Line::from(vec![
                Span::raw(INDENT),
                Span::styled("! ", style.add_modifier(Modifier::BOLD)),
                Span::styled(text, style),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(name: FieldName) -> FieldProps<'static> {
        FieldProps {
            name,
            error: None,
            focused: false,
            option_cursor: None,
            width: 60,
        }
    }

    fn text_of(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_input_shows_value_and_required_marker() {
        let lines = render_field(props(FieldName::Lote), FieldValue::Text("14"));
        let text = text_of(&lines);
        assert_eq!(text[0].trim(), "Lote N° *");
        assert!(text[1].starts_with("    14_"));
    }

    #[test]
    fn test_input_placeholder_when_empty() {
        let lines = render_field(props(FieldName::FirmaVecino), FieldValue::Text(""));
        assert!(text_of(&lines)[1].contains("Escriba el nombre para firmar"));
    }

    #[test]
    fn test_select_shows_option_label() {
        let lines = render_field(props(FieldName::Gas), FieldValue::Text("lena"));
        assert!(text_of(&lines)[1].contains("Leña"));
        let lines = render_field(props(FieldName::Gas), FieldValue::Text(""));
        assert!(text_of(&lines)[1].contains(UNSELECTED));
    }

    #[test]
    fn test_textarea_pads_to_rows() {
        let lines = render_field(
            props(FieldName::FormaColaboracion),
            FieldValue::Text("Pintando"),
        );
        // label + 3 rows
        assert_eq!(lines.len(), 4);
        assert!(text_of(&lines)[1].contains("Pintando"));
    }

    #[test]
    fn test_checkbox_group_marks_selection_and_count() {
        let selected = vec!["inseguridad".to_string()];
        let lines = render_field(
            props(FieldName::ProblemasBarrio),
            FieldValue::List(&selected),
        );
        let text = text_of(&lines);
        assert!(text.iter().any(|l| l.contains("[x] Inseguridad")));
        assert!(text.iter().any(|l| l.contains("[ ] Desempleo")));
        assert!(text.last().unwrap().contains("1/3 seleccionadas"));
    }

    #[test]
    fn test_unbounded_group_has_no_count() {
        let lines = render_field(props(FieldName::Participacion), FieldValue::List(&[]));
        assert_eq!(lines.len(), 1 + FieldName::Participacion.options().len());
    }

    #[test]
    fn test_error_line_follows_value() {
        let mut p = props(FieldName::Encuestador);
        p.error = Some("El nombre del encuestador es requerido.");
        let lines = render_field(p, FieldValue::Text(""));
        let text = text_of(&lines);
        assert!(text.last().unwrap().contains("! El nombre del encuestador es requerido."));
    }

    mod long_values {
        use super::*;

        const ADDRESS: &str = "Calle San Martin 1234 entre Belgrano y Sarmiento, casa con porton verde FINALDELTEXTO";

        #[test]
        fn test_unfocused_input_wraps_whole_value() {
            let lines = render_field(props(FieldName::Direccion), FieldValue::Text(ADDRESS));
            let text = text_of(&lines[1..]);
            assert!(text.len() > 1);
            assert!(text.last().unwrap().contains("FINALDELTEXTO"));
            assert!(text.iter().all(|l| width_of(l) <= 60));
        }

        #[test]
        fn test_focused_input_shows_tail_beside_caret() {
            let mut p = props(FieldName::Direccion);
            p.focused = true;
            let lines = render_field(p, FieldValue::Text(ADDRESS));
            assert_eq!(lines.len(), 2);
            let line = lines[1].to_string();
            assert!(line.contains("FINALDELTEXTO▌"));
            assert!(width_of(&line) <= 60);
        }

        #[test]
        fn test_checkbox_labels_wrap_at_narrow_width() {
            let mut p = props(FieldName::ProblemasBarrio);
            p.width = 40;
            let lines = render_field(p, FieldValue::List(&[]));
            let text = text_of(&lines);
            assert!(text.iter().all(|l| width_of(l) <= 40), "{text:#?}");
            let first = text
                .iter()
                .position(|l| l.contains("[ ] Calles en mal estado"))
                .unwrap();
            assert!(text[first + 1].contains("veredas"));
            assert!(!text[first + 1].contains("[ ]"));
        }
    }

    #[test]
    fn test_focus_marker() {
        let mut p = props(FieldName::Lote);
        p.focused = true;
        let lines = render_field(p, FieldValue::Text(""));
        assert!(text_of(&lines)[0].starts_with("› "));
    }
}
