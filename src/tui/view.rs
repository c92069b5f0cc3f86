//! Pure rendering: map App state to ratatui widget trees.
//!
//! Geometry is recomputed from the frame size on every call, and focus
//! emphasis is derived from the current zone on every call. Nothing here
//! caches between frames.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

use crate::layout::{compute_layout, LayoutGeometry};
use crate::types::MenuEntry;

use super::commit::{CommitForm, FormField, FormPhase};
use super::state::{App, Emphasis};
use super::status::{instructions, Severity};
use super::theme;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the whole shell and return the geometry used.
pub fn render(app: &App, frame: &mut Frame) -> LayoutGeometry {
    let area = frame.area();
    let geometry = compute_layout(area.width, area.height);

    let (min_width, min_height) = app.min_size;
    if geometry.below_minimum(min_width, min_height) {
        render_too_small(&geometry, min_width, min_height, frame, area);
        return geometry;
    }

    let visuals = app.visuals();

    render_menu(app, visuals.menu, frame, geometry.menu);
    render_submenu(app, visuals.submenu, frame, geometry.submenu);
    render_action_panel(app, visuals.action_panel, frame, geometry.action_panel);
    render_status_bar(app, frame, geometry.status_bar);

    geometry
}

fn render_too_small(
    geometry: &LayoutGeometry,
    min_width: u16,
    min_height: u16,
    frame: &mut Frame,
    area: Rect,
) {
    let text = format!(
        "Terminal too small: {}x{} (minimum {}x{})",
        geometry.terminal_width, geometry.terminal_height, min_width, min_height
    );
    let warning =
        Paragraph::new(Span::styled(text, theme::STYLE_WARNING)).wrap(Wrap { trim: true });
    frame.render_widget(warning, area);
}

fn pane(title: &str, emphasis: Emphasis) -> Block<'_> {
    let style = theme::border_style(emphasis);
    Block::bordered()
        .title(title)
        .border_style(style)
        .title_style(style)
}

// ============================================================================
// MENUS
// ============================================================================

/// One line per entry: `(s) Label  description`.
fn entry_lines(entries: &[MenuEntry], cursor: usize, emphasis: Emphasis) -> Vec<Line<'static>> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let line = Line::from(vec![
                Span::styled(format!("({}) ", entry.shortcut), theme::STYLE_INTERACTIVE),
                Span::raw(entry.label),
                Span::styled(format!("  {}", entry.description), theme::STYLE_DIM),
            ]);
            match (i == cursor, emphasis) {
                (true, Emphasis::Active) => line.style(theme::STYLE_CURSOR),
                (true, Emphasis::Inactive) => line.style(theme::STYLE_CURSOR_INACTIVE),
                (false, _) => line,
            }
        })
        .collect()
}

fn render_menu(app: &App, emphasis: Emphasis, frame: &mut Frame, area: Rect) {
    let lines = entry_lines(app.registry.main_menu(), app.menu_cursor, emphasis);
    let menu = Paragraph::new(lines).block(pane("Main Menu", emphasis));
    frame.render_widget(menu, area);
}

fn render_submenu(app: &App, emphasis: Emphasis, frame: &mut Frame, area: Rect) {
    let mounted = app
        .submenu
        .as_ref()
        .and_then(|m| Some((m, app.registry.lookup_submenu(m.name)?)));

    let widget = match mounted {
        Some((m, def)) => Paragraph::new(entry_lines(&def.entries, m.cursor, emphasis))
            .block(pane(def.name, emphasis)),
        None => Paragraph::new("").block(pane("Submenu", emphasis)),
    };
    frame.render_widget(widget, area);
}

// ============================================================================
// ACTION PANEL
// ============================================================================

fn render_action_panel(app: &App, emphasis: Emphasis, frame: &mut Frame, area: Rect) {
    let form = app.host.form();
    let block = pane(if form.is_some() { "Save Now" } else { "Action Panel" }, emphasis);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let error = app
        .status
        .message()
        .filter(|m| m.severity == Severity::Error)
        .map(|m| m.text.as_str());
    let error_rows = error.map_or(0, |text| error_height(text, inner));
    let [body, error_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(error_rows)]).areas(inner);

    match form {
        Some(form) => render_commit_form(form, frame, body),
        None => {
            let text = Paragraph::new(app.status.panel_text()).wrap(Wrap { trim: false });
            frame.render_widget(text, body);
        }
    }

    if let Some(text) = error {
        let error = Paragraph::new(text)
            .style(theme::STYLE_ERROR)
            .wrap(Wrap { trim: false });
        frame.render_widget(error, error_area);
    }
}

/// Rows an error needs at `area`'s width, capped at half the area.
fn error_height(text: &str, area: Rect) -> u16 {
    let width = usize::from(area.width.max(1));
    let rows: usize = text
        .lines()
        .map(|line| line.chars().count().div_ceil(width).max(1))
        .sum();
    let cap = (area.height / 2).max(area.height.min(1));
    u16::try_from(rows.max(1)).unwrap_or(u16::MAX).min(cap)
}

fn render_commit_form(form: &CommitForm, frame: &mut Frame, area: Rect) {
    let [list_area, input_area, button_area] = Layout::vertical([
        Constraint::Min(0),    // file list
        Constraint::Length(1), // message input
        Constraint::Length(1), // buttons
    ])
    .areas(area);

    render_file_list(form, frame, list_area);

    let control = |field: FormField| {
        if form.field() == field {
            theme::STYLE_CONTROL_FOCUSED
        } else {
            Style::new()
        }
    };

    let mut input = vec![Span::raw("Commit message: ")];
    input.extend(message_spans(form, control(FormField::Message)));
    frame.render_widget(Paragraph::new(Line::from(input)), input_area);

    let buttons = Line::from(vec![
        Span::styled("[ Commit ]", control(FormField::CommitButton)),
        Span::raw("  "),
        Span::styled("[ Cancel (Esc) ]", control(FormField::CancelButton)),
    ]);
    frame.render_widget(Paragraph::new(buttons), button_area);
}

/// The message split around the editing cursor, which is drawn reversed
/// while the message field has focus.
fn message_spans(form: &CommitForm, style: Style) -> Vec<Span<'static>> {
    let message = form.message();
    if form.field() != FormField::Message {
        return vec![Span::styled(message, style)];
    }

    let (_, col) = form.message_cursor();
    let chars: Vec<char> = message.chars().collect();
    let before: String = chars.iter().take(col).collect();
    let at = chars.get(col).map_or(" ".to_string(), char::to_string);
    let after: String = chars.iter().skip(col + 1).collect();
    vec![
        Span::styled(before, style),
        Span::styled(at, style.patch(theme::STYLE_CURSOR)),
        Span::styled(after, style),
    ]
}

fn render_file_list(form: &CommitForm, frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = match form.phase() {
        FormPhase::Loading => vec![Line::from(Span::styled(
            "Loading changed files...",
            theme::STYLE_DIM,
        ))],
        FormPhase::Committing => vec![Line::from(Span::styled(
            "Committing...",
            theme::STYLE_INTERACTIVE,
        ))],
        FormPhase::Ready if form.files().is_empty() => vec![Line::from(Span::styled(
            "No changes to commit",
            theme::STYLE_DIM,
        ))],
        FormPhase::Ready => form
            .files()
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let checkbox = if form.is_selected(i) {
                    Span::styled("[x] ", theme::STYLE_CHECKED)
                } else {
                    Span::styled("[ ] ", theme::STYLE_UNCHECKED)
                };
                let line = Line::from(vec![checkbox, Span::raw(name.clone())]);
                if i == form.cursor() && form.field() == FormField::Files {
                    line.style(theme::STYLE_CURSOR)
                } else {
                    line
                }
            })
            .collect(),
    };

    let list = Paragraph::new(lines).scroll((scroll_offset(form.cursor(), area.height), 0));
    frame.render_widget(list, area);
}

/// First visible row that keeps `cursor` on screen, saturating at `u16::MAX`.
fn scroll_offset(cursor: usize, visible_height: u16) -> u16 {
    let visible = usize::from(visible_height);
    let offset = if visible > 0 && cursor >= visible {
        cursor - visible + 1
    } else {
        0
    };
    u16::try_from(offset).unwrap_or(u16::MAX)
}

// ============================================================================
// STATUS BAR
// ============================================================================

fn render_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let size_text = app.status.size_text();
    let size_width = u16::try_from(size_text.chars().count() + 1).unwrap_or(u16::MAX);
    let [left, right] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(size_width)]).areas(area);

    let mut spans = vec![Span::raw(instructions(app.focus))];
    // Errors are shown in full in the action panel.
    if let Some(message) = app.status.message().filter(|m| m.severity != Severity::Error) {
        let first_line = message.text.lines().next().unwrap_or_default().to_string();
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            first_line,
            theme::severity_style(message.severity).bg(Color::DarkGray),
        ));
    }
    let left_text = Paragraph::new(Line::from(spans)).style(theme::STYLE_STATUS_BAR);
    frame.render_widget(left_text, left);

    let size = Paragraph::new(size_text)
        .alignment(Alignment::Right)
        .style(theme::STYLE_STATUS_BAR);
    frame.render_widget(size, right);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::state::AppEvent;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn make_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(width, height)).unwrap()
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.on_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn draw(terminal: &mut Terminal<TestBackend>, app: &App) {
        terminal
            .draw(|frame| {
                render(app, frame);
            })
            .unwrap();
    }

    fn app_in_commit_form(files: &[&str]) -> App {
        let mut app = App::default();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        let files = files.iter().map(|f| f.to_string()).collect();
        app.handle_background_event(AppEvent::ChangedFiles(Ok(files)));
        app
    }

    #[test]
    fn initial_screen_shows_menu_and_prompt() {
        let mut terminal = make_terminal(100, 30);
        let mut app = App::default();
        app.on_resize(100, 30);
        draw(&mut terminal, &app);

        let content = buffer_text(&terminal);
        assert!(content.contains("Main Menu"));
        assert!(content.contains("Save Changes"));
        assert!(content.contains("Select an action from the submenu"));
        assert!(content.contains("Terminal size: 100x30"));
    }

    #[test]
    fn render_returns_fresh_geometry() {
        let mut terminal = make_terminal(80, 24);
        let app = App::default();
        let mut used = None;
        terminal.draw(|frame| used = Some(render(&app, frame))).unwrap();
        assert_eq!(used, Some(compute_layout(80, 24)));
    }

    #[test]
    fn mounted_submenu_is_titled_with_its_name() {
        let mut terminal = make_terminal(100, 30);
        let mut app = App::default();
        press(&mut app, KeyCode::Char('b'));
        draw(&mut terminal, &app);

        let content = buffer_text(&terminal);
        assert!(content.contains("Branches (Work Areas)"));
        assert!(content.contains("Show Branches"));
    }

    #[test]
    fn focused_pane_border_is_yellow() {
        let mut terminal = make_terminal(80, 24);
        let app = App::default();
        draw(&mut terminal, &app);

        let buffer = terminal.backend().buffer();
        let menu_corner = &buffer[(0, 0)];
        let submenu_corner = &buffer[(40, 0)];
        assert_eq!(menu_corner.fg, Color::Yellow);
        assert_eq!(submenu_corner.fg, Color::Gray);
    }

    #[test]
    fn commit_form_shows_checkboxes() {
        let mut terminal = make_terminal(100, 30);
        let mut app = app_in_commit_form(&["src/lib.rs", "Cargo.toml"]);
        press(&mut app, KeyCode::Char(' '));
        draw(&mut terminal, &app);

        let content = buffer_text(&terminal);
        assert!(content.contains("[x] src/lib.rs"));
        assert!(content.contains("[ ] Cargo.toml"));
        assert!(content.contains("Commit message:"));
        assert!(content.contains("Cancel (Esc)"));
    }

    #[test]
    fn message_edits_are_rendered_in_place() {
        let mut terminal = make_terminal(100, 30);
        let mut app = app_in_commit_form(&["a.rs"]);
        press(&mut app, KeyCode::Tab);
        for c in "fix typo".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Backspace);
        draw(&mut terminal, &app);

        assert!(buffer_text(&terminal).contains("Commit message: fix tpo"));
    }

    #[test]
    fn loading_form_says_so() {
        let mut terminal = make_terminal(100, 30);
        let mut app = App::default();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        draw(&mut terminal, &app);
        assert!(buffer_text(&terminal).contains("Loading changed files..."));
    }

    #[test]
    fn info_message_is_in_status_bar() {
        let mut terminal = make_terminal(120, 30);
        let mut app = App::default();
        app.on_resize(120, 30);
        app.status.report(Severity::Info, "Running Show Branches...");
        draw(&mut terminal, &app);

        let content = buffer_text(&terminal);
        assert!(content.contains("Running Show Branches..."));
        assert!(content.contains("Terminal size: 120x30"));
    }

    #[test]
    fn multi_line_error_is_shown_in_full_below_the_form() {
        let mut terminal = make_terminal(80, 24);
        let mut app = app_in_commit_form(&["a.rs"]);
        app.on_resize(80, 24);
        app.status.report(
            Severity::Error,
            "Error committing: exit status 128: Author identity unknown\n\n\
             *** Please tell me who you are.",
        );
        draw(&mut terminal, &app);

        let content = buffer_text(&terminal);
        assert!(content.contains("Error committing: exit status 128: Author identity unknown"));
        assert!(content.contains("*** Please tell me who you are."));
        assert!(content.contains("[ ] a.rs"));
        assert!(content.contains("Terminal size: 80x24"));
    }

    #[test]
    fn error_height_is_capped_at_half_the_panel() {
        let area = Rect::new(0, 0, 10, 8);
        assert_eq!(error_height("short", area), 1);
        assert_eq!(error_height("a\nb\nc", area), 3);
        assert_eq!(error_height(&"x".repeat(200), area), 4);
        assert_eq!(error_height("boom", Rect::new(0, 0, 10, 0)), 0);
    }

    #[test]
    fn scroll_follows_cursor_and_saturates() {
        assert_eq!(scroll_offset(3, 10), 0);
        assert_eq!(scroll_offset(10, 10), 1);
        assert_eq!(scroll_offset(5, 0), 0);
        assert_eq!(scroll_offset(70_000, 4), u16::MAX);
    }

    #[test]
    fn small_terminal_shows_warning() {
        let mut terminal = make_terminal(40, 8);
        let app = App::default();
        draw(&mut terminal, &app);

        let content = buffer_text(&terminal);
        assert!(content.contains("Terminal too small: 40x8"));
        assert!(!content.contains("Main Menu"));
    }

    #[test]
    fn degenerate_sizes_render_without_panic() {
        let mut app = App::default();
        app.min_size = (0, 0);
        for (w, h) in [(1, 1), (2, 1), (10, 2), (10, 3), (3, 10)] {
            let mut terminal = make_terminal(w, h);
            draw(&mut terminal, &app);
        }
    }
}
