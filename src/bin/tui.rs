use std::time::Duration;

use anyhow::Result;
use crossterm::{event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind}, execute, terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen}};
use ratatui::{backend::CrosstermBackend, Terminal, widgets::{Block, Borders, List, ListItem, Paragraph, ListState}, layout::{Layout, Constraint, Direction}, style::{Style, Modifier, Color}};

use todos::{client::{Screen, TodoApiClient, TodoView}, config::ClientConfig, domain::todo::UpdateTodo};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let config = ClientConfig::from_env();
    let view = TodoView::new(TodoApiClient::new(&config.api_url));

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, view).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode { View, Create, Edit }

struct App {
    view: TodoView<TodoApiClient>,
    selected: usize,
    mode: Mode,
    list_state: ListState,
    draft: String,
}

impl App {
    fn clamp_selection(&mut self) {
        let len = self.view.items().len();
        if len == 0 { self.selected = 0; self.list_state.select(None); }
        else { if self.selected >= len { self.selected = len - 1; } self.list_state.select(Some(self.selected)); }
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        self.clamp_selection();
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(1),
                    Constraint::Length(3),
                ])
                .split(f.size());

            let header = Paragraph::new("Todos (Enter: toggle, n: new, e: edit, d: delete, r: refresh, q: quit)")
                .block(Block::default().borders(Borders::ALL).title(self.view.backend().base_url().to_string()));
            f.render_widget(header, chunks[0]);

            let body = Block::default().borders(Borders::ALL).title("todos");
            match self.view.screen() {
                Screen::Loading => f.render_widget(Paragraph::new("Loading...").block(body), chunks[1]),
                Screen::Error(msg) => f.render_widget(
                    Paragraph::new(format!("Error loading todos: {msg}")).style(Style::default().fg(Color::Red)).block(body),
                    chunks[1],
                ),
                Screen::Empty => f.render_widget(Paragraph::new("No todos yet. Press n to add one.").block(body), chunks[1]),
                Screen::List { items, .. } => {
                    let list_items: Vec<ListItem> = items.iter().map(|t| {
                        let mark = if t.completed { "[x]" } else { "[ ]" };
                        ListItem::new(format!("{} {}", mark, t.title))
                    }).collect();
                    let list = List::new(list_items)
                        .block(body)
                        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::REVERSED))
                        .highlight_symbol(">> ");
                    f.render_stateful_widget(list, chunks[1], &mut self.list_state);
                }
            }

            let counts = self.view.counts();
            let footer_text = match self.mode {
                Mode::View => match self.view.notice() {
                    Some(notice) => format!("{} items left  |  {} completed  |  {}", counts.left, counts.completed, notice),
                    None => format!("{} items left  |  {} completed", counts.left, counts.completed),
                },
                Mode::Create => format!("New: {}_  |  (Enter to save, Esc to cancel)", self.draft),
                Mode::Edit => format!("Title: {}_  |  (Enter to save, Esc to cancel)", self.draft),
            };
            let footer = Paragraph::new(footer_text)
                .block(Block::default().borders(Borders::ALL).title(match self.mode { Mode::View => "info", Mode::Create => "create", Mode::Edit => "edit" }));
            f.render_widget(footer, chunks[2]);
        })?;
        Ok(())
    }
}

/// Moves the cursor up only when the delete actually happened.
fn selection_after_delete(selected: usize, removed: bool) -> usize {
    if removed { selected.saturating_sub(1) } else { selected }
}

async fn run_app(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, view: TodoView<TodoApiClient>) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut app = App { view, selected: 0, mode: Mode::View, list_state: ListState::default(), draft: String::new() };
    // Show the loading state before the first fetch returns.
    app.draw(terminal)?;
    app.view.mount().await;

    loop {
        app.draw(terminal)?;

        if !event::poll(tick_rate)? { continue; }
        let Event::Key(key) = event::read()? else { continue };
        // Only act on key presses; ignore repeats and releases to prevent duplicate input
        if key.kind != KeyEventKind::Press { continue; }
        let selected = app.view.items().get(app.selected).map(|t| (t.id, t.title.clone()));
        // Mutation failures land in the view's notice; the loop keeps running.
        match app.mode {
            Mode::View => match key.code {
                KeyCode::Char('q') => break,
                KeyCode::Up => { if app.selected > 0 { app.selected -= 1; } }
                KeyCode::Down => { if app.selected + 1 < app.view.items().len() { app.selected += 1; } }
                KeyCode::Enter => {
                    if let Some((id, _)) = selected { let _ = app.view.toggle(id).await; }
                }
                KeyCode::Char('n') => { app.mode = Mode::Create; app.draft.clear(); }
                KeyCode::Char('e') => {
                    if let Some((_, title)) = selected { app.mode = Mode::Edit; app.draft = title; }
                }
                KeyCode::Char('d') => {
                    if let Some((id, _)) = selected {
                        let removed = app.view.remove(id).await.is_ok();
                        app.selected = selection_after_delete(app.selected, removed);
                    }
                }
                KeyCode::Char('r') => { app.view.invalidate(); app.view.refresh().await; }
                _ => {}
            },
            Mode::Create | Mode::Edit => match key.code {
                KeyCode::Esc => { app.mode = Mode::View; app.draft.clear(); }
                KeyCode::Enter => {
                    let title = app.draft.trim().to_string();
                    if !title.is_empty() {
                        match (app.mode, selected) {
                            (Mode::Create, _) => { let _ = app.view.create(&title).await; }
                            (Mode::Edit, Some((id, _))) => {
                                let _ = app.view.update(id, UpdateTodo { title: Some(title), completed: None }).await;
                            }
                            _ => {}
                        }
                    }
                    app.mode = Mode::View;
                    app.draft.clear();
                }
                KeyCode::Backspace => { app.draft.pop(); }
                KeyCode::Char(c) => app.draft.push(c),
                _ => {}
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::selection_after_delete;

    #[test]
    fn failed_delete_keeps_selection() {
        assert_eq!(selection_after_delete(2, false), 2);
        assert_eq!(selection_after_delete(2, true), 1);
        assert_eq!(selection_after_delete(0, true), 0);
    }
}
