use crate::error::TaskError;
use crate::manager::TaskManager;
use crate::task::Priority;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
}

impl Dialog {
    fn new(kind: DialogKind, title: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message: message.into(),
        }
    }

    fn from_error(err: &TaskError, empty_message: &str) -> Self {
        match err {
            TaskError::EmptyStore => Self::new(DialogKind::Info, "Info", empty_message),
            other => Self::new(DialogKind::Error, "Error", other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Dialog(Dialog),
    TaskList,
}

/// Form state, independent of the terminal.
#[derive(Debug)]
pub struct App {
    pub manager: TaskManager,
    pub description: String,
    pub priority: Priority,
    pub overlay: Option<Overlay>,
    pub should_quit: bool,
}

impl App {
    pub fn new(manager: TaskManager, priority: Priority) -> Self {
        Self {
            manager,
            description: String::new(),
            priority,
            overlay: None,
            should_quit: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.overlay.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                self.overlay = None;
            }
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Enter => self.add_task(),
            KeyCode::Char('d') if ctrl => self.remove_task(),
            KeyCode::Char('l') if ctrl => self.list_tasks(),
            KeyCode::Char('r') if ctrl => self.recommend_task(),
            KeyCode::Left => self.priority = self.priority.prev(),
            KeyCode::Right => self.priority = self.priority.next(),
            KeyCode::Backspace => {
                self.description.pop();
            }
            KeyCode::Char(c) if !ctrl => self.description.push(c),
            _ => {}
        }
    }

    fn add_task(&mut self) {
        let dialog = match self.manager.add(&self.description, self.priority) {
            Ok(()) => {
                self.description.clear();
                Dialog::new(DialogKind::Success, "Success", "Task added successfully.")
            }
            Err(err) => Dialog::from_error(&err, "No tasks available."),
        };
        self.overlay = Some(Overlay::Dialog(dialog));
    }

    fn remove_task(&mut self) {
        let dialog = match self.manager.remove(&self.description) {
            Ok(removed) => {
                self.description.clear();
                let message = match removed {
                    0 => "No matching task; nothing removed.".to_string(),
                    1 => "Task removed successfully.".to_string(),
                    n => format!("{n} tasks removed successfully."),
                };
                Dialog::new(DialogKind::Success, "Success", message)
            }
            Err(err) => Dialog::from_error(&err, "No tasks available."),
        };
        self.overlay = Some(Overlay::Dialog(dialog));
    }

    fn list_tasks(&mut self) {
        self.overlay = Some(match self.manager.list() {
            Ok(_) => Overlay::TaskList,
            Err(err) => Overlay::Dialog(Dialog::from_error(&err, "No tasks available.")),
        });
    }

    fn recommend_task(&mut self) {
        let dialog = match self.manager.recommend() {
            Ok(pick) => Dialog::new(
                DialogKind::Info,
                "Recommended Task",
                format!(
                    "Recommended task: {} - Priority: High ({:.0}% likely)",
                    pick.task.description,
                    pick.probability * 100.0
                ),
            ),
            Err(err) => Dialog::from_error(&err, "No tasks available for recommendations."),
        };
        self.overlay = Some(Overlay::Dialog(dialog));
    }
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }
    }
    Ok(())
}

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    let description = Paragraph::new(app.description.as_str()).block(
        Block::default()
            .title("Task Description")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(description, chunks[0]);

    let mut spans = Vec::new();
    for p in Priority::ALL {
        let style = if p == app.priority {
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!(" {p} "), style));
        spans.push(Span::raw(" "));
    }
    let priority = Paragraph::new(Line::from(spans))
        .block(Block::default().title("Task Priority (←/→)").borders(Borders::ALL));
    f.render_widget(priority, chunks[1]);

    let help = Paragraph::new(vec![
        Line::from("Enter  Add Task"),
        Line::from("Ctrl-D Remove Task"),
        Line::from("Ctrl-L List Tasks"),
        Line::from("Ctrl-R Recommend Task"),
        Line::from("Esc    Quit"),
    ])
    .block(Block::default().title("Actions").borders(Borders::ALL));
    f.render_widget(help, chunks[2]);

    let store = app.manager.store();
    let saved = store
        .last_saved()
        .map(|t| format!("saved {}", t.format("%H:%M:%S")))
        .unwrap_or_else(|| "not saved this session".to_string());
    let footer = Paragraph::new(format!(" {} tasks | {saved}", store.len()))
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, chunks[3]);

    match &app.overlay {
        Some(Overlay::Dialog(dialog)) => draw_dialog(f, dialog),
        Some(Overlay::TaskList) => draw_task_list(f, app),
        None => {}
    }
}

fn draw_dialog(f: &mut Frame, dialog: &Dialog) {
    let color = match dialog.kind {
        DialogKind::Success => Color::Green,
        DialogKind::Error => Color::Red,
        DialogKind::Info => Color::Cyan,
    };
    let area = centered_rect(60, 30, f.area());
    let body = Paragraph::new(dialog.message.as_str())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(dialog.title.as_str())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    f.render_widget(Clear, area);
    f.render_widget(body, area);
}

fn draw_task_list(f: &mut Frame, app: &App) {
    let area = centered_rect(80, 70, f.area());
    let rows: Vec<Row> = app
        .manager
        .store()
        .tasks()
        .iter()
        .map(|t| {
            Row::new(vec![
                Cell::from(t.description.as_str()),
                Cell::from(t.priority.as_str()),
            ])
        })
        .collect();
    let table = Table::new(rows, [Constraint::Min(10), Constraint::Length(8)])
        .header(
            Row::new(vec!["description", "priority"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().title("Task List").borders(Borders::ALL));
    f.render_widget(Clear, area);
    f.render_widget(table, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
