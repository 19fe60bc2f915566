//! Main application state, event handling, and rendering.

use std::time::Instant;

use chrono::{Datelike, Days, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use training_calendar::calendar::{
    self, GridCell, MonthGrid, MultiMonthComposer, NavigationState, ScheduleMutationAdapter,
};
use training_calendar::model::{ItemKind, MonthsToShow, Phase, ScheduledItem, SourceKind};
use training_calendar::store::{FileStore, ScheduleStore};

use crate::event::Event;
use crate::theme::Theme;

/// Entries offered in the source palette before any have been logged.
const DEFAULT_ROUTINES: [&str; 3] = ["Competition Routine", "Practice Routine", "Warm-up Routine"];
const DEFAULT_CONDITIONING: [&str; 5] = ["Beach Abs", "Upper Body", "Lower Body", "Cardio", "Flexibility"];

/// Return value from event handling.
#[derive(Debug, PartialEq)]
pub enum Action {
    Continue,
    Quit,
    ForceRefresh,
}

/// Input mode for modal states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Detail,
    Palette,
    Help,
}

/// Core application state.
pub struct App {
    // Core data
    pub store: FileStore,
    pub items: Vec<ScheduledItem>,
    pub phases: Vec<Phase>,

    // Calendar state
    pub nav: NavigationState,
    pub composer: MultiMonthComposer,
    pub selected: NaiveDate,
    pub grids: Vec<MonthGrid>,

    // UI state
    pub mode: InputMode,
    pub palette_source: SourceKind,
    pub palette_index: usize,

    // Theme
    pub theme: Theme,

    // Status
    pub watcher_active: bool,
    pub no_watch: bool,
    pub last_refresh: Option<Instant>,
    pub error_message: Option<(String, Instant)>,
    pub status_message: Option<(String, Instant)>,
    pub clock: String,

    // Cell areas for mouse hit-testing
    pub cell_areas: Vec<(Rect, NaiveDate)>,
}

impl App {
    pub fn new(
        store: FileStore,
        nav: NavigationState,
        composer: MultiMonthComposer,
        no_watch: bool,
    ) -> Self {
        let today = Self::today();
        let selected = if nav.shows(today) {
            today
        } else {
            nav.reference_month().first_day()
        };
        Self {
            store,
            items: Vec::new(),
            phases: Vec::new(),
            selected,
            nav,
            composer,
            grids: Vec::new(),
            mode: InputMode::Normal,
            palette_source: SourceKind::Routine,
            palette_index: 0,
            theme: Theme::chalk(),
            watcher_active: !no_watch,
            no_watch,
            last_refresh: None,
            error_message: None,
            status_message: None,
            clock: chrono::Local::now().format("%H:%M:%S").to_string(),
            cell_areas: Vec::new(),
        }
    }

    fn today() -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    /// Load items and/or phases from the store and rebuild the grids.
    pub fn reload(&mut self, items: bool, phases: bool) {
        if items {
            match self.store.list_items() {
                Ok(loaded) => self.items = loaded,
                Err(e) => self.error_message = Some((e.to_string(), Instant::now())),
            }
        }
        if phases {
            match self.store.list_phases() {
                Ok(loaded) => self.phases = loaded,
                Err(e) => self.error_message = Some((e.to_string(), Instant::now())),
            }
        }
        self.last_refresh = Some(Instant::now());
        self.recompute_grids();
    }

    fn recompute_grids(&mut self) {
        self.grids = self.nav.grid_model(&self.composer, &self.items, &self.phases);
    }

    /// Main event loop.
    pub async fn run(
        &mut self,
        terminal: &mut ratatui::DefaultTerminal,
        data_dir: std::path::PathBuf,
    ) -> color_eyre::Result<()> {
        self.reload(true, true);

        let mut events = crate::event::EventHandler::new(data_dir, !self.no_watch);

        loop {
            // RENDER
            terminal.draw(|frame| self.render(frame))?;

            // WAIT FOR EVENT
            let Some(event) = events.next().await else {
                break;
            };

            // UPDATE
            match self.handle_event(event) {
                Action::Quit => break,
                Action::ForceRefresh => self.reload(true, true),
                Action::Continue => {}
            }
        }

        Ok(())
    }

    /// Handle a single event.
    pub fn handle_event(&mut self, event: Event) -> Action {
        match event {
            Event::Key(key) => self.handle_key_event(key),
            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
            Event::Tick => {
                self.clock = chrono::Local::now().format("%H:%M:%S").to_string();
                // Auto-dismiss messages after 10 seconds
                for message in [&mut self.error_message, &mut self.status_message] {
                    if matches!(message, Some((_, when)) if when.elapsed().as_secs() >= 10) {
                        *message = None;
                    }
                }
                Action::Continue
            }
            Event::ScheduleChanged(scope) => {
                self.watcher_active = true;
                tracing::debug!(?scope, "data files changed");
                self.reload(scope.reloads_items(), scope.reloads_phases());
                Action::Continue
            }
            Event::DateChanged(today) => {
                // Keep following "today" if the selection was on yesterday.
                if today.pred_opt() == Some(self.selected) {
                    self.select_date(today);
                } else {
                    self.recompute_grids();
                }
                Action::Continue
            }
            Event::Resize => Action::Continue,
        }
    }

    /// Handle key events.
    fn handle_key_event(&mut self, key: KeyEvent) -> Action {
        // Global keys
        match key.code {
            KeyCode::Char('q') if self.mode == InputMode::Normal => return Action::Quit,
            KeyCode::Char('?') => {
                self.mode = if self.mode == InputMode::Help {
                    InputMode::Normal
                } else {
                    InputMode::Help
                };
                return Action::Continue;
            }
            KeyCode::Esc => {
                self.mode = InputMode::Normal;
                return Action::Continue;
            }
            _ => {}
        }

        match self.mode {
            InputMode::Help => {
                self.mode = InputMode::Normal;
                Action::Continue
            }
            InputMode::Palette => {
                self.handle_palette_key(key);
                Action::Continue
            }
            InputMode::Detail => {
                match key.code {
                    KeyCode::Enter => self.mode = InputMode::Normal,
                    KeyCode::Char('a') => self.open_palette(),
                    KeyCode::Char('x') => self.delete_last_item_on_selected(),
                    _ => {}
                }
                Action::Continue
            }
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.move_selection(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-7),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(7),
            KeyCode::Char('n') | KeyCode::PageDown => {
                self.nav.advance();
                self.follow_reference_month();
            }
            KeyCode::Char('p') | KeyCode::PageUp => {
                self.nav.retreat();
                self.follow_reference_month();
            }
            KeyCode::Char(c @ '1'..='3') => {
                self.nav.set_months_to_show(i64::from(c as u8 - b'0'));
                self.recompute_grids();
            }
            KeyCode::Char('v') => {
                self.nav.set_view(self.nav.months_to_show().next());
                self.recompute_grids();
            }
            KeyCode::Char('T') => self.select_date(Self::today()),
            KeyCode::Enter => self.mode = InputMode::Detail,
            KeyCode::Char('a') => self.open_palette(),
            KeyCode::Char('x') => self.delete_last_item_on_selected(),
            KeyCode::Char('r') => return Action::ForceRefresh,
            KeyCode::Char('t') => self.theme = self.theme.next(),
            _ => {}
        }
        Action::Continue
    }

    fn handle_palette_key(&mut self, key: KeyEvent) {
        let len = self.palette_entries(self.palette_source).len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') if len > 0 => {
                self.palette_index = (self.palette_index + 1).min(len - 1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.palette_index = self.palette_index.saturating_sub(1);
            }
            KeyCode::Tab => {
                self.palette_source = self.palette_source.next();
                self.palette_index = 0;
            }
            KeyCode::Enter => {
                if let Some(name) = self
                    .palette_entries(self.palette_source)
                    .get(self.palette_index)
                    .cloned()
                {
                    self.drop_on_selected(self.palette_source, &name);
                }
                self.mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    /// Handle mouse events. Clicking a day selects it; clicking the selected
    /// day again opens its detail.
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Action {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if self.mode == InputMode::Normal => {
                let hit = self
                    .cell_areas
                    .iter()
                    .find(|(area, _)| area.contains((mouse.column, mouse.row).into()))
                    .map(|(_, date)| *date);
                if let Some(date) = hit {
                    if date == self.selected {
                        self.mode = InputMode::Detail;
                    } else {
                        self.select_date(date);
                    }
                }
            }
            MouseEventKind::ScrollDown if self.mode == InputMode::Normal => {
                self.nav.advance();
                self.follow_reference_month();
            }
            MouseEventKind::ScrollUp if self.mode == InputMode::Normal => {
                self.nav.retreat();
                self.follow_reference_month();
            }
            _ => {}
        }
        Action::Continue
    }

    // ─────────────────────────────────────────────────────────
    // Selection helpers
    // ─────────────────────────────────────────────────────────

    fn move_selection(&mut self, days: i64) {
        let shifted = if days >= 0 {
            self.selected.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.selected.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        if let Some(date) = shifted {
            self.select_date(date);
        }
    }

    fn select_date(&mut self, date: NaiveDate) {
        self.selected = date;
        self.nav.reveal(date);
        self.recompute_grids();
    }

    /// Keep the selection inside the visible months after paging.
    fn follow_reference_month(&mut self) {
        if !self.nav.shows(self.selected) {
            let month = self.nav.reference_month();
            let day = self.selected.day().min(month.days_in_month());
            self.selected = month.first_day().with_day(day).unwrap_or(month.first_day());
        }
        self.recompute_grids();
    }

    // ─────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────

    fn open_palette(&mut self) {
        self.palette_index = 0;
        self.mode = InputMode::Palette;
    }

    /// Names offered for a drag source: built-in defaults first, then
    /// whatever has been logged before, without repeats.
    pub fn palette_entries(&self, source: SourceKind) -> Vec<String> {
        let defaults: &[&str] = match source {
            SourceKind::Routine => &DEFAULT_ROUTINES,
            SourceKind::Conditioning => &DEFAULT_CONDITIONING,
            SourceKind::Skills => &[],
        };
        let logged = self.items.iter().flat_map(|item| {
            let own = (item.kind == source.item_kind()).then_some(item.name.as_str());
            let skills = match (source, item.kind) {
                (SourceKind::Skills, ItemKind::Routine) => item.payload.skills.as_slice(),
                _ => &[],
            };
            own.into_iter().chain(skills.iter().map(String::as_str))
        });

        let mut entries: Vec<String> = Vec::new();
        for name in defaults.iter().copied().chain(logged) {
            if !entries.iter().any(|e| e == name) {
                entries.push(name.to_string());
            }
        }
        entries
    }

    fn drop_on_selected(&mut self, source: SourceKind, name: &str) {
        let request =
            ScheduleMutationAdapter::on_drop(source, self.selected, name).in_phase_of(&self.phases);
        match self.store.create_item(request) {
            Ok(item) => {
                self.status_message = Some((
                    format!("Added {} on {}", item.name, self.selected.format("%b %d")),
                    Instant::now(),
                ));
                self.items.push(item);
                self.recompute_grids();
            }
            Err(e) => self.error_message = Some((e.to_string(), Instant::now())),
        }
    }

    fn delete_last_item_on_selected(&mut self) {
        let Some(id) = self
            .items
            .iter()
            .rev()
            .find(|item| item.is_on(self.selected))
            .and_then(|item| item.id.clone())
        else {
            return;
        };
        match self.store.delete_item(&id) {
            Ok(()) => {
                self.items.retain(|item| item.id.as_ref() != Some(&id));
                self.status_message = Some((format!("Deleted {id}"), Instant::now()));
                self.recompute_grids();
            }
            Err(e) => self.error_message = Some((e.to_string(), Instant::now())),
        }
    }

    // ─────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // Graceful degradation for tiny terminals
        if area.width < 40 || area.height < 12 {
            let msg = Paragraph::new("Terminal too small. Resize to at least 80x24.")
                .alignment(Alignment::Center)
                .style(Style::default().fg(self.theme.error));
            frame.render_widget(msg, area);
            return;
        }

        let [title_area, tabs_area, message_area, main_area, status_area] = Layout::vertical([
            Constraint::Length(1), // title bar
            Constraint::Length(1), // view tabs + current phase
            Constraint::Length(1), // error / status line
            Constraint::Fill(1),   // month grids
            Constraint::Length(1), // shortcuts
        ])
        .areas(area);

        self.render_title_bar(frame, title_area);
        self.render_tabs_bar(frame, tabs_area);
        self.render_message_line(frame, message_area);
        self.render_status_bar(frame, status_area);

        let month_areas = Layout::horizontal(vec![Constraint::Fill(1); self.grids.len().max(1)])
            .spacing(1)
            .split(main_area);

        let mut hit_areas = Vec::new();
        for (grid, grid_area) in self.grids.iter().zip(month_areas.iter()) {
            self.render_month(frame, *grid_area, grid, &mut hit_areas);
        }
        self.cell_areas = hit_areas;

        // Overlays
        match self.mode {
            InputMode::Detail => self.render_detail_overlay(frame, area),
            InputMode::Palette => self.render_palette_overlay(frame, area),
            InputMode::Help => self.render_help_overlay(frame, area),
            InputMode::Normal => {}
        }
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let watcher_indicator = if self.no_watch {
            Span::styled("○ STATIC", Style::default().fg(self.theme.text_secondary))
        } else if self.watcher_active {
            Span::styled("● WATCHING", Style::default().fg(self.theme.accent))
        } else {
            Span::styled("● WATCHER ERROR", Style::default().fg(self.theme.error))
        };

        let padding = area
            .width
            .saturating_sub(22 + self.clock.len() as u16 + 12) as usize;

        let title = Line::from(vec![
            Span::styled(
                " ◇ Training Calendar",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ".repeat(padding)),
            Span::raw(&self.clock),
            Span::raw("  "),
            watcher_indicator,
            Span::raw(" "),
        ]);

        frame.render_widget(
            Paragraph::new(title).style(
                Style::default()
                    .bg(self.theme.bar_bg)
                    .fg(self.theme.text_on_bar),
            ),
            area,
        );
    }

    fn render_tabs_bar(&self, frame: &mut Frame, area: Rect) {
        let current = self.nav.months_to_show();
        let mut spans = vec![Span::raw(" ")];
        for option in [MonthsToShow::One, MonthsToShow::Two, MonthsToShow::Three] {
            let style = if option == current {
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(self.theme.text_secondary)
            };
            spans.push(Span::styled(format!(" {} ", option.label()), style));
            spans.push(Span::raw(" "));
        }

        if let Some(phase) = calendar::current_phase(Self::today(), &self.phases) {
            spans.push(Span::raw(" │ "));
            spans.push(Span::styled(
                format!(" Current Phase: {} ", phase.name),
                Style::default()
                    .bg(self.theme.phase_color(phase))
                    .fg(self.theme.text_on_bar),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_message_line(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some((ref msg, _)) = self.error_message {
            Line::styled(format!(" ⚠ {msg}"), Style::default().fg(self.theme.warning))
        } else if let Some((ref msg, _)) = self.status_message {
            Line::styled(format!(" ✓ {msg}"), Style::default().fg(self.theme.text_secondary))
        } else if let Some(at) = self.last_refresh {
            Line::styled(
                format!(
                    " {} items · {} phases · loaded {}s ago",
                    self.items.len(),
                    self.phases.len(),
                    at.elapsed().as_secs()
                ),
                Style::default().fg(self.theme.outside_month),
            )
        } else {
            Line::raw("")
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let theme_name = self.theme.name;
        let bold = Style::default().add_modifier(Modifier::BOLD);

        let shortcuts = Line::from(vec![
            Span::styled(" ←↑↓→", bold),
            Span::raw(" Day  "),
            Span::styled("n/p", bold),
            Span::raw(" Month  "),
            Span::styled("1-3", bold),
            Span::raw(" View  "),
            Span::styled("Enter", bold),
            Span::raw(" Detail  "),
            Span::styled("a", bold),
            Span::raw(" Add  "),
            Span::styled("x", bold),
            Span::raw(" Delete  "),
            Span::styled("?", bold),
            Span::raw(" Help  "),
            Span::styled("q", bold),
            Span::raw(format!(" Quit  │ {theme_name}")),
        ]);

        frame.render_widget(
            Paragraph::new(shortcuts).style(
                Style::default()
                    .bg(self.theme.bar_bg)
                    .fg(self.theme.text_on_bar),
            ),
            area,
        );
    }

    fn render_month(
        &self,
        frame: &mut Frame,
        area: Rect,
        grid: &MonthGrid,
        hit_areas: &mut Vec<(Rect, NaiveDate)>,
    ) {
        let theme = self.theme;
        let block = Block::bordered()
            .border_style(Style::default().fg(theme.border))
            .title(Line::from(format!(" {} ", grid.title)).alignment(Alignment::Center));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width < 7 || inner.height < 2 {
            return;
        }

        let col_width = inner.width / 7;
        let rows = grid.row_count().max(1) as u16;
        let row_height = (inner.height.saturating_sub(1) / rows).max(1);

        for (col, label) in grid.weekday_labels.iter().enumerate() {
            let header = Rect {
                x: inner.x + col as u16 * col_width,
                y: inner.y,
                width: col_width,
                height: 1,
            };
            frame.render_widget(
                Paragraph::new(*label)
                    .alignment(Alignment::Center)
                    .style(
                        Style::default()
                            .fg(theme.text_secondary)
                            .add_modifier(Modifier::BOLD),
                    ),
                header,
            );
        }

        let today = Self::today();
        for (row, week) in grid.weeks().enumerate() {
            for (col, cell) in week.iter().enumerate() {
                let cell_area = Rect {
                    x: inner.x + col as u16 * col_width,
                    y: inner.y + 1 + row as u16 * row_height,
                    width: col_width,
                    height: row_height,
                }
                .intersection(inner);
                if cell_area.is_empty() {
                    continue;
                }
                self.render_cell(frame, cell_area, cell, today);
                hit_areas.push((cell_area, cell.date()));
            }
        }
    }

    fn render_cell(&self, frame: &mut Frame, area: Rect, cell: &GridCell, today: NaiveDate) {
        let theme = self.theme;
        let selected = cell.date() == self.selected;

        let mut number_style = if cell.day.in_current_month {
            Style::default().fg(theme.text_primary)
        } else {
            Style::default().fg(theme.outside_month)
        };
        if cell.date() == today {
            number_style = number_style.fg(theme.accent).add_modifier(Modifier::BOLD);
        }
        if selected {
            number_style = number_style.add_modifier(Modifier::REVERSED);
        }

        let mut lines: Vec<Line> = vec![Line::from(Span::styled(
            format!("{:>2}", cell.date().day()),
            number_style,
        ))];

        if area.height >= 2 {
            lines.push(phase_bar_line(cell, area.width as usize, &theme));
        }

        let visible = cell.visible_items();
        for item in visible.shown {
            lines.push(Line::from(vec![
                Span::styled("■ ", Style::default().fg(theme.item_color(item.kind))),
                Span::styled(item.name.clone(), Style::default().fg(theme.text_primary)),
            ]));
        }
        if visible.remainder > 0 {
            lines.push(Line::styled(
                format!("+{} more", visible.remainder),
                Style::default().fg(theme.text_secondary),
            ));
        }

        let style = if selected {
            Style::default().bg(theme.selected_bg)
        } else {
            Style::default()
        };
        frame.render_widget(Paragraph::new(lines).style(style), area);
    }

    fn render_detail_overlay(&self, frame: &mut Frame, area: Rect) {
        let theme = self.theme;
        let detail = calendar::on_day_click(self.selected, &self.items, &self.phases);

        let mut lines: Vec<Line> = Vec::new();
        match &detail.phase.active_phase {
            Some(phase) => {
                let mut marks = Vec::new();
                if detail.phase.is_phase_start {
                    marks.push("starts today");
                }
                if detail.phase.is_phase_end {
                    marks.push("ends today");
                }
                lines.push(Line::from(vec![
                    Span::styled(
                        format!(" {} ", phase.name),
                        Style::default()
                            .bg(theme.phase_color(phase))
                            .fg(theme.text_on_bar),
                    ),
                    Span::styled(
                        format!(
                            " {} · {} → {} {}",
                            phase.kind,
                            phase.start_date.format("%b %d"),
                            phase.end_date.format("%b %d"),
                            marks.join(", ")
                        ),
                        Style::default().fg(theme.text_secondary),
                    ),
                ]));
            }
            None => lines.push(Line::styled(
                "No phase",
                Style::default().fg(theme.text_secondary),
            )),
        }
        lines.push(Line::raw(""));

        if detail.items.is_empty() {
            lines.push(Line::styled(
                "Nothing scheduled",
                Style::default().fg(theme.text_secondary),
            ));
        }
        for item in &detail.items {
            lines.push(Line::from(vec![
                Span::styled("■ ", Style::default().fg(theme.item_color(item.kind))),
                Span::styled(item.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("  {}", item.kind),
                    Style::default().fg(theme.text_secondary),
                ),
            ]));
            let extras: Vec<&str> = item
                .payload
                .skills
                .iter()
                .chain(item.payload.exercises.iter())
                .map(String::as_str)
                .collect();
            if !extras.is_empty() {
                lines.push(Line::styled(
                    format!("    {}", extras.join(", ")),
                    Style::default().fg(theme.text_secondary),
                ));
            }
            if let Some(notes) = &item.payload.notes {
                lines.push(Line::styled(
                    format!("    “{notes}”"),
                    Style::default().fg(theme.text_secondary),
                ));
            }
        }
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "a Add   x Delete last   Esc Close",
            Style::default().fg(theme.text_secondary),
        ));

        let popup_area = centered_rect(60, (lines.len() as u16 + 2).min(area.height), area);
        frame.render_widget(Clear, popup_area);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::bordered()
                    .title(format!(" {} ", detail.title))
                    .border_style(Style::default().fg(theme.accent))
                    .style(Style::default().bg(theme.surface).fg(theme.text_primary)),
            ),
            popup_area,
        );
    }

    fn render_palette_overlay(&self, frame: &mut Frame, area: Rect) {
        let theme = self.theme;
        let entries = self.palette_entries(self.palette_source);

        let mut tabs = vec![Span::raw(" ")];
        let mut source = SourceKind::Routine;
        for _ in 0..3 {
            let style = if source == self.palette_source {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(theme.text_secondary)
            };
            tabs.push(Span::styled(format!(" {} ", source.label()), style));
            tabs.push(Span::raw(" "));
            source = source.next();
        }

        let mut lines = vec![Line::from(tabs), Line::raw("")];
        if entries.is_empty() {
            lines.push(Line::styled(
                "  Nothing to add yet",
                Style::default().fg(theme.text_secondary),
            ));
        }
        for (i, name) in entries.iter().enumerate() {
            if i == self.palette_index {
                lines.push(Line::styled(
                    format!("▸ {name}"),
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                ));
            } else {
                lines.push(Line::raw(format!("  {name}")));
            }
        }
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Tab Source   ↑↓ Choose   Enter Drop   Esc Cancel",
            Style::default().fg(theme.text_secondary),
        ));

        let popup_area = centered_rect(50, (lines.len() as u16 + 2).min(area.height), area);
        frame.render_widget(Clear, popup_area);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::bordered()
                    .title(format!(" Add to {} ", self.selected.format("%a %b %d")))
                    .border_style(Style::default().fg(theme.accent))
                    .style(Style::default().bg(theme.surface).fg(theme.text_primary)),
            ),
            popup_area,
        );
    }

    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 22, area);
        frame.render_widget(Clear, popup_area);

        let help_text = vec![
            Line::styled(
                "Keyboard Shortcuts",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
            Line::raw("  ←/h →/l   Previous / next day"),
            Line::raw("  ↑/k ↓/j   Previous / next week"),
            Line::raw("  n p       Next / previous month"),
            Line::raw("  1 2 3     Show one, two or three months"),
            Line::raw("  v         Cycle month count"),
            Line::raw("  T         Jump to today"),
            Line::raw("  Enter     Day detail"),
            Line::raw("  a         Add a routine, conditioning or skill"),
            Line::raw("  x         Delete the day's last item"),
            Line::raw("  r         Force refresh"),
            Line::raw("  t         Cycle theme"),
            Line::raw("  ?         Toggle this help"),
            Line::raw("  q         Quit"),
            Line::raw(""),
            Line::raw("  Mouse: click a day to select, click again for detail"),
            Line::raw(""),
            Line::styled(
                "Press any key to close",
                Style::default().fg(self.theme.text_secondary),
            ),
        ];

        let help = Paragraph::new(help_text).block(
            Block::bordered()
                .title(" Help ")
                .border_style(Style::default().fg(self.theme.accent))
                .style(Style::default().bg(self.theme.surface)),
        );

        frame.render_widget(help, popup_area);
    }
}

// ─────────────────────────────────────────────────────────
// Standalone helper functions
// ─────────────────────────────────────────────────────────

/// One row of the continuous phase bar: `▌` opens the bar on the start day
/// (followed by the phase name), `▐` closes it on the end day, and the days
/// between are flush so adjacent cells join up.
fn phase_bar_line(cell: &GridCell, width: usize, theme: &Theme) -> Line<'static> {
    let Some(phase) = &cell.active_phase else {
        return Line::raw("");
    };

    let open = if cell.is_phase_start { "▌" } else { "" };
    let close = if cell.is_phase_end { "▐" } else { "" };
    let budget = width.saturating_sub(open.chars().count() + close.chars().count());
    let label: String = cell.phase_label().unwrap_or("").chars().take(budget).collect();
    let fill = budget.saturating_sub(label.chars().count());

    Line::from(Span::styled(
        format!("{open}{label}{}{close}", " ".repeat(fill)),
        Style::default()
            .bg(theme.phase_color(phase))
            .fg(theme.text_on_bar),
    ))
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
