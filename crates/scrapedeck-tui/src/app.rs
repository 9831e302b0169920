//! Application core — event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use bytesize::ByteSize;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tracing::{info, warn};

use scrapedeck_core::service::CSV_FILE_NAME;
use scrapedeck_core::{Debouncer, ScrapeService};

use crate::action::{Action, ConfirmAction, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// How long a toast stays on screen.
const TOAST_TTL: Duration = Duration::from_secs(3);

/// Top-level application state and event loop.
pub struct App {
    /// Current active screen.
    active_screen: ScreenId,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Help overlay visibility.
    help_visible: bool,
    /// Search overlay visibility (companies screen only).
    search_active: bool,
    /// Current (uncommitted) search query.
    search_query: String,
    /// Commit-after-quiet-period policy for the search query.
    debouncer: Debouncer<String>,
    /// Action sender — components can dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Gateway facade; cloned into background tasks.
    service: ScrapeService,
    /// Pending confirmation dialog (blocks other input while active).
    pending_confirm: Option<ConfirmAction>,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
}

impl App {
    pub fn new(service: ScrapeService) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens().into_iter().collect();

        Self {
            active_screen: ScreenId::Scrape,
            screens,
            running: true,
            help_visible: false,
            search_active: false,
            search_query: String::new(),
            debouncer: Debouncer::default(),
            action_tx,
            action_rx,
            service,
            pending_confirm: None,
            notification: None,
        }
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        // Kick off the initial collection fetch.
        self.action_tx.send(Action::Refresh)?;

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action(s)
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys are delegated to the active screen component.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Confirmation dialog captures all input.
        if self.pending_confirm.is_some() {
            return match key.code {
                KeyCode::Char('y' | 'Y') => Ok(Some(Action::ConfirmYes)),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Ok(Some(Action::ConfirmNo)),
                _ => Ok(None),
            };
        }

        // The scrape screen is a text-entry surface: it captures every key
        // except quit and screen switching, so URLs may contain 'q', '/',
        // digits, and anything else.
        if self.active_screen == ScreenId::Scrape {
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Ok(Some(Action::Quit));
            }
            if key.code == KeyCode::Tab {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            if let Some(screen) = self.screens.get_mut(&ScreenId::Scrape) {
                return screen.handle_key_event(key);
            }
            return Ok(None);
        }

        // Search bar captures input while open.
        if self.search_active {
            return match key.code {
                KeyCode::Esc => {
                    self.search_active = false;
                    self.search_query.clear();
                    self.debouncer.cancel();
                    Ok(Some(Action::CloseSearch))
                }
                KeyCode::Enter => {
                    // Commit immediately, skip the remaining quiet period.
                    self.search_active = false;
                    self.debouncer.cancel();
                    Ok(Some(Action::SearchCommitted(self.search_query.clone())))
                }
                KeyCode::Backspace => {
                    self.search_query.pop();
                    self.debouncer.input(self.search_query.clone(), Instant::now());
                    Ok(Some(Action::SearchInput(self.search_query.clone())))
                }
                KeyCode::Char(c) => {
                    self.search_query.push(c);
                    self.debouncer.input(self.search_query.clone(), Instant::now());
                    Ok(Some(Action::SearchInput(self.search_query.clone())))
                }
                _ => Ok(None),
            };
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        // Global keybindings
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),

            (KeyModifiers::NONE, KeyCode::Char('/')) => return Ok(Some(Action::OpenSearch)),

            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='2')) => {
                #[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
                let n = c as u8 - b'0';
                if let Some(screen) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }

            _ => {}
        }

        // Delegate to active screen component
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    /// Process a single action — update app state and propagate to components.
    #[allow(clippy::too_many_lines)]
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(..) | Action::Render => {}

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::OpenSearch => {
                // Search belongs to the list; jump there if needed.
                if self.active_screen != ScreenId::Companies {
                    self.action_tx
                        .send(Action::SwitchScreen(ScreenId::Companies))?;
                }
                self.search_active = true;
                self.search_query.clear();
            }

            Action::Tick => {
                // Auto-dismiss toasts.
                if let Some((_, created)) = &self.notification {
                    if created.elapsed() > TOAST_TTL {
                        self.notification = None;
                    }
                }
                // Commit a quiet search term.
                if let Some(term) = self.debouncer.poll(Instant::now()) {
                    self.action_tx.send(Action::SearchCommitted(term))?;
                }
                // Forward ticks to the active screen (throbber animation).
                if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                    let _ = screen.update(action);
                }
            }

            // ── Background work ───────────────────────────────────────
            Action::Refresh => self.spawn_refresh(),

            Action::SubmitScrape(url) => self.spawn_scrape(url.clone()),

            Action::RequestSaveScraped(company) => self.spawn_save(company.clone()),

            Action::OpenDetail(id) => self.spawn_detail_fetch(id.to_string()),

            Action::RequestExport => self.spawn_export(),

            // After a successful save: toast, jump to the list, re-fetch.
            Action::SaveFinished => {
                self.forward_to_all(action)?;
                self.action_tx
                    .send(Action::Notify(Notification::success("Saved")))?;
                self.action_tx
                    .send(Action::SwitchScreen(ScreenId::Companies))?;
                self.action_tx.send(Action::Refresh)?;
            }

            // Confirmation dialog management
            Action::ShowConfirm(confirm) => {
                self.pending_confirm = Some(confirm.clone());
            }

            Action::ConfirmYes => {
                if let Some(confirm) = self.pending_confirm.take() {
                    match confirm {
                        ConfirmAction::DeleteSelected { ids } => self.spawn_delete(ids),
                    }
                }
            }

            Action::ConfirmNo => {
                self.pending_confirm = None;
            }

            // Notifications
            Action::Notify(n) => {
                self.notification = Some((n.clone(), Instant::now()));
            }

            Action::DismissNotification => {
                self.notification = None;
            }

            // Data updates go to ALL screens so they stay in sync.
            Action::CompaniesLoaded(_)
            | Action::CompaniesLoadFailed(_)
            | Action::DeleteFinished { .. }
            | Action::CloseSearch
            | Action::SearchInput(_)
            | Action::SearchCommitted(_) => {
                self.forward_to_all(action)?;
            }

            // Everything else goes to the active screen only.
            other => {
                if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                    if let Some(follow_up) = screen.update(other)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn forward_to_all(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    // ── Background tasks ─────────────────────────────────────────────
    //
    // Each task is a spawned oneshot that reports back through the action
    // channel. Stale fetch responses are discarded by the store's
    // generation guard; results arriving after quit land in a closed
    // channel and vanish.

    fn spawn_refresh(&self) {
        let service = self.service.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match service.refresh().await {
                Ok(snapshot) => {
                    let _ = tx.send(Action::CompaniesLoaded(snapshot));
                }
                Err(e) => {
                    warn!(error = %e, "collection fetch failed");
                    let _ = tx.send(Action::CompaniesLoadFailed(e.to_string()));
                    let _ = tx.send(Action::Notify(Notification::error(format!("{e}"))));
                }
            }
        });
    }

    fn spawn_scrape(&self, url: String) {
        let service = self.service.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match service.scrape(&url).await {
                Ok(company) => {
                    let _ = tx.send(Action::ScrapeFinished(Box::new(company)));
                    let _ = tx.send(Action::Notify(Notification::success(
                        "Website scraped successfully",
                    )));
                }
                Err(e) => {
                    warn!(error = %e, "scrape failed");
                    let _ = tx.send(Action::ScrapeFailed(e.to_string()));
                }
            }
        });
    }

    fn spawn_save(&self, company: Box<scrapedeck_core::Company>) {
        let service = self.service.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match service.save(&company).await {
                Ok(()) => {
                    let _ = tx.send(Action::SaveFinished);
                }
                Err(e) => {
                    warn!(error = %e, "save failed");
                    let _ = tx.send(Action::SaveFailed(e.to_string()));
                    let _ = tx.send(Action::Notify(Notification::error(format!("{e}"))));
                }
            }
        });
    }

    fn spawn_delete(&self, ids: Vec<String>) {
        let service = self.service.clone();
        let tx = self.action_tx.clone();
        let count = ids.len();
        tokio::spawn(async move {
            match service.delete_many(&ids).await {
                Ok(snapshot) => {
                    let _ = tx.send(Action::DeleteFinished { removed: count });
                    let _ = tx.send(Action::CompaniesLoaded(snapshot));
                }
                Err(e) => {
                    // Selection stays as it was; only a toast is shown.
                    warn!(error = %e, "delete failed");
                    let _ = tx.send(Action::Notify(Notification::error(format!("{e}"))));
                }
            }
        });
    }

    fn spawn_detail_fetch(&self, id: String) {
        let service = self.service.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match service.company(&id).await {
                Ok(company) => {
                    let _ = tx.send(Action::DetailLoaded(Box::new(company)));
                }
                Err(e) => {
                    let _ = tx.send(Action::DetailFailed(e.to_string()));
                }
            }
        });
    }

    fn spawn_export(&self) {
        let service = self.service.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = async {
                let bytes = service.export_csv().await?;
                tokio::fs::write(CSV_FILE_NAME, &bytes)
                    .await
                    .map_err(|e| scrapedeck_core::CoreError::Internal(e.to_string()))?;
                Ok::<usize, scrapedeck_core::CoreError>(bytes.len())
            }
            .await;

            match result {
                Ok(len) => {
                    #[allow(clippy::as_conversions)]
                    let _ = tx.send(Action::Notify(Notification::success(format!(
                        "Exported {} to {CSV_FILE_NAME}",
                        ByteSize::b(len as u64)
                    ))));
                }
                Err(e) => {
                    warn!(error = %e, "CSV export failed");
                    let _ = tx.send(Action::Notify(Notification::error(format!("{e}"))));
                }
            }
        });
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Layout: [screen content] [tab bar] [status bar]
        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }

        self.render_tab_bar(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        // Overlays on top (order matters: last = topmost)
        if let Some((ref notif, _)) = self.notification {
            self.render_notification(frame, area, notif);
        }

        if let Some(ref confirm) = self.pending_confirm {
            self.render_confirm_dialog(frame, area, confirm);
        }

        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if self.search_active {
            let line = Line::from(vec![
                Span::styled(" / ", Style::default().fg(theme::VIOLET)),
                Span::styled(&self.search_query, Style::default().fg(theme::INDIGO)),
                Span::styled("█", Style::default().fg(theme::INDIGO)),
                Span::styled("  Esc cancel  Enter apply", theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let hints = Span::styled(
            " ? help  / search  Tab switch  q quit",
            theme::key_hint(),
        );
        frame.render_widget(Paragraph::new(Line::from(hints)), area);
    }

    /// Render the help overlay centered on screen.
    #[allow(clippy::unused_self)]
    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_width = 56u16.min(area.width.saturating_sub(4));
        let help_height = 16u16.min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let row = |key: &'static str, desc: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
                Span::styled(desc, theme::key_hint()),
            ])
        };

        let help_text = vec![
            Line::from(""),
            row("1/2, Tab", "Switch screen"),
            row("j/k ↑/↓", "Move cursor"),
            row("h/l ←/→", "Previous / next page"),
            row("space", "Toggle row selection"),
            row("a", "Select / deselect page"),
            row("d", "Delete selected"),
            row("e", "Export CSV"),
            row("r", "Refresh"),
            row("Enter", "Open detail / scrape"),
            row("/", "Search"),
            row("q", "Quit"),
            Line::from(""),
            Line::from(Span::styled(
                "                    Esc or ? to close",
                theme::key_hint(),
            )),
        ];
        frame.render_widget(Paragraph::new(help_text), inner);
    }

    /// Render a centered confirmation dialog.
    #[allow(clippy::unused_self)]
    fn render_confirm_dialog(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
        let width = 50u16.min(area.width.saturating_sub(4));
        let height = 5u16;

        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let dialog_area = Rect::new(area.x + x, area.y + y, width, height);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            dialog_area,
        );

        let block = Block::default()
            .title(" Confirm ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::AMBER));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let text = vec![
            Line::from(Span::styled(
                format!("  {confirm}"),
                Style::default().fg(theme::DIM_WHITE),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  y ", theme::key_hint_key()),
                Span::styled("confirm    ", theme::key_hint()),
                Span::styled("n ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(text), inner);
    }

    /// Render a notification toast in the bottom-right corner.
    #[allow(clippy::unused_self)]
    fn render_notification(&self, frame: &mut Frame, area: Rect, notif: &Notification) {
        #[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
        let msg_len = notif.message.len() as u16;
        let width = (msg_len + 6).clamp(20, 60);
        let height = 3u16;

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 2); // above status bar
        let toast_area = Rect::new(area.x + x, area.y + y, width, height);

        let (border_color, icon) = match notif.level {
            NotificationLevel::Success => (theme::SUCCESS_GREEN, "✓"),
            NotificationLevel::Error => (theme::ERROR_RED, "✗"),
            NotificationLevel::Warning => (theme::AMBER, "!"),
            NotificationLevel::Info => (theme::INDIGO, "·"),
        };

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            toast_area,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
            Span::styled(&notif.message, Style::default().fg(theme::DIM_WHITE)),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}
