//! Scrape screen — URL entry, in-flight spinner, scraped-record preview,
//! and save.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tokio::sync::mpsc::UnboundedSender;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use scrapedeck_core::{Company, or_placeholder};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::truncate;

/// Where the scrape flow currently is.
enum Phase {
    /// Waiting for a URL.
    Idle,
    /// Request submitted, response pending.
    InFlight,
    /// Scrape finished; record shown, not yet persisted.
    Done(Box<Company>),
}

pub struct ScrapeScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    input: Input,
    phase: Phase,
    throbber: ThrobberState,
    /// Inline error from the last failed scrape.
    error: Option<String>,
    saving: bool,
}

impl ScrapeScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            action_tx: None,
            input: Input::default(),
            phase: Phase::Idle,
            throbber: ThrobberState::default(),
            error: None,
            saving: false,
        }
    }

    fn render_result(&self, frame: &mut Frame, area: Rect, company: &Company) {
        let block = Block::default()
            .title(" Scraped Data ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let label = |text: &str| Span::styled(format!("  {text:<12}"), theme::key_hint());
        let value = |text: String| Span::styled(text, Style::default().fg(theme::DIM_WHITE));

        let socials = company
            .social_links()
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", ");

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                label("Name"),
                Span::styled(
                    company.display_name().to_owned(),
                    Style::default().fg(theme::INDIGO),
                ),
            ]),
            Line::from(vec![
                label("Description"),
                value(truncate::truncate(
                    or_placeholder(company.description.as_deref()),
                    100,
                )),
            ]),
            Line::from(vec![
                label("Address"),
                value(truncate::truncate(
                    or_placeholder(company.address.as_deref()),
                    80,
                )),
            ]),
            Line::from(vec![
                label("Phone"),
                value(or_placeholder(company.first_phone()).to_owned()),
                label("  Email"),
                value(or_placeholder(company.email.as_deref()).to_owned()),
            ]),
            Line::from(vec![
                label("Social"),
                value(if socials.is_empty() {
                    scrapedeck_core::PLACEHOLDER.to_owned()
                } else {
                    socials
                }),
            ]),
            Line::from(vec![
                label("Screenshot"),
                Span::styled(
                    or_placeholder(company.screenshot_url.as_deref()).to_owned(),
                    Style::default().fg(theme::PINK),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("  Ctrl+S ", theme::key_hint_key()),
                Span::styled(
                    if self.saving { "saving…  " } else { "save  " },
                    theme::key_hint(),
                ),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("discard", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for ScrapeScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Save the shown record.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            if let Phase::Done(company) = &self.phase {
                if !self.saving {
                    self.saving = true;
                    return Ok(Some(Action::RequestSaveScraped(company.clone())));
                }
            }
            return Ok(None);
        }

        match key.code {
            KeyCode::Enter => {
                if matches!(self.phase, Phase::InFlight) {
                    return Ok(None);
                }
                let url = self.input.value().trim().to_owned();
                if url.is_empty() {
                    return Ok(None);
                }
                self.phase = Phase::InFlight;
                self.error = None;
                Ok(Some(Action::SubmitScrape(url)))
            }
            KeyCode::Esc => {
                // Discard the current result / error, keep the URL.
                self.phase = Phase::Idle;
                self.error = None;
                self.saving = false;
                Ok(None)
            }
            _ => {
                self.input.handle_event(&crossterm::event::Event::Key(key));
                Ok(None)
            }
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                if matches!(self.phase, Phase::InFlight) {
                    self.throbber.calc_next();
                }
            }
            Action::ScrapeFinished(company) => {
                self.phase = Phase::Done(company.clone());
                self.error = None;
            }
            Action::ScrapeFailed(message) => {
                self.phase = Phase::Idle;
                self.error = Some(message.clone());
            }
            Action::SaveFinished => {
                self.saving = false;
                self.phase = Phase::Idle;
                self.input.reset();
            }
            Action::SaveFailed(_) => {
                // Keep the record on screen so saving can be retried.
                self.saving = false;
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Scrape ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Length(1), // intro
            Constraint::Length(1), // input
            Constraint::Length(1), // status line
            Constraint::Min(1),    // result
        ])
        .split(inner);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "  Enter a URL to scrape website data and capture a screenshot.",
                theme::key_hint(),
            ))),
            layout[0],
        );

        let input_line = Line::from(vec![
            Span::styled("  URL › ", Style::default().fg(theme::VIOLET)),
            Span::styled(self.input.value().to_owned(), Style::default().fg(theme::DIM_WHITE)),
            Span::styled("█", Style::default().fg(theme::INDIGO)),
        ]);
        frame.render_widget(Paragraph::new(input_line), layout[1]);

        match &self.phase {
            Phase::InFlight => {
                let throbber = Throbber::default()
                    .label("Scraping…")
                    .style(Style::default().fg(theme::AMBER));
                frame.render_stateful_widget(throbber, layout[2], &mut self.throbber.clone());
            }
            _ => {
                if let Some(err) = &self.error {
                    frame.render_widget(
                        Paragraph::new(Line::from(Span::styled(
                            format!("  ✗ {err}"),
                            Style::default().fg(theme::ERROR_RED),
                        ))),
                        layout[2],
                    );
                } else {
                    frame.render_widget(
                        Paragraph::new(Line::from(vec![
                            Span::styled("  Enter ", theme::key_hint_key()),
                            Span::styled("scrape  ", theme::key_hint()),
                            Span::styled("Tab ", theme::key_hint_key()),
                            Span::styled("companies", theme::key_hint()),
                        ])),
                        layout[2],
                    );
                }
            }
        }

        if let Phase::Done(company) = &self.phase {
            self.render_result(frame, layout[3], company);
        }
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "Scrape"
    }
}
