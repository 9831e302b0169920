//! Companies screen — searchable, paginated, multi-select table of the
//! stored collection, with a detail panel fetched per record.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};
use tokio::sync::mpsc::UnboundedSender;

use scrapedeck_core::{Company, ListEngine, or_placeholder};

use crate::action::{Action, ConfirmAction, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::{page_strip, truncate};

/// Detail panel state: `company` empty while the fetch is in flight.
struct DetailPanel {
    company: Option<Box<Company>>,
    error: Option<String>,
}

pub struct CompaniesScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    engine: ListEngine,
    /// True while a fetch is outstanding.
    loading: bool,
    /// Set only when the very first load failed -- later failures keep
    /// showing the stale collection instead.
    load_error: Option<String>,
    /// Cursor row within the visible page.
    cursor: usize,
    detail: Option<DetailPanel>,
    /// Uncommitted search text, echoed in the title while typing.
    search_preview: String,
}

impl CompaniesScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            action_tx: None,
            engine: ListEngine::new(),
            loading: true,
            load_error: None,
            cursor: 0,
            detail: None,
            search_preview: String::new(),
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.engine.visible().len();
        self.cursor = if len == 0 { 0 } else { self.cursor.min(len - 1) };
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.engine.visible().len();
        if len == 0 {
            return;
        }
        #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss, clippy::as_conversions)]
        {
            let next = (self.cursor as isize + delta).clamp(0, len as isize - 1);
            self.cursor = next as usize;
        }
    }

    fn cursor_company(&self) -> Option<std::sync::Arc<Company>> {
        self.engine.visible().get(self.cursor).cloned()
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let visible = self.engine.visible();

        let header = Row::new(vec![
            Cell::from("").style(theme::table_header()), // cursor + checkbox
            Cell::from("Company").style(theme::table_header()),
            Cell::from("Website").style(theme::table_header()),
            Cell::from("Phone").style(theme::table_header()),
            Cell::from("Email").style(theme::table_header()),
            Cell::from("Social").style(theme::table_header()),
            Cell::from("Created").style(theme::table_header()),
        ]);

        let rows: Vec<Row> = visible
            .iter()
            .enumerate()
            .map(|(i, company)| {
                let is_cursor = i == self.cursor;
                let checked = self.engine.is_selected(&company.id);

                let marker = format!(
                    "{}{}",
                    if is_cursor { "▸" } else { " " },
                    if checked { "■" } else { "□" }
                );

                let socials = company
                    .social_links()
                    .iter()
                    .map(|(label, _)| match *label {
                        "Facebook" => "f",
                        "Twitter" => "t",
                        "LinkedIn" => "in",
                        "Instagram" => "ig",
                        _ => "?",
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                let socials = if socials.is_empty() {
                    scrapedeck_core::PLACEHOLDER.to_owned()
                } else {
                    socials
                };

                let row_style = if is_cursor {
                    theme::table_selected()
                } else {
                    theme::table_row()
                };
                let marker_style = if checked {
                    Style::default().fg(theme::VIOLET)
                } else {
                    Style::default().fg(theme::BORDER_GRAY)
                };

                Row::new(vec![
                    Cell::from(marker).style(marker_style),
                    Cell::from(company.display_name().to_owned()).style(
                        Style::default().fg(theme::INDIGO).add_modifier(if is_cursor {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                    ),
                    Cell::from(
                        company
                            .website_host()
                            .unwrap_or_else(|| scrapedeck_core::PLACEHOLDER.into()),
                    )
                    .style(Style::default().fg(theme::PINK)),
                    Cell::from(or_placeholder(company.first_phone()).to_owned()),
                    Cell::from(or_placeholder(company.email.as_deref()).to_owned()),
                    Cell::from(socials).style(Style::default().fg(theme::AMBER)),
                    Cell::from(company.created_date()),
                ])
                .style(row_style)
            })
            .collect();

        let widths = [
            Constraint::Length(3),  // cursor + checkbox
            Constraint::Fill(2),    // name
            Constraint::Fill(2),    // website host
            Constraint::Length(16), // phone
            Constraint::Fill(2),    // email
            Constraint::Length(9),  // socials
            Constraint::Length(10), // created
        ];

        frame.render_widget(Table::new(rows, widths).header(header), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let (first, last, total) = self.engine.showing_range();
        let selected = self.engine.selected_count();

        let mut spans = vec![
            Span::styled(
                format!(" Showing {first}-{last} of {total}  "),
                Style::default().fg(theme::DIM_WHITE),
            ),
            Span::styled(format!("{selected} selected  "), theme::key_hint()),
        ];
        spans.extend(page_strip::render(self.engine.page(), self.engine.total_pages()).spans);
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("move  ", theme::key_hint()),
            Span::styled("h/l ", theme::key_hint_key()),
            Span::styled("page  ", theme::key_hint()),
            Span::styled("space ", theme::key_hint_key()),
            Span::styled("select  ", theme::key_hint()),
            Span::styled("a ", theme::key_hint_key()),
            Span::styled("select page  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("delete  ", theme::key_hint()),
            Span::styled("e ", theme::key_hint_key()),
            Span::styled("export  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("detail", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), area);
    }

    #[allow(clippy::too_many_lines)]
    fn render_detail(&self, frame: &mut Frame, area: Rect, panel: &DetailPanel) {
        let title = panel
            .company
            .as_ref()
            .map_or_else(|| " Detail ".to_owned(), |c| format!(" {} ", c.display_name()));

        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some(err) = &panel.error {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("  {err}"),
                    Style::default().fg(theme::ERROR_RED),
                ))),
                inner,
            );
            return;
        }
        let Some(company) = &panel.company else {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "  Loading…",
                    theme::key_hint(),
                ))),
                inner,
            );
            return;
        };

        let label = |text: &str| Span::styled(format!("  {text:<12}"), theme::key_hint());
        let value =
            |text: String| Span::styled(text, Style::default().fg(theme::DIM_WHITE));

        let socials = company
            .social_links()
            .iter()
            .map(|(name, url)| format!("{name} {url}"))
            .collect::<Vec<_>>()
            .join("   ");

        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                label("ID"),
                value(company.id.to_string()),
            ]),
            Line::from(vec![
                label("Website"),
                Span::styled(
                    company
                        .website_host()
                        .unwrap_or_else(|| scrapedeck_core::PLACEHOLDER.into()),
                    Style::default().fg(theme::PINK),
                ),
                label("  Created"),
                value(company.created_date()),
            ]),
            Line::from(vec![
                label("Phone"),
                value(or_placeholder(company.first_phone()).to_owned()),
                label("  Email"),
                value(or_placeholder(company.email.as_deref()).to_owned()),
            ]),
            Line::from(vec![
                label("Address"),
                value(truncate::truncate(
                    or_placeholder(company.address.as_deref()),
                    80,
                )),
            ]),
            Line::from(vec![
                label("About"),
                value(truncate::truncate(
                    or_placeholder(company.description.as_deref()),
                    100,
                )),
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
                value(or_placeholder(company.screenshot_url.as_deref()).to_owned()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), layout[0]);

        let hints = Line::from(vec![
            Span::styled("  Esc ", theme::key_hint_key()),
            Span::styled("back", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[1]);
    }
}

impl Component for CompaniesScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.detail.is_some() {
            return match key.code {
                KeyCode::Esc => Ok(Some(Action::CloseDetail)),
                _ => Ok(None),
            };
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_cursor(1);
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_cursor(-1);
                Ok(None)
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.engine.prev_page();
                self.clamp_cursor();
                Ok(None)
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.engine.next_page();
                self.clamp_cursor();
                Ok(None)
            }
            KeyCode::Char('g') => {
                self.engine.set_page(1);
                self.cursor = 0;
                Ok(None)
            }
            KeyCode::Char('G') => {
                self.engine.set_page(self.engine.total_pages());
                self.clamp_cursor();
                Ok(None)
            }
            KeyCode::Char(' ') => {
                if let Some(company) = self.cursor_company() {
                    self.engine.toggle(&company.id);
                }
                Ok(None)
            }
            KeyCode::Char('a') => {
                self.engine.select_all_visible();
                Ok(None)
            }
            KeyCode::Char('d') => {
                if self.engine.selected_count() == 0 {
                    Ok(Some(Action::Notify(Notification::info(
                        "Nothing selected",
                    ))))
                } else {
                    Ok(Some(Action::ShowConfirm(ConfirmAction::DeleteSelected {
                        ids: self.engine.selection_ids(),
                    })))
                }
            }
            KeyCode::Char('e') => Ok(Some(Action::RequestExport)),
            KeyCode::Char('r') => {
                self.loading = true;
                Ok(Some(Action::Refresh))
            }
            KeyCode::Enter => {
                if let Some(company) = self.cursor_company() {
                    self.detail = Some(DetailPanel {
                        company: None,
                        error: None,
                    });
                    Ok(Some(Action::OpenDetail(company.id.clone())))
                } else {
                    Ok(None)
                }
            }
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::CompaniesLoaded(snapshot) => {
                self.engine.set_collection(snapshot.to_vec());
                self.loading = false;
                self.load_error = None;
                self.clamp_cursor();
            }
            Action::CompaniesLoadFailed(message) => {
                self.loading = false;
                // Stale-but-present beats an error screen; only the very
                // first load gets the dedicated error view.
                if self.engine.is_empty() {
                    self.load_error = Some(message.clone());
                }
            }
            Action::SearchInput(query) => {
                self.search_preview.clone_from(query);
            }
            Action::SearchCommitted(query) => {
                self.engine.set_search(query.clone());
                self.cursor = 0;
            }
            Action::CloseSearch => {
                self.search_preview.clear();
                self.engine.set_search("");
                self.cursor = 0;
            }
            Action::DeleteFinished { removed } => {
                self.engine.clear_selection();
                self.clamp_cursor();
                return Ok(Some(Action::Notify(Notification::success(format!(
                    "Deleted {removed} record(s)"
                )))));
            }
            Action::DetailLoaded(company) => {
                if let Some(panel) = &mut self.detail {
                    panel.company = Some(company.clone());
                }
            }
            Action::DetailFailed(message) => {
                if let Some(panel) = &mut self.detail {
                    panel.error = Some(message.clone());
                }
            }
            Action::CloseDetail => {
                self.detail = None;
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let shown = self.engine.filtered_count();
        let total = self.engine.collection().len();

        let title = if self.search_preview.is_empty() && self.engine.search().is_empty() {
            format!(" Companies ({shown}/{total}) ")
        } else {
            let query = if self.search_preview.is_empty() {
                self.engine.search()
            } else {
                &self.search_preview
            };
            format!(" Companies ({shown}/{total}) [\"{query}\"] ")
        };

        let block = Block::default()
            .title(title)
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

        // First-load failure: error view instead of an empty table.
        if let Some(err) = &self.load_error {
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        format!("  Could not load companies: {err}"),
                        Style::default().fg(theme::ERROR_RED),
                    )),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled("  r ", theme::key_hint_key()),
                        Span::styled("retry", theme::key_hint()),
                    ]),
                ]),
                inner,
            );
            return;
        }

        if self.loading && self.engine.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "  Loading…",
                    theme::key_hint(),
                ))),
                inner,
            );
            return;
        }

        // Split for table + optional detail panel
        let (list_area, detail_area) = if self.detail.is_some() {
            let chunks =
                Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(inner);
            (chunks[0], Some(chunks[1]))
        } else {
            (inner, None)
        };

        let layout = Layout::vertical([
            Constraint::Min(1),    // table
            Constraint::Length(1), // footer (range + page strip)
            Constraint::Length(1), // hints
        ])
        .split(list_area);

        self.render_table(frame, layout[0]);
        self.render_footer(frame, layout[1]);
        self.render_hints(frame, layout[2]);

        if let (Some(detail_area), Some(panel)) = (detail_area, self.detail.as_ref()) {
            self.render_detail(frame, detail_area, panel);
        }
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "Companies"
    }
}
