//! TUI front end — target chord, staff, held notes, activity log, status bar.
//!
//! [`App`] is the collaborator layer around the [`SessionController`]: it
//! feeds note events from MIDI or the computer keyboard, delivers metronome
//! ticks from the [`BeatClock`], plays the click, and redraws from the
//! session's read accessors after every event.

pub mod keybindings;
pub mod notation;
pub mod status;

pub use keybindings::{map_key, Action};
pub use notation::{note_marks, render_staff, MarkKind, NoteMark};
pub use status::StatusInfo;

use std::collections::VecDeque;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::audio::ClickEngine;
use crate::chord::{Chord, DegreeSource, MatchPolicy};
use crate::clock::{BeatClock, ClockState};
use crate::input::{input_channel, InputEvent, InputReceiver, InputSender};
use crate::midi::MidiInput;
use crate::session::{BeatOutcome, MusicConfig, SessionController};
use crate::settings::Settings;
use crate::theory::Pitch;

/// Lines kept in the activity panel.
const ACTIVITY_CAPACITY: usize = 8;

/// Velocity used for computer-keyboard notes.
const KEYBOARD_VELOCITY: u8 = 100;

/// The main TUI application state.
pub struct App {
    pub session: SessionController,
    pub clock: BeatClock,
    pub status: StatusInfo,
    pub should_quit: bool,
    pub help_visible: bool,
    activity: VecDeque<String>,
    input_rx: InputReceiver,
    input_tx: InputSender,
    // Holds the MIDI connection open; its notes arrive through input_rx.
    midi_input: Option<MidiInput>,
    click: Option<ClickEngine>,
}

impl App {
    /// Create an app without touching MIDI or audio hardware.
    pub fn headless(settings: &Settings, degrees: Box<dyn DegreeSource + Send>) -> Self {
        let (input_tx, input_rx) = input_channel();
        let session =
            SessionController::new(settings.music, degrees).with_policy(settings.match_policy);

        let mut app = Self {
            session,
            clock: BeatClock::new(settings.bpm),
            status: StatusInfo::default(),
            should_quit: false,
            help_visible: false,
            activity: VecDeque::with_capacity(ACTIVITY_CAPACITY),
            input_rx,
            input_tx,
            midi_input: None,
            click: None,
        };
        app.refresh_status();
        app
    }

    /// Create an app and connect to the configured MIDI input and the default
    /// audio output. Missing devices are logged and the app runs without them.
    pub fn new(settings: &Settings, degrees: Box<dyn DegreeSource + Send>) -> Self {
        let mut app = Self::headless(settings, degrees);

        match MidiInput::start(&settings.midi, app.input_tx.clone()) {
            Ok(input) => {
                app.log(format!("MIDI: {}", input.port_name()));
                app.midi_input = Some(input);
            }
            Err(e) => {
                tracing::warn!("{e}; using computer keyboard");
                app.log(format!("{e} (keyboard input only)"));
            }
        }

        match ClickEngine::new() {
            Ok(mut engine) => {
                if let Err(e) = engine.set_volume(settings.click_volume) {
                    tracing::warn!("click volume: {e}");
                }
                app.click = Some(engine);
            }
            Err(e) => {
                tracing::warn!("{e}; metronome is silent");
                app.log(format!("{e} (silent metronome)"));
            }
        }

        app.refresh_status();
        app
    }

    /// Sender for injecting note events, e.g. from another transport thread.
    pub fn input_sender(&self) -> InputSender {
        self.input_tx.clone()
    }

    /// Generate the first target and start the metronome.
    pub fn start(&mut self, now: Instant) {
        self.new_chord();
        self.clock.start(now);
        self.refresh_status();
    }

    /// Process an action.
    pub fn handle_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::NewChord => self.new_chord(),
            Action::ToggleClock => match self.clock.state() {
                ClockState::Running => {
                    self.clock.stop();
                    if let Some(ref mut engine) = self.click {
                        if let Err(e) = engine.silence() {
                            tracing::warn!("click silence dropped: {e}");
                        }
                    }
                }
                ClockState::Stopped => self.clock.start(now),
            },
            Action::AdjustBpm(delta) => {
                self.clock.set_bpm(self.clock.bpm() + delta as f64, now);
                tracing::debug!(bpm = self.clock.bpm(), "tempo change");
            }
            Action::ShiftKey(delta) => {
                let config = *self.session.config();
                let config = if delta >= 0 {
                    config.with_next_key()
                } else {
                    config.with_prev_key()
                };
                self.change_config(config);
            }
            Action::ToggleScale => {
                let config = self.session.config().with_next_scale();
                self.change_config(config);
            }
            Action::ShiftOctave(delta) => {
                let config = self.session.config().with_octave_shift(delta);
                self.change_config(config);
            }
            Action::TogglePolicy => {
                let policy = match self.session.policy() {
                    MatchPolicy::Exact => MatchPolicy::AllowExtra,
                    MatchPolicy::AllowExtra => MatchPolicy::Exact,
                };
                self.session.set_policy(policy);
            }
            Action::PianoKey(offset) => {
                let pitch = self.piano_base() + offset;
                let Ok(note) = u8::try_from(pitch) else {
                    return;
                };
                let event = if self.session.active_notes().contains(&pitch) {
                    InputEvent::NoteOff { note }
                } else {
                    InputEvent::NoteOn {
                        note,
                        velocity: KEYBOARD_VELOCITY,
                    }
                };
                self.handle_input(event);
            }
            Action::ReleaseAll => {
                let held: Vec<Pitch> = self.session.active_notes().iter().copied().collect();
                for pitch in held {
                    self.session.on_note_off(pitch);
                }
            }
            Action::ToggleHelp => self.help_visible = !self.help_visible,
            Action::Escape => self.help_visible = false,
        }
        self.refresh_status();
    }

    /// Feed one note event to the session.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::NoteOn { note, .. } => {
                if self.session.on_note_on(note as Pitch) {
                    tracing::debug!(note, "note-on completes target");
                }
            }
            InputEvent::NoteOff { note } => self.session.on_note_off(note as Pitch),
        }
    }

    /// Lowest pitch of the computer-keyboard piano: the C at or below the
    /// target's root, so every note of the target lies within two octaves.
    pub fn piano_base(&self) -> Pitch {
        match self.session.target().and_then(Chord::root) {
            Some(root) => root.div_euclid(12) * 12,
            None => (self.session.config().octave + 1) * 12,
        }
    }

    /// Process pending input and due beats in the order they happened.
    ///
    /// Beats due at or before an event's timestamp are delivered first, so a
    /// note that lands just after a beat cannot advance the chord on it.
    pub fn update(&mut self, now: Instant) {
        for input in self.input_rx.drain() {
            self.deliver_beats(input.at);
            self.handle_input(input.event);
        }
        self.deliver_beats(now);
        self.refresh_status();
    }

    fn deliver_beats(&mut self, at: Instant) {
        for _ in 0..self.clock.poll(at) {
            self.on_beat();
        }
    }

    /// `base` with the tempo, key, scale, octave and match policy in use now.
    pub fn settings_snapshot(&self, base: &Settings) -> Settings {
        Settings {
            bpm: self.clock.bpm(),
            music: *self.session.config(),
            match_policy: self.session.policy(),
            ..base.clone()
        }
    }

    fn on_beat(&mut self) {
        self.status.beats += 1;
        if let Some(ref mut engine) = self.click {
            if let Err(e) = engine.click() {
                tracing::warn!("click dropped: {e}");
            }
        }

        let solved = self.session.target_name();
        if self.session.on_beat_tick() == BeatOutcome::Advanced {
            self.status.solved += 1;
            self.log(format!("solved {solved} → {}", self.session.target_name()));
        }
    }

    fn new_chord(&mut self) {
        if self.session.advance().is_ok() {
            let name = self.session.target_name();
            self.log(format!("new chord: {name}"));
        }
    }

    /// Apply a new key/scale/octave and show a chord in it right away.
    fn change_config(&mut self, config: MusicConfig) {
        self.session.on_config_change(config);
        self.log(format!("key: {config}"));
        self.new_chord();
    }

    fn log(&mut self, line: String) {
        if self.activity.len() >= ACTIVITY_CAPACITY {
            self.activity.pop_front();
        }
        self.activity.push_back(line);
    }

    /// Recent activity lines, oldest first.
    pub fn activity(&self) -> impl Iterator<Item = &str> {
        self.activity.iter().map(String::as_str)
    }

    fn refresh_status(&mut self) {
        self.status.bpm = self.clock.bpm();
        self.status.music = *self.session.config();
        self.status.policy = self.session.policy();
        self.status.clock_running = self.clock.state() == ClockState::Running;
        self.status.midi_port = self.midi_input.as_ref().map(|m| m.port_name().to_string());
        self.status.audio_device = self.click.as_ref().map(|c| c.device_name().to_string());
    }

    /// Draw the UI.
    pub fn draw(&self, frame: &mut Frame) {
        let size = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Chord name
                Constraint::Min(8),    // Staff + notes
                Constraint::Length(6), // Activity
                Constraint::Length(1), // Status bar
            ])
            .split(size);

        self.draw_target(frame, chunks[0]);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);
        self.draw_staff(frame, middle[0]);
        self.draw_notes(frame, middle[1]);

        self.draw_activity(frame, chunks[2]);
        self.draw_status(frame, chunks[3]);

        if self.help_visible {
            self.draw_help(frame, size);
        }
    }

    fn draw_target(&self, frame: &mut Frame, area: Rect) {
        let name = self.session.target_name();
        let name_style = if self.session.completed() {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        };
        let hint = if self.session.completed() {
            Span::styled("✓ next chord on the beat", Style::default().fg(Color::Green))
        } else {
            Span::styled("play this chord", Style::default().fg(Color::DarkGray))
        };

        let text = vec![
            Line::from(Span::styled(
                if name.is_empty() { "—".to_string() } else { name },
                name_style,
            )),
            Line::from(hint),
        ];
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Target "));
        frame.render_widget(paragraph, area);
    }

    fn draw_staff(&self, frame: &mut Frame, area: Rect) {
        let target = self.session.target().map(|c| c.notes()).unwrap_or_default();
        let rows = render_staff(target, self.session.active_notes());
        let lines: Vec<Line> = rows
            .into_iter()
            .map(|row| {
                let style = if row.contains('●') {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(row, style))
            })
            .collect();

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Staff "));
        frame.render_widget(paragraph, area);
    }

    fn draw_notes(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = note_marks(self.session.target(), self.session.active_notes())
            .into_iter()
            .map(|mark| {
                let (prefix, style) = match mark.kind {
                    MarkKind::Pending => ("  ", Style::default().fg(Color::DarkGray)),
                    MarkKind::Held => ("✓ ", Style::default().fg(Color::Green)),
                    MarkKind::Extra => ("✗ ", Style::default().fg(Color::Red)),
                };
                ListItem::new(Line::from(Span::styled(
                    format!("{prefix}{}", mark.label),
                    style,
                )))
            })
            .collect();

        let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Notes "));
        frame.render_widget(list, area);
    }

    fn draw_activity(&self, frame: &mut Frame, area: Rect) {
        let visible = area.height.saturating_sub(2) as usize;
        let skip = self.activity.len().saturating_sub(visible);
        let items: Vec<ListItem> = self
            .activity
            .iter()
            .skip(skip)
            .map(|line| ListItem::new(line.as_str()))
            .collect();
        let list =
            List::new(items).block(Block::default().borders(Borders::ALL).title(" Activity "));
        frame.render_widget(list, area);
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let status = &self.status;
        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", status.clock_display()),
                Style::default()
                    .fg(if status.clock_running {
                        Color::Green
                    } else {
                        Color::Red
                    })
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                " BPM:{:.0} | beat {} | {} | {} | solved {} ",
                status.bpm,
                status.beat_in_bar(),
                status.music,
                status.policy_display(),
                status.solved,
            )),
            Span::styled(
                format!(" {} ", status.input_display()),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                format!(" {} ", status.audio_display()),
                Style::default().fg(if status.audio_device.is_some() {
                    Color::Green
                } else {
                    Color::Red
                }),
            ),
            Span::styled(" ?:help ", Style::default().fg(Color::DarkGray)),
        ]);
        let paragraph =
            Paragraph::new(line).style(Style::default().bg(Color::DarkGray).fg(Color::White));
        frame.render_widget(paragraph, area);
    }

    fn draw_help(&self, frame: &mut Frame, area: Rect) {
        let entries = keybindings::help_entries();
        let width = 50.min(area.width);
        let height = (entries.len() as u16 + 2).min(area.height);
        let popup = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        let lines: Vec<Line> = entries
            .iter()
            .map(|(keys, desc)| {
                Line::from(vec![
                    Span::styled(format!("{keys:>26} "), Style::default().fg(Color::Yellow)),
                    Span::raw(*desc),
                ])
            })
            .collect();

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Keys ")),
            popup,
        );
    }

    /// Run the TUI event loop.
    pub fn run(
        &mut self,
        terminal: &mut ratatui::Terminal<impl ratatui::backend::Backend>,
    ) -> io::Result<()> {
        self.start(Instant::now());

        while !self.should_quit {
            terminal
                .draw(|frame| self.draw(frame))
                .map_err(|e| io::Error::other(e.to_string()))?;

            // Short poll keeps note-to-match latency low.
            let key_ready = event::poll(Duration::from_millis(5))?;
            let now = Instant::now();
            // Beats due before the key press go first.
            self.update(now);

            if key_ready {
                if let CrosstermEvent::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if let Some(action) = map_key(key) {
                            self.handle_action(action, now);
                        }
                    }
                }
            }
        }

        tracing::info!(solved = self.status.solved, "session ended");
        Ok(())
    }
}
