//! Plain-text terminal sink

use super::{RenderEvent, RenderSink};
use crate::format::{Cell, FormattedRow, Tone};
use crate::reconcile::RowOp;
use crate::summary::{HeaderUpdate, IndicatorKind, IndicatorUpdate, StatusBadge};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::io::Write;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const CLEAR: &str = "\x1b[2J\x1b[H";

const COLUMNS: [(&str, usize); 9] = [
    ("TICKER", 8),
    ("PRICE", 10),
    ("GAP%", 8),
    ("VOL", 9),
    ("ATR%", 7),
    ("RSI", 6),
    ("VWAP", 10),
    ("TREND", 7),
    ("SCORE", 12),
];

#[derive(Debug, Default, Clone)]
struct IndicatorFragments {
    status: Option<String>,
    tag: Option<String>,
    value: Option<String>,
}

/// Keeps its own copy of the table and redraws it after each row batch
pub struct ConsoleSink<W: Write> {
    out: W,
    color: bool,
    clear_screen: bool,
    countdown: bool,
    timestamp: Option<String>,
    status: Option<StatusBadge>,
    indicators: HashMap<IndicatorKind, IndicatorFragments>,
    rows: IndexMap<String, FormattedRow>,
    error: Option<String>,
}

impl ConsoleSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            color: true,
            clear_screen: false,
            countdown: true,
            timestamp: None,
            status: None,
            indicators: HashMap::new(),
            rows: IndexMap::new(),
            error: None,
        }
    }

    /// Emit ANSI colors for tones
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Clear the terminal before each full redraw
    pub fn with_clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    /// Show the countdown line between polls
    pub fn with_countdown(mut self, countdown: bool) -> Self {
        self.countdown = countdown;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn row_keys(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    fn apply_header(&mut self, update: HeaderUpdate) {
        if let Some(ts) = update.timestamp {
            self.timestamp = Some(ts);
        }
        if let Some(status) = update.status {
            self.status = Some(status);
        }
        for IndicatorUpdate {
            kind,
            status,
            tag,
            value,
        } in update.indicators
        {
            let fragments = self.indicators.entry(kind).or_default();
            if status.is_some() {
                fragments.status = status;
            }
            if tag.is_some() {
                fragments.tag = tag;
            }
            if value.is_some() {
                fragments.value = value;
            }
        }
    }

    fn apply_rows(&mut self, ops: Vec<RowOp>) {
        for op in ops {
            match op {
                RowOp::Remove { key } => {
                    self.rows.shift_remove(&key);
                }
                RowOp::Update { changed: false, .. } => {}
                RowOp::Update { key, row, .. } | RowOp::Insert { key, row } => {
                    // Insert on a fresh key appends; an existing key keeps its slot
                    self.rows.insert(key, row);
                }
            }
        }
    }

    fn paint(&self, text: &str, tone: Tone) -> String {
        match (self.color, tone) {
            (true, Tone::Positive) => format!("{GREEN}{text}{RESET}"),
            (true, Tone::Negative) => format!("{RED}{text}{RESET}"),
            _ => text.to_string(),
        }
    }

    fn cell(&self, cell: &Cell, width: usize) -> String {
        self.paint(&format!("{:>width$}", cell.text), cell.tone)
    }

    fn draw(&mut self) -> std::io::Result<()> {
        let mut screen = String::new();
        if self.clear_screen {
            screen.push_str(CLEAR);
        }

        let timestamp = self.timestamp.as_deref().unwrap_or("-");
        match &self.status {
            Some(badge) if self.color => {
                screen.push_str(&format!("{timestamp}  {BOLD}[{}]{RESET}\n", badge.text))
            }
            Some(badge) => screen.push_str(&format!("{timestamp}  [{}]\n", badge.text)),
            None => screen.push_str(&format!("{timestamp}\n")),
        }

        for kind in IndicatorKind::ALL {
            if let Some(f) = self.indicators.get(&kind) {
                let parts: Vec<&str> = [&f.status, &f.tag, &f.value]
                    .into_iter()
                    .filter_map(|p| p.as_deref())
                    .collect();
                screen.push_str(&format!("{:<12} {}\n", kind.title(), parts.join(" | ")));
            }
        }
        screen.push('\n');

        if let Some(message) = &self.error {
            screen.push_str(&self.paint(&format!("Error loading data: {message}"), Tone::Negative));
            screen.push('\n');
            self.out.write_all(screen.as_bytes())?;
            return self.out.flush();
        }

        let header: Vec<String> = COLUMNS
            .iter()
            .map(|&(name, width)| format!("{name:>width$}"))
            .collect();
        screen.push_str(&header.join(" "));
        screen.push('\n');

        for row in self.rows.values() {
            let columns = [
                format!("{:<8}", row.ticker),
                self.cell(&row.price, 10),
                self.cell(&row.gap_percent, 8),
                format!("{:>9}", row.volume),
                self.cell(&row.atr_percent, 7),
                self.cell(&row.rsi, 6),
                self.cell(&row.vwap, 10),
                format!("{:>7}", row.trend.text),
                format!("{:>12}", row.score.text),
            ];
            screen.push_str(&columns.join(" "));
            screen.push('\n');
        }

        self.out.write_all(screen.as_bytes())?;
        self.out.flush()
    }

    fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        self.out.write_all(line.as_bytes())?;
        self.out.flush()
    }
}

impl<W: Write> RenderSink for ConsoleSink<W> {
    fn render(&mut self, event: RenderEvent) {
        let result = match event {
            RenderEvent::Loading => self.write_line("Loading...\n"),
            RenderEvent::ContentReady => Ok(()),
            RenderEvent::Header(update) => {
                self.apply_header(update);
                Ok(())
            }
            RenderEvent::Rows(ops) => {
                self.error = None;
                self.apply_rows(ops);
                self.draw()
            }
            RenderEvent::Countdown { remaining } if self.countdown => {
                self.write_line(&format!("\rUpdate in {remaining}s "))
            }
            RenderEvent::Countdown { .. } => Ok(()),
            RenderEvent::Error { message } => {
                self.error = Some(message);
                self.draw()
            }
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to write to console");
        }
    }
}
