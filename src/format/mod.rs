//! Row formatting
//!
//! Turns one instrument record into display cells. Total: a field that does
//! not parse renders as [`PLACEHOLDER`] with neutral tone.

mod numeric;

pub use numeric::parse_numeric;

use crate::classify::ScoreLabel;
use crate::snapshot::Instrument;

/// Text shown for a missing or unparseable value
pub const PLACEHOLDER: &str = "-";

/// Volume is displayed in millions
pub const VOLUME_SCALE: f64 = 1_000_000.0;

/// Color decision for a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl Tone {
    /// Sign rule: > 0 positive, < 0 negative, zero neutral
    pub fn from_sign(value: f64) -> Self {
        if value > 0.0 {
            Tone::Positive
        } else if value < 0.0 {
            Tone::Negative
        } else {
            Tone::Neutral
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Tone::Positive => "positive",
            Tone::Negative => "negative",
            Tone::Neutral => "",
        }
    }
}

/// A formatted value with its tone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub tone: Tone,
}

impl Cell {
    pub fn placeholder() -> Self {
        Self {
            text: PLACEHOLDER.to_string(),
            tone: Tone::Neutral,
        }
    }

    /// Fixed-precision value colored by its own sign
    pub fn signed(value: Option<f64>, decimals: usize) -> Self {
        match value {
            Some(v) => Self {
                text: format!("{v:.decimals$}"),
                tone: Tone::from_sign(v),
            },
            None => Self::placeholder(),
        }
    }
}

/// Trend token with its derived style class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendCell {
    pub text: String,
    pub class: String,
}

impl TrendCell {
    pub fn new(token: Option<&str>) -> Self {
        match token {
            Some(token) => Self {
                text: token.to_string(),
                class: format!("trend-{}", token.to_lowercase()),
            },
            None => Self {
                text: PLACEHOLDER.to_string(),
                class: "trend-unknown".to_string(),
            },
        }
    }
}

/// Display fields for one instrument row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRow {
    pub ticker: String,
    pub price: Cell,
    pub gap_percent: Cell,
    /// Scaled volume, e.g. `3.50M`; never colored
    pub volume: String,
    pub atr_percent: Cell,
    pub rsi: Cell,
    /// Colored by price against vwap, not by sign
    pub vwap: Cell,
    pub trend: TrendCell,
    pub score: ScoreLabel,
}

/// Format one instrument
pub fn format_row(instrument: &Instrument) -> FormattedRow {
    let ticker = instrument.key().unwrap_or_default().to_string();
    let price = parse_numeric(&instrument.price);

    FormattedRow {
        price: Cell::signed(price, 2),
        gap_percent: Cell::signed(parse_numeric(&instrument.gap_percent), 2),
        volume: format_volume(parse_numeric(&instrument.volume)),
        atr_percent: Cell::signed(parse_numeric(&instrument.atr_percent), 2),
        rsi: Cell::signed(parse_numeric(&instrument.rsi), 1),
        vwap: vwap_cell(price, parse_numeric(&instrument.vwap)),
        trend: TrendCell::new(instrument.trend.as_deref()),
        score: ScoreLabel::new(&ticker, parse_numeric(&instrument.score)),
        ticker,
    }
}

fn format_volume(volume: Option<f64>) -> String {
    match volume {
        Some(v) => format!("{:.2}M", v / VOLUME_SCALE),
        None => PLACEHOLDER.to_string(),
    }
}

/// Price at or above vwap is positive, anything else is negative
fn vwap_cell(price: Option<f64>, vwap: Option<f64>) -> Cell {
    let Some(vwap) = vwap else {
        return Cell::placeholder();
    };
    let above = matches!(price, Some(price) if price >= vwap);
    Cell {
        text: format!("{vwap:.2}"),
        tone: if above { Tone::Positive } else { Tone::Negative },
    }
}
