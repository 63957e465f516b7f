//! Momentum score classification
//!
//! Maps a symbol's score to a label. Inverse-macro instruments (volatility and
//! dollar hedges) rise when broad risk rises, so their labels read as risk
//! regime (SAFE / RISK) with a tighter threshold than directional names.

/// Instruments whose direction is inverted relative to market risk
pub const INVERSE_MACRO: [&str; 2] = ["VXX", "UUP"];

/// Absolute score at which an inverse-macro instrument leaves neutral
pub const INVERSE_THRESHOLD: f64 = 2.0;

/// Absolute score at which a directional instrument leaves neutral
pub const DIRECTIONAL_THRESHOLD: f64 = 3.0;

/// Which threshold table applies to a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolClass {
    InverseMacro,
    Directional,
}

impl SymbolClass {
    pub fn of(symbol: &str) -> Self {
        if INVERSE_MACRO.iter().any(|s| *s == symbol) {
            SymbolClass::InverseMacro
        } else {
            SymbolClass::Directional
        }
    }
}

/// Categorical score label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Bull,
    Bear,
    Safe,
    Risk,
    Neutral,
}

impl Label {
    /// Tag appended to the score, if any
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Label::Bull => Some("BULL"),
            Label::Bear => Some("BEAR"),
            Label::Safe => Some("SAFE"),
            Label::Risk => Some("RISK"),
            Label::Neutral => None,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Label::Bull => "score-bull",
            Label::Bear => "score-bear",
            Label::Safe => "score-safe",
            Label::Risk => "score-risk",
            Label::Neutral => "score-neutral",
        }
    }
}

/// Classify a score for `symbol`. Total: NaN falls through to neutral.
pub fn classify(symbol: &str, score: f64) -> Label {
    match SymbolClass::of(symbol) {
        SymbolClass::InverseMacro => {
            if score <= -INVERSE_THRESHOLD {
                Label::Safe
            } else if score >= INVERSE_THRESHOLD {
                Label::Risk
            } else {
                Label::Neutral
            }
        }
        SymbolClass::Directional => {
            if score >= DIRECTIONAL_THRESHOLD {
                Label::Bull
            } else if score <= -DIRECTIONAL_THRESHOLD {
                Label::Bear
            } else {
                Label::Neutral
            }
        }
    }
}

/// Display form of a classified score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreLabel {
    pub label: Label,
    pub text: String,
}

impl ScoreLabel {
    /// Classify and render; an unparseable score is neutral and shows `-`
    pub fn new(symbol: &str, score: Option<f64>) -> Self {
        let Some(score) = score else {
            return Self {
                label: Label::Neutral,
                text: crate::format::PLACEHOLDER.to_string(),
            };
        };

        let label = classify(symbol, score);
        let sign = if score > 0.0 { "+" } else { "" };
        let text = match label.tag() {
            Some(tag) => format!("{sign}{} ({tag})", format_score(score)),
            None => format!("{sign}{}", format_score(score)),
        };
        Self { label, text }
    }

    pub fn css_class(&self) -> &'static str {
        self.label.css_class()
    }
}

/// Integer-like scores print without a fractional part
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 && score.abs() < 1e15 {
        format!("{}", score as i64)
    } else {
        format!("{score}")
    }
}
