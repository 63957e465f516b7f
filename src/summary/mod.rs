//! Header fragments: timestamp, session status and macro indicator blocks
//!
//! Only what is present in a snapshot produces an update; an absent block or
//! field leaves the corresponding fragment as it was.

use crate::snapshot::{IndicatorBlock, MarketSession, Snapshot};

/// The indicator blocks the header knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    BondYields,
    UsDollar,
    MarketFear,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 3] = [
        IndicatorKind::BondYields,
        IndicatorKind::UsDollar,
        IndicatorKind::MarketFear,
    ];

    /// Key of the block inside `summary`
    pub fn key(self) -> &'static str {
        match self {
            IndicatorKind::BondYields => "bond_yields",
            IndicatorKind::UsDollar => "us_dollar",
            IndicatorKind::MarketFear => "market_fear",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            IndicatorKind::BondYields => "Bond Yields",
            IndicatorKind::UsDollar => "US Dollar",
            IndicatorKind::MarketFear => "Market Fear",
        }
    }
}

/// Session badge text plus its style class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub text: String,
    pub session: MarketSession,
    pub class: String,
}

impl StatusBadge {
    pub fn new(token: &str) -> Self {
        Self {
            text: token.to_string(),
            session: MarketSession::from_token(token),
            class: MarketSession::style_class(token),
        }
    }
}

/// Field-level update for one indicator block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorUpdate {
    pub kind: IndicatorKind,
    pub status: Option<String>,
    pub tag: Option<String>,
    pub value: Option<String>,
}

/// Everything above the table that a snapshot may change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderUpdate {
    pub timestamp: Option<String>,
    pub status: Option<StatusBadge>,
    pub indicators: Vec<IndicatorUpdate>,
}

impl HeaderUpdate {
    pub fn indicator(&self, kind: IndicatorKind) -> Option<&IndicatorUpdate> {
        self.indicators.iter().find(|u| u.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.timestamp.is_none() && self.status.is_none() && self.indicators.is_empty()
    }
}

/// Project a snapshot onto header fragment updates
pub fn project(snapshot: &Snapshot) -> HeaderUpdate {
    let indicators = match &snapshot.summary {
        Some(summary) => IndicatorKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let block = match kind {
                    IndicatorKind::BondYields => summary.bond_yields.as_ref(),
                    IndicatorKind::UsDollar => summary.us_dollar.as_ref(),
                    IndicatorKind::MarketFear => summary.market_fear.as_ref(),
                }?;
                Some(indicator_update(kind, block))
            })
            .collect(),
        None => Vec::new(),
    };

    HeaderUpdate {
        timestamp: snapshot.timestamp.clone(),
        status: snapshot.status.as_deref().map(StatusBadge::new),
        indicators,
    }
}

fn indicator_update(kind: IndicatorKind, block: &IndicatorBlock) -> IndicatorUpdate {
    IndicatorUpdate {
        kind,
        status: block.status.clone(),
        tag: block.tag.clone(),
        value: block.value.clone(),
    }
}
