//! Market-cap milestones behind the baldness levels.

use thiserror::Error;

use crate::config::MilestoneConfig;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MilestoneParseError {
    #[error("empty market cap")]
    Empty,
    #[error("invalid market cap: {0:?}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Milestone {
    pub level: u32,
    pub label: String,
    pub market_cap: f64,
}

/// Parses amounts like `"$250M"`, `"$1.5b"`, `"42,000"` into dollars.
pub fn parse_market_cap(raw: &str) -> Result<f64, MilestoneParseError> {
    let trimmed = raw.trim();
    let amount = trimmed.strip_prefix('$').unwrap_or(trimmed).replace(',', "");
    if amount.is_empty() {
        return Err(MilestoneParseError::Empty);
    }

    let (digits, multiplier) = match amount.chars().last().map(|c| c.to_ascii_uppercase()) {
        Some('K') => (&amount[..amount.len() - 1], 1e3),
        Some('M') => (&amount[..amount.len() - 1], 1e6),
        Some('B') => (&amount[..amount.len() - 1], 1e9),
        _ => (amount.as_str(), 1.0),
    };

    match digits.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value * multiplier),
        _ => Err(MilestoneParseError::Invalid(raw.to_string())),
    }
}

/// Percentage of `milestone` reached, clamped to 0..=100.
pub fn level_progress(current: f64, milestone: f64) -> f64 {
    if milestone <= 0.0 {
        return 100.0;
    }
    (current * 100.0 / milestone).clamp(0.0, 100.0)
}

pub fn parse_milestones(config: &[MilestoneConfig]) -> Result<Vec<Milestone>, MilestoneParseError> {
    let mut milestones = config
        .iter()
        .map(|m| {
            Ok(Milestone {
                level: m.level,
                label: m.market_cap.clone(),
                market_cap: parse_market_cap(&m.market_cap)?,
            })
        })
        .collect::<Result<Vec<_>, MilestoneParseError>>()?;
    milestones.sort_by_key(|m| m.level);
    Ok(milestones)
}

/// Highest level whose milestone has been reached, 0 if none.
pub fn reached_level(current: f64, milestones: &[Milestone]) -> u32 {
    milestones
        .iter()
        .filter(|m| current >= m.market_cap)
        .map(|m| m.level)
        .max()
        .unwrap_or(0)
}

pub fn format_market_cap(value: f64) -> String {
    let (scaled, suffix) = if value >= 1e9 {
        (value / 1e9, "B")
    } else if value >= 1e6 {
        (value / 1e6, "M")
    } else if value >= 1e3 {
        (value / 1e3, "K")
    } else {
        (value, "")
    };
    let text = format!("{:.1}", scaled);
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("${}{}", text, suffix)
}
