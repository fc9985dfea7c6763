use anyhow::{Context, Result};
use rust_decimal::Decimal;

pub fn fmt_money(d: &Decimal) -> String {
    d.round_dp(2).to_string()
}

pub fn fmt_optional_money(d: Option<&Decimal>) -> String {
    d.map(fmt_money).unwrap_or_else(|| "-".to_string())
}

pub fn parse_id(s: &str) -> Result<i64> {
    s.trim().parse().with_context(|| format!("invalid id: {s}"))
}
