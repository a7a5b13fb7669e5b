use crate::shared::error::DashboardError;

/// Preset range tokens offered by the date range picker.
pub const PRESETS: [&str; 4] = ["7d", "30d", "90d", "365d"];

/// Parse a date range token ("7d", "30d", "Nd") into a day count.
///
/// # Examples
/// ```
/// use engine::shared::date_range::parse_range_token;
/// assert_eq!(parse_range_token("30d").unwrap(), 30);
/// assert!(parse_range_token("month").is_err());
/// ```
pub fn parse_range_token(token: &str) -> Result<i64, DashboardError> {
    let unknown = || DashboardError::UnknownRangeToken(token.to_string());

    let digits = token.trim().strip_suffix('d').ok_or_else(unknown)?;
    let days: i64 = digits.parse().map_err(|_| unknown())?;
    if days <= 0 {
        return Err(DashboardError::InvalidRange { days });
    }
    Ok(days)
}
