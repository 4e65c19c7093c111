use anyhow::anyhow;
use chrono::{Days, Local, NaiveDate};
use taskdash_model::persist::parse_date;

/// Today's calendar date in the local timezone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Accepts `YYYY-MM-DD`, `today`, `tomorrow` and `yesterday`.
#[tracing::instrument(skip(today))]
pub fn parse_date_expr(input: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let trimmed = input.trim();
    let lowered = trimmed.to_ascii_lowercase();

    let relative = match lowered.as_str() {
        "today" => Some(today),
        "tomorrow" => today.checked_add_days(Days::new(1)),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        _ => None,
    };
    if let Some(date) = relative {
        return Ok(date);
    }

    parse_date(trimmed).ok_or_else(|| {
        anyhow!("invalid date `{input}`; expected YYYY-MM-DD, today, tomorrow or yesterday")
    })
}
