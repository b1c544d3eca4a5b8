use time::{OffsetDateTime, UtcOffset};

use crate::error::{Result, X509GenError};

/// Formats `time` as the value of a UTCTime: `YYMMDDHHMMSSZ`.
///
/// The two-digit year is `year - 2000` from 2000 on and `year - 1900` before
/// it, so only years in 1900..2100 can be written.
pub(crate) fn format_utc_time(time: &OffsetDateTime) -> Result<String> {
    let utc = time.checked_to_offset(UtcOffset::UTC).ok_or_else(|| {
        X509GenError::EncodingOverflow(format!("{time} has no representable UTC equivalent"))
    })?;
    let year = utc.year();
    if !(1900..2100).contains(&year) {
        return Err(X509GenError::EncodingOverflow(format!(
            "year {year} cannot be written as UTCTime"
        )));
    }
    let short_year = if year >= 2000 { year - 2000 } else { year - 1900 };

    Ok(format!(
        "{:02}{:02}{:02}{:02}{:02}{:02}Z",
        short_year,
        u8::from(utc.month()),
        utc.day(),
        utc.hour(),
        utc.minute(),
        utc.second()
    ))
}
