use chrono::{DateTime, Days, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use sha2::{Digest, Sha256};

use crate::domain::{DayRecord, Fact, Meta, OutputRecord, Region, UpdateStatus, SCHEMA_VERSION};

use super::DaySchedules;

/// Matches how the `uk-UA` locale renders a date and time.
const UPDATE_FACT_FORMAT: &str = "%d.%m.%Y, %H:%M:%S";

/// Wraps today's and tomorrow's schedules into the persisted record.
///
/// Day keys are local midnight in `tz` of the calendar day `now` falls on and
/// of the day after it.
pub fn assemble(
    region: &Region,
    schedules: DaySchedules,
    now: DateTime<Utc>,
    tz: Tz,
) -> serde_json::Result<OutputRecord> {
    let today = now.with_timezone(&tz).date_naive();
    let data = day_record(tz, today, schedules);
    let content_hash = content_hash(&data)?;

    let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    Ok(OutputRecord {
        region_id: region.id.clone(),
        last_updated: timestamp.clone(),
        fact: Fact {
            data,
            update_fact: now.with_timezone(&tz).format(UPDATE_FACT_FORMAT).to_string(),
        },
        last_update_status: UpdateStatus::parsed(timestamp),
        meta: Meta {
            schema_version: SCHEMA_VERSION.to_string(),
            content_hash,
        },
        region_affiliation: region.name.clone(),
    })
}

pub fn day_record(tz: Tz, today: NaiveDate, schedules: DaySchedules) -> DayRecord {
    let tomorrow = today + Days::new(1);
    let mut data = DayRecord::new();
    data.insert(day_key(tz, today), schedules.today);
    data.insert(day_key(tz, tomorrow), schedules.tomorrow);
    data
}

/// Unix seconds of local midnight as a string.
pub fn day_key(tz: Tz, date: NaiveDate) -> String {
    local_midnight(tz, date).timestamp().to_string()
}

fn local_midnight(tz: Tz, date: NaiveDate) -> DateTime<Tz> {
    let naive = date.and_time(NaiveTime::MIN);
    // A DST gap can swallow midnight; take the UTC reading in that case.
    tz.from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

/// Hex SHA-256 of the compact JSON form of the day data.
pub fn content_hash(data: &DayRecord) -> serde_json::Result<String> {
    let json = serde_json::to_string(data)?;
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
