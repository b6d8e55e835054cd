use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use rand::{Rng, RngCore};

use datasim_core::{Error, Result, RowContext, Value};

use super::Field;

/// Uniform calendar date in `[start, end]`.
#[derive(Debug, Clone)]
pub struct DateField {
    start: NaiveDate,
    span_days: i64,
}

impl DateField {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::validation("date start must be <= end"));
        }
        Ok(Self {
            start,
            span_days: (end - start).num_days(),
        })
    }

    /// Build from ISO-8601 (`YYYY-MM-DD`) strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }
}

impl Field for DateField {
    fn kind(&self) -> &'static str {
        "date"
    }

    fn generate(&self, _ctx: &RowContext, rng: &mut dyn RngCore) -> Value {
        let offset = rng.random_range(0..=self.span_days);
        Value::Date(self.start + chrono::Duration::days(offset))
    }
}

/// Uniform instant in `[start, end]` at one-second resolution.
///
/// Bounds are naive. With a timezone the drawn instant is read as UTC and
/// converted into that zone.
#[derive(Debug, Clone)]
pub struct DateTimeField {
    start: NaiveDateTime,
    span_seconds: i64,
    timezone: Option<Tz>,
}

impl DateTimeField {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if start > end {
            return Err(Error::validation("datetime start must be <= end"));
        }
        Ok(Self {
            start,
            span_seconds: (end - start).num_seconds(),
            timezone: None,
        })
    }

    /// Build from ISO-8601 strings. Strings carrying an offset are
    /// normalized to UTC.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_datetime(start)?, parse_datetime(end)?)
    }

    /// Convert generated instants into the IANA zone `name`.
    pub fn with_timezone(mut self, name: &str) -> Result<Self> {
        let tz: Tz = name
            .parse()
            .map_err(|err| Error::validation(format!("invalid timezone '{name}': {err}")))?;
        self.timezone = Some(tz);
        Ok(self)
    }

    pub fn timezone(&self) -> Option<Tz> {
        self.timezone
    }
}

impl Field for DateTimeField {
    fn kind(&self) -> &'static str {
        "datetime"
    }

    fn generate(&self, _ctx: &RowContext, rng: &mut dyn RngCore) -> Value {
        let offset = rng.random_range(0..=self.span_seconds);
        let naive = self.start + chrono::Duration::seconds(offset);
        match self.timezone {
            Some(tz) => Value::ZonedDateTime(tz.from_utc_datetime(&naive)),
            None => Value::DateTime(naive),
        }
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| Error::type_coercion(format!("invalid ISO date '{value}': {err}")))
}

pub fn parse_datetime(value: &str) -> Result<NaiveDateTime> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.naive_utc());
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(NaiveDateTime::new(date, NaiveTime::MIN));
    }
    Err(Error::type_coercion(format!(
        "invalid ISO datetime '{value}'"
    )))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn date_stays_within_bounds() {
        let field = DateField::parse("2024-02-27", "2024-03-02").expect("valid range");
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        for _ in 0..500 {
            let value = field
                .generate(&RowContext::new(), &mut rng)
                .as_date()
                .expect("date value");
            assert!(value >= date(2024, 2, 27) && value <= date(2024, 3, 2));
        }
    }

    #[test]
    fn date_rejects_inverted_range() {
        let err = DateField::new(date(2024, 2, 1), date(2024, 1, 1)).expect_err("inverted");
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn date_rejects_malformed_string() {
        let err = DateField::parse("2024-13-01", "2024-12-31").expect_err("bad month");
        assert!(matches!(err, Error::TypeCoercion(_)));
    }

    #[test]
    fn datetime_has_second_resolution_within_bounds() {
        let field = DateTimeField::parse("2024-01-01T00:00:00", "2024-01-01T00:10:00")
            .expect("valid range");
        let start = parse_datetime("2024-01-01T00:00:00").expect("start");
        let end = parse_datetime("2024-01-01T00:10:00").expect("end");
        let mut rng = ChaCha8Rng::seed_from_u64(12);

        for _ in 0..500 {
            let Value::DateTime(value) = field.generate(&RowContext::new(), &mut rng) else {
                panic!("expected naive datetime");
            };
            assert!(value >= start && value <= end);
            assert_eq!(value.and_utc().timestamp_subsec_nanos(), 0);
        }
    }

    #[test]
    fn datetime_converts_into_timezone() {
        let field = DateTimeField::parse("2024-07-01T12:00:00", "2024-07-01T12:00:00")
            .and_then(|field| field.with_timezone("Europe/Paris"))
            .expect("valid field");
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let value = field.generate(&RowContext::new(), &mut rng);
        assert_eq!(value.to_text(), "2024-07-01T14:00:00+02:00");
    }

    #[test]
    fn datetime_rejects_unknown_timezone() {
        let err = DateTimeField::parse("2024-01-01", "2024-01-02")
            .and_then(|field| field.with_timezone("Mars/Olympus"))
            .expect_err("unknown zone");
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn parse_datetime_accepts_common_iso_shapes() {
        let expected = date(2024, 5, 6).and_hms_opt(7, 8, 0).expect("valid time");
        assert_eq!(parse_datetime("2024-05-06T07:08:00").ok(), Some(expected));
        assert_eq!(parse_datetime("2024-05-06 07:08").ok(), Some(expected));
        assert_eq!(parse_datetime("2024-05-06T09:08:00+02:00").ok(), Some(expected));
        assert_eq!(
            parse_datetime("2024-05-06").ok(),
            Some(date(2024, 5, 6).and_hms_opt(0, 0, 0).expect("midnight"))
        );
        assert!(matches!(
            parse_datetime("yesterday"),
            Err(Error::TypeCoercion(_))
        ));
    }
}
