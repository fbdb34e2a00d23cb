use std::time::SystemTime;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::error::ReflectResult;
use crate::reflect::{Kind, Reflect};

// Naive values are read as UTC.

impl Reflect for NaiveDate {
    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        let midnight = self.and_time(NaiveTime::default());
        Ok(Kind::Date(Utc.from_utc_datetime(&midnight)))
    }
}

impl Reflect for NaiveDateTime {
    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        Ok(Kind::Date(Utc.from_utc_datetime(self)))
    }
}

impl<Tz: TimeZone> Reflect for DateTime<Tz> {
    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        Ok(Kind::Date(self.with_timezone(&Utc)))
    }
}

impl Reflect for SystemTime {
    fn reflect(&self) -> ReflectResult<Kind<'_>> {
        Ok(Kind::Date(DateTime::<Utc>::from(*self)))
    }
}
