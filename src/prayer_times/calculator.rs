use anyhow::{anyhow, Result};
use chrono::{FixedOffset, NaiveDate, NaiveTime};
use salah::prelude::*;

use crate::config::settings::SalahConfig;

#[derive(Debug, Clone)]
pub struct PrayerTimesLocal {
    pub fajr: NaiveTime,
    pub sunrise: NaiveTime,
    pub zuhr: NaiveTime,
    pub asr: NaiveTime,
    pub maghrib: NaiveTime,
    pub isha: NaiveTime,
}

impl PrayerTimesLocal {
    /// Look a time up by prayer name, accepting the common spellings.
    pub fn time_for(&self, name: &str) -> Option<NaiveTime> {
        match name.trim().to_lowercase().as_str() {
            "fajr" => Some(self.fajr),
            "sunrise" | "shuruq" => Some(self.sunrise),
            "zuhr" | "dhuhr" | "dhuhur" | "zohr" => Some(self.zuhr),
            "asr" => Some(self.asr),
            "maghrib" => Some(self.maghrib),
            "isha" => Some(self.isha),
            _ => None,
        }
    }
}

pub struct PrayerCalculator {
    pub lat: f64,
    pub lng: f64,
    pub method_str: String,
    pub madhab_str: String,
    pub tz_offset_minutes: i32,
}

impl PrayerCalculator {
    pub fn new(
        lat: f64,
        lng: f64,
        method: &str,
        madhab: &str,
        tz_offset_minutes: i32,
    ) -> Result<Self> {
        // Validate method + madhab early
        parse_method(method)?;
        parse_madhab(madhab)?;
        Ok(Self {
            lat,
            lng,
            method_str: method.to_string(),
            madhab_str: madhab.to_string(),
            tz_offset_minutes,
        })
    }

    pub fn from_config(salah: &SalahConfig) -> Result<Self> {
        Self::new(
            salah.latitude,
            salah.longitude,
            &salah.calc_method,
            &salah.madhab,
            salah.timezone_offset,
        )
    }

    pub fn times_for_date(&self, date: NaiveDate) -> Result<PrayerTimesLocal> {
        let coords = Coordinates::new(self.lat, self.lng);
        let method = parse_method(&self.method_str)?;
        let madhab = parse_madhab(&self.madhab_str)?;
        let params = Configuration::with(method, madhab);

        let times = PrayerSchedule::new()
            .on(date)
            .for_location(coords)
            .with_configuration(params)
            .calculate()
            .map_err(|e| anyhow!("Prayer calculation failed: {}", e))?;

        let offset = FixedOffset::east_opt(self.tz_offset_minutes * 60)
            .ok_or_else(|| anyhow!("Invalid timezone offset: {}", self.tz_offset_minutes))?;

        let to_local = |utc: chrono::DateTime<chrono::Utc>| -> NaiveTime {
            utc.with_timezone(&offset).time()
        };

        Ok(PrayerTimesLocal {
            fajr: to_local(times.time(Prayer::Fajr)),
            sunrise: to_local(times.time(Prayer::Sunrise)),
            zuhr: to_local(times.time(Prayer::Dhuhr)),
            asr: to_local(times.time(Prayer::Asr)),
            maghrib: to_local(times.time(Prayer::Maghrib)),
            isha: to_local(times.time(Prayer::Isha)),
        })
    }
}

fn parse_method(s: &str) -> Result<Method> {
    match s {
        "MuslimWorldLeague" => Ok(Method::MuslimWorldLeague),
        "Egyptian" => Ok(Method::Egyptian),
        "Karachi" => Ok(Method::Karachi),
        "UmmAlQura" => Ok(Method::UmmAlQura),
        "Dubai" => Ok(Method::Dubai),
        "MoonsightingCommittee" => Ok(Method::MoonsightingCommittee),
        "NorthAmerica" => Ok(Method::NorthAmerica),
        "Kuwait" => Ok(Method::Kuwait),
        "Qatar" => Ok(Method::Qatar),
        "Singapore" => Ok(Method::Singapore),
        "Tehran" => Ok(Method::Tehran),
        "Turkey" => Ok(Method::Turkey),
        "Other" => Ok(Method::Other),
        _ => Err(anyhow!(
            "Unknown calculation method '{}'. Use one of: {}",
            s,
            CALC_METHODS.join(", ")
        )),
    }
}

fn parse_madhab(s: &str) -> Result<Madhab> {
    match s {
        "Hanafi" => Ok(Madhab::Hanafi),
        "Shafi" | "Shafi'i" => Ok(Madhab::Shafi),
        _ => Err(anyhow!("Unknown madhab: '{}'", s)),
    }
}

pub const CALC_METHODS: &[&str] = &[
    "MuslimWorldLeague",
    "Egyptian",
    "Karachi",
    "UmmAlQura",
    "Dubai",
    "MoonsightingCommittee",
    "NorthAmerica",
    "Kuwait",
    "Qatar",
    "Singapore",
    "Tehran",
    "Turkey",
    "Other",
];
