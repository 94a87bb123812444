//! Field generators: stateless samplers over an injected random source.

pub mod enums;
pub mod faker_rs;

use std::collections::HashSet;
use std::ops::{Range, RangeInclusive};

use chrono::{Duration, Months, NaiveDateTime};
use rand::Rng;
use rust_decimal::Decimal;

use crate::errors::GenerationError;

pub use enums::{EnumProvider, EnumRegistry, PaymentType, ShowType};

pub const POPULATION_RANGE: Range<u32> = 100_000..10_000_000;
pub const PRICE_CENTS_RANGE: Range<i64> = 100..1000;
pub const AGE_RANGE: RangeInclusive<u8> = 1..=100;

const SEAT_ROWS: &[u8] = b"ABCDEFGHIJKLMNOP";
const SEATS_PER_ROW: u8 = 40;

/// Half-open `[start, end)` timestamp window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, GenerationError> {
        if (end - start).num_seconds() < 1 {
            return Err(GenerationError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window from `from_years` before `now` up to `to_years` before `now`.
    pub fn years_before(
        now: NaiveDateTime,
        from_years: u32,
        to_years: u32,
    ) -> Result<Self, GenerationError> {
        let start = years_back(now, from_years)?;
        let end = years_back(now, to_years)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn contains(&self, value: NaiveDateTime) -> bool {
        self.start <= value && value < self.end
    }
}

fn years_back(now: NaiveDateTime, years: u32) -> Result<NaiveDateTime, GenerationError> {
    now.checked_sub_months(Months::new(years.saturating_mul(12)))
        .ok_or_else(|| GenerationError::InvalidOptions(format!("{years} years before {now}")))
}

pub fn population<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.random_range(POPULATION_RANGE)
}

pub fn price<R: Rng + ?Sized>(rng: &mut R) -> Decimal {
    Decimal::new(rng.random_range(PRICE_CENTS_RANGE), 2)
}

pub fn age<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.random_range(AGE_RANGE)
}

pub fn seat<R: Rng + ?Sized>(rng: &mut R) -> String {
    let row = SEAT_ROWS[rng.random_range(0..SEAT_ROWS.len())] as char;
    let number = rng.random_range(1..=SEATS_PER_ROW);
    format!("{row}{number:02}")
}

/// Uniform timestamp at second resolution inside `window`, or any timestamp
/// when no window is given.
pub fn date_time<R: Rng + ?Sized>(rng: &mut R, window: Option<&DateWindow>) -> NaiveDateTime {
    match window {
        Some(window) => {
            let span = (window.end - window.start).num_seconds();
            window.start + Duration::seconds(rng.random_range(0..span))
        }
        None => faker_rs::any_date_time(rng),
    }
}

/// Issues names that are pairwise distinct for the lifetime of the tracker.
#[derive(Debug)]
pub struct UniqueNames {
    seen: HashSet<String>,
    max_attempts: u32,
    fallbacks: u64,
}

impl UniqueNames {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            seen: HashSet::new(),
            max_attempts: max_attempts.max(1),
            fallbacks: 0,
        }
    }

    /// Draw until an unseen name comes up. After `max_attempts` collisions the
    /// last candidate gets a numeric suffix instead.
    pub fn next<R, F>(&mut self, rng: &mut R, mut draw: F) -> String
    where
        R: Rng + ?Sized,
        F: FnMut(&mut R) -> String,
    {
        let mut candidate = String::new();
        for _ in 0..self.max_attempts {
            candidate = draw(rng);
            if self.seen.insert(candidate.clone()) {
                return candidate;
            }
        }

        self.fallbacks += 1;
        let mut suffix = 2_u64;
        loop {
            let name = format!("{candidate} {suffix}");
            if self.seen.insert(name.clone()) {
                return name;
            }
            suffix += 1;
        }
    }

    pub fn fallbacks(&self) -> u64 {
        self.fallbacks
    }
}
