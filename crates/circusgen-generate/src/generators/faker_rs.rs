//! Thin adapter over the `fake` crate for natural-language values.

use chrono::{DateTime, NaiveDateTime, Utc};
use fake::Fake;
use fake::faker::address::en::CityName;
use fake::faker::chrono::en::DateTime as AnyDateTime;
use fake::faker::name::en::Name;
use rand::Rng;

pub fn person_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    Name().fake_with_rng(rng)
}

pub fn city_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    CityName().fake_with_rng(rng)
}

pub fn any_date_time<R: Rng + ?Sized>(rng: &mut R) -> NaiveDateTime {
    let value: DateTime<Utc> = AnyDateTime().fake_with_rng(rng);
    value.naive_utc()
}
