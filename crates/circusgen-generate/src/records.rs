//! Table row types. Field declaration order is the CSV column order.

use chrono::NaiveDateTime;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::errors::GenerationError;
use crate::foreign::ForeignKeys;
use crate::generators::{
    self, DateWindow, EnumProvider, PaymentType, ShowType, UniqueNames, faker_rs,
};
use crate::ids::new_id;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct City {
    pub id: Uuid,
    pub name: String,
    pub population: u32,
}

impl City {
    pub fn build<R: Rng + ?Sized>(rng: &mut R, names: &mut UniqueNames) -> Self {
        let id = new_id(rng);
        let name = names.next(rng, |rng| faker_rs::city_name(rng));
        Self {
            id,
            name,
            population: generators::population(rng),
        }
    }

    /// Give the city a fresh id and population, keeping its name.
    pub fn remint<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.id = new_id(rng);
        self.population = generators::population(rng);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Show {
    pub id: Uuid,
    pub show_type: ShowType,
    #[serde(serialize_with = "timestamp")]
    pub date: NaiveDateTime,
    pub city_id: Uuid,
}

impl Show {
    pub fn build<R: Rng + ?Sized>(
        rng: &mut R,
        window: Option<&DateWindow>,
        cities: &ForeignKeys,
    ) -> Result<Self, GenerationError> {
        Ok(Self {
            id: new_id(rng),
            show_type: ShowType::pick(rng),
            date: generators::date_time(rng, window),
            city_id: cities.pick(rng)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ticket {
    pub id: Uuid,
    pub price: Decimal,
    pub payment_type: PaymentType,
    #[serde(serialize_with = "timestamp")]
    pub date: NaiveDateTime,
    pub seat: String,
    pub show_id: Uuid,
    pub viewer_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
}

/// Upstream pools a ticket draws its references from. Optional pools leave
/// the matching column empty.
#[derive(Debug, Clone, Copy)]
pub struct TicketRefs<'a> {
    pub shows: &'a ForeignKeys,
    pub viewers: Option<&'a ForeignKeys>,
    pub cities: Option<&'a ForeignKeys>,
}

impl TicketRefs<'_> {
    pub fn ensure_available(&self, rows: usize) -> Result<(), GenerationError> {
        self.shows.ensure_available(rows)?;
        for pool in [self.viewers, self.cities].into_iter().flatten() {
            pool.ensure_available(rows)?;
        }
        Ok(())
    }
}

impl Ticket {
    pub fn build<R: Rng + ?Sized>(
        rng: &mut R,
        window: Option<&DateWindow>,
        refs: &TicketRefs<'_>,
    ) -> Result<Self, GenerationError> {
        let id = new_id(rng);
        let price = generators::price(rng);
        let payment_type = PaymentType::pick(rng);
        let date = generators::date_time(rng, window);
        let seat = generators::seat(rng);
        let show_id = refs.shows.pick(rng)?;
        let viewer_id = refs.viewers.map(|viewers| viewers.pick(rng)).transpose()?;
        let city_id = refs.cities.map(|cities| cities.pick(rng)).transpose()?;
        Ok(Self {
            id,
            price,
            payment_type,
            date,
            seat,
            show_id,
            viewer_id,
            city_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Viewer {
    pub id: Uuid,
    pub name: String,
    pub age: u8,
}

impl Viewer {
    pub fn build<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            id: new_id(rng),
            name: faker_rs::person_name(rng),
            age: generators::age(rng),
        }
    }
}

fn timestamp<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
}
