use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDateTime;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::batch::generate_batches;
use crate::errors::GenerationError;
use crate::foreign::ForeignKeys;
use crate::generators::{DateWindow, UniqueNames};
use crate::ids::new_id;
use crate::model::{GenerationReport, RunConfig, TableReport};
use crate::output::{WriteMode, WriteStats, write_rows};
use crate::records::{City, Show, Ticket, TicketRefs, Viewer};

/// Rows produced by one generation call and what writing them cost.
#[derive(Debug, Clone)]
pub struct TableOutput<T> {
    pub rows: Vec<T>,
    pub stats: WriteStats,
    /// Values that needed the uniqueness fallback.
    pub fallbacks: u64,
}

impl<T> TableOutput<T> {
    fn new(rows: Vec<T>, stats: WriteStats) -> Self {
        Self {
            rows,
            stats,
            fallbacks: 0,
        }
    }
}

pub fn generate_viewers<R: Rng + ?Sized>(
    rng: &mut R,
    quantity: usize,
    path: &Path,
) -> Result<TableOutput<Viewer>, GenerationError> {
    let start = Instant::now();
    let viewers: Vec<Viewer> = (0..quantity).map(|_| Viewer::build(rng)).collect();
    let stats = write_rows(path, &viewers, WriteMode::Create)?;
    log_table("viewers", path, &stats, start);
    Ok(TableOutput::new(viewers, stats))
}

/// Generate cities whose names are pairwise distinct within this call.
pub fn generate_cities<R: Rng + ?Sized>(
    rng: &mut R,
    quantity: usize,
    path: &Path,
    max_unique_attempts: u32,
) -> Result<TableOutput<City>, GenerationError> {
    let start = Instant::now();
    let mut names = UniqueNames::new(max_unique_attempts);
    let cities: Vec<City> = (0..quantity).map(|_| City::build(rng, &mut names)).collect();
    let stats = write_rows(path, &cities, WriteMode::Create)?;
    log_table("cities", path, &stats, start);
    Ok(TableOutput {
        rows: cities,
        stats,
        fallbacks: names.fallbacks(),
    })
}

/// Re-mint id and population of every city in place, keep the names, and
/// append the mutated rows to `path`.
pub fn modify_cities<R: Rng + ?Sized>(
    rng: &mut R,
    cities: &mut [City],
    path: &Path,
) -> Result<WriteStats, GenerationError> {
    let start = Instant::now();
    for city in cities.iter_mut() {
        city.remint(rng);
    }
    let stats = write_rows(path, cities, WriteMode::Append)?;
    log_table("cities", path, &stats, start);
    Ok(stats)
}

pub fn generate_shows<R: Rng + ?Sized>(
    rng: &mut R,
    quantity: usize,
    path: &Path,
    window: Option<&DateWindow>,
    cities: &ForeignKeys,
) -> Result<TableOutput<Show>, GenerationError> {
    cities.ensure_available(quantity)?;
    let start = Instant::now();
    let shows = (0..quantity)
        .map(|_| Show::build(rng, window, cities))
        .collect::<Result<Vec<_>, _>>()?;
    let stats = write_rows(path, &shows, WriteMode::Create)?;
    log_table("shows", path, &stats, start);
    Ok(TableOutput::new(shows, stats))
}

/// Generate tickets in `workers` parallel batches and write them once every
/// batch has finished.
pub fn generate_tickets<R: Rng + ?Sized>(
    rng: &mut R,
    quantity: usize,
    path: &Path,
    window: Option<&DateWindow>,
    refs: TicketRefs<'_>,
    workers: usize,
) -> Result<TableOutput<Ticket>, GenerationError> {
    refs.ensure_available(quantity)?;
    let start = Instant::now();
    let tickets = generate_batches(quantity, workers, rng, |batch_rng| {
        Ticket::build(batch_rng, window, &refs)
    })?;
    let stats = write_rows(path, &tickets, WriteMode::Create)?;
    log_table("tickets", path, &stats, start);
    Ok(TableOutput::new(tickets, stats))
}

/// Entry point for a full cities, shows, tickets (and viewers) run.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    config: RunConfig,
}

impl GenerationEngine {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run with a fresh random source and the local wall clock.
    pub fn run(&self) -> Result<GenerationReport, GenerationError> {
        let mut rng = ChaCha8Rng::from_rng(&mut rand::rng());
        let now = chrono::Local::now().naive_local();
        self.run_with(&mut rng, now)
    }

    pub fn run_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        now: NaiveDateTime,
    ) -> Result<GenerationReport, GenerationError> {
        let config = &self.config;
        config.validate()?;

        let start = Instant::now();
        let run_id = new_id(rng).to_string();
        std::fs::create_dir_all(&config.out_dir)?;

        info!(
            run_id = %run_id,
            out_dir = %config.out_dir.display(),
            cities = config.cities,
            shows = config.shows,
            tickets = config.tickets,
            viewers = config.viewers,
            threads = config.threads,
            second_batch = config.second_batch,
            "generation started"
        );

        let mut report = GenerationReport::new(run_id.clone());

        let viewers = if config.viewers > 0 {
            let path = self.path("viewers", "");
            let output = generate_viewers(rng, config.viewers, &path)?;
            report.record_table(table_report("viewers", &path, config.viewers, output.stats));
            Some(ForeignKeys::new(
                "viewers",
                output.rows.iter().map(|viewer| viewer.id).collect(),
            ))
        } else {
            None
        };

        if config.second_batch {
            let first = DateWindow::years_before(now, 10, 1)?;
            let cities = self.run_pass(
                rng,
                &mut report,
                Pass {
                    suffix: "_t1",
                    cities: config.cities,
                    shows: config.shows,
                    tickets: config.tickets,
                    window: first,
                },
                viewers.as_ref(),
                Vec::new(),
            )?;

            let mutated: Vec<City> = cities.into_iter().take(config.cities / 10).collect();
            let second = DateWindow::years_before(now, 1, 0)?;
            self.run_pass(
                rng,
                &mut report,
                Pass {
                    suffix: "_t2",
                    cities: config.cities / 10,
                    shows: config.shows / 10,
                    tickets: config.tickets / 10,
                    window: second,
                },
                viewers.as_ref(),
                mutated,
            )?;
        } else {
            let window = DateWindow::years_before(now, 10, 0)?;
            self.run_pass(
                rng,
                &mut report,
                Pass {
                    suffix: "",
                    cities: config.cities,
                    shows: config.shows,
                    tickets: config.tickets,
                    window,
                },
                viewers.as_ref(),
                Vec::new(),
            )?;
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            run_id = %run_id,
            tables = report.tables.len(),
            duration_ms = report.duration_ms,
            bytes_written = report.bytes_written,
            fallback_count = report.fallback_count,
            "generation completed"
        );
        Ok(report)
    }

    /// One cities, shows, tickets sequence. `mutated` cities are re-minted and
    /// appended to this pass's cities file; their new ids join the show pool.
    /// Tickets reference only the cities generated fresh in this pass.
    fn run_pass<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        report: &mut GenerationReport,
        pass: Pass,
        viewers: Option<&ForeignKeys>,
        mut mutated: Vec<City>,
    ) -> Result<Vec<City>, GenerationError> {
        let cities_path = self.path("cities", pass.suffix);
        let cities = generate_cities(
            rng,
            pass.cities,
            &cities_path,
            self.config.max_unique_attempts,
        )?;
        report.record_fallbacks(cities.fallbacks);
        report.record_table(table_report("cities", &cities_path, pass.cities, cities.stats));

        let fresh_city_keys = ForeignKeys::new(
            "cities",
            cities.rows.iter().map(|city| city.id).collect(),
        );
        let mut city_keys = fresh_city_keys.clone();
        if !mutated.is_empty() {
            let stats = modify_cities(rng, &mut mutated, &cities_path)?;
            report.record_table(table_report("cities", &cities_path, mutated.len(), stats));
            city_keys.extend(mutated.iter().map(|city| city.id));
        }

        let shows_path = self.path("shows", pass.suffix);
        let shows = generate_shows(rng, pass.shows, &shows_path, Some(&pass.window), &city_keys)?;
        report.record_table(table_report("shows", &shows_path, pass.shows, shows.stats));
        let show_keys = ForeignKeys::new("shows", shows.rows.iter().map(|show| show.id).collect());

        let tickets_path = self.path("tickets", pass.suffix);
        let tickets = generate_tickets(
            rng,
            pass.tickets,
            &tickets_path,
            Some(&pass.window),
            TicketRefs {
                shows: &show_keys,
                viewers,
                cities: Some(&fresh_city_keys),
            },
            self.config.threads,
        )?;
        report.record_table(table_report("tickets", &tickets_path, pass.tickets, tickets.stats));

        Ok(cities.rows)
    }

    fn path(&self, table: &str, suffix: &str) -> PathBuf {
        self.config.out_dir.join(format!("{table}{suffix}.csv"))
    }
}

struct Pass {
    suffix: &'static str,
    cities: usize,
    shows: usize,
    tickets: usize,
    window: DateWindow,
}

fn table_report(table: &str, path: &Path, requested: usize, stats: WriteStats) -> TableReport {
    TableReport {
        table: table.to_string(),
        file: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        rows_requested: requested as u64,
        rows_generated: stats.rows,
        bytes_written: stats.bytes,
    }
}

fn log_table(table: &str, path: &Path, stats: &WriteStats, start: Instant) {
    info!(
        table,
        path = %path.display(),
        rows = stats.rows,
        bytes = stats.bytes,
        duration_ms = start.elapsed().as_millis() as u64,
        "table written"
    );
}
