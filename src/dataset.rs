//! Synthetic train catalog.

use crate::config::BookingConfig;
use crate::model::{Preference, Station, Train, TravelClass};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::ops::Deref;

/// Prefix of every generated train name.
pub const TRAIN_NAME_PREFIX: &str = "Express_";

fn pick<T: Copy, R: Rng + ?Sized>(choices: &[T], rng: &mut R) -> T {
    choices[rng.gen_range(0..choices.len())]
}

/// Generate `n` independent train rows.
///
/// Source and destination are drawn independently, so a row may start and
/// end at the same station. Train ids may collide.
pub fn generate<R: Rng + ?Sized>(n: usize, travel_date: &str, rng: &mut R) -> Vec<Train> {
    (0..n)
        .map(|_| {
            let total_seats = rng.gen_range(50..=100);
            let booked_seats = rng.gen_range(0..=total_seats);
            Train::new(
                rng.gen_range(10_000..=99_999),
                format!("{TRAIN_NAME_PREFIX}{}", rng.gen_range(1..=200)),
                pick(&Station::SOURCES, rng),
                pick(&Station::DESTINATIONS, rng),
                travel_date,
                pick(&TravelClass::ALL, rng),
                total_seats,
                booked_seats,
                rng.gen_range(18..=70),
                pick(&Preference::ALL, rng),
            )
        })
        .collect()
}

/// The read-only table of trains for one process run.
///
/// Built once at startup and shared by handle; rows are never edited.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    trains: Vec<Train>,
}

impl Catalog {
    pub fn generate<R: Rng + ?Sized>(n: usize, travel_date: &str, rng: &mut R) -> Self {
        let trains = generate(n, travel_date, rng);
        tracing::info!(trains = trains.len(), "catalog generated");
        Self { trains }
    }

    /// Generate the startup catalog described by `config`, seeded when
    /// `config.seed` is set.
    pub fn from_config(config: &BookingConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::generate(config.catalog_size, &config.travel_date, &mut rng)
    }

    pub fn trains(&self) -> &[Train] {
        &self.trains
    }
}

impl From<Vec<Train>> for Catalog {
    fn from(trains: Vec<Train>) -> Self {
        Self { trains }
    }
}

impl Deref for Catalog {
    type Target = [Train];

    fn deref(&self) -> &[Train] {
        &self.trains
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_the_requested_number_of_rows() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(generate(250, "2025-12-10", &mut rng).len(), 250);
        assert!(generate(0, "2025-12-10", &mut rng).is_empty());
    }

    #[test]
    fn rows_respect_seat_invariants_and_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for t in generate(2_000, "2025-12-10", &mut rng) {
            assert_eq!(t.seat_available, t.total_seats - t.booked_seats);
            assert!(t.booked_seats <= t.total_seats);
            assert!((50..=100).contains(&t.total_seats));
            assert!((10_000..=99_999).contains(&t.train_id));
            assert!((18..=70).contains(&t.passenger_age));
            assert!(Station::SOURCES.contains(&t.source));
            assert!(Station::DESTINATIONS.contains(&t.destination));
            assert_eq!(t.travel_date, "2025-12-10");

            let suffix: u32 = t
                .train_name
                .strip_prefix(TRAIN_NAME_PREFIX)
                .unwrap()
                .parse()
                .unwrap();
            assert!((1..=200).contains(&suffix));
        }
    }

    #[test]
    fn same_seed_same_catalog() {
        let a = Catalog::generate(100, "2025-12-10", &mut ChaCha8Rng::seed_from_u64(9));
        let b = Catalog::generate(100, "2025-12-10", &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a.trains(), b.trains());
    }

    #[test]
    fn config_seed_makes_the_catalog_reproducible() {
        let config = BookingConfig::default().with_catalog_size(64).with_seed(21);
        let a = Catalog::from_config(&config);
        let b = Catalog::from_config(&config);
        assert_eq!(a.len(), 64);
        assert_eq!(a.trains(), b.trains());
    }

    #[test]
    fn large_catalog_covers_every_class_and_round_trip_route() {
        let catalog = Catalog::generate(5_000, "2025-12-10", &mut ChaCha8Rng::seed_from_u64(3));
        for class in TravelClass::ALL {
            assert!(catalog.iter().any(|t| t.class == class));
        }
        // Chennai and Bangalore appear on both sides, so same-station rows occur.
        assert!(catalog.iter().any(|t| t.source == t.destination));
    }
}
