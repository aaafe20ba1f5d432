//! Synthetic people dataset.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use rand::Rng;
use uuid::Uuid;
use vgrid::{CellRenderer, CellValue, ColumnDescriptor, Row};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Dennis", "Edsger", "Frances", "Grace", "Guido", "Ken", "Linus",
    "Margaret", "Niklaus", "Radia", "Sophie", "Tim", "Yukihiro",
];

const LAST_NAMES: &[&str] = &[
    "Allen", "Hopper", "Kernighan", "Knuth", "Lamport", "Liskov", "Lovelace", "Perlman",
    "Ritchie", "Stroustrup", "Thompson", "Torvalds", "Turing", "Wirth",
];

const CITIES: &[&str] = &[
    "Amsterdam", "Berlin", "Bogotá", "Cairo", "Helsinki", "Lagos", "Lima", "Montréal", "Osaka",
    "Reykjavík", "São Paulo", "Seoul", "Zürich", "東京",
];

/// A percentage drawn as a bar followed by the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBar(pub u8);

impl CellRenderer for ScoreBar {
    fn render(&self, width: usize) -> String {
        let label = format!("{:>3}%", self.0);
        let bar_width = width.saturating_sub(label.len() + 1);
        if bar_width == 0 {
            return label;
        }
        let filled = bar_width * self.0.min(100) as usize / 100;
        format!(
            "{}{} {}",
            "█".repeat(filled),
            "░".repeat(bar_width - filled),
            label
        )
    }
}

/// Column layout for [`generate`].
pub fn descriptors() -> Arc<[ColumnDescriptor]> {
    vec![
        ColumnDescriptor::new("id", "Id").width(38),
        ColumnDescriptor::new("name", "Name").width(22),
        ColumnDescriptor::new("city", "City").width(12),
        ColumnDescriptor::new("age", "Age").width(6),
        ColumnDescriptor::new("joined", "Joined").width(12),
        ColumnDescriptor::new("balance", "Balance").width(12),
        ColumnDescriptor::new("active", "Active").width(8),
        ColumnDescriptor::new("score", "Score").width(18),
    ]
    .into()
}

/// `count` random rows.
pub fn generate(count: usize, rng: &mut impl Rng) -> Vec<Row> {
    let epoch = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or_default();
    (0..count)
        .map(|_| {
            let first = FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())];
            let last = LAST_NAMES[rng.random_range(0..LAST_NAMES.len())];
            let joined = epoch + Duration::days(rng.random_range(0..3650));
            // Roughly one in twenty balances is unknown.
            let balance = rng
                .random_bool(0.95)
                .then(|| rng.random_range(-5_000.0_f64..250_000.0));

            Row::new()
                .with("id", Uuid::new_v4().to_string())
                .with("name", format!("{first} {last}"))
                .with("city", CITIES[rng.random_range(0..CITIES.len())])
                .with("age", rng.random_range(18..90_i64))
                .with("joined", joined.format("%Y-%m-%d").to_string())
                .with("balance", CellValue::from(balance))
                .with("active", rng.random_bool(0.7))
                .with(
                    "score",
                    CellValue::Custom(Arc::new(ScoreBar(rng.random_range(0..=100)))),
                )
        })
        .collect()
}
