// One-shot scripted booking.
//
// Searches a seeded catalog, takes the first bookable train and its first
// free seat, and prints the confirmation. Falls back to the no-seats notice
// when the route has nothing bookable.
//
// Run: cargo run --example quick_book -- Chennai Bangalore Sleeper
//      RUST_LOG=debug cargo run --example quick_book -- Coimbatore Mumbai 2A

use std::sync::Arc;
use ticket_line::render;
use ticket_line::{BookingConfig, Catalog, SearchRequest, Session, Station, TravelClass};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let arg = |i: usize, default: &str| args.get(i).cloned().unwrap_or_else(|| default.into());

    let source: Station = arg(0, "Chennai").parse().unwrap();
    let destination: Station = arg(1, "Bangalore").parse().unwrap();
    let class: TravelClass = arg(2, "Sleeper").parse().unwrap();

    let config = BookingConfig::default().with_seed(2025);
    let catalog = Arc::new(Catalog::from_config(&config));
    let mut session = Session::new(catalog, config).unwrap();

    let outcome = session
        .search(SearchRequest {
            text: format!("{source} to {destination} {class} ticket"),
            source,
            destination,
            class,
        })
        .unwrap();
    println!("{}", render::query_json(&outcome.query).unwrap());
    if let Some(notice) = outcome.notice.clone() {
        println!("{notice}");
        return;
    }

    println!("{}", render::format_train_table(&session.train_table()));

    let train = session.train_choices()[0].clone();
    println!("selected: {}", train.label);
    session.select_train(train.value).unwrap();

    let seat = session.seat_choices()[0].clone();
    println!("seat: {}", seat.label);

    let message = session.confirm(seat.value).unwrap();
    for line in session.logs() {
        println!("  ✔ {line}");
    }
    println!("{message}");
}
