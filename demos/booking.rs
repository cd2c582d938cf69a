// Interactive terminal booking flow.
//
// Walks one session through search -> train pick -> seat pick -> confirm,
// printing the agents' execution evidence after each action. Set RUST_LOG=debug
// to see every agent step.
//
// Run: cargo run --example booking
//      cargo run --example booking -- config.json

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use ticket_line::render::{self, Choice};
use ticket_line::{
    BookingConfig, Catalog, SearchRequest, Session, SessionError, Station, TravelClass,
};
use tracing_subscriber::EnvFilter;

const DEFAULT_REQUEST: &str = "Chennai to Bangalore sleeper ticket venum";

// ---------------------------------------------------------------------------
// Prompt helpers
// ---------------------------------------------------------------------------

fn ask(lines: &mut impl Iterator<Item = io::Result<String>>, prompt: &str) -> Option<String> {
    print!("{prompt}");
    io::stdout().flush().ok()?;
    lines.next()?.ok().map(|l| l.trim().to_string())
}

fn pick<T: Copy>(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    title: &str,
    choices: &[Choice<T>],
) -> Option<T> {
    println!("{title}");
    for (i, c) in choices.iter().enumerate() {
        println!("  [{}] {}", i + 1, c.label);
    }
    loop {
        let answer = ask(lines, "> ")?;
        match answer.parse::<usize>() {
            Ok(n) if (1..=choices.len()).contains(&n) => return Some(choices[n - 1].value),
            _ => println!("enter a number between 1 and {}", choices.len()),
        }
    }
}

fn print_evidence(session: &Session) {
    for line in session.logs() {
        println!("  ✔ {line}");
    }
}

fn options<T: Copy + ToString>(items: &[T]) -> Vec<Choice<T>> {
    items
        .iter()
        .map(|&value| Choice {
            label: value.to_string(),
            value,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Flow
// ---------------------------------------------------------------------------

fn run(session: &mut Session) -> Result<(), SessionError> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("\n🚆 Train Ticket Booking");
        let text = match ask(&mut lines, &format!("Request [{DEFAULT_REQUEST}]: ")) {
            Some(t) if t.is_empty() => DEFAULT_REQUEST.to_string(),
            Some(t) => t,
            None => return Ok(()),
        };
        let Some(source) = pick(&mut lines, "Source:", &options(&Station::SOURCES)) else {
            return Ok(());
        };
        let Some(destination) = pick(&mut lines, "Destination:", &options(&Station::DESTINATIONS))
        else {
            return Ok(());
        };
        let Some(class) = pick(&mut lines, "Class:", &options(&TravelClass::ALL)) else {
            return Ok(());
        };

        let outcome = session.search(SearchRequest {
            text,
            source,
            destination,
            class,
        })?;
        let query = render::query_json(&outcome.query).unwrap_or_default();
        let notice = outcome.notice.clone();

        println!("\n⚙️  Agent execution evidence");
        println!("{query}");
        print_evidence(session);
        if !session.train_table().is_empty() {
            println!("\n{}", render::format_train_table(&session.train_table()));
        }

        if let Some(notice) = notice {
            println!("{notice}");
            continue;
        }

        let trains = session.train_choices();
        let Some(index) = pick(&mut lines, "\n🚉 Choose a train:", &trains) else {
            return Ok(());
        };
        session.select_train(index)?;
        print_evidence(session);

        let seats = session.seat_choices();
        if seats.is_empty() {
            println!("{}", ticket_line::agents::notify(None));
            continue;
        }
        let Some(seat_no) = pick(&mut lines, "\n🪑 Select an available seat:", &seats) else {
            return Ok(());
        };

        let message = session.confirm(seat_no)?;
        print_evidence(session);
        println!("\n📩 Final output\n{message}");

        match ask(&mut lines, "\nBook another? [y/N] ") {
            Some(a) if a.eq_ignore_ascii_case("y") => continue,
            _ => return Ok(()),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).expect("read config file");
            BookingConfig::from_json(&json).expect("valid config")
        }
        None => BookingConfig::default(),
    };

    let catalog = Arc::new(Catalog::from_config(&config));
    println!("catalog: {} trains on {}", catalog.len(), config.travel_date);

    let mut session = Session::new(catalog, config).expect("session");
    if let Err(e) = run(&mut session) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
