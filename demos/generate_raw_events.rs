use std::env;
use std::fs::{create_dir_all, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use chrono::{Duration, SecondsFormat, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

const PROBABILITY_ORPHAN_PAYMENT: f64 = 0.05;
const PROBABILITY_TEST_TRAFFIC: f64 = 0.06;
const PROBABILITY_MISSING_PAYMENT_ID: f64 = 0.03;

const AMOUNT_MODES: [(AmountMode, f64); 5] = [
    (AmountMode::CurrencyPrefixed, 0.45),
    (AmountMode::IntegerCents, 0.35),
    (AmountMode::PlainString, 0.10),
    (AmountMode::Missing, 0.07),
    (AmountMode::Empty, 0.03)
];
const CURRENCY_PREFIXES: [(&str, f64); 3] = [("$", 0.85), ("USD ", 0.10), ("$ ", 0.05)];
const STATUSES: [(&str, f64); 3] = [("FAILED", 0.18), ("PENDING", 0.07), ("SUCCESS", 0.75)];
const EVENT_TYPES: [(&str, f64); 3] = [("payment_attempted", 0.45), ("payment_succeeded", 0.40), ("payment_failed", 0.15)];
const SOURCES: [(&str, f64); 3] = [("web", 0.55), ("mobile", 0.35), ("internal", 0.10)];
const PROVIDERS: [&str; 3] = ["stripe", "paypal", "flutterwave"];
const USER_AGENTS: [&str; 5] = ["Chrome", "Safari", "Firefox", "Edge", "MobileApp"];
const EMAIL_DOMAINS: [&str; 5] = ["gmail.com", "yahoo.com", "outlook.com", "quickcart.test", "example.com"];

#[derive(Debug, Clone, Copy)]
enum AmountMode {
    CurrencyPrefixed,
    IntegerCents,
    PlainString,
    Missing,
    Empty
}

struct GeneratorConfig {
    num_events: usize,
    seed: u64,
    days: i64,
    output_dir: PathBuf
}

impl GeneratorConfig {
    fn from_args() -> Self {
        let args: Vec<String> = env::args().collect();

        Self {
            num_events: args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1_000),
            seed: args.get(2).and_then(|s| s.parse().ok()).unwrap_or(7),
            days: 30,
            output_dir: args.get(3).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("quickcart_data"))
        }
    }
}

fn main() -> io::Result<()> {
    let config = GeneratorConfig::from_args();
    let output_path = config.output_dir.join("raw_data.jsonl");

    println!("Generating {} raw payment events in {}...", config.num_events, output_path.display());

    create_dir_all(&config.output_dir)?;

    let mut writer = BufWriter::new(File::create(&output_path)?);
    let mut rng = StdRng::seed_from_u64(config.seed);

    for _ in 0..config.num_events {
        let event = generate_event(&mut rng, config.days);
        writeln!(writer, "{event}")?;
    }

    writer.flush()?;

    println!("Generation complete.");

    Ok(())
}

fn weighted<T: Copy, R: Rng>(rng: &mut R, choices: &[(T, f64)]) -> T {
    let total: f64 = choices.iter().map(|(_, weight)| weight).sum();
    let mut roll = rng.gen_range(0.0..total);

    for (choice, weight) in choices {
        if roll < *weight {
            return *choice;
        }
        roll -= weight;
    }

    choices[choices.len() - 1].0
}

fn random_id<R: Rng>(rng: &mut R, prefix: &str, length: usize) -> String {
    let hex = format!("{:032x}", rng.r#gen::<u128>());
    format!("{prefix}_{}", &hex[..length])
}

fn random_email<R: Rng>(rng: &mut R) -> String {
    let user_length = rng.gen_range(6..=12);
    let user: String = (0..user_length)
        .map(|_| *b"abcdefghijklmnopqrstuvwxyz0123456789".choose(rng).unwrap_or(&b'x') as char)
        .collect();
    let domain = EMAIL_DOMAINS.choose(rng).unwrap_or(&"example.com");

    format!("{user}@{domain}")
}

fn messy_amount<R: Rng>(rng: &mut R, total_cents: i64) -> Value {
    let dollars = format!("{}.{:02}", total_cents / 100, total_cents % 100);

    match weighted(rng, &AMOUNT_MODES) {
        AmountMode::Missing => Value::Null,
        AmountMode::Empty => json!(""),
        AmountMode::IntegerCents => json!(total_cents),
        AmountMode::PlainString => json!(dollars),
        AmountMode::CurrencyPrefixed => json!(format!("{}{}", weighted(rng, &CURRENCY_PREFIXES), dollars))
    }
}

fn generate_event<R: Rng>(rng: &mut R, days: i64) -> Value {
    let attempted_at = Utc::now() - Duration::seconds(rng.gen_range(0..days * 86_400));
    let total_cents = rng.gen_range(500..30_000);

    let order_id = if rng.gen_bool(PROBABILITY_ORPHAN_PAYMENT) {
        Value::Null
    } else {
        json!(random_id(rng, "ord", 16))
    };

    let payment_id = if rng.gen_bool(PROBABILITY_MISSING_PAYMENT_ID) {
        Value::Null
    } else {
        json!(random_id(rng, "pay", 16))
    };

    let is_test = rng.gen_bool(PROBABILITY_TEST_TRAFFIC);
    let flags = if is_test && rng.gen_bool(0.5) { json!("sandbox") } else { Value::Null };

    let mut metadata = json!({
        "ip": (0..4).map(|_| rng.gen_range(1..=254).to_string()).collect::<Vec<_>>().join("."),
        "user_agent": USER_AGENTS.choose(rng).unwrap_or(&"Chrome")
    });

    if is_test && flags.is_null() {
        metadata["is_test"] = json!(true);
    }

    json!({
        "event": {
            "id": random_id(rng, "evt", 18),
            "type": weighted(rng, &EVENT_TYPES),
            "ts": attempted_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            "source": weighted(rng, &SOURCES)
        },
        "entity": {
            "order": {"id": order_id},
            "payment": {
                "id": payment_id,
                "provider_ref": random_id(rng, "prov", 18),
                "provider": PROVIDERS.choose(rng).unwrap_or(&"stripe")
            },
            "customer": {"email": random_email(rng)}
        },
        "payload": {
            "Amount": messy_amount(rng, total_cents),
            "currency": "USD",
            "status": weighted(rng, &STATUSES),
            "flags": flags,
            "metadata": metadata
        }
    })
}
