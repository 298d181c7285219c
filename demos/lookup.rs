//! Looks up a few words with both the blocking and the async client.
//!
//! Run with: `cargo run --example lookup`
//!
//! Set `RUST_LOG=latindictionary=debug` to see every attempt, and
//! `LATINDICTIONARY_BASE_URL` to point at another server.

use latindictionary::{blocking, Client, InflectionTableOptions, LatinParseOptions};
use tracing_subscriber::EnvFilter;

fn blocking_examples() -> Result<(), latindictionary::Error> {
    let client = blocking::Client::from_env()?;

    let canis = client.latin_to_english("canis")?;
    println!("  Latin->English: {}", canis.raw_body);

    let dog = client.english_to_latin("dog")?;
    println!("  English->Latin: {}", dog.raw_body);

    let amor = client.auto_detect("amor")?;
    println!("  Auto-detect ({:?}): {:?}", amor.language(), amor.data());

    let parsed = client.latin_parse(
        "Gallia est omnis divisa in partes tres",
        &LatinParseOptions::new(),
    )?;
    println!("  Parse result: {}", parsed.raw_body);

    let amo = client.inflection_table("amo", &InflectionTableOptions::new())?;
    println!("  Inflection table: {}", amo.raw_body);

    client.close();
    Ok(())
}

async fn async_examples() -> Result<(), latindictionary::Error> {
    let client = Client::from_env()?;

    let (canis, amor) = tokio::join!(
        client.latin_to_english("canis"),
        client.auto_detect("amor"),
    );
    println!("  Latin->English: {:?}", canis?.to_value());
    println!("  Auto-detect: {:?}", amor?.language());

    let parsed = client
        .latin_parse(
            "Gallia est omnis divisa in partes tres",
            &LatinParseOptions::new().max_alternates(1),
        )
        .await?;
    println!(
        "  Parse result: {} token(s) in {:?}",
        parsed.tokens().map(Vec::len).unwrap_or(0),
        parsed.latency
    );

    client.close();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("latindictionary=info")),
        )
        .init();

    println!("=== Blocking Examples ===");
    blocking_examples()?;

    println!("\n=== Async Examples ===");
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_examples())?;

    Ok(())
}
