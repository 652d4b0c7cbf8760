//! Sample Request Generator
//!
//! Writes random, valid prediction requests as JSON lines, ready to be piped
//! into the predictor.

use rand::seq::SliceRandom;
use rand::Rng;
use std::io::{self, Write};
use telco_predictor::types::input::{
    Category, Contract, Gender, MultipleLines, PaymentMethod, Partner, StreamingTv, MAX_TENURE,
};
use telco_predictor::RawInput;
use tracing::info;

/// Request generator for testing
struct RequestGenerator {
    rng: rand::rngs::ThreadRng,
}

impl RequestGenerator {
    fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }

    fn generate(&mut self) -> anyhow::Result<RawInput> {
        let input = RawInput::new(
            self.pick::<Gender>(),
            self.pick::<Contract>(),
            self.rng.gen_range(0..=MAX_TENURE),
            self.pick::<Partner>(),
            self.pick::<PaymentMethod>(),
            self.pick::<MultipleLines>(),
            self.pick::<StreamingTv>(),
        )?;
        Ok(input)
    }

    fn pick<C: Category>(&mut self) -> C {
        *C::ALL
            .choose(&mut self.rng)
            .expect("category domains are never empty")
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sample_requests=info".parse()?),
        )
        .with_writer(io::stderr)
        .init();

    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let count: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(10);

    info!(count = count, "Generating sample requests");

    let mut generator = RequestGenerator::new();
    let mut stdout = io::stdout().lock();

    for _ in 0..count {
        let request = generator.generate()?;
        writeln!(stdout, "{}", serde_json::to_string(&request)?)?;
    }

    info!("Completed! Wrote {} requests", count);

    Ok(())
}
