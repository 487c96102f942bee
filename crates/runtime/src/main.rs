#![deny(clippy::all, clippy::pedantic)]

mod app;

use std::time::Duration;

use anyhow::Result;

fn main() -> Result<()> {
    let seed = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<u64>())
        .transpose()?
        .unwrap_or(0);
    app::run(seed, Duration::from_secs(3))
}
