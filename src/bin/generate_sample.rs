//! Writes demo CSV files for the dashboard.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "generate_sample", about = "Write demo CSV files for rusty-dash")]
struct Args {
    /// Output directory
    #[arg(default_value = "data")]
    dir: PathBuf,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Monthly revenue with a trend, a seasonal swing and noise.
fn write_sales(dir: &Path, rng: &mut SimpleRng) -> Result<usize> {
    let path = dir.join("sales.csv");
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["month", "revenue", "units", "region"])?;

    let regions = ["north", "south", "east", "west"];
    let mut rows = 0;
    for month in 1..=36u32 {
        let season = (month as f64 / 12.0 * 2.0 * std::f64::consts::PI).sin();
        let revenue = 1000.0 + 25.0 * month as f64 + 150.0 * season + rng.gauss(0.0, 40.0);
        let units = (revenue / 12.5).round() as i64;
        let region = regions[(month as usize) % regions.len()];
        writer.write_record([
            month.to_string(),
            format!("{revenue:.2}"),
            units.to_string(),
            region.to_string(),
        ])?;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}

/// Sensor readings with occasional gaps and spikes.
fn write_sensors(dir: &Path, rng: &mut SimpleRng) -> Result<usize> {
    let path = dir.join("sensors.csv");
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["minute", "temperature", "humidity", "status"])?;

    let mut rows = 0;
    for minute in 0..240u32 {
        let mut temperature = 21.0 + rng.gauss(0.0, 0.6);
        if rng.next_f64() < 0.02 {
            temperature += 8.0;
        }
        let humidity = if rng.next_f64() < 0.05 {
            String::new()
        } else {
            format!("{:.1}", 45.0 + rng.gauss(0.0, 3.0))
        };
        let status = if temperature > 25.0 { "alert" } else { "ok" };
        writer.write_record([
            minute.to_string(),
            format!("{temperature:.2}"),
            humidity,
            status.to_string(),
        ])?;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}

fn main() -> Result<()> {
    let dir = Args::parse().dir;
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let sales = write_sales(&dir, &mut rng)?;
    let sensors = write_sensors(&dir, &mut rng)?;

    println!(
        "Wrote sales.csv ({sales} rows) and sensors.csv ({sensors} rows) to {}",
        dir.display()
    );
    Ok(())
}
