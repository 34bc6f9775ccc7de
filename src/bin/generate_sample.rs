use anyhow::{Context, Result};

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

    /// Uniform in [lo, hi)
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Format a price the way the raw export does: `$1,234`.
fn format_price(value: f64) -> String {
    let dollars = value.round() as i64;
    if dollars >= 1000 {
        format!("${},{:03}", dollars / 1000, dollars % 1000)
    } else {
        format!("${dollars}")
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // Borough centroids and a rough jitter radius in degrees.
    let boroughs: [(&str, f64, f64, f64); 5] = [
        ("Manhattan", 40.7831, -73.9712, 0.04),
        ("Brooklyn", 40.6782, -73.9442, 0.05),
        ("Queens", 40.7282, -73.7949, 0.06),
        ("Bronx", 40.8448, -73.8648, 0.04),
        ("Staten Island", 40.5795, -74.1502, 0.05),
    ];
    let room_types: [(&str, f64); 3] = [
        ("Entire home/apt", 220.0),
        ("Private room", 90.0),
        ("Shared room", 55.0),
    ];
    let adjectives = ["Cozy", "Sunny", "Modern", "Charming", "Spacious", "Quiet"];
    let nouns = ["loft", "studio", "apartment", "room", "brownstone", "flat"];

    let output_path = "sample_listings.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record([
        "NAME",
        "neighbourhood group",
        "lat",
        "long",
        "room type",
        "price",
        "review rate number",
    ])?;

    let total = 2000;
    for i in 0..total {
        let &(borough, lat0, lon0, jitter) = rng.pick(&boroughs);
        let &(room_type, base_price) = rng.pick(&room_types);

        let name = format!("{} {} in {}", rng.pick(&adjectives), rng.pick(&nouns), borough);
        let lat = format!("{:.5}", lat0 + rng.uniform(-jitter, jitter));
        let lon = format!("{:.5}", lon0 + rng.uniform(-jitter, jitter));
        let price = format_price(base_price * rng.uniform(0.4, 8.0));
        let review = format!("{:.1}", rng.uniform(1.0, 5.0));

        // Sprinkle dirty rows so the cleaning path gets exercised.
        let (lat, lon) = if i % 55 == 17 {
            (String::new(), String::new())
        } else {
            (lat, lon)
        };
        let price = if i % 40 == 11 { "N/A".to_string() } else { price };

        writer.write_record([
            name.as_str(),
            borough,
            lat.as_str(),
            lon.as_str(),
            room_type,
            price.as_str(),
            review.as_str(),
        ])?;
    }

    writer.flush()?;
    println!("Wrote {total} listings to {output_path}");
    Ok(())
}
