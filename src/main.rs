use mailroom::config::PipelineConfig;
use mailroom::pipeline::observer::AUSTIN_POWERS;
use mailroom::pipeline::{Content, Item};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = PipelineConfig::from_env()?;

    eprintln!("📮 Mailroom v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Watchlist: {}", config.watchlist.join(", "));
    eprintln!("   Theft threshold: {}", config.theft_threshold);

    let mailroom = config.build();

    let batch = vec![
        Item::message(AUSTIN_POWERS, "Dr. Evil", "Yeah, baby!")?,
        Item::message("Vanessa", "Basil Exposition", "Mission report attached")?,
        Item::package("Dr. Evil", "Number Two", Content::new("gold", 1_000_000))?,
        Item::package("Fat Bastard", "Mini-Me", Content::new("weapons", 50))?,
    ];

    for item in mailroom.pipeline.process_batch(batch) {
        println!("{}", serde_json::to_string(&item)?);
    }

    eprintln!(
        "   Delivered: {}, stolen: {} ({} packages)",
        mailroom.delivery.delivered(),
        mailroom.interceptor.stolen_value_total(),
        mailroom.interceptor.substitutions(),
    );

    Ok(())
}
