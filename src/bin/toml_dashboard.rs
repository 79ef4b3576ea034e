use clap::Parser;
use strandings_dashboard::core::{ConfigProvider, Pipeline};
use strandings_dashboard::utils::{logger, validation::Validate};
use strandings_dashboard::{
    DashboardEngine, DashboardReport, HttpStorage, LocalStorage, SourceStorage, StrandingPipeline,
    TomlConfig,
};

#[derive(Parser)]
#[command(name = "toml-dashboard")]
#[command(about = "Stranding dashboard builder driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "dashboard-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Load and aggregate, print the summary, write nothing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    logger::init_logger(args.verbose || config.verbose(), config.json_logs());
    tracing::info!("🚀 Starting TOML-based dashboard builder");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config);

    let source = if config.is_http_source() {
        SourceStorage::Http(HttpStorage::new())
    } else {
        SourceStorage::Local(LocalStorage::new(".".to_string()))
    };
    let sink = LocalStorage::new(config.load.output_path.clone());
    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let pipeline = StrandingPipeline::new(source, sink, config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        let records = pipeline.extract().await?;
        let report = pipeline.transform(records).await?;
        print_summary(&report);
        return Ok(());
    }

    let engine = DashboardEngine::new_with_monitoring(pipeline, monitor_enabled);
    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Dashboard report written to: {}", output_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Dashboard build failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}

fn display_config_summary(config: &TomlConfig) {
    let selection = config.selection();
    tracing::info!("📋 Dashboard: {}", config.dashboard.name);
    if let Some(description) = &config.dashboard.description {
        tracing::info!("   {}", description);
    }
    tracing::info!("   Source ({}): {}", config.source.r#type, config.source.location);
    if selection.species.is_empty() {
        tracing::info!("   Species: all");
    } else {
        tracing::info!("   Species: {}", selection.species.join(", "));
    }
    tracing::info!("   Year: {}", selection.year);
    tracing::info!(
        "   Output: {} [{}]{}",
        config.load.output_path,
        config.load.output_formats.join(", "),
        if config.compress_output() { " (zip)" } else { "" }
    );
}

fn print_summary(report: &DashboardReport) {
    let s = &report.summary;
    println!("Total strandings:    {}", s.total_strandings);
    match s.reference_year.and_then(|year| Some((year, year.checked_sub(1)?))) {
        Some((year, previous)) => {
            println!("Trend {} vs {}:   {:+.1}%", year, previous, s.yearly_trend)
        }
        None => println!("Trend:               n/a"),
    }
    println!("Species diversity:   {}", s.species_diversity);
    println!("Most common species: {}", s.most_common_species);
    println!("Locations:           {}", s.location_count);
    println!("Mappable records:    {}", report.map.markers.len());
    println!("Top species:");
    for entry in report.top_species.iter() {
        println!("  {:>5}  {}", entry.count, entry.label);
    }
}
