use clap::Parser;
use fuel_compare::domain::ports::ReverseGeocoder;
use fuel_compare::utils::logger;
use fuel_compare::utils::validation::{parse_price, Validate};
use fuel_compare::{
    compute_ratio_percent, pick_location, recommendation_text, CliConfig, Command, FileStore,
    FuelError, HttpReverseGeocoder, MapSelection, NoopGeocoder, Result, SelectedLocation,
    StationBook, StationDraft, StationView, Toggle, TomlConfig,
};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config).await {
        tracing::error!("❌ Command failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(if e.is_user_input() { 2 } else { 1 });
    }

    Ok(())
}

async fn run(config: CliConfig) -> Result<()> {
    config.validate()?;

    let file_config = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            TomlConfig::from_file(path)?
        }
        None => TomlConfig::default(),
    };
    file_config.validate()?;

    let data_dir = config
        .data_dir
        .clone()
        .unwrap_or_else(|| file_config.data_dir().to_string());
    let store = FileStore::open(&data_dir)?;
    tracing::debug!("Using preferences file {}", store.path().display());

    let mut book = StationBook::with_thresholds(store, file_config.thresholds());

    match config.command {
        Command::Add {
            alcohol,
            gas,
            name,
            lat,
            lon,
            geocode,
        } => {
            let point = lat.zip(lon);
            let selection = if geocode {
                let geocoder = build_geocoder(&file_config)?;
                pick_location(geocoder.as_ref(), point).await
            } else {
                match point {
                    Some((latitude, longitude)) => {
                        MapSelection::Selected(SelectedLocation::new(latitude, longitude))
                    }
                    None => MapSelection::Cancelled,
                }
            };
            book.apply_selection(selection);

            let draft = StationDraft {
                name: name.unwrap_or_default(),
                alcohol_text: alcohol,
                gas_text: gas,
            };
            let notice = book.save(draft)?;
            println!("✅ {}", notice.message());
            if let Some(view) = book.views().first() {
                print_view(view);
            }
        }
        Command::List => {
            println!("Current threshold: {}%", book.threshold_percent() as i64);
            let views = book.views();
            if views.is_empty() {
                println!("No saved comparisons yet.");
            }
            for view in &views {
                print_view(view);
            }
        }
        Command::Check { alcohol, gas } => {
            let alcohol_price = parse_price("ethanol", &alcohol)?;
            let gas_price = parse_price("gasoline", &gas)?;
            let ratio = compute_ratio_percent(alcohol_price, gas_price);
            let threshold = book.threshold_percent();
            println!(
                "Ratio {} at threshold {}%: {}",
                format_ratio(ratio),
                threshold as i64,
                recommendation_text(ratio, threshold).label().to_uppercase()
            );
        }
        Command::Edit {
            id,
            alcohol,
            gas,
            name,
        } => {
            // edit 會先刪掉原紀錄，所以新價格要在那之前驗證
            for (field, text) in [("ethanol", &alcohol), ("gasoline", &gas)] {
                if let Some(text) = text {
                    parse_price(field, text)?;
                }
            }

            let mut draft = book.edit(&id)?;
            if let Some(alcohol) = alcohol {
                draft.alcohol_text = alcohol;
            }
            if let Some(gas) = gas {
                draft.gas_text = gas;
            }
            if let Some(name) = name {
                draft.name = name;
            }
            book.save(draft)?;
            if let Some(view) = book.views().first() {
                println!("✅ Updated (new id {})", view.id);
                print_view(view);
            }
        }
        Command::Delete { id } => match book.delete(&id)? {
            Some(notice) => println!("🗑️ {}", notice.message()),
            None => {
                return Err(FuelError::StationNotFound { id });
            }
        },
        Command::Strict { state } => {
            book.set_strict_threshold(state == Toggle::On)?;
            println!(
                "Threshold for new comparisons: {}%",
                book.threshold_percent() as i64
            );
        }
    }

    Ok(())
}

fn build_geocoder(config: &TomlConfig) -> Result<Box<dyn ReverseGeocoder>> {
    match config.geocoder_endpoint() {
        Some(endpoint) => Ok(Box::new(HttpReverseGeocoder::new(
            endpoint,
            config.geocoder_timeout(),
            config.geocoder_user_agent(),
        )?)),
        None => {
            tracing::warn!("⚠️ No geocoder endpoint configured, saving coordinates only");
            Ok(Box::new(NoopGeocoder))
        }
    }
}

fn format_ratio(ratio: f64) -> String {
    if ratio.is_finite() {
        format!("{:.2}%", ratio)
    } else {
        "∞".to_string()
    }
}

fn print_view(view: &StationView) {
    println!("{}  [{}]", view.name, view.id);
    println!(
        "  ethanol {:.2} | gasoline {:.2} | ratio {} (x{:.2})",
        view.alcohol_price,
        view.gas_price,
        format_ratio(view.ratio_percent),
        view.multiplier
    );
    println!(
        "  threshold used {}% → {}",
        view.threshold_used,
        view.recommendation.label().to_uppercase()
    );
    if let Some(date) = &view.date {
        println!("  date {}", date);
    }
    if let Some(address) = &view.address {
        println!("  {}", address);
    }
}
