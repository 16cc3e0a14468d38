use anyhow::{bail, Result};

use cirrus_app::WeatherController;
use cirrus_core::fetch_state::FetchState;
use cirrus_core::Config;
use cirrus_store::{CityLists, JsonFileStore};
use cirrus_weather::location::FixedLocation;
use cirrus_weather::units::{self, TemperatureUnit};
use cirrus_weather::{Coordinate, WeatherClient, WeatherCondition, WeatherSnapshot};

enum Action {
    Search(String),
    Locate(Coordinate),
    ToggleFavorite(String),
    Startup,
}

#[tokio::main]
async fn main() -> Result<()> {
    cirrus_core::init()?;

    let config = Config::load()?;
    let store = JsonFileStore::open(&config.config_dir)?;
    let lists = CityLists::new(store);

    let (action, unit_override) = parse_args(std::env::args().skip(1).collect())?;

    if let Some(use_fahrenheit) = unit_override {
        lists.set_use_fahrenheit(use_fahrenheit)?;
    }
    let use_fahrenheit = lists.use_fahrenheit_or(config.weather.use_fahrenheit)?;
    let unit = TemperatureUnit::from_fahrenheit_flag(use_fahrenheit);

    let client = WeatherClient::from_overrides(
        config.weather.geocoding_url.as_deref(),
        config.weather.forecast_url.as_deref(),
    )?;
    let mut controller = WeatherController::new(client, lists);

    match action {
        Action::Search(city) => {
            controller.search(&city).await;
        }
        Action::Locate(coordinate) => {
            controller.locate(&FixedLocation(coordinate)).await;
        }
        Action::ToggleFavorite(city) => {
            let added = controller.lists().toggle_favorite(&city)?;
            if added {
                println!("Added '{}' to favorites", city);
            } else {
                println!("Removed '{}' from favorites", city);
            }
            println!("Favorites: {}", controller.lists().favorites()?.join(", "));
            return Ok(());
        }
        Action::Startup => {
            // App start re-fetches the most recent city, if any.
            let recent = controller.lists().recent()?;
            match recent.first() {
                Some(city) => {
                    let city = city.clone();
                    controller.search(&city).await;
                }
                None => {
                    print_usage();
                    return Ok(());
                }
            }
        }
    }

    match controller.state() {
        FetchState::Loaded(snapshot) => render(snapshot, unit),
        FetchState::Failed(message) => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
        FetchState::Idle | FetchState::Loading => {}
    }

    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<(Action, Option<bool>)> {
    let mut unit_override = None;
    let mut words: Vec<String> = Vec::new();
    let mut iter = args.into_iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--fahrenheit" => unit_override = Some(true),
            "--celsius" => unit_override = Some(false),
            "--coords" => {
                let (Some(lat), Some(lon)) = (iter.next(), iter.next()) else {
                    bail!("--coords requires LAT and LON");
                };
                let coordinate = Coordinate::new(lat.parse()?, lon.parse()?);
                return Ok((Action::Locate(coordinate), unit_override));
            }
            "--favorite" => {
                let rest: Vec<String> = iter.collect();
                if rest.is_empty() {
                    bail!("--favorite requires a city name");
                }
                return Ok((Action::ToggleFavorite(rest.join(" ")), unit_override));
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => words.push(arg),
        }
    }

    if words.is_empty() {
        Ok((Action::Startup, unit_override))
    } else {
        Ok((Action::Search(words.join(" ")), unit_override))
    }
}

fn render(snapshot: &WeatherSnapshot, unit: TemperatureUnit) {
    let current = &snapshot.current;
    let condition = WeatherCondition::from_wmo_code(current.weather_code);

    println!("{}", current.location_name);
    println!(
        "  {} {} — wind {:.1} km/h",
        units::format_temperature(current.temperature_c, unit),
        condition.description(),
        current.wind_speed_kmh
    );
    if let Some(humidity) = current.humidity_percent {
        println!("  Humidity {}%", humidity);
    }
    if let (Some(sunrise), Some(sunset)) = (current.sunrise, current.sunset) {
        println!(
            "  Sunrise {}  Sunset {}",
            sunrise.format("%H:%M"),
            sunset.format("%H:%M")
        );
    }

    if !snapshot.daily.is_empty() {
        println!("\nDaily:");
        for day in &snapshot.daily {
            let condition = WeatherCondition::from_wmo_code(day.weather_code);
            println!(
                "  {}  {} / {}  {}",
                day.date,
                units::format_temperature(day.min_temp_c, unit),
                units::format_temperature(day.max_temp_c, unit),
                condition.description()
            );
        }
    }

    if !snapshot.hourly.is_empty() {
        println!("\nNext hours:");
        // Window selection is a presentation choice; the model keeps the
        // full series.
        for hour in snapshot.hourly.iter().take(12) {
            let condition = WeatherCondition::from_wmo_code(hour.weather_code);
            println!(
                "  {}  {}  {}",
                hour.time.format("%H:%M"),
                units::format_temperature(hour.temperature_c, unit),
                condition.description()
            );
        }
    }
}

fn print_usage() {
    println!("Cirrus - weather lookup");
    println!();
    println!("Usage:");
    println!("  cirrus <city name>          look up weather for a city");
    println!("  cirrus --coords LAT LON     look up weather for coordinates");
    println!("  cirrus --favorite <city>    toggle a favorite city");
    println!("  cirrus --fahrenheit         switch display to Fahrenheit");
    println!("  cirrus --celsius            switch display to Celsius");
}
