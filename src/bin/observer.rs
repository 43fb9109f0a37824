use design_patterns::config::DemoConfig;
use design_patterns::console;
use design_patterns::error::PatternError;
use design_patterns::observer::{run_weather_station, WeatherApp};
use std::process::ExitCode;

async fn run(config: DemoConfig) -> Result<Vec<String>, PatternError> {
    let observer = &config.observer;
    println!(
        "Station starts at {}, warming every {} ms for {} ticks",
        observer.initial_temperature, observer.tick_interval_ms, observer.ticks
    );

    // WeatherApp prints each update as it arrives.
    let readings = run_weather_station(observer, WeatherApp::new("weather-app")).await?;
    Ok(vec![format!("Readings received: {:?}", readings)])
}

#[tokio::main]
async fn main() -> ExitCode {
    let result = match console::bootstrap("Observer Pattern") {
        Ok(config) => run(config).await,
        Err(err) => Err(err),
    };
    console::finish(result)
}
