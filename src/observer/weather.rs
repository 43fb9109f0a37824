use tokio::sync::watch;

use super::{ChangeNotifier, Observer, ObserverSlot, PeriodicTicker, Subject, SubjectLink};
use crate::config::ObserverConfig;
use crate::error::{ObserverError, PatternError};

/// The weather station is a notifier over a temperature reading.
pub type WeatherStation = ChangeNotifier<i64>;

/// Observer that pulls the temperature from its station on every update.
pub struct WeatherApp {
    name: String,
    readings: Vec<i64>,
    echo: bool,
    progress: Option<watch::Sender<usize>>,
}

impl WeatherApp {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            readings: Vec::new(),
            echo: true,
            progress: None,
        }
    }

    /// Same as `new`, but does not print to stdout.
    pub fn silent(name: impl Into<String>) -> Self {
        Self {
            echo: false,
            ..Self::new(name)
        }
    }

    /// Publish the number of readings seen so far after every update.
    pub fn report_to(mut self, progress: watch::Sender<usize>) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn readings(&self) -> &[i64] {
        &self.readings
    }

    pub fn render(temperature: i64) -> String {
        format!("Temperature Updated : {}", temperature)
    }
}

impl Observer<i64> for WeatherApp {
    fn update(&mut self, station: &SubjectLink<i64>) -> Result<(), ObserverError> {
        let temperature = station.state()?;
        self.readings.push(temperature);
        if self.echo {
            println!("{}", Self::render(temperature));
        }
        if let Some(progress) = &self.progress {
            progress.send_replace(self.readings.len());
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Station warms up by one degree per tick until `app` has seen
/// `config.ticks` readings, then the ticker is stopped.
///
/// Must be called from within a tokio runtime.
pub async fn run_weather_station(
    config: &ObserverConfig,
    app: WeatherApp,
) -> Result<Vec<i64>, PatternError> {
    let station = WeatherStation::with_policy(config.initial_temperature, config.failure_policy);
    let (progress_tx, mut progress_rx) = watch::channel(0);
    let app = ObserverSlot::new(app.report_to(progress_tx));
    station.register_observer(app.clone());

    let ticker = PeriodicTicker::start(&station, config.tick_interval(), |t| t + 1);
    let wanted = config.ticks as usize;
    progress_rx
        .wait_for(|seen| *seen >= wanted)
        .await
        .map_err(|_| ObserverError::failed("weather app dropped before enough readings"))?;
    ticker.stop().await?;

    let readings = app.lock().readings().to_vec();
    Ok(readings)
}
