use serde::{Deserialize, Serialize};

/// Weather bucket an attraction is suited for
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Condition {
    Sunny,
    Cloudy,
    Rainy,
}

impl Condition {
    pub const ALL: [Condition; 3] = [Condition::Sunny, Condition::Cloudy, Condition::Rainy];

    pub(crate) fn index(self) -> usize {
        match self {
            Condition::Sunny => 0,
            Condition::Cloudy => 1,
            Condition::Rainy => 2,
        }
    }

    /// The preferred bucket first, then the remaining buckets in fixed order.
    pub fn fallback_order(self) -> [Condition; 3] {
        let mut order = [self; 3];
        let mut next = 1;
        for condition in Condition::ALL {
            if condition != self {
                order[next] = condition;
                next += 1;
            }
        }
        order
    }
}

/// Map a WMO weather code to a condition bucket.
///
/// 0 and 1 are clear skies, 2 and 3 are cloud cover, everything else
/// (fog, drizzle, rain, snow, storms, unknown codes) is treated as rainy.
pub fn classify(code: i32) -> Condition {
    match code {
        0 | 1 => Condition::Sunny,
        2 | 3 => Condition::Cloudy,
        _ => Condition::Rainy,
    }
}

pub const DEFAULT_WEATHER_CODE: i32 = 2;
pub const DEFAULT_TEMP_MAX: i32 = 20;
pub const DEFAULT_TEMP_MIN: i32 = 14;

/// Raw forecast values for one trip day, as handed over by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherContext {
    #[serde(default)]
    pub weather_code: Option<i32>,
    #[serde(default)]
    pub temp_max: Option<f64>,
    #[serde(default)]
    pub temp_min: Option<f64>,
    #[serde(default)]
    pub precip_mm: Option<f64>,
    #[serde(default)]
    pub precip_prob: Option<f64>,
    #[serde(default)]
    pub wind_max: Option<f64>,
    #[serde(default)]
    pub sunrise: Option<String>,
    #[serde(default)]
    pub sunset: Option<String>,
}

impl WeatherContext {
    /// Resolve raw values into the weather stored on a day.
    ///
    /// A missing weather code means no forecast for the day at all: the
    /// remaining fields are ignored and the cloudy defaults are used.
    pub fn resolve(&self) -> DayWeather {
        let Some(code) = self.weather_code else {
            return DayWeather::default();
        };

        DayWeather {
            condition: classify(code),
            weather_code: code,
            temp_max: round_or(self.temp_max, DEFAULT_TEMP_MAX),
            temp_min: round_or(self.temp_min, DEFAULT_TEMP_MIN),
            precip_mm: finite(self.precip_mm)
                .map(|p| (p * 10.0).round() / 10.0)
                .unwrap_or(0.0),
            precip_prob: finite(self.precip_prob),
            wind_max: finite(self.wind_max),
            sunrise: non_blank(self.sunrise.as_deref()),
            sunset: non_blank(self.sunset.as_deref()),
        }
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn round_or(value: Option<f64>, default: i32) -> i32 {
    finite(value).map(|v| v.round() as i32).unwrap_or(default)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Resolved weather for one day of the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayWeather {
    pub condition: Condition,
    pub weather_code: i32,
    pub temp_max: i32,
    pub temp_min: i32,
    pub precip_mm: f64,
    pub precip_prob: Option<f64>,
    pub wind_max: Option<f64>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

impl Default for DayWeather {
    fn default() -> Self {
        DayWeather {
            condition: Condition::Cloudy,
            weather_code: DEFAULT_WEATHER_CODE,
            temp_max: DEFAULT_TEMP_MAX,
            temp_min: DEFAULT_TEMP_MIN,
            precip_mm: 0.0,
            precip_prob: None,
            wind_max: None,
            sunrise: None,
            sunset: None,
        }
    }
}

/// Open-Meteo forecast response; only the `daily` block is read
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub daily: Option<DailyForecast>,
}

impl ForecastResponse {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn contexts(&self) -> Vec<WeatherContext> {
        self.daily
            .as_ref()
            .map(DailyForecast::contexts)
            .unwrap_or_default()
    }
}

/// Column-oriented daily forecast, one array per variable
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyForecast {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub weather_code: Vec<Option<i32>>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_probability_max: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_speed_10m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub sunrise: Vec<Option<String>>,
    #[serde(default)]
    pub sunset: Vec<Option<String>>,
}

impl DailyForecast {
    /// Transpose the columns into one context per forecast day.
    pub fn contexts(&self) -> Vec<WeatherContext> {
        (0..self.weather_code.len())
            .map(|i| WeatherContext {
                weather_code: column(&self.weather_code, i),
                temp_max: column(&self.temperature_2m_max, i),
                temp_min: column(&self.temperature_2m_min, i),
                precip_mm: column(&self.precipitation_sum, i),
                precip_prob: column(&self.precipitation_probability_max, i),
                wind_max: column(&self.wind_speed_10m_max, i),
                sunrise: column(&self.sunrise, i),
                sunset: column(&self.sunset, i),
            })
            .collect()
    }
}

fn column<T: Clone>(values: &[Option<T>], i: usize) -> Option<T> {
    values.get(i).cloned().flatten()
}
