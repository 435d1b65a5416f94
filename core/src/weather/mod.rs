pub mod analyzer;

pub use analyzer::{ForecastImpact, TemperatureTrend, WeatherAnalyzer, WeatherImpactSummary};
