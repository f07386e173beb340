use usweather_core::{AppError, NetworkError, WeatherError};
use usweather_forecast::ResolveError;

pub fn app_error(e: ResolveError) -> AppError {
    match e {
        ResolveError::InvalidInput { len, min } => AppError::Weather(WeatherError::QueryTooShort(
            format!("{} of {} characters", len, min),
        )),
        ResolveError::GeocodeFailure(s) | ResolveError::GridpointLookupFailure(s) => {
            AppError::Weather(WeatherError::LocationNotFound(s))
        }
        ResolveError::NoForecastEndpoint => AppError::Weather(WeatherError::LocationNotFound(
            "no forecast endpoint".to_string(),
        )),
        ResolveError::ForecastFetchFailure(s) => AppError::Weather(WeatherError::ApiError(s)),
        ResolveError::Timeout => AppError::Network(NetworkError::Timeout),
        ResolveError::Network(s) => AppError::Network(NetworkError::ConnectionFailed(s)),
    }
}
