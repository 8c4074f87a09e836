use thiserror::Error;

/// Everything that can go wrong during a lookup.
///
/// Each variant is terminal for the current lookup only; callers report the
/// failure and stay alive. `Display` carries diagnostic detail for logs,
/// while [`WeatherError::user_message`] is the string meant for end users.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Empty or whitespace-only city input.
    #[error("Please enter a city name.")]
    EmptyCity,

    /// City input with characters outside the accepted set.
    #[error("City name contains invalid characters.")]
    InvalidCityName,

    /// No API key configured; raised before any request is attempted.
    #[error("API key is missing. Run `skycast configure` to set one.")]
    MissingApiKey,

    /// The API answered 404 for the requested city.
    #[error("City '{0}' not found. Please check the name.")]
    CityNotFound(String),

    /// The API answered 401.
    #[error("Invalid API key. Run `skycast configure` to replace it.")]
    InvalidApiKey,

    /// Any other non-200 status.
    #[error("API error (status {0}).")]
    Upstream(u16),

    /// Transport-level failure: timeout, refused connection, DNS.
    #[error("Connection error: {0}")]
    Connectivity(#[source] reqwest::Error),

    /// A 200 response missing an expected field or otherwise unreadable.
    #[error("Unexpected response shape: {0}")]
    MalformedResponse(String),
}

impl WeatherError {
    pub fn malformed<S: Into<String>>(detail: S) -> Self {
        Self::MalformedResponse(detail.into())
    }

    /// The message shown to end users.
    ///
    /// Connectivity and malformed-response failures are collapsed into
    /// generic lines; in particular the missing-field detail never reaches
    /// the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::Connectivity(_) => {
                "Connection error. Please check your internet connection.".to_string()
            }
            WeatherError::MalformedResponse(_) => {
                "Error parsing weather data. Unexpected response format.".to_string()
            }
            other => other.to_string(),
        }
    }
}
