use std::fmt;

use crate::error::WeatherError;

/// Characters accepted in a city name besides letters and whitespace.
const EXTRA_CHARS: &str = "-'.,";

/// A validated, trimmed city name.
///
/// Values only exist via [`CityQuery::parse`], so holding one means the
/// input already passed the syntactic checks and no further validation is
/// needed before building a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery(String);

impl CityQuery {
    /// Validate user input. `None` models an absent field.
    pub fn parse(input: Option<&str>) -> Result<Self, WeatherError> {
        let trimmed = input.unwrap_or("").trim();
        if trimmed.is_empty() {
            return Err(WeatherError::EmptyCity);
        }

        let accepted =
            |c: char| c.is_alphabetic() || c.is_whitespace() || EXTRA_CHARS.contains(c);
        if !trimmed.chars().all(accepted) {
            return Err(WeatherError::InvalidCityName);
        }

        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
