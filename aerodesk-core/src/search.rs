use serde::Deserialize;

use crate::fare_class::AirlineClass;
use crate::flight::Flight;
use crate::CoreResult;

/// Raw search parameters as a caller supplies them. Every field is optional
/// and an empty string counts as absent.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FlightSearchRequest {
    pub source: Option<String>,
    pub dest: Option<String>,
    pub airline: Option<String>,
    #[serde(rename = "className")]
    pub class_name: Option<String>,
}

impl FlightSearchRequest {
    /// True when no parameter was supplied at all, not even an empty one.
    pub fn is_unfiltered(&self) -> bool {
        self.source.is_none()
            && self.dest.is_none()
            && self.airline.is_none()
            && self.class_name.is_none()
    }
}

/// Conjunctive filter over flights. `None` is a wildcard; `Some` must
/// match exactly (case-sensitive).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FlightSearchCriteria {
    pub source: Option<String>,
    pub destination: Option<String>,
    pub airline_name: Option<String>,
    pub class_name: Option<AirlineClass>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl FlightSearchCriteria {
    /// Normalizes empty strings to wildcards.
    pub fn new(
        source: Option<String>,
        destination: Option<String>,
        airline_name: Option<String>,
        class_name: Option<AirlineClass>,
    ) -> Self {
        Self {
            source: non_empty(source),
            destination: non_empty(destination),
            airline_name: non_empty(airline_name),
            class_name,
        }
    }

    /// Fails with `InvalidArgument` when a non-empty fare class is unknown.
    pub fn from_request(req: FlightSearchRequest) -> CoreResult<Self> {
        let class_name = AirlineClass::parse_filter(req.class_name.as_deref())?;
        Ok(Self::new(req.source, req.dest, req.airline, class_name))
    }

    pub fn is_wildcard(&self) -> bool {
        self.source.is_none()
            && self.destination.is_none()
            && self.airline_name.is_none()
            && self.class_name.is_none()
    }

    pub fn matches(&self, flight: &Flight) -> bool {
        fn field(expected: &Option<String>, actual: &str) -> bool {
            match expected.as_deref() {
                None | Some("") => true,
                Some(value) => value == actual,
            }
        }

        field(&self.source, &flight.source)
            && field(&self.destination, &flight.destination)
            && field(&self.airline_name, &flight.airline.name)
            && self.class_name.map_or(true, |c| c == flight.class_name)
    }
}
