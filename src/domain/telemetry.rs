// Inbound telemetry record - decoding and display formatting
use crate::domain::metric::Metric;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload is not valid UTF-8")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("payload is not a JSON object")]
    NotAnObject,
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{0}` is not numeric")]
    NonNumeric(&'static str),
}

/// One decoded sensor message. All four fields are required; the field
/// names are the wire contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryRecord {
    pub temperature: f64,
    pub humidity: f64,
    pub voltage: f64,
    pub rpm: f64,
}

impl TelemetryRecord {
    /// Decode a raw payload: UTF-8 text, then a JSON object with the four
    /// required numeric fields. Numeric strings coerce ("23.456" reads as
    /// 23.456, matching the feed's mixed encodings); anything else fails.
    /// Unknown extra fields are ignored.
    pub fn decode(raw: &[u8]) -> Result<Self, DecodeError> {
        let text = std::str::from_utf8(raw)?;
        let value: Value = serde_json::from_str(text)?;
        let object = value.as_object().ok_or(DecodeError::NotAnObject)?;

        Ok(Self {
            temperature: numeric_field(object, "temperature")?,
            humidity: numeric_field(object, "humidity")?,
            voltage: numeric_field(object, "voltage")?,
            rpm: numeric_field(object, "rpm")?,
        })
    }

    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
            Metric::Voltage => self.voltage,
            Metric::Rpm => self.rpm,
        }
    }

    /// Reading rounded to two decimal places (fixed-point rounding, not
    /// truncation). Gauges display this value directly.
    pub fn rounded(&self, metric: Metric) -> f64 {
        (self.value(metric) * 100.0).round() / 100.0
    }

    /// Display-box text: two-decimal value plus the unit suffix.
    pub fn formatted(&self, metric: Metric) -> String {
        format!("{:.2} {}", self.rounded(metric), metric.unit())
    }
}

fn numeric_field(
    object: &serde_json::Map<String, Value>,
    name: &'static str,
) -> Result<f64, DecodeError> {
    let value = object.get(name).ok_or(DecodeError::MissingField(name))?;
    let number = match value {
        Value::Number(n) => n.as_f64().ok_or(DecodeError::NonNumeric(name))?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| DecodeError::NonNumeric(name))?,
        _ => return Err(DecodeError::NonNumeric(name)),
    };
    if !number.is_finite() {
        return Err(DecodeError::NonNumeric(name));
    }
    Ok(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_numbers() {
        let raw = br#"{"temperature":23.5,"humidity":40,"voltage":480,"rpm":55}"#;
        let record = TelemetryRecord::decode(raw).unwrap();
        assert_eq!(record.temperature, 23.5);
        assert_eq!(record.humidity, 40.0);
        assert_eq!(record.voltage, 480.0);
        assert_eq!(record.rpm, 55.0);
    }

    #[test]
    fn test_decode_coerces_numeric_strings() {
        let raw = br#"{"temperature":"23.456","humidity":40,"voltage":480,"rpm":"55"}"#;
        let record = TelemetryRecord::decode(raw).unwrap();
        assert_eq!(record.formatted(Metric::Temperature), "23.46 C");
        assert_eq!(record.formatted(Metric::Rpm), "55.00 m");
    }

    #[test]
    fn test_decode_missing_field() {
        let raw = br#"{"temperature":23.5,"humidity":40,"voltage":480}"#;
        let err = TelemetryRecord::decode(raw).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField("rpm")));
    }

    #[test]
    fn test_decode_non_numeric_field() {
        let raw = br#"{"temperature":true,"humidity":40,"voltage":480,"rpm":55}"#;
        let err = TelemetryRecord::decode(raw).unwrap_err();
        assert!(matches!(err, DecodeError::NonNumeric("temperature")));

        let raw = br#"{"temperature":"warm","humidity":40,"voltage":480,"rpm":55}"#;
        let err = TelemetryRecord::decode(raw).unwrap_err();
        assert!(matches!(err, DecodeError::NonNumeric("temperature")));
    }

    #[test]
    fn test_decode_rejects_non_finite_values() {
        // "NaN" and "inf" parse as f64s; they must still be refused.
        let raw = br#"{"temperature":"NaN","humidity":40,"voltage":480,"rpm":55}"#;
        let err = TelemetryRecord::decode(raw).unwrap_err();
        assert!(matches!(err, DecodeError::NonNumeric("temperature")));

        let raw = br#"{"temperature":21,"humidity":"inf","voltage":480,"rpm":55}"#;
        let err = TelemetryRecord::decode(raw).unwrap_err();
        assert!(matches!(err, DecodeError::NonNumeric("humidity")));
    }

    #[test]
    fn test_decode_rejects_malformed_payloads() {
        assert!(matches!(
            TelemetryRecord::decode(&[0xff, 0xfe]),
            Err(DecodeError::InvalidUtf8(_))
        ));
        assert!(matches!(
            TelemetryRecord::decode(b"not json"),
            Err(DecodeError::InvalidJson(_))
        ));
        assert!(matches!(
            TelemetryRecord::decode(b"[1,2,3]"),
            Err(DecodeError::NotAnObject)
        ));
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let raw = br#"{"temperature":1,"humidity":2,"voltage":3,"rpm":4,"battery":99}"#;
        assert!(TelemetryRecord::decode(raw).is_ok());
    }

    #[test]
    fn test_rounding_is_fixed_point_not_truncation() {
        let record = TelemetryRecord {
            temperature: 23.456,
            humidity: 39.994,
            voltage: 0.005,
            rpm: 55.0,
        };
        assert_eq!(record.rounded(Metric::Temperature), 23.46);
        assert_eq!(record.rounded(Metric::Humidity), 39.99);
        assert_eq!(record.formatted(Metric::Voltage), "0.01 hPa");
    }
}
