// Metric catalog - the four sensor channels and their display parameters
use crate::domain::render::SurfaceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Temperature,
    Humidity,
    Voltage,
    Rpm,
}

pub const ALL_METRICS: [Metric; 4] = [
    Metric::Temperature,
    Metric::Humidity,
    Metric::Voltage,
    Metric::Rpm,
];

/// Gauge dial parameters for one metric (axis range, delta reference,
/// gray step bands and the red threshold line).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeSpec {
    pub axis_max: f64,
    pub delta_reference: f64,
    pub steps: [(f64, f64); 2],
    pub threshold: f64,
}

impl Metric {
    /// Wire field name, also the id of the plain-text display box.
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Temperature => "temperature",
            Metric::Humidity => "humidity",
            Metric::Voltage => "voltage",
            Metric::Rpm => "rpm",
        }
    }

    /// Unit suffix appended to the formatted display-box value.
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Temperature => "C",
            Metric::Humidity => "%",
            Metric::Voltage => "hPa",
            Metric::Rpm => "m",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Metric::Temperature => 0,
            Metric::Humidity => 1,
            Metric::Voltage => 2,
            Metric::Rpm => 3,
        }
    }

    pub fn history_surface(&self) -> SurfaceId {
        match self {
            Metric::Temperature => SurfaceId("temperature-history"),
            Metric::Humidity => SurfaceId("humidity-history"),
            Metric::Voltage => SurfaceId("voltage-history"),
            Metric::Rpm => SurfaceId("rpm-history"),
        }
    }

    pub fn gauge_surface(&self) -> SurfaceId {
        match self {
            Metric::Temperature => SurfaceId("temperature-gauge"),
            Metric::Humidity => SurfaceId("humidity-gauge"),
            Metric::Voltage => SurfaceId("voltage-gauge"),
            Metric::Rpm => SurfaceId("rpm-gauge"),
        }
    }

    pub fn gauge_spec(&self) -> GaugeSpec {
        match self {
            Metric::Temperature => GaugeSpec {
                axis_max: 50.0,
                delta_reference: 30.0,
                steps: [(0.0, 20.0), (20.0, 30.0)],
                threshold: 30.0,
            },
            Metric::Humidity => GaugeSpec {
                axis_max: 100.0,
                delta_reference: 50.0,
                steps: [(0.0, 20.0), (20.0, 30.0)],
                threshold: 30.0,
            },
            Metric::Voltage => GaugeSpec {
                axis_max: 1100.0,
                delta_reference: 750.0,
                steps: [(0.0, 300.0), (300.0, 700.0)],
                threshold: 30.0,
            },
            Metric::Rpm => GaugeSpec {
                axis_max: 150.0,
                delta_reference: 60.0,
                steps: [(0.0, 50.0), (50.0, 100.0)],
                threshold: 30.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_ids_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for metric in ALL_METRICS {
            assert!(seen.insert(metric.history_surface()));
            assert!(seen.insert(metric.gauge_surface()));
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn test_units() {
        assert_eq!(Metric::Temperature.unit(), "C");
        assert_eq!(Metric::Humidity.unit(), "%");
        assert_eq!(Metric::Voltage.unit(), "hPa");
        assert_eq!(Metric::Rpm.unit(), "m");
    }
}
