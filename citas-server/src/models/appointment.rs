//! Appointment shapes
//!
//! One entity, three views:
//! - [`AppointmentCreate`]: what clients POST (no id)
//! - [`Appointment`]: the stored row, returned by every read and by create
//! - [`PublicAppointment`]: same fields as the input shape, for API consumers
//!   that want an id-less view

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use super::validation::{Validate, ValidationError};

/// Maximum length for patient names (matches the column width)
pub const MAX_PATIENT_LEN: usize = 100;

/// Reason stored when the client does not send one
pub const DEFAULT_REASON: &str = "Consulta";

/// Accepted naive timestamp layouts, tried in order after RFC 3339.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Create-appointment payload (input shape)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentCreate {
    pub patient: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date: NaiveDateTime,
    #[serde(default = "default_reason", deserialize_with = "deserialize_reason")]
    pub reason: String,
}

impl Validate for AppointmentCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.patient.chars().count() > MAX_PATIENT_LEN {
            return Err(ValidationError::TooLong {
                field: "patient",
                max: MAX_PATIENT_LEN,
            });
        }
        Ok(())
    }
}

/// Persisted appointment (stored shape)
///
/// Built from a row by column name; a missing column is a schema bug and
/// surfaces as a decode error, never as client input trouble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Appointment {
    pub id: i64,
    pub patient: String,
    pub date: NaiveDateTime,
    pub reason: String,
}

/// Appointment without its identifier (public shape)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicAppointment {
    pub patient: String,
    pub date: NaiveDateTime,
    pub reason: String,
}

impl From<Appointment> for PublicAppointment {
    fn from(a: Appointment) -> Self {
        Self {
            patient: a.patient,
            date: a.date,
            reason: a.reason,
        }
    }
}

impl From<AppointmentCreate> for PublicAppointment {
    fn from(c: AppointmentCreate) -> Self {
        Self {
            patient: c.patient,
            date: c.date,
            reason: c.reason,
        }
    }
}

/// Parse an ISO-8601 timestamp.
///
/// Timestamps carrying an offset keep their wall-clock time; the offset is
/// dropped because the column is timezone-naive.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

fn default_reason() -> String {
    DEFAULT_REASON.to_string()
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("date: '{}' is not an ISO-8601 timestamp", raw))
    })
}

// `"reason": null` is treated the same as an absent reason
fn deserialize_reason<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn reason_defaults_to_consulta() {
        let input: AppointmentCreate =
            serde_json::from_value(json!({"patient": "Ana", "date": "2025-03-14T09:30:00"}))
                .unwrap();
        assert_eq!(input.reason, "Consulta");
        assert_eq!(input.date, at(9, 30, 0));
    }

    #[test]
    fn null_reason_defaults_to_consulta() {
        let input: AppointmentCreate = serde_json::from_value(
            json!({"patient": "Ana", "date": "2025-03-14T09:30:00", "reason": null}),
        )
        .unwrap();
        assert_eq!(input.reason, DEFAULT_REASON);
    }

    #[test]
    fn explicit_reason_kept() {
        let input: AppointmentCreate = serde_json::from_value(
            json!({"patient": "Ana", "date": "2025-03-14T09:30:00", "reason": "Revisión"}),
        )
        .unwrap();
        assert_eq!(input.reason, "Revisión");
    }

    #[test]
    fn missing_patient_rejected() {
        let err = serde_json::from_value::<AppointmentCreate>(json!({"date": "2025-03-14T09:30:00"}))
            .unwrap_err();
        assert!(err.to_string().contains("patient"));
    }

    #[test]
    fn missing_date_rejected() {
        assert!(serde_json::from_value::<AppointmentCreate>(json!({"patient": "Ana"})).is_err());
    }

    #[test]
    fn wrong_types_rejected() {
        assert!(serde_json::from_value::<AppointmentCreate>(
            json!({"patient": 42, "date": "2025-03-14T09:30:00"})
        )
        .is_err());
        assert!(
            serde_json::from_value::<AppointmentCreate>(json!({"patient": "Ana", "date": 42}))
                .is_err()
        );
        assert!(serde_json::from_value::<AppointmentCreate>(
            json!({"patient": "Ana", "date": "next tuesday"})
        )
        .is_err());
    }

    #[test]
    fn timestamp_layouts() {
        assert_eq!(parse_timestamp("2025-03-14T09:30:00"), Some(at(9, 30, 0)));
        assert_eq!(parse_timestamp("2025-03-14 09:30:00"), Some(at(9, 30, 0)));
        assert_eq!(parse_timestamp("2025-03-14T09:30"), Some(at(9, 30, 0)));
        assert_eq!(
            parse_timestamp("2025-03-14T09:30:00.123456").map(|d| d.and_utc().timestamp_subsec_micros()),
            Some(123456)
        );
        // offset is dropped, wall clock kept
        assert_eq!(parse_timestamp("2025-03-14T09:30:00+02:00"), Some(at(9, 30, 0)));
        assert_eq!(parse_timestamp("2025-03-14T09:30:00Z"), Some(at(9, 30, 0)));
        assert_eq!(parse_timestamp("14/03/2025"), None);
    }

    #[test]
    fn patient_length_limit() {
        let ok = AppointmentCreate {
            patient: "a".repeat(MAX_PATIENT_LEN),
            date: at(8, 0, 0),
            reason: default_reason(),
        };
        assert!(ok.validate().is_ok());

        let too_long = AppointmentCreate {
            patient: "a".repeat(MAX_PATIENT_LEN + 1),
            ..ok
        };
        assert_eq!(
            too_long.validate().unwrap_err(),
            ValidationError::TooLong {
                field: "patient",
                max: MAX_PATIENT_LEN
            }
        );
    }

    #[test]
    fn patient_length_counts_characters() {
        let input = AppointmentCreate {
            patient: "ñ".repeat(MAX_PATIENT_LEN),
            date: at(8, 0, 0),
            reason: default_reason(),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn public_shape_drops_id() {
        let stored = Appointment {
            id: 7,
            patient: "Luis".into(),
            date: at(10, 0, 0),
            reason: "Control".into(),
        };
        let public = PublicAppointment::from(stored);
        let value = serde_json::to_value(&public).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["patient"], "Luis");
        assert_eq!(value["reason"], "Control");
    }

    #[test]
    fn stored_shape_serializes_iso_date() {
        let stored = Appointment {
            id: 1,
            patient: "Luis".into(),
            date: at(10, 0, 0),
            reason: DEFAULT_REASON.into(),
        };
        assert_eq!(
            serde_json::to_value(&stored).unwrap(),
            json!({"id": 1, "patient": "Luis", "date": "2025-03-14T10:00:00", "reason": "Consulta"})
        );
    }
}
