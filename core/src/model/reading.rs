use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// One day of utility consumption. The `date` is the natural key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", from = "RawReading")]
pub struct DailyUtilityRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub gas: f64,
    pub electricity: f64,
    pub water: f64,
    pub powder: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub powder_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DailyUtilityRecord {
    pub fn new(
        date: NaiveDate,
        gas: f64,
        electricity: f64,
        water: f64,
        powder: f64,
        powder_type: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            gas,
            electricity,
            water,
            powder,
            powder_type,
            created_at: Utc::now(),
        }
    }

    /// Replaces the quantities and powder type with those of `update`.
    /// `id`, `date` and `created_at` are left alone.
    pub fn apply_update(&mut self, update: &DailyUtilityRecord) {
        self.gas = update.gas;
        self.electricity = update.electricity;
        self.water = update.water;
        self.powder = update.powder;
        self.powder_type = update.powder_type.clone();
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

/// Non-finite quantities count as zero.
pub fn quantity_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

// Accepts both the current field names and the ones written by the old browser cache.
// Only `date` is required; every other field falls back when it has the wrong shape.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReading {
    #[serde(default, deserialize_with = "lenient_id")]
    id: Option<Uuid>,
    date: NaiveDate,
    #[serde(
        default,
        deserialize_with = "lenient_quantity",
        alias = "total_gas",
        alias = "gas_consumption"
    )]
    gas: f64,
    #[serde(
        default,
        deserialize_with = "lenient_quantity",
        alias = "total_electricity",
        alias = "electricity_usage"
    )]
    electricity: f64,
    #[serde(
        default,
        deserialize_with = "lenient_quantity",
        alias = "total_water",
        alias = "water_usage"
    )]
    water: f64,
    #[serde(
        default,
        deserialize_with = "lenient_quantity",
        alias = "total_powder",
        alias = "powder_consumption"
    )]
    powder: f64,
    #[serde(default, deserialize_with = "lenient_text", alias = "powder_type")]
    powder_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp", alias = "created_at")]
    created_at: Option<DateTime<Utc>>,
}

impl From<RawReading> for DailyUtilityRecord {
    fn from(raw: RawReading) -> Self {
        // Legacy rows have neither id nor timestamp; derive both from the date.
        let id = raw
            .id
            .unwrap_or_else(|| Uuid::new_v5(&Uuid::NAMESPACE_OID, raw.date.to_string().as_bytes()));
        let created_at = raw
            .created_at
            .unwrap_or_else(|| raw.date.and_time(chrono::NaiveTime::MIN).and_utc());

        Self {
            id,
            date: raw.date,
            gas: raw.gas,
            electricity: raw.electricity,
            water: raw.water,
            powder: raw.powder,
            powder_type: raw.powder_type.filter(|t| !t.is_empty()),
            created_at,
        }
    }
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let quantity = match value {
        None | Some(Value::Null) => Some(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match quantity {
        Some(q) if q.is_finite() => Ok(q),
        _ => {
            tracing::warn!("non-numeric quantity in stored reading, treating as zero");
            Ok(0.0)
        }
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(Some(s)),
        None | Some(Value::Null) => Ok(None),
        Some(other) => {
            tracing::warn!(value = %other, "non-text powder type in stored reading, ignoring");
            Ok(None)
        }
    }
}

// Timestamps without an offset are ambiguous; treat them like a missing one.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let parsed = match &value {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        _ => None,
    };
    if parsed.is_none() && !matches!(value, None | Some(Value::Null)) {
        tracing::warn!("unparsable createdAt in stored reading, deriving it from the date");
    }
    Ok(parsed)
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Uuid::parse_str(&s).ok(),
        _ => None,
    })
}
