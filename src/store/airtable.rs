//! Airtable REST client.
//!
//! Employees are matched with a `filterByFormula` on the PIN field.
//! Presences are listed with a same-day date formula and then narrowed to
//! the employee by inspecting the linked-record field, because linked
//! records can't be matched by id inside a formula.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::models::{AttendancePatch, AttendanceRecord, Employee, NewAttendance};

use super::{canonical_record, formula, RecordStore};

/// Field names referenced inside formulas. Read and write field names live
/// on the wire structs below.
mod fields {
    pub const PIN: &str = "pin";
    pub const DATE: &str = "date";
}

#[derive(Debug, Deserialize)]
struct ListResponse<F> {
    #[serde(default = "Vec::new")]
    records: Vec<WireRecord<F>>,
    #[serde(default)]
    offset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireRecord<F> {
    id: String,
    #[serde(rename = "createdTime", default)]
    created_time: Option<DateTime<Utc>>,
    fields: F,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EmployeeFields {
    pin: Option<Value>,
    actif: Option<Value>,
    nom: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PresenceFields {
    employe: Vec<String>,
    date: Option<String>,
    heure_arrivee: Option<String>,
    heure_depart: Option<String>,
}

#[derive(Debug, Serialize)]
struct WriteRequest<F> {
    fields: F,
}

#[derive(Debug, Default, Serialize)]
struct PresenceWrite<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    employe: Option<[&'a str; 1]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    heure_arrivee: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    heure_depart: Option<&'a str>,
}

/// A [`RecordStore`] backed by the Airtable REST API.
#[derive(Debug, Clone)]
pub struct AirtableStore {
    client: Client,
    config: StoreConfig,
}

impl AirtableStore {
    /// Builds a client with the configured outbound timeout.
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| StoreError::Transport {
                operation: "build_client",
                message: e.to_string(),
            })?;
        Ok(Self { client, config })
    }

    /// URL of a table, optionally followed by a record id.
    fn table_url(&self, table: &str, record_id: Option<&str>) -> StoreResult<Url> {
        let invalid = |message: String| StoreError::Transport {
            operation: "build_url",
            message,
        };
        let mut url = Url::parse(&self.config.api_url).map_err(|e| invalid(e.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| invalid(format!("{} cannot be a base URL", self.config.api_url)))?;
            segments.pop_if_empty().push(&self.config.base_id).push(table);
            if let Some(id) = record_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.config.api_key)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        builder: RequestBuilder,
    ) -> StoreResult<T> {
        let response = self
            .authorized(builder)
            .send()
            .await
            .map_err(|e| StoreError::Transport {
                operation,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Upstream {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(|e| StoreError::Decode {
            operation,
            message: e.to_string(),
        })
    }

    /// Lists every record of a table matching `filter`, following pagination.
    async fn list<F: DeserializeOwned>(
        &self,
        operation: &'static str,
        table: &str,
        filter: &str,
    ) -> StoreResult<Vec<WireRecord<F>>> {
        let url = self.table_url(table, None)?;
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(url.clone())
                .query(&[("filterByFormula", filter)]);
            if let Some(cursor) = &offset {
                request = request.query(&[("offset", cursor.as_str())]);
            }

            let page: ListResponse<F> = self.send(operation, request).await?;
            records.extend(page.records);

            match page.offset {
                Some(next) if !next.is_empty() => offset = Some(next),
                _ => break,
            }
        }

        debug!(operation, table, count = records.len(), "Listed records");
        Ok(records)
    }

    async fn list_attendance(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        let records: Vec<WireRecord<PresenceFields>> = self
            .list(
                "search_presence",
                &self.config.presences_table,
                &formula::same_day(fields::DATE, date),
            )
            .await?;

        Ok(records
            .into_iter()
            .map(|record| into_attendance(record, date))
            .filter(|record| record.belongs_to(employee_id))
            .collect())
    }

    async fn delete_attendance(&self, record_id: &str) -> StoreResult<()> {
        let url = self.table_url(&self.config.presences_table, Some(record_id))?;
        let _: Value = self
            .send("delete_presence", self.client.delete(url))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for AirtableStore {
    fn check_configuration(&self) -> StoreResult<()> {
        let missing = self.config.missing_settings();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(StoreError::MissingCredentials {
                missing: missing.join(", "),
            })
        }
    }

    async fn find_employee_by_pin(&self, pin: &str) -> StoreResult<Option<Employee>> {
        let records: Vec<WireRecord<EmployeeFields>> = self
            .list(
                "search_employee",
                &self.config.employees_table,
                &formula::field_equals(fields::PIN, pin),
            )
            .await?;

        Ok(records.into_iter().next().map(|record| Employee {
            id: record.id,
            pin: record
                .fields
                .pin
                .map(|value| value_to_text(&value))
                .unwrap_or_else(|| pin.to_string()),
            active: record.fields.actif.as_ref().is_some_and(is_truthy),
            name: record.fields.nom.as_ref().map(value_to_text),
        }))
    }

    async fn find_attendance(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> StoreResult<Option<AttendanceRecord>> {
        let rows = self.list_attendance(employee_id, date).await?;
        Ok(canonical_record(&rows).cloned())
    }

    async fn create_attendance(&self, new: NewAttendance) -> StoreResult<AttendanceRecord> {
        let url = self.table_url(&self.config.presences_table, None)?;
        let body = WriteRequest {
            fields: PresenceWrite {
                employe: Some([new.employee_id.as_str()]),
                date: Some(new.date.format("%Y-%m-%d").to_string()),
                heure_arrivee: Some(new.arrival.as_str()),
                heure_depart: None,
            },
        };
        let created: WireRecord<PresenceFields> = self
            .send("create_presence", self.client.post(url).json(&body))
            .await?;
        let created = into_attendance(created, new.date);

        // The store has no uniqueness constraint; re-read the day and keep
        // only the oldest row if a concurrent request created one too.
        let rows = match self.list_attendance(&new.employee_id, new.date).await {
            Ok(rows) => rows,
            Err(err) => {
                // The row is saved; a later lookup still resolves duplicates.
                warn!(
                    employee_id = %new.employee_id,
                    record_id = %created.id,
                    error = %err,
                    "Could not re-read attendance after create"
                );
                return Ok(created);
            }
        };
        match canonical_record(&rows) {
            Some(survivor) if survivor.id != created.id => {
                warn!(
                    employee_id = %new.employee_id,
                    date = %new.date,
                    kept = %survivor.id,
                    removed = %created.id,
                    "Duplicate attendance row created concurrently, rolling back"
                );
                if let Err(err) = self.delete_attendance(&created.id).await {
                    warn!(
                        record_id = %created.id,
                        error = %err,
                        "Failed to delete duplicate attendance row"
                    );
                }
                Err(StoreError::Conflict {
                    employee_id: new.employee_id,
                    date: new.date,
                })
            }
            _ => Ok(created),
        }
    }

    async fn update_attendance(
        &self,
        record_id: &str,
        patch: AttendancePatch,
    ) -> StoreResult<AttendanceRecord> {
        let url = self.table_url(&self.config.presences_table, Some(record_id))?;
        let body = WriteRequest {
            fields: PresenceWrite {
                heure_arrivee: patch.arrival.as_deref(),
                heure_depart: patch.departure.as_deref(),
                ..PresenceWrite::default()
            },
        };
        let updated: WireRecord<PresenceFields> = self
            .send("update_presence", self.client.patch(url).json(&body))
            .await?;
        let Some(date) = updated.fields.date.as_deref().and_then(parse_date) else {
            return Err(StoreError::Decode {
                operation: "update_presence",
                message: format!("record {} has no date", updated.id),
            });
        };
        Ok(into_attendance(updated, date))
    }
}

fn into_attendance(record: WireRecord<PresenceFields>, fallback_date: NaiveDate) -> AttendanceRecord {
    let fields = record.fields;
    AttendanceRecord {
        id: record.id,
        employee_ids: fields.employe,
        date: fields
            .date
            .as_deref()
            .and_then(parse_date)
            .unwrap_or(fallback_date),
        arrival: fields.heure_arrivee,
        departure: fields.heure_depart,
        created_at: record.created_time,
    }
}

/// Accepts both date fields ("2026-01-13") and date-time fields
/// ("2026-01-13T00:00:00.000Z").
fn parse_date(value: &str) -> Option<NaiveDate> {
    value
        .get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Truthiness of a cell value: unchecked boxes, zero, empty text and
/// empty lists all read as false.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_with_url(api_url: &str) -> AirtableStore {
        AirtableStore::new(StoreConfig {
            api_key: "patKEY".to_string(),
            base_id: "appBASE".to_string(),
            api_url: api_url.to_string(),
            ..StoreConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_table_url_encodes_table_name() {
        let store = store_with_url("https://api.airtable.com/v0");
        let url = store.table_url("Présences", Some("recPRES1")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.airtable.com/v0/appBASE/Pr%C3%A9sences/recPRES1"
        );
    }

    #[test]
    fn test_table_url_tolerates_trailing_slash() {
        let store = store_with_url("http://127.0.0.1:9000/v0/");
        let url = store.table_url("Employees", None).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/v0/appBASE/Employees");
    }

    #[test]
    fn test_check_configuration_reports_missing_settings() {
        let store = AirtableStore::new(StoreConfig::default()).unwrap();
        match store.check_configuration() {
            Err(StoreError::MissingCredentials { missing }) => {
                assert_eq!(missing, "AIRTABLE_API_KEY, AIRTABLE_BASE_ID")
            }
            other => panic!("expected MissingCredentials, got {:?}", other),
        }
    }

    #[test]
    fn test_truthiness_of_active_flag() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("oui")));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&Value::Null));
    }

    #[test]
    fn test_parse_date_accepts_datetime_values() {
        let expected = NaiveDate::from_ymd_opt(2026, 1, 13);
        assert_eq!(parse_date("2026-01-13"), expected);
        assert_eq!(parse_date("2026-01-13T00:00:00.000Z"), expected);
        assert_eq!(parse_date("13/01"), None);
    }

    #[test]
    fn test_presence_write_skips_unset_fields() {
        let body = WriteRequest {
            fields: PresenceWrite {
                heure_depart: Some("17:05"),
                ..PresenceWrite::default()
            },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"fields": {"heure_depart": "17:05"}})
        );
    }

    #[test]
    fn test_presence_record_decoding() {
        let json = json!({
            "id": "recPRES1",
            "createdTime": "2026-01-13T07:01:00.000Z",
            "fields": {
                "employe": ["recEMP1"],
                "date": "2026-01-13",
                "heure_arrivee": "08:01"
            }
        });
        let wire: WireRecord<PresenceFields> = serde_json::from_value(json).unwrap();
        let record = into_attendance(wire, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        assert!(record.belongs_to("recEMP1"));
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        assert!(record.has_arrival());
        assert!(!record.has_departure());
        assert!(record.created_at.is_some());
    }
}
