//! Typed rows extracted from the dataset record batches
//!
//! Columns are cast to the type each field needs, so string or dictionary
//! encoded ids, zoned or naive timestamps and dates stored as text are all
//! accepted.

use arrow::array::{Array, ArrayRef, AsArray, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Date32Type, Float64Type, TimeUnit, TimestampMicrosecondType};
use arrow::record_batch::RecordBatch;
use chrono::{NaiveDate, NaiveDateTime};

/// A row type that can be built from a dataset batch
pub trait TableRecord: Sized {
    /// Dataset name for log lines
    const DATASET: &'static str;
    
    /// Columns to read from the file, or `None` for all of them
    const COLUMNS: Option<&'static [&'static str]>;
    
    /// Extract one record per batch row
    fn from_batch(batch: &RecordBatch) -> Result<Vec<Self>, String>;
}

/// A call logged with the 1746 service line
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord {
    pub id: String,
    pub opened_at: Option<NaiveDateTime>,
    pub kind: Option<String>,
    pub subtype: Option<String>,
    pub neighborhood_id: Option<String>,
}

impl CallRecord {
    /// Day the call was opened
    pub fn opened_on(&self) -> Option<NaiveDate> {
        self.opened_at.map(|at| at.date())
    }
}

impl TableRecord for CallRecord {
    const DATASET: &'static str = "chamado_1746";
    const COLUMNS: Option<&'static [&'static str]> =
        Some(&["id_chamado", "data_inicio", "tipo", "subtipo", "id_bairro"]);
    
    fn from_batch(batch: &RecordBatch) -> Result<Vec<Self>, String> {
        let ids = strings(batch, "id_chamado")?;
        let opened = timestamps(batch, "data_inicio")?;
        let kinds = strings(batch, "tipo")?;
        let subtypes = strings(batch, "subtipo")?;
        let neighborhoods = strings(batch, "id_bairro")?;
        let opened = opened.as_primitive::<TimestampMicrosecondType>();
        
        (0..batch.num_rows())
            .map(|row| {
                Ok(CallRecord {
                    id: required(&ids, "id_chamado", row)?,
                    opened_at: if opened.is_null(row) { None } else { opened.value_as_datetime(row) },
                    kind: optional(&kinds, row),
                    subtype: optional(&subtypes, row),
                    neighborhood_id: optional(&neighborhoods, row),
                })
            })
            .collect()
    }
}

/// A neighborhood of the city
#[derive(Debug, Clone, PartialEq)]
pub struct Neighborhood {
    pub id: String,
    pub name: String,
    pub subprefecture: Option<String>,
    /// Boundary as WKT text
    pub geometry: Option<String>,
}

impl TableRecord for Neighborhood {
    const DATASET: &'static str = "bairro";
    const COLUMNS: Option<&'static [&'static str]> =
        Some(&["id_bairro", "nome", "subprefeitura", "geometry"]);
    
    fn from_batch(batch: &RecordBatch) -> Result<Vec<Self>, String> {
        let ids = strings(batch, "id_bairro")?;
        let names = strings(batch, "nome")?;
        let subprefectures = strings(batch, "subprefeitura")?;
        
        // Boundaries are only shown, never required; WKB and other non-text encodings are dropped
        let geometry = match batch.column_by_name("geometry").map(|c| c.data_type()) {
            Some(data_type) if is_text(data_type) => Some(strings(batch, "geometry")?),
            Some(data_type) => {
                tracing::warn!("Ignoring neighborhood geometry stored as {}", data_type);
                None
            }
            None => return Err("missing column 'geometry'".to_string()),
        };
        
        (0..batch.num_rows())
            .map(|row| {
                Ok(Neighborhood {
                    id: required(&ids, "id_bairro", row)?,
                    name: required(&names, "nome", row)?,
                    subprefecture: optional(&subprefectures, row),
                    geometry: geometry.as_ref().and_then(|g| optional(g, row)),
                })
            })
            .collect()
    }
}

/// A city event with the hotel occupancy observed during it
#[derive(Debug, Clone, PartialEq)]
pub struct EventOccupancyRecord {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub event: String,
    /// Occupancy rate in the 0..=1 range when the source has it
    pub occupancy_rate: Option<f64>,
}

impl EventOccupancyRecord {
    /// Number of days covered, both ends included
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
    
    /// Whether `date` falls within the event
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl TableRecord for EventOccupancyRecord {
    const DATASET: &'static str = "rede_hoteleira_ocupacao_eventos";
    const COLUMNS: Option<&'static [&'static str]> = None;
    
    fn from_batch(batch: &RecordBatch) -> Result<Vec<Self>, String> {
        let starts = casted(batch, "data_inicial", &DataType::Date32)?;
        let ends = casted(batch, "data_final", &DataType::Date32)?;
        let events = strings(batch, "evento")?;
        let rates = match batch.column_by_name("taxa_ocupacao") {
            Some(_) => Some(casted(batch, "taxa_ocupacao", &DataType::Float64)?),
            None => None,
        };
        let starts = starts.as_primitive::<Date32Type>();
        let ends = ends.as_primitive::<Date32Type>();
        let rates = rates.as_ref().map(|r| r.as_primitive::<Float64Type>());
        
        (0..batch.num_rows())
            .map(|row| {
                let start = date(starts, "data_inicial", row)?;
                let end = date(ends, "data_final", row)?;
                if end < start {
                    return Err(format!("event at row {} ends before it starts", row));
                }
                Ok(EventOccupancyRecord {
                    start,
                    end,
                    event: required(&events, "evento", row)?,
                    occupancy_rate: rates.and_then(|r| (!r.is_null(row)).then(|| r.value(row))),
                })
            })
            .collect()
    }
}

fn casted(batch: &RecordBatch, name: &str, to: &DataType) -> Result<ArrayRef, String> {
    let column = batch
        .column_by_name(name)
        .ok_or_else(|| format!("missing column '{}'", name))?;
    cast(column, to).map_err(|e| format!("column '{}' cannot be read as {}: {}", name, to, e))
}

fn strings(batch: &RecordBatch, name: &str) -> Result<StringArray, String> {
    Ok(casted(batch, name, &DataType::Utf8)?.as_string::<i32>().clone())
}

fn is_text(data_type: &DataType) -> bool {
    match data_type {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => true,
        DataType::Dictionary(_, values) => is_text(values),
        _ => false,
    }
}

fn timestamps(batch: &RecordBatch, name: &str) -> Result<ArrayRef, String> {
    casted(batch, name, &DataType::Timestamp(TimeUnit::Microsecond, None))
}

fn optional(column: &StringArray, row: usize) -> Option<String> {
    (!column.is_null(row)).then(|| column.value(row).to_string())
}

fn required(column: &StringArray, name: &str, row: usize) -> Result<String, String> {
    optional(column, row).ok_or_else(|| format!("null '{}' at row {}", name, row))
}

fn date(column: &arrow::array::Date32Array, name: &str, row: usize) -> Result<NaiveDate, String> {
    if column.is_null(row) {
        return Err(format!("null '{}' at row {}", name, row));
    }
    column
        .value_as_date(row)
        .ok_or_else(|| format!("invalid '{}' at row {}", name, row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use arrow::array::{DictionaryArray, Float64Array, Int64Array, TimestampMillisecondArray};
    use arrow::datatypes::{Field, Int32Type, Schema};
    
    #[test]
    fn test_calls_accept_integer_ids_and_millisecond_timestamps() {
        let opened = NaiveDate::from_ymd_opt(2023, 4, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let batch = RecordBatch::try_from_iter(vec![
            ("id_chamado", Arc::new(Int64Array::from(vec![18_078_012, 18_078_013])) as ArrayRef),
            (
                "data_inicio",
                Arc::new(TimestampMillisecondArray::from(vec![Some(opened.and_utc().timestamp_millis()), None])) as ArrayRef,
            ),
            ("tipo", Arc::new(StringArray::from(vec![Some("Estacionamento irregular"), None])) as ArrayRef),
            ("subtipo", Arc::new(StringArray::from(vec![Some("Fiscalização de estacionamento irregular"), None])) as ArrayRef),
            (
                "id_bairro",
                Arc::new(vec![Some("144"), None].into_iter().collect::<DictionaryArray<Int32Type>>()) as ArrayRef,
            ),
        ])
        .unwrap();
        
        let calls = CallRecord::from_batch(&batch).unwrap();
        
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].id, "18078012");
        assert_eq!(calls[0].opened_at, Some(opened));
        assert_eq!(calls[0].opened_on(), NaiveDate::from_ymd_opt(2023, 4, 1));
        assert_eq!(calls[0].neighborhood_id.as_deref(), Some("144"));
        assert_eq!(calls[1].opened_at, None);
        assert_eq!(calls[1].kind, None);
        assert_eq!(calls[1].neighborhood_id, None);
    }
    
    #[test]
    fn test_call_without_id_is_rejected() {
        let batch = RecordBatch::try_from_iter(vec![
            ("id_chamado", Arc::new(StringArray::from(vec![None::<&str>])) as ArrayRef),
            ("data_inicio", Arc::new(StringArray::from(vec![Some("2023-04-01T10:00:00")])) as ArrayRef),
            ("tipo", Arc::new(StringArray::from(vec![Some("Limpeza")])) as ArrayRef),
            ("subtipo", Arc::new(StringArray::from(vec![Some("Remoção de entulho")])) as ArrayRef),
            ("id_bairro", Arc::new(StringArray::from(vec![Some("1")])) as ArrayRef),
        ])
        .unwrap();
        
        let err = CallRecord::from_batch(&batch).unwrap_err();
        assert!(err.contains("id_chamado"));
    }
    
    #[test]
    fn test_neighborhood_binary_geometry_is_dropped() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id_bairro", DataType::Utf8, false),
            Field::new("nome", DataType::Utf8, false),
            Field::new("subprefeitura", DataType::Utf8, true),
            Field::new("geometry", DataType::Binary, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec!["1"])),
                Arc::new(StringArray::from(vec!["Copacabana"])),
                Arc::new(StringArray::from(vec![Some("Zona Sul")])),
                Arc::new(arrow::array::BinaryArray::from(vec![Some(&[0xff_u8, 0xfe, 0x00][..])])),
            ],
        )
        .unwrap();
        
        let neighborhoods = Neighborhood::from_batch(&batch).unwrap();
        
        assert_eq!(neighborhoods[0].name, "Copacabana");
        assert_eq!(neighborhoods[0].subprefecture.as_deref(), Some("Zona Sul"));
        assert_eq!(neighborhoods[0].geometry, None);
    }
    
    #[test]
    fn test_neighborhood_wkb_geometry_is_never_decoded_as_text() {
        // Valid UTF-8 bytes, so a plain cast to text would succeed
        let wkb: &[u8] = &[0x01, 0x03, 0x00, 0x00, 0x00, 0x01];
        let schema = Arc::new(Schema::new(vec![
            Field::new("id_bairro", DataType::Utf8, false),
            Field::new("nome", DataType::Utf8, false),
            Field::new("subprefeitura", DataType::Utf8, true),
            Field::new("geometry", DataType::LargeBinary, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec!["1", "2"])),
                Arc::new(StringArray::from(vec!["Copacabana", "Tijuca"])),
                Arc::new(StringArray::from(vec![Some("Zona Sul"), Some("Grande Tijuca")])),
                Arc::new(arrow::array::LargeBinaryArray::from(vec![Some(wkb), Some(&[0xff_u8, 0xfe][..])])),
            ],
        )
        .unwrap();
        
        let neighborhoods = Neighborhood::from_batch(&batch).unwrap();
        
        assert_eq!(neighborhoods.len(), 2);
        assert!(neighborhoods.iter().all(|n| n.geometry.is_none()));
    }
    
    #[test]
    fn test_neighborhood_text_geometry_is_kept() {
        let batch = RecordBatch::try_from_iter(vec![
            ("id_bairro", Arc::new(StringArray::from(vec!["1"])) as ArrayRef),
            ("nome", Arc::new(StringArray::from(vec!["Copacabana"])) as ArrayRef),
            ("subprefeitura", Arc::new(StringArray::from(vec![None::<&str>])) as ArrayRef),
            (
                "geometry",
                Arc::new(vec![Some("POLYGON ((0 0, 1 0, 1 1, 0 0))")].into_iter().collect::<DictionaryArray<Int32Type>>()) as ArrayRef,
            ),
        ])
        .unwrap();
        
        let neighborhoods = Neighborhood::from_batch(&batch).unwrap();
        
        assert_eq!(neighborhoods[0].geometry.as_deref(), Some("POLYGON ((0 0, 1 0, 1 1, 0 0))"));
        assert_eq!(neighborhoods[0].subprefecture, None);
    }
    
    #[test]
    fn test_events_from_text_dates() {
        let batch = RecordBatch::try_from_iter(vec![
            ("data_inicial", Arc::new(StringArray::from(vec!["2022-12-30", "2023-02-18"])) as ArrayRef),
            ("data_final", Arc::new(StringArray::from(vec!["2023-01-01", "2023-02-21"])) as ArrayRef),
            ("evento", Arc::new(StringArray::from(vec!["Reveillon", "Carnaval"])) as ArrayRef),
            ("taxa_ocupacao", Arc::new(Float64Array::from(vec![Some(0.9483), None])) as ArrayRef),
        ])
        .unwrap();
        
        let events = EventOccupancyRecord::from_batch(&batch).unwrap();
        
        assert_eq!(events[0].event, "Reveillon");
        assert_eq!(events[0].days(), 3);
        assert!(events[0].contains(NaiveDate::from_ymd_opt(2022, 12, 31).unwrap()));
        assert!(!events[0].contains(NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()));
        assert_eq!(events[0].occupancy_rate, Some(0.9483));
        assert_eq!(events[1].occupancy_rate, None);
    }
    
    #[test]
    fn test_event_ending_before_start_is_rejected() {
        let batch = RecordBatch::try_from_iter(vec![
            ("data_inicial", Arc::new(StringArray::from(vec!["2022-09-11"])) as ArrayRef),
            ("data_final", Arc::new(StringArray::from(vec!["2022-09-02"])) as ArrayRef),
            ("evento", Arc::new(StringArray::from(vec!["Rock in Rio"])) as ArrayRef),
        ])
        .unwrap();
        
        assert!(EventOccupancyRecord::from_batch(&batch).is_err());
    }
}
