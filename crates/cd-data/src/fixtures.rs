//! Small sample datasets written as real parquet files

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Date32Array, Float64Array, StringArray, TimestampMicrosecondArray};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use parquet::arrow::ArrowWriter;
use parquet::errors::ParquetError;

use crate::config::DatasetKind;

/// Rows in the sample calls file
pub const CALL_ROWS: usize = 6;

/// Rows in the sample neighborhoods file
pub const NEIGHBORHOOD_ROWS: usize = 3;

/// Rows in the sample events file
pub const EVENT_ROWS: usize = 3;

/// Write all three sample datasets into `dir` under their default names
pub fn write_all(dir: &Path) -> Result<(), ParquetError> {
    write_calls(&dir.join(DatasetKind::Calls.default_file()))?;
    write_neighborhoods(&dir.join(DatasetKind::Neighborhoods.default_file()))?;
    write_events(&dir.join(DatasetKind::Events.default_file()))
}

/// Calls on 2023-04-01 plus a few around the New Year and Carnival
pub fn write_calls(path: &Path) -> Result<(), ParquetError> {
    let opened = [
        micros(2023, 4, 1, 8, 15),
        micros(2023, 4, 1, 10, 40),
        micros(2023, 4, 1, 22, 5),
        micros(2022, 12, 31, 23, 10),
        micros(2023, 2, 19, 1, 0),
        micros(2023, 4, 2, 9, 0),
    ];
    let batch = RecordBatch::try_from_iter(vec![
        ("id_chamado", strings(&["1", "2", "3", "4", "5", "6"])),
        ("data_inicio", Arc::new(TimestampMicrosecondArray::from(opened.to_vec())) as ArrayRef),
        (
            "tipo",
            strings(&[
                "Estacionamento irregular",
                "Iluminação Pública",
                "Poluição Sonora",
                "Poluição Sonora",
                "Poluição Sonora",
                "Iluminação Pública",
            ]),
        ),
        (
            "subtipo",
            strings(&[
                "Fiscalização de estacionamento irregular de veículo",
                "Reparo de lâmpada apagada",
                "Perturbação do sossego",
                "Perturbação do sossego",
                "Perturbação do sossego",
                "Reparo de lâmpada apagada",
            ]),
        ),
        (
            "id_bairro",
            Arc::new(StringArray::from(vec![Some("1"), Some("2"), Some("1"), Some("3"), Some("2"), None])) as ArrayRef,
        ),
        ("status", strings(&["Fechado", "Fechado", "Aberto", "Fechado", "Fechado", "Aberto"])),
    ])?;
    write_batch(path, &batch)
}

/// Three neighborhoods in three sub-prefectures
pub fn write_neighborhoods(path: &Path) -> Result<(), ParquetError> {
    let batch = RecordBatch::try_from_iter(vec![
        ("id_bairro", strings(&["1", "2", "3"])),
        ("nome", strings(&["Copacabana", "Tijuca", "Centro"])),
        ("subprefeitura", strings(&["Zona Sul", "Grande Tijuca", "Centro"])),
        (
            "geometry",
            strings(&[
                "POLYGON((-43.19 -22.96, -43.17 -22.96, -43.17 -22.98, -43.19 -22.96))",
                "POLYGON((-43.25 -22.92, -43.22 -22.92, -43.22 -22.94, -43.25 -22.92))",
                "POLYGON((-43.19 -22.90, -43.17 -22.90, -43.17 -22.91, -43.19 -22.90))",
            ]),
        ),
        ("area", Arc::new(Float64Array::from(vec![4.1, 10.1, 5.7])) as ArrayRef),
    ])?;
    write_batch(path, &batch)
}

/// New Year, Carnival and Rock in Rio with their hotel occupancy
pub fn write_events(path: &Path) -> Result<(), ParquetError> {
    let batch = RecordBatch::try_from_iter(vec![
        ("data_inicial", dates(&[(2022, 12, 30), (2023, 2, 18), (2022, 9, 2)])),
        ("data_final", dates(&[(2023, 1, 1), (2023, 2, 21), (2022, 9, 11)])),
        ("evento", strings(&["Reveillon", "Carnaval", "Rock in Rio"])),
        ("taxa_ocupacao", Arc::new(Float64Array::from(vec![0.9483, 0.9098, 0.8067])) as ArrayRef),
        ("fonte", strings(&["HotéisRIO", "HotéisRIO", "HotéisRIO"])),
    ])?;
    write_batch(path, &batch)
}

fn write_batch(path: &Path, batch: &RecordBatch) -> Result<(), ParquetError> {
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;
    Ok(())
}

fn strings(values: &[&str]) -> ArrayRef {
    Arc::new(StringArray::from(values.to_vec()))
}

fn dates(values: &[(i32, u32, u32)]) -> ArrayRef {
    // 1970-01-01
    let epoch = NaiveDate::default();
    let days: Vec<i32> = values
        .iter()
        .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
        .map(|date| (date - epoch).num_days() as i32)
        .collect();
    Arc::new(Date32Array::from(days))
}

fn micros(y: i32, m: u32, d: u32, hour: u32, minute: u32) -> i64 {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .map(|at| at.and_utc().timestamp_micros())
        .unwrap_or_default()
}
