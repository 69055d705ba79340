//! CsvObservationStore - `lat,lon,ts` の CSV ファイル
//!
//! # 実装詳細
//! - ファイルがなければ空テーブル
//! - 書き込みは同じディレクトリの一時ファイルに全量を書いてから rename
//! - ロックなし（同時起動は想定しない。last-writer-wins）

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::domain::{Observation, OrbitrailError, StoreError};
use crate::ports::ObservationStore;

const TS_COLUMN: &str = "ts";

#[derive(Debug, Clone)]
pub struct CsvObservationStore {
    path: PathBuf,
}

impl CsvObservationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_error(&self, source: csv::Error) -> StoreError {
        StoreError::Read {
            path: self.path.clone(),
            source,
        }
    }

    fn write_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }

    fn encode(&self, rows: &[Observation]) -> Result<Vec<u8>, StoreError> {
        let encode_error = |source: csv::Error| StoreError::Encode {
            path: self.path.clone(),
            source,
        };
        let mut writer = csv::Writer::from_writer(Vec::new());
        if rows.is_empty() {
            writer.write_record(["lat", "lon", TS_COLUMN]).map_err(encode_error)?;
        }
        for row in rows {
            writer.serialize(row).map_err(encode_error)?;
        }
        writer
            .into_inner()
            .map_err(|e| self.write_error(e.into_error()))
    }

    fn replace_contents(&self, bytes: &[u8]) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| self.write_error(e))?;
        tmp.write_all(bytes).map_err(|e| self.write_error(e))?;
        tmp.flush().map_err(|e| self.write_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.write_error(e.error))?;
        Ok(())
    }
}

impl ObservationStore for CsvObservationStore {
    fn load(&self) -> Result<Vec<Observation>, OrbitrailError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| self.read_error(e))?;
        let mut rows = Vec::new();
        for record in reader.deserialize::<Observation>() {
            rows.push(record.map_err(|e| self.read_error(e))?);
        }
        Ok(rows)
    }

    fn load_timestamps(&self) -> Result<Vec<String>, OrbitrailError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        // 列数の合わない行はその行だけ読み飛ばす
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| self.read_error(e))?;
        let headers = reader.headers().map_err(|e| self.read_error(e))?;
        let index = headers
            .iter()
            .position(|h| h.trim() == TS_COLUMN)
            .ok_or_else(|| StoreError::MissingColumn {
                path: self.path.clone(),
                column: TS_COLUMN,
            })?;

        let mut stamps = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| self.read_error(e))?;
            if let Some(ts) = record.get(index) {
                stamps.push(ts.to_string());
            }
        }
        Ok(stamps)
    }

    fn append_and_persist(
        &self,
        mut table: Vec<Observation>,
        row: Observation,
    ) -> Result<Vec<Observation>, OrbitrailError> {
        table.push(row);
        let bytes = self.encode(&table)?;
        self.replace_contents(&bytes)?;
        tracing::debug!(path = %self.path.display(), rows = table.len(), "store rewritten");
        Ok(table)
    }
}
