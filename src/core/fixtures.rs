//! Structured fixture loading.
//!
//! Fixtures live in a single data root and are addressed by logical name
//! without extension: `load_json("login-data")` reads `<root>/login-data.json`.
//! JSON and CSV content goes through placeholder resolution before parsing;
//! XLSX is binary and is read as-is.
//!
//! Nothing is cached. Every call re-reads the file, so edits made during a run
//! are visible on the next call.

use std::path::{Path, PathBuf};

use calamine::{Data, Reader, Xlsx, open_workbook};
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};

use crate::core::env::{
    SharedEnv, placeholder_names, resolve_placeholders,
    resolve_value_keeping_unresolved,
};
use crate::error::{DataError, Result};

/// One CSV or spreadsheet row keyed by header column name.
pub type Row = Map<String, Value>;

/// On-disk fixture formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixtureKind {
    Json,
    Csv,
    Xlsx,
}

impl FixtureKind {
    pub const ALL: &'static [Self] = &[Self::Json, Self::Csv, Self::Xlsx];

    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    /// Parse from an extension or CLI value (case-insensitive).
    #[must_use]
    pub fn from_extension(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "xlsx" | "excel" => Some(Self::Xlsx),
            _ => None,
        }
    }
}

impl std::fmt::Display for FixtureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Loads fixture documents from a data root.
#[derive(Clone)]
pub struct FixtureLoader {
    root: PathBuf,
    env: SharedEnv,
}

impl std::fmt::Debug for FixtureLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixtureLoader")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl FixtureLoader {
    /// Create a loader rooted at `root`, resolving placeholders against `env`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, env: SharedEnv) -> Self {
        Self {
            root: root.into(),
            env,
        }
    }

    /// The data root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The environment used for placeholder resolution.
    #[must_use]
    pub fn env(&self) -> &SharedEnv {
        &self.env
    }

    /// Path of fixture `name` with the given kind.
    #[must_use]
    pub fn path_for(&self, name: &str, kind: FixtureKind) -> PathBuf {
        self.root.join(format!("{name}.{}", kind.extension()))
    }

    /// Whether fixture `name` exists with the given kind.
    pub async fn exists(&self, name: &str, kind: FixtureKind) -> bool {
        tokio::fs::try_exists(self.path_for(name, kind))
            .await
            .unwrap_or(false)
    }

    /// Read raw text and resolve placeholders.
    async fn read_resolved(&self, path: &Path) -> Result<String> {
        let raw = read_existing(path).await?;
        Ok(resolve_placeholders(&raw, self.env.as_ref()))
    }

    /// Variables referenced by a text fixture that the environment does not
    /// define. XLSX fixtures never contain placeholders.
    ///
    /// # Errors
    ///
    /// [`DataError::FixtureNotFound`] if the file is absent.
    pub async fn unset_placeholders(&self, name: &str, kind: FixtureKind) -> Result<Vec<String>> {
        if kind == FixtureKind::Xlsx {
            ensure_exists(&self.path_for(name, kind)).await?;
            return Ok(Vec::new());
        }
        let raw = read_existing(&self.path_for(name, kind)).await?;
        Ok(placeholder_names(&raw)
            .into_iter()
            .filter(|variable| self.env.var(variable).is_none())
            .collect())
    }

    /// Load a JSON fixture, substituting placeholders inside string values
    /// only and keeping `${NAME}` for undefined variables.
    ///
    /// # Errors
    ///
    /// [`DataError::FixtureNotFound`] or [`DataError::FixtureParse`] if the
    /// raw file is not JSON.
    pub async fn load_json_keeping_unresolved(&self, name: &str) -> Result<Value> {
        let path = self.path_for(name, FixtureKind::Json);
        let raw = read_existing(&path).await?;
        let value: Value = serde_json::from_str(&raw).map_err(|e| DataError::FixtureParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(resolve_value_keeping_unresolved(&value, self.env.as_ref()))
    }

    /// Load `<root>/<name>.json` with placeholders resolved.
    ///
    /// # Errors
    ///
    /// [`DataError::FixtureNotFound`] if the file is absent and
    /// [`DataError::FixtureParse`] if the resolved text is not JSON.
    pub async fn load_json(&self, name: &str) -> Result<Value> {
        let path = self.path_for(name, FixtureKind::Json);
        tracing::debug!(?path, "Loading JSON fixture");
        let content = self.read_resolved(&path).await?;
        serde_json::from_str(&content).map_err(|e| DataError::FixtureParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load a JSON fixture straight into a typed structure.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load_json`]; a shape mismatch is reported as
    /// [`DataError::FixtureParse`].
    pub async fn load_json_as<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.path_for(name, FixtureKind::Json);
        let content = self.read_resolved(&path).await?;
        serde_json::from_str(&content).map_err(|e| DataError::FixtureParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load `<root>/<name>.csv` as header-keyed rows.
    ///
    /// Placeholders are resolved on the whole file before it is split into
    /// rows, so a substituted value may contain commas or quotes that the CSV
    /// parser then interprets.
    ///
    /// # Errors
    ///
    /// [`DataError::FixtureNotFound`] or [`DataError::FixtureParse`].
    pub async fn load_csv(&self, name: &str) -> Result<Vec<Row>> {
        let path = self.path_for(name, FixtureKind::Csv);
        tracing::debug!(?path, "Loading CSV fixture");
        let content = self.read_resolved(&path).await?;
        parse_csv(&content).map_err(|e| DataError::FixtureParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load a sheet of `<root>/<name>.xlsx` as header-keyed rows.
    ///
    /// `sheet` selects a worksheet by name; `None` reads the first one. Empty
    /// cells are left out of the row and rows with no values are skipped.
    ///
    /// # Errors
    ///
    /// [`DataError::FixtureNotFound`], [`DataError::FixtureSheetNotFound`] or
    /// [`DataError::FixtureParse`] for unreadable workbooks.
    pub async fn load_excel(&self, name: &str, sheet: Option<&str>) -> Result<Vec<Row>> {
        let path = self.path_for(name, FixtureKind::Xlsx);
        tracing::debug!(?path, ?sheet, "Loading Excel fixture");
        ensure_exists(&path).await?;

        let sheet = sheet.map(str::to_string);
        tokio::task::spawn_blocking(move || read_workbook(&path, sheet.as_deref()))
            .await
            .map_err(|e| DataError::Other(anyhow::anyhow!("workbook reader panicked: {e}")))?
    }

    /// Write `data` to `<root>/<name>.json` with 2-space indentation.
    ///
    /// Creates the data root if needed. Concurrent writers to the same name
    /// are not coordinated.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub async fn write_json<T: serde::Serialize + ?Sized>(&self, name: &str, data: &T) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.path_for(name, FixtureKind::Json);
        let content = serde_json::to_string_pretty(data)?;
        tokio::fs::write(&path, content).await?;
        tracing::debug!(?path, "Fixture written");
        Ok(path)
    }

    /// Load a JSON fixture and return one top-level key.
    ///
    /// # Errors
    ///
    /// [`DataError::FixtureKeyNotFound`] when the key is absent, plus the
    /// errors of [`Self::load_json`].
    pub async fn get_by_key(&self, name: &str, key: &str) -> Result<Value> {
        let mut data = self.load_json(name).await?;
        data.as_object_mut()
            .and_then(|map| map.remove(key))
            .ok_or_else(|| DataError::FixtureKeyNotFound {
                name: name.to_string(),
                key: key.to_string(),
            })
    }

    /// Logical names of fixtures of one kind, sorted.
    ///
    /// A missing data root yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be read.
    pub async fn list(&self, kind: FixtureKind) -> Result<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let matches = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(kind.extension()));
            if matches {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

async fn ensure_exists(path: &Path) -> Result<()> {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        Ok(())
    } else {
        Err(DataError::FixtureNotFound {
            path: path.display().to_string(),
        })
    }
}

async fn read_existing(path: &Path) -> Result<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(DataError::FixtureNotFound {
            path: path.display().to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// Parse CSV text into rows keyed by the header row. Values stay strings.
///
/// # Errors
///
/// Returns the parser error for malformed input (e.g. ragged rows).
pub fn parse_csv(content: &str) -> std::result::Result<Vec<Row>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_string(), Value::String(value.to_string())))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

fn read_workbook(path: &Path, sheet: Option<&str>) -> Result<Vec<Row>> {
    let parse_err = |message: String| DataError::FixtureParse {
        path: path.display().to_string(),
        message,
    };

    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e: calamine::XlsxError| parse_err(e.to_string()))?;
    let sheet_name = match sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|s| s == name) {
                return Err(DataError::FixtureSheetNotFound {
                    path: path.display().to_string(),
                    sheet: name.to_string(),
                });
            }
            name.to_string()
        }
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| parse_err("workbook has no sheets".to_string()))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| parse_err(e.to_string()))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row.iter().map(ToString::to_string).collect();

    let records = rows
        .map(|cells| {
            headers
                .iter()
                .zip(cells)
                .filter(|(header, _)| !header.is_empty())
                .filter_map(|(header, cell)| cell_value(cell).map(|v| (header.clone(), v)))
                .collect::<Row>()
        })
        .filter(|row| !row.is_empty())
        .collect();
    Ok(records)
}

/// Convert a spreadsheet cell to JSON. `None` for empty cells.
fn cell_value(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(Value::String(s.clone())),
        Data::Bool(b) => Some(Value::Bool(*b)),
        Data::Int(i) => Some(Value::Number((*i).into())),
        Data::Float(f) => Some(float_value(*f)),
        Data::DateTime(dt) => Some(float_value(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(Value::String(s.clone())),
        Data::Error(e) => Some(Value::String(format!("#{e:?}"))),
    }
}

/// Whole floats become integers so `3` in a sheet reads back as `3`, not `3.0`.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn float_value(f: f64) -> Value {
    if f.fract() == 0.0 && f.abs() < 9.0e15 {
        Value::Number((f as i64).into())
    } else {
        Number::from_f64(f).map_or(Value::Null, Value::Number)
    }
}

// =============================================================================
// Row helpers
// =============================================================================

/// Pick one item uniformly at random.
///
/// # Errors
///
/// [`DataError::EmptyData`] for an empty slice.
pub fn random_item<T>(items: &[T]) -> Result<&T> {
    use rand::seq::IndexedRandom;
    items.choose(&mut rand::rng()).ok_or(DataError::EmptyData)
}

/// Rows whose values equal every entry of `criteria`.
#[must_use]
pub fn filter_rows<'a>(rows: &'a [Row], criteria: &Row) -> Vec<&'a Row> {
    rows.iter()
        .filter(|row| criteria.iter().all(|(k, v)| row.get(k) == Some(v)))
        .collect()
}

/// Shallow merge of JSON objects; later sources win. Non-objects are ignored.
#[must_use]
pub fn merge_objects(sources: &[Value]) -> Value {
    let mut merged = Map::new();
    for source in sources {
        if let Value::Object(map) = source {
            for (k, v) in map {
                merged.insert(k.clone(), v.clone());
            }
        }
    }
    Value::Object(merged)
}

/// Every combination of `variations`, each merged over `base`.
///
/// Fields vary in the order given; the last field changes fastest. With no
/// variations the result is `[base]`.
#[must_use]
pub fn combinations(base: &Row, variations: &[(String, Vec<Value>)]) -> Vec<Row> {
    let mut combos = vec![base.clone()];
    for (key, values) in variations {
        combos = combos
            .iter()
            .flat_map(|partial| {
                values.iter().map(move |value| {
                    let mut next = partial.clone();
                    next.insert(key.clone(), value.clone());
                    next
                })
            })
            .collect();
    }
    combos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::MapEnv;
    use serde_json::json;
    use tempfile::TempDir;

    fn loader(dir: &TempDir) -> FixtureLoader {
        let env = MapEnv::new()
            .with("TEST_USER_USERNAME", "alice")
            .with("TEST_USER_PASSWORD", "secret1")
            .with("CELL", "a,b");
        FixtureLoader::new(dir.path(), env.shared())
    }

    fn write(dir: &TempDir, file: &str, content: &str) {
        std::fs::write(dir.path().join(file), content).unwrap();
    }

    #[derive(Debug, serde::Deserialize)]
    struct Login {
        username: String,
        password: String,
        role: String,
    }

    #[tokio::test]
    async fn load_json_as_deserializes_resolved_fixture() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "login-data.json",
            r#"{"username": "${TEST_USER_USERNAME}", "password": "${TEST_USER_PASSWORD}", "role": "admin"}"#,
        );

        let login: Login = loader(&dir).load_json_as("login-data").await.unwrap();
        assert_eq!(login.username, "alice");
        assert_eq!(login.password, "secret1");
        assert_eq!(login.role, "admin");
    }

    #[tokio::test]
    async fn load_json_as_reports_shape_mismatch() {
        let dir = TempDir::new().unwrap();
        write(&dir, "login-data.json", r#"{"username": "alice"}"#);

        let err = loader(&dir).load_json_as::<Login>("login-data").await.unwrap_err();
        assert!(matches!(err, DataError::FixtureParse { .. }), "{err:?}");

        let missing = loader(&dir).load_json_as::<Login>("absent").await.unwrap_err();
        assert!(matches!(missing, DataError::FixtureNotFound { .. }), "{missing:?}");
    }

    #[tokio::test]
    async fn load_json_resolves_placeholders() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "login-data.json",
            r#"{"username": "${TEST_USER_USERNAME}", "password": "${TEST_USER_PASSWORD}", "role": "admin"}"#,
        );

        let data = loader(&dir).load_json("login-data").await.unwrap();
        assert_eq!(
            data,
            json!({"username": "alice", "password": "secret1", "role": "admin"})
        );
    }

    #[tokio::test]
    async fn load_json_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = loader(&dir).load_json("nope").await.unwrap_err();
        match err {
            DataError::FixtureNotFound { path } => assert!(path.ends_with("nope.json")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn load_json_invalid_after_resolution_is_parse_error() {
        let dir = TempDir::new().unwrap();
        // Unquoted placeholder resolves to nothing, leaving `{"n": }`.
        write(&dir, "broken.json", r#"{"n": ${UNSET_NUMBER}}"#);
        let err = loader(&dir).load_json("broken").await.unwrap_err();
        assert!(matches!(err, DataError::FixtureParse { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn load_json_twice_is_deep_equal() {
        let dir = TempDir::new().unwrap();
        write(&dir, "x.json", r#"{"a": [1, 2, {"b": "${TEST_USER_USERNAME}"}]}"#);
        let l = loader(&dir);
        assert_eq!(l.load_json("x").await.unwrap(), l.load_json("x").await.unwrap());
    }

    #[tokio::test]
    async fn load_json_observes_file_changes() {
        let dir = TempDir::new().unwrap();
        let l = loader(&dir);
        write(&dir, "x.json", r#"{"v": 1}"#);
        assert_eq!(l.load_json("x").await.unwrap()["v"], 1);
        write(&dir, "x.json", r#"{"v": 2}"#);
        assert_eq!(l.load_json("x").await.unwrap()["v"], 2);
    }

    #[tokio::test]
    async fn write_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let l = FixtureLoader::new(dir.path().join("nested/out"), MapEnv::new().shared());
        let data = json!({"run": "r-1", "users": [{"name": "a"}, {"name": "b"}], "ok": true});

        let path = l.write_json("run-state", &data).await.unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"run\""), "expected 2-space indent: {text}");

        assert_eq!(l.load_json("run-state").await.unwrap(), data);
    }

    #[tokio::test]
    async fn load_csv_keys_rows_by_header() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "users.csv",
            "username,password,role\n${TEST_USER_USERNAME},${TEST_USER_PASSWORD},admin\nbob,pw,user\n",
        );
        let rows = loader(&dir).load_csv("users").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["username"], "alice");
        assert_eq!(rows[0]["password"], "secret1");
        assert_eq!(rows[1]["role"], "user");
    }

    #[tokio::test]
    async fn load_csv_resolves_before_splitting() {
        let dir = TempDir::new().unwrap();
        // The substituted value contains a comma inside a quoted cell.
        write(&dir, "cells.csv", "name,tags\nx,\"${CELL}\"\n");
        let rows = loader(&dir).load_csv("cells").await.unwrap();
        assert_eq!(rows[0]["tags"], "a,b");
    }

    #[tokio::test]
    async fn load_csv_ragged_rows_fail() {
        let dir = TempDir::new().unwrap();
        write(&dir, "bad.csv", "a,b\n1,2,3\n");
        let err = loader(&dir).load_csv("bad").await.unwrap_err();
        assert!(matches!(err, DataError::FixtureParse { .. }));
    }

    #[tokio::test]
    async fn load_excel_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = loader(&dir).load_excel("book", None).await.unwrap_err();
        assert!(matches!(err, DataError::FixtureNotFound { .. }));
    }

    #[tokio::test]
    async fn get_by_key_reports_missing_key() {
        let dir = TempDir::new().unwrap();
        write(&dir, "d.json", r#"{"present": [1]}"#);
        let l = loader(&dir);
        assert_eq!(l.get_by_key("d", "present").await.unwrap(), json!([1]));
        let err = l.get_by_key("d", "absent").await.unwrap_err();
        assert_eq!(err.to_string(), "Key 'absent' not found in test data file: d.json");
    }

    #[tokio::test]
    async fn list_returns_sorted_names_per_kind() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.json", "{}");
        write(&dir, "a.json", "{}");
        write(&dir, "c.csv", "x\n");
        let l = loader(&dir);
        assert_eq!(l.list(FixtureKind::Json).await.unwrap(), vec!["a", "b"]);
        assert_eq!(l.list(FixtureKind::Csv).await.unwrap(), vec!["c"]);
        assert!(l.exists("a", FixtureKind::Json).await);
        assert!(!l.exists("a", FixtureKind::Csv).await);

        let missing = FixtureLoader::new(dir.path().join("none"), MapEnv::new().shared());
        assert!(missing.list(FixtureKind::Json).await.unwrap().is_empty());
    }

    #[test]
    fn random_item_rejects_empty() {
        let empty: Vec<u8> = Vec::new();
        assert!(matches!(random_item(&empty), Err(DataError::EmptyData)));
        let items = [1, 2, 3];
        assert!(items.contains(random_item(&items).unwrap()));
    }

    #[test]
    fn filter_rows_matches_all_criteria() {
        let rows: Vec<Row> = vec![
            json!({"role": "admin", "active": true}),
            json!({"role": "admin", "active": false}),
            json!({"role": "user", "active": true}),
        ]
        .into_iter()
        .map(|v| v.as_object().unwrap().clone())
        .collect();
        let criteria = json!({"role": "admin", "active": true}).as_object().unwrap().clone();

        let matched = filter_rows(&rows, &criteria);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0]["active"], true);
    }

    #[test]
    fn merge_objects_later_wins() {
        let merged = merge_objects(&[json!({"a": 1, "b": 1}), json!({"b": 2}), json!(7)]);
        assert_eq!(merged, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn combinations_is_cartesian_product() {
        let base = json!({"status": "Active"}).as_object().unwrap().clone();
        let variations = vec![
            ("department".to_string(), vec![json!("Sales"), json!("Ops")]),
            ("permission".to_string(), vec![json!("Full"), json!("Read"), json!("None")]),
        ];
        let combos = combinations(&base, &variations);
        assert_eq!(combos.len(), 6);
        assert!(combos.iter().all(|c| c["status"] == "Active"));
        assert_eq!(combos[0]["department"], "Sales");
        assert_eq!(combos[0]["permission"], "Full");
        assert_eq!(combos[5]["department"], "Ops");
        assert_eq!(combos[5]["permission"], "None");

        assert_eq!(combinations(&base, &[]), vec![base]);
    }

    #[test]
    fn whole_floats_read_as_integers() {
        assert_eq!(float_value(3.0), json!(3));
        assert_eq!(float_value(1.25), json!(1.25));
    }

    #[test]
    fn fixture_kind_parses_extensions() {
        assert_eq!(FixtureKind::from_extension("XLSX"), Some(FixtureKind::Xlsx));
        assert_eq!(FixtureKind::from_extension("excel"), Some(FixtureKind::Xlsx));
        assert_eq!(FixtureKind::from_extension("yaml"), None);
    }

    #[tokio::test]
    async fn unset_placeholders_reports_undefined_only() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("login-data.json"),
            r#"{"u": "${TEST_USER_USERNAME}", "p": "${TEST_USER_PASSWORD}", "x": "${TEST_USER_USERNAME}"}"#,
        )
        .unwrap();
        let env = MapEnv::new().with("TEST_USER_USERNAME", "alice");
        let loader = FixtureLoader::new(dir.path(), env.shared());

        let unset = loader
            .unset_placeholders("login-data", FixtureKind::Json)
            .await
            .unwrap();
        assert_eq!(unset, ["TEST_USER_PASSWORD"]);
    }

    #[tokio::test]
    async fn keeping_unresolved_leaves_missing_tokens() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("secure.json"),
            r#"{"user": {"name": "${TEST_USER_USERNAME}", "pass": "${MISSING_SECRET}"}, "n": 3}"#,
        )
        .unwrap();
        let env = MapEnv::new().with("TEST_USER_USERNAME", "alice");
        let loader = FixtureLoader::new(dir.path(), env.shared());

        let value = loader.load_json_keeping_unresolved("secure").await.unwrap();
        assert_eq!(
            value,
            json!({"user": {"name": "alice", "pass": "${MISSING_SECRET}"}, "n": 3})
        );
    }
}
