use chrono::{Local, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{
    Application, ApplicationPatch, Flyer, FlyerStatus, GroceryCategory, GroceryItem, NewApplication,
    PriceEntry, Status,
};
use crate::pipeline::{SortDirection, SortKey};
use crate::store::{FetchOptions, RecordStore};

const APPLICATION_COLUMNS: &str = "id, owner_id, company, position, location, date_applied, status,
    salary, notes, job_url, posting_online, hiring_manager, created_at, updated_at";

pub struct Database {
    conn: Connection,
    path: PathBuf,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        debug!(path = %path.display(), "database opened");
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// In-memory database with the schema already created.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn,
            path: PathBuf::from(":memory:"),
        };
        db.init()?;
        Ok(db)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn init(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS applications (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                company TEXT NOT NULL,
                position TEXT NOT NULL,
                location TEXT NOT NULL,
                date_applied TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'Applied'
                    CHECK (status IN ('Applied', 'Interview', 'Offer', 'Rejected', 'Follow-up', 'archived')),
                salary TEXT,
                notes TEXT,
                job_url TEXT,
                posting_online INTEGER NOT NULL DEFAULT 1,
                hiring_manager TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS grocery_items (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                name TEXT NOT NULL,
                category TEXT NOT NULL,
                quantity INTEGER NOT NULL DEFAULT 1 CHECK (quantity >= 1),
                brand TEXT NOT NULL DEFAULT 'Any',
                checked INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS flyers (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                url TEXT NOT NULL,
                store TEXT NOT NULL,
                status TEXT NOT NULL CHECK (status IN ('processing', 'processed', 'error')),
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS prices (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                item TEXT NOT NULL,
                store TEXT NOT NULL,
                price_cents INTEGER NOT NULL,
                regular_cents INTEGER NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_applications_owner ON applications(owner_id);
            CREATE INDEX IF NOT EXISTS idx_applications_status ON applications(status);
            CREATE INDEX IF NOT EXISTS idx_grocery_owner ON grocery_items(owner_id);
            CREATE INDEX IF NOT EXISTS idx_flyers_owner ON flyers(owner_id);
            CREATE INDEX IF NOT EXISTS idx_prices_owner ON prices(owner_id);
            "#,
        )?;
        Ok(())
    }

    pub fn is_initialized(&self) -> Result<bool, StoreError> {
        let tables: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='applications'",
            [],
            |row| row.get(0),
        )?;
        Ok(tables > 0)
    }

    /// Creates the schema on first use.
    pub fn ensure_initialized(&self) -> Result<(), StoreError> {
        if !self.is_initialized()? {
            info!(path = %self.path.display(), "creating database schema");
            self.init()?;
        }
        Ok(())
    }

    /// Finds the single application whose id starts with `prefix`.
    pub fn resolve_id(&self, owner: &str, prefix: &str) -> Result<String, StoreError> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Err(StoreError::NotFound(String::new()));
        }
        let mut stmt = self.conn.prepare(
            "SELECT id FROM applications
             WHERE owner_id = ?1 AND substr(id, 1, length(?2)) = ?2
             LIMIT 2",
        )?;
        let ids = stmt
            .query_map(params![owner, prefix], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        match ids.as_slice() {
            [id] => Ok(id.clone()),
            [] => Err(StoreError::NotFound(prefix.to_string())),
            _ => Err(StoreError::AmbiguousId(prefix.to_string())),
        }
    }

    fn row_to_application(row: &rusqlite::Row) -> rusqlite::Result<Application> {
        Ok(Application {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            company: row.get(2)?,
            position: row.get(3)?,
            location: row.get(4)?,
            date_applied: row.get(5)?,
            status: row.get(6)?,
            salary: row.get(7)?,
            notes: row.get(8)?,
            job_url: row.get(9)?,
            posting_online: row.get(10)?,
            hiring_manager: row.get(11)?,
            created_at: row.get(12)?,
            updated_at: row.get(13)?,
        })
    }

    fn require(&self, owner: &str, id: &str) -> Result<Application, StoreError> {
        self.get(owner, id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    // --- Grocery list ---

    pub fn add_grocery_item(
        &self,
        owner: &str,
        name: &str,
        category: GroceryCategory,
        quantity: u32,
        brand: &str,
    ) -> Result<GroceryItem, StoreError> {
        let item = GroceryItem {
            id: Uuid::new_v4().to_string(),
            owner_id: owner.to_string(),
            name: name.to_string(),
            category,
            quantity,
            brand: brand.to_string(),
            checked: false,
            created_at: Utc::now(),
        };
        self.conn.execute(
            "INSERT INTO grocery_items (id, owner_id, name, category, quantity, brand, checked, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                item.id,
                item.owner_id,
                item.name,
                item.category,
                item.quantity,
                item.brand,
                item.checked,
                item.created_at
            ],
        )?;
        debug!(owner, id = %item.id, "grocery item added");
        Ok(item)
    }

    pub fn list_grocery_items(&self, owner: &str) -> Result<Vec<GroceryItem>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner_id, name, category, quantity, brand, checked, created_at
             FROM grocery_items WHERE owner_id = ?1 ORDER BY created_at, rowid",
        )?;
        let rows = stmt.query_map([owner], |row| {
            Ok(GroceryItem {
                id: row.get(0)?,
                owner_id: row.get(1)?,
                name: row.get(2)?,
                category: row.get(3)?,
                quantity: row.get(4)?,
                brand: row.get(5)?,
                checked: row.get(6)?,
                created_at: row.get(7)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Flips the checked flag and returns the new value.
    pub fn toggle_grocery_item(&self, owner: &str, id: &str) -> Result<bool, StoreError> {
        let changed = self.conn.execute(
            "UPDATE grocery_items SET checked = NOT checked WHERE id = ?1 AND owner_id = ?2",
            params![id, owner],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        let checked = self.conn.query_row(
            "SELECT checked FROM grocery_items WHERE id = ?1",
            [id],
            |row| row.get(0),
        )?;
        Ok(checked)
    }

    pub fn delete_grocery_item(&self, owner: &str, id: &str) -> Result<(), StoreError> {
        self.delete_owned("grocery_items", owner, id)
    }

    // --- Flyers ---

    pub fn add_flyer(&self, owner: &str, url: &str, store: &str, status: FlyerStatus) -> Result<Flyer, StoreError> {
        let flyer = Flyer {
            id: Uuid::new_v4().to_string(),
            owner_id: owner.to_string(),
            url: url.to_string(),
            store: store.to_string(),
            status,
            created_at: Utc::now(),
        };
        self.conn.execute(
            "INSERT INTO flyers (id, owner_id, url, store, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![flyer.id, flyer.owner_id, flyer.url, flyer.store, flyer.status, flyer.created_at],
        )?;
        Ok(flyer)
    }

    pub fn list_flyers(&self, owner: &str) -> Result<Vec<Flyer>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner_id, url, store, status, created_at
             FROM flyers WHERE owner_id = ?1 ORDER BY created_at, rowid",
        )?;
        let rows = stmt.query_map([owner], |row| {
            Ok(Flyer {
                id: row.get(0)?,
                owner_id: row.get(1)?,
                url: row.get(2)?,
                store: row.get(3)?,
                status: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn delete_flyer(&self, owner: &str, id: &str) -> Result<(), StoreError> {
        self.delete_owned("flyers", owner, id)
    }

    // --- Prices ---

    pub fn add_price(
        &self,
        owner: &str,
        item: &str,
        store: &str,
        price_cents: i64,
        regular_cents: i64,
    ) -> Result<PriceEntry, StoreError> {
        let entry = PriceEntry {
            id: Uuid::new_v4().to_string(),
            owner_id: owner.to_string(),
            item: item.to_string(),
            store: store.to_string(),
            price_cents,
            regular_cents,
        };
        self.conn.execute(
            "INSERT INTO prices (id, owner_id, item, store, price_cents, regular_cents, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                entry.id,
                entry.owner_id,
                entry.item,
                entry.store,
                entry.price_cents,
                entry.regular_cents,
                Utc::now()
            ],
        )?;
        Ok(entry)
    }

    pub fn list_prices(&self, owner: &str) -> Result<Vec<PriceEntry>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner_id, item, store, price_cents, regular_cents
             FROM prices WHERE owner_id = ?1 ORDER BY created_at, rowid",
        )?;
        let rows = stmt.query_map([owner], |row| {
            Ok(PriceEntry {
                id: row.get(0)?,
                owner_id: row.get(1)?,
                item: row.get(2)?,
                store: row.get(3)?,
                price_cents: row.get(4)?,
                regular_cents: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn delete_owned(&self, table: &'static str, owner: &str, id: &str) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = ?1 AND owner_id = ?2", table);
        let changed = self.conn.execute(&sql, params![id, owner])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        debug!(owner, id, table, "row deleted");
        Ok(())
    }
}

impl RecordStore for Database {
    fn fetch(&self, owner: &str, options: &FetchOptions) -> Result<Vec<Application>, StoreError> {
        let mut sql = format!("SELECT {} FROM applications WHERE owner_id = ?1", APPLICATION_COLUMNS);
        if !options.include_archived {
            sql.push_str(" AND status != 'archived'");
        }
        let collate = match options.sort {
            SortKey::Company | SortKey::Position => " COLLATE NOCASE",
            SortKey::DateApplied | SortKey::Status => "",
        };
        let direction = match options.direction {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        };
        sql.push_str(&format!(" ORDER BY {}{} {}", options.sort.column(), collate, direction));

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([owner], Self::row_to_application)?;
        let apps = rows.collect::<Result<Vec<_>, _>>()?;
        debug!(owner, count = apps.len(), include_archived = options.include_archived, "fetched applications");
        Ok(apps)
    }

    fn get(&self, owner: &str, id: &str) -> Result<Option<Application>, StoreError> {
        let sql = format!(
            "SELECT {} FROM applications WHERE id = ?1 AND owner_id = ?2",
            APPLICATION_COLUMNS
        );
        let app = self
            .conn
            .query_row(&sql, params![id, owner], Self::row_to_application)
            .optional()?;
        Ok(app)
    }

    fn create(&self, owner: &str, new: &NewApplication) -> Result<Application, StoreError> {
        let new = new.normalized();
        let now = Utc::now();
        let id = Uuid::new_v4().to_string();
        let date_applied = new.date_applied.unwrap_or_else(|| Local::now().date_naive());

        self.conn.execute(
            "INSERT INTO applications (id, owner_id, company, position, location, date_applied, status,
                 salary, notes, job_url, posting_online, hiring_manager, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13)",
            params![
                id,
                owner,
                new.company,
                new.position,
                new.location,
                date_applied,
                new.status,
                new.salary,
                new.notes,
                new.job_url,
                new.posting_online,
                new.hiring_manager,
                now
            ],
        )?;
        debug!(owner, id = %id, "application created");
        self.require(owner, &id)
    }

    fn update(&self, owner: &str, id: &str, patch: &ApplicationPatch) -> Result<Application, StoreError> {
        let merged = patch.apply_to(&self.require(owner, id)?);
        self.conn.execute(
            "UPDATE applications SET company = ?3, position = ?4, location = ?5, date_applied = ?6,
                 status = ?7, salary = ?8, notes = ?9, job_url = ?10, posting_online = ?11,
                 hiring_manager = ?12, updated_at = ?13
             WHERE id = ?1 AND owner_id = ?2",
            params![
                id,
                owner,
                merged.company,
                merged.position,
                merged.location,
                merged.date_applied,
                merged.status,
                merged.salary,
                merged.notes,
                merged.job_url,
                merged.posting_online,
                merged.hiring_manager,
                Utc::now()
            ],
        )?;
        debug!(owner, id, "application updated");
        self.require(owner, id)
    }

    fn set_status(&self, owner: &str, id: &str, status: Status) -> Result<Application, StoreError> {
        let changed = self.conn.execute(
            "UPDATE applications SET status = ?3, updated_at = ?4 WHERE id = ?1 AND owner_id = ?2",
            params![id, owner, status, Utc::now()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        debug!(owner, id, status = status.as_str(), "status changed");
        self.require(owner, id)
    }

    fn delete(&self, owner: &str, id: &str) -> Result<(), StoreError> {
        self.delete_owned("applications", owner, id)
    }
}

// --- Column conversions ---

fn parse_column<T>(value: ValueRef<'_>) -> FromSqlResult<T>
where
    T: std::str::FromStr<Err = String>,
{
    value
        .as_str()?
        .parse()
        .map_err(|e: String| FromSqlError::Other(e.into()))
}

impl ToSql for Status {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Status {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        parse_column(value)
    }
}

impl ToSql for GroceryCategory {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for GroceryCategory {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        parse_column(value)
    }
}

impl ToSql for FlyerStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for FlyerStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        parse_column(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, TimeZone};

    fn new_app(company: &str, day: u32, status: Status) -> NewApplication {
        NewApplication {
            company: company.to_string(),
            position: "Platform Engineer".to_string(),
            location: "Remote".to_string(),
            status,
            date_applied: NaiveDate::from_ymd_opt(2025, 2, day),
            ..Default::default()
        }
    }

    #[test]
    fn test_init_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        db.init().unwrap();
        assert!(db.is_initialized().unwrap());
    }

    #[test]
    fn test_open_file_db() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("apptrack.db");
        let db = Database::open(&path).unwrap();
        assert!(!db.is_initialized().unwrap());
        db.ensure_initialized().unwrap();
        assert!(db.is_initialized().unwrap());
        db.ensure_initialized().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_create_assigns_id_and_timestamps() {
        let db = Database::open_in_memory().unwrap();
        let mut input = new_app("Stripe", 3, Status::Applied);
        input.notes = Some("  ".to_string());
        let app = db.create("alice", &input).unwrap();

        assert!(Uuid::parse_str(&app.id).is_ok());
        assert_eq!(app.owner_id, "alice");
        assert_eq!(app.notes, None);
        assert_eq!(app.created_at, app.updated_at);
        assert_eq!(db.get("alice", &app.id).unwrap(), Some(app));
    }

    #[test]
    fn test_fetch_is_owner_scoped_and_hides_archived() {
        let db = Database::open_in_memory().unwrap();
        db.create("alice", &new_app("Google", 1, Status::Applied)).unwrap();
        let archived = db.create("alice", &new_app("Meta", 2, Status::Applied)).unwrap();
        db.set_status("alice", &archived.id, Status::Archived).unwrap();
        db.create("bob", &new_app("Apple", 3, Status::Offer)).unwrap();

        let visible = db.fetch("alice", &FetchOptions::default()).unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].company, "Google");

        let all = db
            .fetch(
                "alice",
                &FetchOptions {
                    include_archived: true,
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_fetch_orders_by_requested_column() {
        let db = Database::open_in_memory().unwrap();
        db.create("alice", &new_app("beta", 5, Status::Applied)).unwrap();
        db.create("alice", &new_app("Alpha", 9, Status::Applied)).unwrap();
        db.create("alice", &new_app("Gamma", 1, Status::Applied)).unwrap();

        let by_date = db.fetch("alice", &FetchOptions::default()).unwrap();
        let names: Vec<_> = by_date.iter().map(|a| a.company.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "beta", "Gamma"]);

        let by_company = db
            .fetch(
                "alice",
                &FetchOptions {
                    sort: SortKey::Company,
                    direction: SortDirection::Ascending,
                    ..Default::default()
                },
            )
            .unwrap();
        let names: Vec<_> = by_company.iter().map(|a| a.company.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "beta", "Gamma"]);
    }

    #[test]
    fn test_other_owner_cannot_touch_record() {
        let db = Database::open_in_memory().unwrap();
        let app = db.create("alice", &new_app("Google", 1, Status::Applied)).unwrap();

        assert_eq!(db.get("bob", &app.id).unwrap(), None);
        assert!(matches!(
            db.set_status("bob", &app.id, Status::Offer),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            db.update("bob", &app.id, &ApplicationPatch::default()),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(db.delete("bob", &app.id), Err(StoreError::NotFound(_))));
        assert!(db.get("alice", &app.id).unwrap().is_some());
    }

    #[test]
    fn test_update_replaces_only_given_fields() {
        let db = Database::open_in_memory().unwrap();
        let mut input = new_app("Google", 1, Status::Applied);
        input.salary = Some("$150k".to_string());
        let app = db.create("alice", &input).unwrap();

        let patch = ApplicationPatch {
            position: Some("Staff Engineer".to_string()),
            notes: Some(Some("Recruiter call Friday".to_string())),
            salary: Some(None),
            ..Default::default()
        };
        let updated = db.update("alice", &app.id, &patch).unwrap();

        assert_eq!(updated.company, "Google");
        assert_eq!(updated.position, "Staff Engineer");
        assert_eq!(updated.notes.as_deref(), Some("Recruiter call Friday"));
        assert_eq!(updated.salary, None);
        assert_eq!(updated.created_at, app.created_at);
    }

    /// Moves both timestamps into the past so a later write is measurable.
    fn backdate(db: &Database, id: &str) -> DateTime<Utc> {
        let old = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        db.conn
            .execute(
                "UPDATE applications SET created_at = ?1, updated_at = ?1 WHERE id = ?2",
                params![old, id],
            )
            .unwrap();
        old
    }

    #[test]
    fn test_update_bumps_updated_at_only() {
        let db = Database::open_in_memory().unwrap();
        let app = db.create("alice", &new_app("Google", 1, Status::Applied)).unwrap();
        let old = backdate(&db, &app.id);

        let patch = ApplicationPatch {
            location: Some("New York, NY".to_string()),
            ..Default::default()
        };
        let updated = db.update("alice", &app.id, &patch).unwrap();
        assert!(updated.updated_at > old);
        assert_eq!(updated.created_at, old);
    }

    #[test]
    fn test_set_status_bumps_updated_at_only() {
        let db = Database::open_in_memory().unwrap();
        let app = db.create("alice", &new_app("Google", 1, Status::Applied)).unwrap();
        let old = backdate(&db, &app.id);

        let moved = db.set_status("alice", &app.id, Status::Interview).unwrap();
        assert_eq!(moved.status, Status::Interview);
        assert!(moved.updated_at > old);
        assert_eq!(moved.created_at, old);

        let reread = db.get("alice", &app.id).unwrap().unwrap();
        assert_eq!(reread.updated_at, moved.updated_at);
    }

    #[test]
    fn test_delete_is_permanent() {
        let db = Database::open_in_memory().unwrap();
        let app = db.create("alice", &new_app("Google", 1, Status::Applied)).unwrap();
        db.delete("alice", &app.id).unwrap();
        assert_eq!(db.get("alice", &app.id).unwrap(), None);
        assert!(matches!(db.delete("alice", &app.id), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_resolve_id_by_prefix() {
        let db = Database::open_in_memory().unwrap();
        let app = db.create("alice", &new_app("Google", 1, Status::Applied)).unwrap();

        assert_eq!(db.resolve_id("alice", &app.id[..8]).unwrap(), app.id);
        assert!(matches!(db.resolve_id("bob", &app.id[..8]), Err(StoreError::NotFound(_))));
        assert!(matches!(db.resolve_id("alice", "   "), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_grocery_roundtrip() {
        let db = Database::open_in_memory().unwrap();
        let item = db
            .add_grocery_item("alice", "Milk", GroceryCategory::Dairy, 2, "Any")
            .unwrap();
        assert!(db.toggle_grocery_item("alice", &item.id).unwrap());
        assert!(!db.toggle_grocery_item("alice", &item.id).unwrap());
        assert!(matches!(
            db.toggle_grocery_item("bob", &item.id),
            Err(StoreError::NotFound(_))
        ));

        let items = db.list_grocery_items("alice").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category, GroceryCategory::Dairy);

        db.delete_grocery_item("alice", &item.id).unwrap();
        assert!(db.list_grocery_items("alice").unwrap().is_empty());
    }

    #[test]
    fn test_flyers_and_prices_are_owner_scoped() {
        let db = Database::open_in_memory().unwrap();
        db.add_flyer("alice", "https://walmart.com/flyer", "Walmart", FlyerStatus::Processed)
            .unwrap();
        db.add_price("alice", "Milk", "Walmart", 349, 429).unwrap();

        assert_eq!(db.list_flyers("alice").unwrap()[0].store, "Walmart");
        assert!(db.list_flyers("bob").unwrap().is_empty());
        assert_eq!(db.list_prices("alice").unwrap()[0].savings_cents(), 80);
        assert!(db.list_prices("bob").unwrap().is_empty());
    }
}
