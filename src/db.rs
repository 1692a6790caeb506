use crate::models::item::Item;
use crate::models::review::{Review, ReviewSummary};
use rusqlite::{Connection, Error, OptionalExtension};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;


/// Connection to the backing SQLite store. Cloning shares the underlying
/// connection, so one `Database` can be handed to every server worker.
#[derive(Debug, Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn new(db_path: &str) -> Result<Self, Error> {
        let conn = Connection::open(db_path)?;
        // SQLite leaves foreign keys off unless asked per connection
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        debug!("database connection established at {}", db_path);
        Ok(Database {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create the two tables if they do not exist. Both are append-only from
    /// this system's perspective; ids come from SQLite's rowid.
    pub async fn create_schema(&self) -> Result<(), Error> {
        let conn = self.conn.lock().await;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price INTEGER NOT NULL
            );
            CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                item_id INTEGER NOT NULL,
                text TEXT NOT NULL,
                grade INTEGER NOT NULL,
                FOREIGN KEY (item_id) REFERENCES items(id)
            );",
        )?;
        Ok(())
    }

    /// Insert a new item and return it with its assigned id.
    pub async fn insert_item(
        &self,
        title: &str,
        description: &str,
        price: i64,
    ) -> Result<Item, Error> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO items (title, description, price) VALUES (?, ?, ?)",
            rusqlite::params![title, description, price],
        )?;
        let id = conn.last_insert_rowid();
        debug!("item inserted: {}", id);
        Ok(Item {
            id,
            title: title.to_owned(),
            description: description.to_owned(),
            price,
        })
    }

    pub async fn get_item(&self, item_id: i64) -> Result<Option<Item>, Error> {
        let conn = self.conn.lock().await;
        conn.query_row(
            "SELECT id, title, description, price FROM items WHERE id = ?",
            [item_id],
            |row| {
                Ok(Item {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    description: row.get(2)?,
                    price: row.get(3)?,
                })
            },
        )
        .optional()
    }

    pub async fn item_exists(&self, item_id: i64) -> Result<bool, Error> {
        let conn = self.conn.lock().await;
        let found: Option<i64> = conn
            .query_row("SELECT id FROM items WHERE id = ?", [item_id], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    /// Insert a new review for an item and return it with its assigned id.
    /// Fails if the item does not exist (foreign key).
    pub async fn insert_review(
        &self,
        item_id: i64,
        text: &str,
        grade: i64,
    ) -> Result<Review, Error> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO reviews (item_id, text, grade) VALUES (?, ?, ?)",
            rusqlite::params![item_id, text, grade],
        )?;
        let id = conn.last_insert_rowid();
        debug!("review inserted: {} for item {}", id, item_id);
        Ok(Review {
            id,
            item_id,
            text: text.to_owned(),
            grade,
        })
    }

    /// The item's most recent reviews, newest first. Descending id stands in
    /// for recency; ids are rowid-backed and this workload never deletes, so
    /// they stay monotonic.
    pub async fn recent_reviews(
        &self,
        item_id: i64,
        limit: u32,
    ) -> Result<Vec<ReviewSummary>, Error> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, text, grade FROM reviews
             WHERE item_id = ?
             ORDER BY id DESC
             LIMIT ?",
        )?;
        let rows = stmt.query_map(rusqlite::params![item_id, limit], |row| {
            Ok(ReviewSummary {
                id: row.get(0)?,
                text: row.get(1)?,
                grade: row.get(2)?,
            })
        })?;

        let mut reviews = Vec::new();
        for row in rows {
            reviews.push(row?);
        }
        Ok(reviews)
    }
}
