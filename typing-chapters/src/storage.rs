use chrono::NaiveDateTime;
use sqlx::{
    migrate::MigrateDatabase, query, query_as, sqlite::SqlitePoolOptions, FromRow, Pool, Sqlite,
    SqlitePool,
};

#[derive(Debug, FromRow)]
pub struct Selection {
    pub dict_id: String,
    chapter: i64,
}

impl Selection {
    pub fn chapter(&self) -> usize {
        usize::try_from(self.chapter).unwrap_or(0)
    }
}

#[derive(Debug, FromRow)]
pub struct ChapterRecord {
    pub chapter: i64,
    pub correct: i64,
    pub wrong: i64,
    pub skipped: i64,
    pub finished_at: NaiveDateTime,
}

impl ChapterRecord {
    pub fn accuracy(&self) -> f64 {
        let typed = self.correct + self.wrong;
        if typed == 0 {
            return 0.0;
        }
        self.correct as f64 / typed as f64
    }
}

pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn initialize(db_url: &str) -> sqlx::Result<Self> {
        let pool = if db_url.contains(":memory:") {
            // every connection to an in-memory database is a new database
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(db_url)
                .await?
        } else {
            if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
                Sqlite::create_database(db_url).await?;
            }
            SqlitePool::connect(db_url).await?
        };
        sqlx::migrate!().run(&pool).await?;
        Ok(Self { pool })
    }
}

fn to_db_chapter(chapter: usize) -> i64 {
    i64::try_from(chapter).unwrap_or(i64::MAX)
}

impl Storage {
    pub async fn selection(&self) -> sqlx::Result<Option<Selection>> {
        query_as("SELECT dict_id, chapter FROM selection WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
    }

    /// Switches dictionary and starts again from its first chapter.
    pub async fn select_dictionary(&self, dict_id: &str) -> sqlx::Result<()> {
        query(
            "
            INSERT INTO selection(id, dict_id, chapter) VALUES(1, ?, 0)
            ON CONFLICT(id) DO UPDATE SET dict_id = excluded.dict_id, chapter = 0, updated_at = CURRENT_TIMESTAMP;
            ",
        )
        .bind(dict_id)
        .execute(&self.pool)
        .await
        .map(|_| ())
    }

    /// Returns false when no dictionary has been selected yet.
    pub async fn set_chapter(&self, chapter: usize) -> sqlx::Result<bool> {
        let result = query("UPDATE selection SET chapter = ?, updated_at = CURRENT_TIMESTAMP WHERE id = 1")
            .bind(to_db_chapter(chapter))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn record_chapter(
        &self,
        dict_id: &str,
        chapter: usize,
        correct: u32,
        wrong: u32,
        skipped: u32,
    ) -> sqlx::Result<()> {
        query("INSERT INTO chapter_records(dict_id, chapter, correct, wrong, skipped) VALUES(?, ?, ?, ?, ?)")
            .bind(dict_id)
            .bind(to_db_chapter(chapter))
            .bind(correct)
            .bind(wrong)
            .bind(skipped)
            .execute(&self.pool)
            .await
            .map(|_| ())
    }

    /// Most recent first.
    pub async fn chapter_records(&self, dict_id: &str, limit: u32) -> sqlx::Result<Vec<ChapterRecord>> {
        query_as(
            "
            SELECT chapter, correct, wrong, skipped, finished_at FROM chapter_records
            WHERE dict_id = ? ORDER BY uid DESC LIMIT ?;
            ",
        )
        .bind(dict_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn storage() -> Storage {
        Storage::initialize("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn no_selection_on_fresh_database() {
        let storage = storage().await;
        assert!(storage.selection().await.unwrap().is_none());
        assert!(!storage.set_chapter(3).await.unwrap());
    }

    #[tokio::test]
    async fn selecting_a_dictionary_resets_chapter() {
        let storage = storage().await;
        storage.select_dictionary("cet4").await.unwrap();
        assert!(storage.set_chapter(7).await.unwrap());
        let selection = storage.selection().await.unwrap().unwrap();
        assert_eq!(selection.dict_id, "cet4");
        assert_eq!(selection.chapter(), 7);

        storage.select_dictionary("cet6").await.unwrap();
        let selection = storage.selection().await.unwrap().unwrap();
        assert_eq!(selection.dict_id, "cet6");
        assert_eq!(selection.chapter(), 0);
    }

    #[tokio::test]
    async fn records_are_listed_newest_first() {
        let storage = storage().await;
        storage.record_chapter("cet4", 0, 18, 2, 0).await.unwrap();
        storage.record_chapter("cet4", 1, 10, 10, 0).await.unwrap();
        storage.record_chapter("cet6", 0, 20, 0, 0).await.unwrap();

        let records = storage.chapter_records("cet4", 10).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].chapter, 1);
        assert!((records[0].accuracy() - 0.5).abs() < f64::EPSILON);
        assert!((records[1].accuracy() - 0.9).abs() < 1e-9);

        assert_eq!(storage.chapter_records("cet4", 1).await.unwrap().len(), 1);
    }
}
