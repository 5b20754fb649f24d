#[cfg(test)]
mod tests {
    use crate::database::entity::post::{self, Tags};
    use crate::database::postgres_repo::{PostgresPostRepository, escape_like};
    use chrono::{DateTime, Utc};
    use quire_core::domain::{NewPost, Post, PostChanges, PostFilter, timestamp};
    use quire_core::error::RepoError;
    use quire_core::ports::{BaseRepository, PostRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction, Value};

    fn model(id: i64, title: &str, at: DateTime<Utc>) -> post::Model {
        post::Model {
            id,
            title: title.to_owned(),
            content: "Content".to_owned(),
            category: Some("news".to_owned()),
            tags: Tags(vec!["rust".to_owned()]),
            created_at: at.into(),
            updated_at: at.into(),
        }
    }

    fn statements(log: &[Transaction]) -> Vec<&str> {
        log.iter()
            .flat_map(|txn| txn.statements())
            .map(|stmt| stmt.sql.as_str())
            .collect()
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let now = timestamp();

        // Mock the query expectation
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model(7, "Test Post", now)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(7).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, 7);
        assert_eq!(post.tags, vec!["rust"]);
        assert_eq!(post.created_at, now);
    }

    #[tokio::test]
    async fn test_insert_returns_stored_row() {
        let now = timestamp();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model(1, "Hello", now)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let new = NewPost::new("Hello", "Content")
            .with_category("news")
            .with_tags(["rust"]);

        let post = repo.insert(new, now).await.unwrap();
        assert_eq!(post.id, 1);
        assert_eq!(post.created_at, post.updated_at);
    }

    #[tokio::test]
    async fn test_update_in_transaction() {
        let created = timestamp();
        let later = created + chrono::Duration::seconds(5);

        let mut updated = model(3, "Hi", created);
        updated.updated_at = later.into();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model(3, "Hello", created)]])
            .append_query_results(vec![vec![updated]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let changes = PostChanges {
            title: Some("Hi".to_owned()),
            ..Default::default()
        };

        let post = repo.update(3, changes, later).await.unwrap().unwrap();
        assert_eq!(post.title, "Hi");
        assert_eq!(post.content, "Content");
        assert_eq!(post.updated_at, later);
        assert_eq!(post.created_at, created);

        // Locked read and write share a single transaction.
        let log = repo.db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let sql = statements(&log);
        assert_eq!(sql.len(), 4);
        assert_eq!(sql[0], "BEGIN");
        assert!(sql[1].starts_with("SELECT"));
        assert!(sql[1].ends_with("FOR UPDATE"));
        assert!(sql[2].starts_with(r#"UPDATE "posts""#));
        assert_eq!(sql[3], "COMMIT");
    }

    #[tokio::test]
    async fn test_update_missing_post() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let result = repo
            .update(42, PostChanges::default(), timestamp())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let result = BaseRepository::<Post, i64>::delete(&repo, 5).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_maps_rows() {
        let now = timestamp();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model(1, "First", now), model(2, "Second", now)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let posts = repo.list(&PostFilter::default()).await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].title, "Second");

        let log = repo.db.into_transaction_log();
        let sql = statements(&log);
        assert_eq!(sql.len(), 1);
        assert!(!sql[0].contains("WHERE"));
        assert!(sql[0].ends_with(r#"ORDER BY "posts"."id" ASC"#));
    }

    #[tokio::test]
    async fn test_search_matches_columns_with_escaped_term() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let posts = repo.list(&PostFilter::search("50%_Off")).await.unwrap();
        assert!(posts.is_empty());

        let log = repo.db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let stmt = &log[0].statements()[0];

        for column in [r#""title" ILIKE"#, r#""content" ILIKE"#, r#""category" ILIKE"#] {
            assert!(stmt.sql.contains(column), "missing {column} in {}", stmt.sql);
        }
        assert_eq!(stmt.sql.matches(" OR ").count(), 2);
        assert_eq!(stmt.sql.matches("ESCAPE").count(), 3);
        assert!(stmt.sql.ends_with(r#"ORDER BY "posts"."id" ASC"#));

        let pattern = Value::from("%50\\%\\_Off%".to_owned());
        let values = &stmt.values.as_ref().unwrap().0;
        assert_eq!(values.len(), 3);
        assert!(values.iter().all(|v| *v == pattern));
    }

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }
}
