mod resource {
    pub mod blog;
    pub mod executor;
}

#[cfg(test)]
mod tests {
    use crate::resource::{
        blog::{Article, Blog, Post},
        executor::{RecordingExecutor, init_logs},
    };
    use std::pin::pin;
    use tabula::{
        AsValue, Criteria, Database, MappingError, Parameters, SqlServerWriter, Value,
        stream::StreamExt,
    };

    fn post(num: i32, title: &str) -> Post {
        Post {
            blog_id: 1,
            post_num: num,
            title: title.into(),
            computed_value: Some(num * 10),
        }
    }

    fn post_values(post: &Post) -> [Value; 4] {
        [
            post.blog_id.as_value(),
            post.post_num.as_value(),
            post.title.clone().as_value(),
            post.computed_value.as_value(),
        ]
    }

    const POST_LABELS: [&str; 4] = ["blog_id", "post_num", "title", "computed_value"];

    fn mapping_error(error: &tabula::Error) -> Option<&MappingError> {
        error.downcast_ref::<MappingError>()
    }

    #[tokio::test]
    async fn insert_identity() {
        init_logs();
        let executor: RecordingExecutor = RecordingExecutor::new();
        let mut db = Database::new(executor);
        db.executor().respond_rows(["id"], vec![[Value::Int32(Some(11))]]);
        let blog = Blog {
            id: 0,
            name: "Rust".into(),
        };
        let id = db.table::<Blog>().unwrap().insert(&blog).await.unwrap();
        assert_eq!(id, Some(Value::Int32(Some(11))));
        assert_eq!(i32::try_from_value(id.unwrap()).unwrap(), 11);

        let executor = db.into_inner();
        assert_eq!(executor.queries.len(), 1);
        assert_eq!(
            executor.last_sql(),
            "INSERT INTO Blog (name) VALUES (@name) RETURNING id"
        );
        assert!(!executor.queries[0].params.contains("id"));
    }

    #[tokio::test]
    async fn insert_identity_not_returned() {
        init_logs();
        let executor: RecordingExecutor = RecordingExecutor::new();
        let mut db = Database::new(executor);
        let blog = Blog {
            id: 0,
            name: "Rust".into(),
        };
        let id = db.table::<Blog>().unwrap().insert(&blog).await.unwrap();
        assert_eq!(id, None);
    }

    #[tokio::test]
    async fn insert_sql_server() {
        init_logs();
        let executor = RecordingExecutor::<SqlServerWriter>::new();
        let mut db = Database::new(executor);
        db.executor().respond_rows(["id"], vec![[Value::Int32(Some(3))]]);
        let blog = Blog {
            id: 0,
            name: "Rust".into(),
        };
        let id = db.table::<Blog>().unwrap().insert(&blog).await.unwrap();
        assert_eq!(id, Some(Value::Int32(Some(3))));
        assert_eq!(
            db.executor().last_sql(),
            "INSERT INTO Blog (name) VALUES (@name); SELECT CAST(SCOPE_IDENTITY() AS INT)"
        );
    }

    #[tokio::test]
    async fn insert_composite_key() {
        init_logs();
        let executor: RecordingExecutor = RecordingExecutor::new();
        let mut db = Database::new(executor);
        db.executor().respond_affected(1);
        let id = db.table::<Post>().unwrap().insert(&post(1, "First")).await.unwrap();
        assert_eq!(id, None);
        let executor = db.executor();
        assert_eq!(
            executor.last_sql(),
            "INSERT INTO posts (blog_id, post_num, title) VALUES (@blog_id, @post_num, @title)"
        );
        assert_eq!(executor.queries[0].params.len(), 3);
    }

    #[tokio::test]
    async fn get() {
        init_logs();
        let executor: RecordingExecutor = RecordingExecutor::new();
        let mut db = Database::new(executor);
        db.executor().respond_rows(
            ["id", "name"],
            vec![[Value::Int32(Some(5)), Value::Varchar(Some("Rust".into()))]],
        );
        let blog = db.table::<Blog>().unwrap().get(5).await.unwrap();
        assert_eq!(
            blog,
            Some(Blog {
                id: 5,
                name: "Rust".into()
            })
        );
        let executor = db.executor();
        assert_eq!(
            executor.last_sql(),
            "SELECT id AS id, name AS name FROM Blog WHERE id=@id"
        );
        assert_eq!(
            executor.queries[0].params.get("id"),
            Some(&Value::Int32(Some(5)))
        );
    }

    #[tokio::test]
    async fn get_missing_and_ambiguous() {
        init_logs();
        let executor: RecordingExecutor = RecordingExecutor::new();
        let mut db = Database::new(executor);
        let found = db.table::<Blog>().unwrap().get(5).await.unwrap();
        assert_eq!(found, None);

        let key = Parameters::new().with("blog_id", 1).with("post_num", 1);
        db.executor()
            .respond_rows(POST_LABELS, vec![post_values(&post(1, "a")), post_values(&post(1, "b"))]);
        let error = db.table::<Post>().unwrap().get(key).await.unwrap_err();
        assert_eq!(
            mapping_error(&error),
            Some(&MappingError::AmbiguousResult {
                table: "posts".into()
            })
        );
        assert_eq!(
            db.executor().last_sql(),
            "SELECT blog_id AS blog_id, post_num AS post_num, title AS title, computed_value AS computed_value FROM posts WHERE blog_id=@blog_id AND post_num=@post_num"
        );
    }

    #[tokio::test]
    async fn update() {
        init_logs();
        let executor: RecordingExecutor = RecordingExecutor::new();
        let mut db = Database::new(executor);
        db.executor().respond_affected(1);
        let key = Parameters::new().with("blog_id", 1).with("post_num", 1);
        let result = db
            .table::<Post>()
            .unwrap()
            .update(key, [("title", Value::from("New title"))])
            .await
            .unwrap();
        assert_eq!(result.rows_affected, 1);
        let executor = db.executor();
        assert_eq!(
            executor.last_sql(),
            "UPDATE posts SET title=@title WHERE blog_id=@blog_id AND post_num=@post_num"
        );
        let names: Vec<_> = executor.queries[0].params.names().collect();
        assert_eq!(names, ["title", "blog_id", "post_num"]);
    }

    #[tokio::test]
    async fn update_entity() {
        init_logs();
        let executor: RecordingExecutor = RecordingExecutor::new();
        let mut db = Database::new(executor);
        db.executor().respond_affected(1);
        let result = db
            .table::<Post>()
            .unwrap()
            .update_entity(&post(4, "Edited"))
            .await
            .unwrap();
        assert_eq!(result.rows_affected, 1);
        let query = &db.executor().queries[0];
        assert_eq!(
            query.sql,
            "UPDATE posts SET title=@title WHERE blog_id=@blog_id AND post_num=@post_num"
        );
        assert_eq!(query.params.get("post_num"), Some(&Value::Int32(Some(4))));
        assert!(!query.params.contains("computed_value"));
    }

    #[tokio::test]
    async fn delete() {
        init_logs();
        let executor: RecordingExecutor = RecordingExecutor::new();
        let mut db = Database::new(executor);
        db.executor().respond_affected(1);
        db.executor().respond_affected(0);
        let result = db.table::<Blog>().unwrap().delete(5).await.unwrap();
        assert_eq!(result.rows_affected, 1);
        assert_eq!(db.executor().last_sql(), "DELETE FROM Blog WHERE id=@id");

        let result = db
            .table::<Post>()
            .unwrap()
            .delete_entity(&post(2, "Gone"))
            .await
            .unwrap();
        assert_eq!(result.rows_affected, 0);
        assert_eq!(
            db.executor().last_sql(),
            "DELETE FROM posts WHERE blog_id=@blog_id AND post_num=@post_num"
        );
    }

    #[tokio::test]
    async fn all_and_stream() {
        init_logs();
        let executor: RecordingExecutor = RecordingExecutor::new();
        let mut db = Database::new(executor);
        let posts = [post(2, "Second"), post(1, "First")];
        db.executor()
            .respond_rows(POST_LABELS, posts.iter().map(post_values).collect());
        let criteria = Criteria::new()
            .condition("blog_id = @blog")
            .bind("blog", 1)
            .order_by("post_num DESC");
        let found = db.table::<Post>().unwrap().all(criteria).await.unwrap();
        assert_eq!(found, posts);
        assert_eq!(
            db.executor().last_sql(),
            "SELECT blog_id AS blog_id, post_num AS post_num, title AS title, computed_value AS computed_value FROM posts WHERE blog_id = @blog ORDER BY post_num DESC"
        );

        db.executor()
            .respond_rows(POST_LABELS, posts.iter().map(post_values).collect());
        let mut table = db.table::<Post>().unwrap();
        let mut stream = pin!(table.stream(Criteria::new()));
        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first, posts[0]);
        assert_eq!(stream.count().await, 1);
    }

    #[tokio::test]
    async fn criteria_use_field_names() {
        init_logs();
        let executor: RecordingExecutor = RecordingExecutor::new();
        let mut db = Database::new(executor);
        let found = db
            .table::<Article>()
            .unwrap()
            .all(
                Criteria::new()
                    .condition("title LIKE @title AND price > @price")
                    .bind("title", "%rust%")
                    .bind("price", 10)
                    .order_by("published_at"),
            )
            .await
            .unwrap();
        assert!(found.is_empty());
        let query = &db.executor().queries[0];
        assert_eq!(
            query.sql,
            "SELECT Id AS id, headline AS title, PublishedAt AS published_at, Price AS price FROM articles WHERE headline LIKE @title AND Price > @price ORDER BY PublishedAt"
        );
        assert_eq!(query.params.len(), 2);
    }

    #[tokio::test]
    async fn errors() {
        init_logs();
        let executor: RecordingExecutor = RecordingExecutor::new();
        let mut db = Database::new(executor);

        // Mapping errors are raised before anything reaches the executor
        let error = db
            .table::<Post>()
            .unwrap()
            .update(1, Parameters::new().with("title", "t"))
            .await
            .unwrap_err();
        assert!(matches!(
            mapping_error(&error),
            Some(MappingError::KeyShapeMismatch { expected: 2, .. })
        ));
        let key = Parameters::new().with("blog_id", 1);
        let error = db.table::<Post>().unwrap().delete(key).await.unwrap_err();
        assert!(matches!(
            mapping_error(&error),
            Some(MappingError::IncompleteKey { .. })
        ));
        assert!(db.executor().queries.is_empty());

        db.executor().respond_error("connection lost");
        let error = db
            .table::<Blog>()
            .unwrap()
            .update(1, Parameters::new().with("name", "n"))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "While updating `Blog`");
        assert_eq!(error.root_cause().to_string(), "connection lost");
        assert!(mapping_error(&error).is_none());
    }
}
